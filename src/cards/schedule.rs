//! Revision scheduling for flashcard collections
//!
//! Interval-based due dates with a lock policy: a collection that goes
//! unreviewed for 24 hours past its due date is locked for one day.
//! There is no time-based unlock; a locked collection stays locked
//! until a review is completed.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::models::{FlashcardCollection, RevisionSchedule};

/// Whether a schedule is due for review at `now`
pub fn is_due(schedule: &RevisionSchedule, now: DateTime<Utc>) -> bool {
    schedule.next_revision <= now
}

/// Distance to the next revision, as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    NoSchedule,
    Overdue,
    DueToday,
    InDays(i64),
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStatus::NoSchedule => write!(f, "No schedule"),
            DueStatus::Overdue => write!(f, "Overdue!"),
            DueStatus::DueToday => write!(f, "Due today"),
            DueStatus::InDays(days) => write!(f, "{} days", days),
        }
    }
}

/// Days until the next revision, rounded up
pub fn days_until(schedule: Option<&RevisionSchedule>, now: DateTime<Utc>) -> DueStatus {
    let Some(schedule) = schedule else {
        return DueStatus::NoSchedule;
    };

    let millis = (schedule.next_revision - now).num_milliseconds();
    let days = (millis as f64 / (24.0 * 60.0 * 60.0 * 1000.0)).ceil() as i64;

    if days < 0 {
        DueStatus::Overdue
    } else if days == 0 {
        DueStatus::DueToday
    } else {
        DueStatus::InDays(days)
    }
}

/// Schedule after a completed review at `now`; the interval is preserved
pub fn advance(schedule: &RevisionSchedule, now: DateTime<Utc>) -> RevisionSchedule {
    RevisionSchedule {
        interval: schedule.interval,
        next_revision: now + Duration::days(i64::from(schedule.interval)),
        last_revised: Some(now),
    }
}

/// A due collection locks once the 24-hour grace period after its due
/// date has passed without a completed review
pub fn should_lock(collection: &FlashcardCollection, now: DateTime<Utc>) -> bool {
    let Some(schedule) = collection.revision_schedule.as_ref() else {
        return false;
    };

    is_due(schedule, now)
        && now >= schedule.next_revision + Duration::hours(24)
        && !collection.is_locked
}

/// Lock a collection for one day starting at `now`
pub fn lock(collection: &mut FlashcardCollection, now: DateTime<Utc>) {
    collection.is_locked = true;
    collection.locked_until = Some(now + Duration::days(1));
}
