//! Per-viewing-session study state

pub mod study;

pub use study::{SessionError, StudySession};
