//! User profile record and sign-in validation

use regex::Regex;

use crate::cards::models::User;

use super::kv::{KeyValueStore, Result, StoreError};

/// Record key for the serialized user profile
pub const USER_KEY: &str = "flashcard_user";

pub fn validate_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    re.is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    let re = Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").unwrap();
    re.is_match(phone)
}

pub struct ProfileStore {
    kv: Box<dyn KeyValueStore>,
}

impl ProfileStore {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn load(&self) -> Result<Option<User>> {
        match self.kv.get(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Create and persist a profile from sign-in input
    pub fn sign_in(&mut self, email: &str, phone: &str) -> Result<User> {
        let user = User::new(email.to_string(), phone.to_string());
        self.save(&user)?;
        Ok(user)
    }

    /// Persist a profile; email and phone are validated on every write
    pub fn save(&mut self, user: &User) -> Result<()> {
        if !validate_email(&user.email) {
            return Err(StoreError::InvalidProfile(
                "invalid email format".to_string(),
            ));
        }
        if !validate_phone(&user.phone) {
            return Err(StoreError::InvalidProfile(
                "invalid phone number format".to_string(),
            ));
        }
        let raw = serde_json::to_string_pretty(user)?;
        self.kv.set(USER_KEY, &raw)
    }

    /// Remove the stored profile (logout)
    pub fn clear(&mut self) -> Result<()> {
        self.kv.remove(USER_KEY)
    }
}
