use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shortest phone number accepted at registration, counted in digits.
pub const MIN_PHONE_DIGITS: usize = 9;

/// Represents a registered customer, keyed by phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub phone: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new customer.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub phone: String,
    pub name: Option<String>,
}

impl UserCreate {
    /// Builds the payload, dropping a blank display name.
    ///
    /// # Arguments
    /// * `phone` - Phone number, already normalized
    /// * `name` - Optional display name; whitespace-only counts as absent
    pub fn new(phone: impl Into<String>, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Self {
            phone: phone.into(),
            name,
        }
    }
}

/// Strips everything but digits from a raw phone entry.
///
/// Returns `None` when fewer than [`MIN_PHONE_DIGITS`] digits remain.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() >= MIN_PHONE_DIGITS).then_some(digits)
}
