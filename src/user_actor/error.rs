use thiserror::Error;

/// Errors that can occur during registration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("Phone already registered: {0}")]
    AlreadyRegistered(String),
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("Registration failed: {0}")]
    RegistrationFailed(String),
}

impl UserError {
    /// Localized text shown to the customer.
    pub fn user_message(&self) -> &'static str {
        match self {
            UserError::AlreadyRegistered(_) => "Bu telefon raqam allaqachon ro'yxatdan o'tgan",
            UserError::InvalidPhone(_) => "Telefon raqamni to'liq kiriting",
            UserError::RegistrationFailed(_) => "Ro'yxatdan o'tishda xatolik yuz berdi",
        }
    }
}
