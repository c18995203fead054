use thiserror::Error;

use crate::session::AuthError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Customer is not registered")]
    NotRegistered,
    #[error("Delivery address is required")]
    EmptyAddress,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),
    #[error("Order query failed: {0}")]
    QueryFailed(String),
    #[error("Status update failed: {0}")]
    StatusUpdateFailed(String),
    #[error("Cleanup failed: {0}")]
    CleanupFailed(String),
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
}

impl OrderError {
    /// Localized text shown to the customer or operator.
    pub fn user_message(&self) -> &'static str {
        match self {
            OrderError::NotRegistered => "Avval ro'yxatdan o'ting",
            OrderError::EmptyAddress => "Yetkazib berish manzilini kiriting",
            OrderError::EmptyCart => "Savatcha bo'sh",
            OrderError::NotFound(_) => "Buyurtma topilmadi",
            OrderError::SubmissionFailed(_) => "Buyurtmani yuborishda xatolik yuz berdi",
            OrderError::QueryFailed(_) | OrderError::CleanupFailed(_) => "Xatolik yuz berdi, qaytadan urinib ko'ring",
            OrderError::StatusUpdateFailed(_) => "Holatni yangilashda xatolik yuz berdi",
            OrderError::Unauthorized(e) => e.user_message(),
        }
    }
}
