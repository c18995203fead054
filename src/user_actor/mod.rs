//! Registration ledger rows: the `registered_users` table.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;
