//! Menu catalog rows: the `foods` table.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;
