//! Order lifecycle rows: the `orders` table.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;
