//! Client-side state containers.
//!
//! Each container is owned by the application and passed into the operations
//! that need it. Surviving a restart is an explicit [`SessionStore`] save/load.

pub mod admin;
pub mod cart;
pub mod customer;
pub mod store;

pub use admin::*;
pub use cart::*;
pub use customer::*;
pub use store::*;
