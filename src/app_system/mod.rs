//! System orchestration, configuration, startup and shutdown.

pub mod cleanup;
pub mod config;
pub mod logging;
pub mod storefront;

pub use cleanup::*;
pub use config::*;
pub use logging::*;
pub use storefront::*;
