//! Client handles over the table actors. Each wraps a `ResourceClient` and
//! turns table errors into its domain error.

#[macro_use]
mod macros;

pub mod menu_client;
pub mod order_client;
pub mod user_client;

pub use menu_client::MenuClient;
pub use order_client::OrderClient;
pub use user_client::UserClient;
