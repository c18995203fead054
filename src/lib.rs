//! # Bozorfood
//!
//! Order lifecycle and sales statistics for a food-delivery storefront.
//!
//! ## Building Blocks
//!
//! - **Tables** - one actor per table, reached through a cloneable handle → [`actor_framework::ResourceActor`], [`actor_framework::ResourceClient`]
//!     - `registered_users` → [`domain::RegisteredUser`]
//!     - `orders` → [`domain::Order`]
//!     - `foods` → [`domain::Food`]
//! - **Clients** - domain operations over the tables, instrumented with `tracing`
//!     - **Registration ledger** → [`clients::UserClient`]
//!     - **Order lifecycle** → [`clients::OrderClient`]
//!     - **Menu** → [`clients::MenuClient`]
//! - **Statistics** - pure aggregation over the order set → [`statistics::OrderStats`]
//! - **Session state** - cart, customer and admin guard, owned by the caller → [`session`]
//! - **System** - startup, admin gating, cleanup job and shutdown → [`app_system::Storefront`]
//!
//! ## Order Lifecycle
//!
//! ```text
//! pending -> preparing -> delivering -> delivered
//! ```
//!
//! Orders only move forward through [`clients::OrderClient::advance_to_next`].
//! Delivered orders are removed by the periodic cleanup job.
//!
//! ## Example Usage
//!
//! ```ignore
//! let storefront = Storefront::start(&config).await?;
//!
//! let mut customer = CustomerSession::new();
//! storefront.register(&mut customer, "+998 90 123 45 67", Some("Aziz")).await?;
//!
//! let mut cart = Cart::new();
//! cart.add_item(&osh);
//! let order = storefront.checkout(&customer, &mut cart, "Chilonzor 5", None).await?;
//!
//! storefront.shutdown().await?;
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod menu_actor;
pub mod order_actor;
pub mod session;
pub mod statistics;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
