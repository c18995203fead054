use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceActor;
use crate::app_system::{run_cleanup_job, Config};
use crate::clients::{MenuClient, OrderClient, UserClient};
use crate::domain::{
    default_catalog, normalize_phone, sort_for_admin, Food, FoodCreate, FoodPatch, Order, OrderCreate, OrderStatus,
    RegisteredUser,
};
use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;
use crate::session::{AdminGuard, Cart, CustomerSession};
use crate::statistics::OrderStats;
use crate::user_actor::UserError;

/// The running storefront: one actor per table, the clients wired to them,
/// and the optional cleanup job.
///
/// Client state (customer, cart, admin guard) is not held here; callers own
/// those containers and pass them in.
pub struct Storefront {
    pub user_client: UserClient,
    pub order_client: OrderClient,
    pub menu_client: MenuClient,
    handles: Vec<JoinHandle<()>>,
    cleanup_handle: Option<JoinHandle<()>>,
}

impl Storefront {
    /// Starts every table, seeds the menu and schedules the cleanup job.
    #[instrument(name = "storefront", skip(config))]
    pub async fn start(config: &Config) -> Result<Self, MenuError> {
        info!("Starting storefront");
        let mut handles = Vec::new();

        let (user_actor, users) =
            ResourceActor::<RegisteredUser>::new(config.channel_buffer, || uuid::Uuid::new_v4().to_string());
        handles.push(tokio::spawn(user_actor.run()));

        let (order_actor, orders) =
            ResourceActor::<Order>::new(config.channel_buffer, || uuid::Uuid::new_v4().to_string());
        handles.push(tokio::spawn(order_actor.run()));

        let food_id_counter = Arc::new(AtomicU64::new(1));
        let next_food_id = move || food_id_counter.fetch_add(1, Ordering::SeqCst).to_string();
        let (menu_actor, foods) = ResourceActor::<Food>::new(config.channel_buffer, next_food_id);
        handles.push(tokio::spawn(menu_actor.run()));

        let user_client = UserClient::new(users);
        let order_client = OrderClient::new(orders);
        let menu_client = MenuClient::new(foods);

        for food in default_catalog() {
            menu_client.add_food(food).await?;
        }

        let cleanup_handle = config.cleanup_interval.map(|interval| {
            info!(interval_secs = interval.as_secs(), "Scheduling delivered-order cleanup");
            tokio::spawn(run_cleanup_job(order_client.clone(), interval))
        });

        info!("Storefront started");
        Ok(Self {
            user_client,
            order_client,
            menu_client,
            handles,
            cleanup_handle,
        })
    }

    // --- Customer operations ---

    /// Registers the phone and signs the customer in.
    #[instrument(skip(self, customer, name))]
    pub async fn register(
        &self,
        customer: &mut CustomerSession,
        raw_phone: &str,
        name: Option<&str>,
    ) -> Result<RegisteredUser, UserError> {
        let phone = normalize_phone(raw_phone).ok_or_else(|| {
            warn!("Phone number too short");
            UserError::InvalidPhone(raw_phone.to_string())
        })?;
        let user = self.user_client.register_user(&phone, name).await?;
        customer.set_user(user.clone());
        Ok(user)
    }

    /// Turns the cart into an order.
    ///
    /// The cart is cleared only after the order is stored; on failure it is
    /// left untouched so the customer can retry.
    #[instrument(skip(self, customer, cart, address, comment), fields(items = cart.lines().len()))]
    pub async fn checkout(
        &self,
        customer: &CustomerSession,
        cart: &mut Cart,
        address: &str,
        comment: Option<&str>,
    ) -> Result<Order, OrderError> {
        let phone = customer.phone().ok_or(OrderError::NotRegistered)?;
        let address = address.trim();
        if address.is_empty() {
            return Err(OrderError::EmptyAddress);
        }
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let comment = comment.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string);
        let payload = OrderCreate::from_items(phone, cart.to_order_items(), address, comment);
        let order = self.order_client.create_order(payload).await?;
        cart.clear();
        Ok(order)
    }

    /// The signed-in customer's orders; empty when nobody is signed in.
    pub async fn my_orders(&self, customer: &CustomerSession) -> Result<Vec<Order>, OrderError> {
        self.order_client.list_orders_by_phone(customer.phone()).await
    }

    // --- Administrator operations ---

    /// All orders, open ones first.
    pub async fn admin_orders(&self, guard: &AdminGuard, now: DateTime<Utc>) -> Result<Vec<Order>, OrderError> {
        guard.require(now)?;
        let mut orders = self.order_client.list_all_orders().await?;
        sort_for_admin(&mut orders);
        Ok(orders)
    }

    /// Moves one order to its next status; `None` when it was already delivered.
    #[instrument(skip(self, guard, now))]
    pub async fn admin_advance(
        &self,
        guard: &AdminGuard,
        now: DateTime<Utc>,
        order_id: &str,
    ) -> Result<Option<OrderStatus>, OrderError> {
        guard.require(now)?;
        let order = self
            .order_client
            .get_order(order_id.to_string())
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        self.order_client.advance_to_next(&order).await
    }

    /// Writes an arbitrary status, bypassing single-step progression.
    pub async fn admin_set_status(
        &self,
        guard: &AdminGuard,
        now: DateTime<Utc>,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        guard.require(now)?;
        self.order_client.advance_status(order_id, status).await
    }

    pub async fn admin_stats<Tz: TimeZone>(&self, guard: &AdminGuard, now: &DateTime<Tz>) -> Result<OrderStats, OrderError> {
        guard.require(now.with_timezone(&Utc))?;
        self.order_client.order_stats(now).await
    }

    pub async fn admin_add_food(&self, guard: &AdminGuard, now: DateTime<Utc>, food: FoodCreate) -> Result<Food, MenuError> {
        guard.require(now)?;
        self.menu_client.add_food(food).await
    }

    pub async fn admin_update_food(
        &self,
        guard: &AdminGuard,
        now: DateTime<Utc>,
        food_id: &str,
        patch: FoodPatch,
    ) -> Result<Food, MenuError> {
        guard.require(now)?;
        self.menu_client.update_food(food_id, patch).await
    }

    pub async fn admin_remove_food(&self, guard: &AdminGuard, now: DateTime<Utc>, food_id: &str) -> Result<Food, MenuError> {
        guard.require(now)?;
        self.menu_client.remove_food(food_id).await
    }

    /// Stops the cleanup job, closes every table and waits for the actors.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront");

        if let Some(cleanup) = self.cleanup_handle {
            cleanup.abort();
            let _ = cleanup.await;
        }

        // Actors stop once every client handle is gone.
        drop(self.user_client);
        drop(self.order_client);
        drop(self.menu_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete");
        Ok(())
    }
}
