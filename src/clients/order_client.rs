use chrono::{DateTime, TimeZone};
use tracing::{debug, error, info, instrument};

use crate::actor_framework::{Query, ResourceClient};
use crate::domain::{Order, OrderCreate, OrderPatch, OrderStatus};
use crate::order_actor::{OrderColumn, OrderError, OrderFilter};
use crate::statistics::OrderStats;

/// Client for the order lifecycle.
///
/// Nothing is cached: every listing and every statistics call re-reads the
/// `orders` table, so callers simply re-fetch after a status change.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, OrderError => QueryFailed, order);

impl OrderClient {
    /// Persists a checkout snapshot as a new `pending` order.
    #[instrument(skip(self, order), fields(phone = %order.phone, total_price = order.total_price))]
    pub async fn create_order(&self, order: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.insert(order).await.map_err(|e| {
            error!(error = %e, "Order submission failed");
            OrderError::SubmissionFailed(e.to_string())
        })?;
        info!(order_id = %order.id, "Order created");
        Ok(order)
    }

    /// Every order, newest first.
    #[instrument(skip(self))]
    pub async fn list_all_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner
            .select(Query::all().descending(OrderColumn::CreatedAt))
            .await
            .map_err(|e| OrderError::QueryFailed(e.to_string()))
    }

    /// One customer's orders, newest first. An absent or empty phone
    /// returns nothing without touching the table.
    #[instrument(skip(self))]
    pub async fn list_orders_by_phone(&self, phone: Option<&str>) -> Result<Vec<Order>, OrderError> {
        let Some(phone) = phone.filter(|p| !p.is_empty()) else {
            debug!("No phone given");
            return Ok(Vec::new());
        };

        debug!("Sending request");
        let query = Query::all()
            .filter(OrderFilter::Phone(phone.to_string()))
            .descending(OrderColumn::CreatedAt);
        self.inner
            .select(query)
            .await
            .map_err(|e| OrderError::QueryFailed(e.to_string()))
    }

    /// Writes `status` to one order.
    ///
    /// This is a plain update: it does not check that `status` follows the
    /// current one. Concurrent writers race and the last write wins.
    #[instrument(skip(self))]
    pub async fn advance_status(&self, order_id: &str, status: OrderStatus) -> Result<(), OrderError> {
        debug!("Sending request");
        let updated = self
            .inner
            .update(OrderFilter::Id(order_id.to_string()), OrderPatch { status })
            .await
            .map_err(|e| {
                error!(error = %e, "Status update failed");
                OrderError::StatusUpdateFailed(e.to_string())
            })?;

        if updated == 0 {
            return Err(OrderError::NotFound(order_id.to_string()));
        }
        info!("Order status updated");
        Ok(())
    }

    /// Moves `order` one step along its lifecycle.
    ///
    /// Returns the new status, or `None` without issuing a write when the
    /// order is already delivered.
    #[instrument(skip(self, order), fields(order_id = %order.id, status = %order.status))]
    pub async fn advance_to_next(&self, order: &Order) -> Result<Option<OrderStatus>, OrderError> {
        let Some(next) = order.status.next() else {
            debug!("Order already delivered");
            return Ok(None);
        };
        self.advance_status(&order.id, next).await?;
        Ok(Some(next))
    }

    /// Recomputes statistics from a fresh read of every order.
    #[instrument(skip(self, now))]
    pub async fn order_stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<OrderStats, OrderError> {
        debug!("Sending request");
        let orders = self
            .inner
            .select(Query::all())
            .await
            .map_err(|e| OrderError::QueryFailed(e.to_string()))?;
        Ok(OrderStats::compute(&orders, now))
    }

    /// Removes every delivered order and returns what was removed.
    #[instrument(skip(self))]
    pub async fn delete_delivered(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner
            .delete(OrderFilter::Status(OrderStatus::Delivered))
            .await
            .map_err(|e| OrderError::CleanupFailed(e.to_string()))
    }
}
