use std::time::Duration;

use tracing::{error, info, instrument};

use crate::clients::OrderClient;
use crate::order_actor::OrderError;

/// Deletes every delivered order and returns how many were removed.
#[instrument(skip(order_client))]
pub async fn cleanup_delivered_orders(order_client: &OrderClient) -> Result<usize, OrderError> {
    info!("Starting cleanup of delivered orders");
    let deleted = order_client.delete_delivered().await.map_err(|e| {
        error!(error = %e, "Cleanup failed");
        e
    })?;
    info!(deleted_count = deleted.len(), "Delivered orders deleted");
    Ok(deleted.len())
}

/// Runs the cleanup every `interval`, starting immediately.
///
/// A failed pass is logged and the job waits for the next tick; it never retries.
pub async fn run_cleanup_job(order_client: OrderClient, interval: Duration) {
    let mut timer = tokio::time::interval(interval);
    loop {
        timer.tick().await;
        let _ = cleanup_delivered_orders(&order_client).await;
    }
}
