use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, Query, ResourceClient};
use crate::domain::{Food, FoodCreate, FoodPatch};
use crate::menu_actor::{FoodFilter, MenuError};

/// Client for the menu catalog.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<Food>,
}

impl_basic_client!(MenuClient, Food, MenuError => DatabaseError, food);

fn menu_error(e: FrameworkError) -> MenuError {
    match e {
        FrameworkError::Rejected(reason) => MenuError::Invalid(reason),
        other => MenuError::DatabaseError(other.to_string()),
    }
}

impl MenuClient {
    /// The catalog in the order foods were added.
    #[instrument(skip(self))]
    pub async fn list_foods(&self) -> Result<Vec<Food>, MenuError> {
        debug!("Sending request");
        self.inner.select(Query::all()).await.map_err(menu_error)
    }

    #[instrument(skip(self, food), fields(food_name = %food.name, price = food.price))]
    pub async fn add_food(&self, food: FoodCreate) -> Result<Food, MenuError> {
        debug!("Sending request");
        let food = self.inner.insert(food).await.map_err(menu_error)?;
        info!(food_id = %food.id, "Food added");
        Ok(food)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_food(&self, id: &str, patch: FoodPatch) -> Result<Food, MenuError> {
        debug!("Sending request");
        let updated = self
            .inner
            .update(FoodFilter::Id(id.to_string()), patch)
            .await
            .map_err(menu_error)?;
        if updated == 0 {
            return Err(MenuError::NotFound(id.to_string()));
        }
        self.get_food(id.to_string())
            .await?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn remove_food(&self, id: &str) -> Result<Food, MenuError> {
        debug!("Sending request");
        let mut removed = self
            .inner
            .delete(FoodFilter::Id(id.to_string()))
            .await
            .map_err(menu_error)?;
        let food = removed.pop().ok_or_else(|| MenuError::NotFound(id.to_string()))?;
        info!("Food removed");
        Ok(food)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::domain::default_catalog;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    async fn start_menu() -> MenuClient {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || counter.fetch_add(1, Ordering::SeqCst).to_string();
        let (actor, inner) = ResourceActor::<Food>::new(10, next_id);
        tokio::spawn(actor.run());
        let client = MenuClient::new(inner);
        for food in default_catalog() {
            client.add_food(food).await.unwrap();
        }
        client
    }

    #[tokio::test]
    async fn test_catalog_keeps_insertion_order() {
        let client = start_menu().await;
        let foods = client.list_foods().await.unwrap();

        assert_eq!(foods.len(), 6);
        assert_eq!(foods[0].id, "1");
        assert_eq!(foods[0].name, "Osh (Palov)");
        assert_eq!(foods[4].name, "Somsa");
        assert_eq!(foods[4].price, 15000);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let client = start_menu().await;

        let patch = FoodPatch { price: Some(40000), ..Default::default() };
        let food = client.update_food("1", patch).await.unwrap();
        assert_eq!(food.price, 40000);
        assert_eq!(food.name, "Osh (Palov)");

        let removed = client.remove_food("3").await.unwrap();
        assert_eq!(removed.name, "Manti");
        assert_eq!(client.list_foods().await.unwrap().len(), 5);

        assert_eq!(client.remove_food("3").await, Err(MenuError::NotFound("3".to_string())));
    }

    #[tokio::test]
    async fn test_invalid_food_is_rejected() {
        let client = start_menu().await;

        let result = client.add_food(FoodCreate::new("Norin", "", 0, "")).await;
        assert!(matches!(result, Err(MenuError::Invalid(_))));

        let patch = FoodPatch { name: Some("  ".into()), ..Default::default() };
        assert!(matches!(client.update_food("2", patch).await, Err(MenuError::Invalid(_))));
        assert_eq!(client.get_food("2".to_string()).await.unwrap().unwrap().name, "Lag'mon");
    }
}
