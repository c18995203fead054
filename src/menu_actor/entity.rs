use std::cmp::Ordering;
use std::convert::Infallible;

use chrono::{DateTime, Utc};

use crate::actor_framework::Entity;
use crate::domain::{Food, FoodCreate, FoodPatch};

#[derive(Debug, Clone, PartialEq)]
pub enum FoodFilter {
    Id(String),
}

fn validate(name: &str, price: i64) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Food name is required".to_string());
    }
    if price <= 0 {
        return Err(format!("Invalid price: {}", price));
    }
    Ok(())
}

impl Entity for Food {
    type Id = String;
    type CreateParams = FoodCreate;
    type Patch = FoodPatch;
    type Filter = FoodFilter;
    /// The menu is listed in the order foods were added.
    type Column = Infallible;

    const TABLE: &'static str = "foods";

    fn id(&self) -> &String {
        &self.id
    }

    fn id_filter(id: String) -> FoodFilter {
        FoodFilter::Id(id)
    }

    /// Creates a menu entry.
    ///
    /// # Errors
    /// Rejects a blank name or a non-positive price.
    fn from_create_params(id: String, _created_at: DateTime<Utc>, params: FoodCreate) -> Result<Self, String> {
        validate(&params.name, params.price)?;
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            image: params.image,
        })
    }

    /// Applies the edit to the catalog only; stored orders keep their snapshot.
    fn on_update(&mut self, patch: FoodPatch) -> Result<(), String> {
        let name = patch.name.unwrap_or_else(|| self.name.clone());
        let price = patch.price.unwrap_or(self.price);
        validate(&name, price)?;
        self.name = name;
        self.price = price;
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        Ok(())
    }

    fn matches(&self, filter: &FoodFilter) -> bool {
        match filter {
            FoodFilter::Id(id) => &self.id == id,
        }
    }

    fn compare_by(&self, _other: &Self, column: Infallible) -> Ordering {
        match column {}
    }
}
