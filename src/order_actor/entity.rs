use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderPatch, OrderStatus};

/// Equality predicates over `orders`.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFilter {
    Id(String),
    Phone(String),
    Status(OrderStatus),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderColumn {
    CreatedAt,
}

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = OrderPatch;
    type Filter = OrderFilter;
    type Column = OrderColumn;

    const TABLE: &'static str = "orders";

    fn id(&self) -> &String {
        &self.id
    }

    fn id_filter(id: String) -> OrderFilter {
        OrderFilter::Id(id)
    }

    /// Stores the checkout snapshot as submitted.
    ///
    /// The order always starts `pending`. Address and item checks belong to
    /// the checkout boundary; the stored total is the one the customer saw.
    fn from_create_params(id: String, created_at: DateTime<Utc>, params: OrderCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            phone: params.phone,
            items: params.items,
            total_price: params.total_price,
            status: OrderStatus::Pending,
            address: params.address,
            comment: params.comment,
            created_at,
        })
    }

    /// Writes the status as given; single-step progression is enforced by
    /// `OrderClient::advance_to_next`, not here.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        self.status = patch.status;
        Ok(())
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::Id(id) => &self.id == id,
            OrderFilter::Phone(phone) => &self.phone == phone,
            OrderFilter::Status(status) => &self.status == status,
        }
    }

    fn compare_by(&self, other: &Self, column: OrderColumn) -> Ordering {
        match column {
            OrderColumn::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
