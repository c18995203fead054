use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery progress of an order. Variants are declared in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Delivering,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
    ];

    /// The single step forward, or `None` once delivered.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Delivering),
            OrderStatus::Delivering => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Label shown to customers and operators.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Qabul qilindi",
            OrderStatus::Preparing => "Tayyorlanmoqda",
            OrderStatus::Delivering => "Yetkazilmoqda",
            OrderStatus::Delivered => "Yakunlandi",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown order status: {}", s))
    }
}

/// Line item frozen at checkout. Later menu edits never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: i64,
    pub image: Option<String>,
}

impl OrderItem {
    pub fn subtotal(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

/// Represents a customer delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub total_price: i64,
    pub status: OrderStatus,
    pub address: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub total_price: i64,
    pub address: String,
    pub comment: Option<String>,
}

impl OrderCreate {
    /// Builds the payload with `total_price` summed from the items.
    pub fn from_items(
        phone: impl Into<String>,
        items: Vec<OrderItem>,
        address: impl Into<String>,
        comment: Option<String>,
    ) -> Self {
        let total_price = items.iter().map(OrderItem::subtotal).fold(0, i64::saturating_add);
        Self {
            phone: phone.into(),
            items,
            total_price,
            address: address.into(),
            comment,
        }
    }
}

/// Payload for updating an order. Only the status is mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPatch {
    pub status: OrderStatus,
}

/// Operator view ordering: open orders first, newest first within each group.
pub fn sort_for_admin(orders: &mut [Order]) {
    orders.sort_by_key(|order| (order.status.is_terminal(), Reverse(order.created_at)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: &str, name: &str, quantity: u32, price: i64) -> OrderItem {
        OrderItem {
            id: id.into(),
            name: name.into(),
            quantity,
            price,
            image: None,
        }
    }

    fn order_at(id: &str, status: OrderStatus, day: u32) -> Order {
        Order {
            id: id.into(),
            phone: "998901234567".into(),
            items: vec![],
            total_price: 0,
            status,
            address: "Chilonzor 5".into(),
            comment: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_advances_one_step_at_a_time() {
        let mut status = OrderStatus::Pending;
        let mut visited = vec![status];
        while let Some(next) = status.next() {
            assert!(next > status);
            status = next;
            visited.push(status);
        }
        assert_eq!(visited, OrderStatus::ALL.to_vec());
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_status_round_trips_through_its_name() {
        assert_eq!("delivering".parse::<OrderStatus>(), Ok(OrderStatus::Delivering));
        assert!("cancelled".parse::<OrderStatus>().is_err());
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn test_total_price_sums_items() {
        let create = OrderCreate::from_items(
            "998901234567",
            vec![item("1", "Osh (Palov)", 2, 35000), item("5", "Somsa", 3, 15000)],
            "Yunusobod 12",
            None,
        );
        assert_eq!(create.total_price, 115000);
    }

    #[test]
    fn test_admin_ordering_puts_open_orders_first() {
        let mut orders = vec![
            order_at("old_done", OrderStatus::Delivered, 1),
            order_at("old_open", OrderStatus::Pending, 2),
            order_at("new_done", OrderStatus::Delivered, 4),
            order_at("new_open", OrderStatus::Delivering, 3),
        ];
        sort_for_admin(&mut orders);
        let ids: Vec<_> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["new_open", "old_open", "new_done", "old_done"]);
    }
}
