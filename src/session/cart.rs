use serde::{Deserialize, Serialize};

use crate::domain::{Food, OrderItem};

/// Largest quantity a single cart line can hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// One food in the cart, with the menu data it was added with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub food_id: String,
    pub name: String,
    pub price: i64,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    fn subtotal(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

/// Staging area for an order. Never talks to the tables.
///
/// Every line has a quantity between one and [`MAX_LINE_QUANTITY`]; setting a
/// line to zero drops it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `food` with quantity 1. A food already in the cart is left as is.
    pub fn add_item(&mut self, food: &Food) {
        if self.line(&food.id).is_some() {
            return;
        }
        let image = Some(food.image.clone()).filter(|i| !i.is_empty());
        self.lines.push(CartLine {
            food_id: food.id.clone(),
            name: food.name.clone(),
            price: food.price,
            image,
            quantity: 1,
        });
    }

    /// Sets the quantity of a line; zero or less removes it, anything above
    /// [`MAX_LINE_QUANTITY`] is capped.
    pub fn update_quantity(&mut self, food_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(food_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.food_id == food_id) {
            line.quantity = u32::try_from(quantity)
                .unwrap_or(MAX_LINE_QUANTITY)
                .min(MAX_LINE_QUANTITY);
        }
    }

    pub fn remove_item(&mut self, food_id: &str) {
        self.lines.retain(|l| l.food_id != food_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, food_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.food_id == food_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total_price(&self) -> i64 {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(0, i64::saturating_add)
    }

    /// Freezes the lines into order items.
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|l| OrderItem {
                id: l.food_id.clone(),
                name: l.name.clone(),
                quantity: l.quantity,
                price: l.price,
                image: l.image.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: &str, name: &str, price: i64) -> Food {
        Food {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: format!("https://img.example/{}.jpg", id),
        }
    }

    #[test]
    fn test_add_item_is_idempotent() {
        let mut cart = Cart::new();
        let osh = food("1", "Osh (Palov)", 35000);

        cart.add_item(&osh);
        cart.add_item(&osh);
        cart.add_item(&osh);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.line("1").map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_quantity_changes_and_totals() {
        let mut cart = Cart::new();
        cart.add_item(&food("1", "Osh (Palov)", 35000));
        cart.add_item(&food("5", "Somsa", 15000));

        cart.update_quantity("1", 2);
        cart.update_quantity("5", 3);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), 115000);

        cart.update_quantity("5", 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 2);
        assert!(cart.line("5").is_none());

        cart.update_quantity("1", -4);
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), 0);
    }

    #[test]
    fn test_huge_quantity_is_capped() {
        let mut cart = Cart::new();
        cart.add_item(&food("1", "Osh (Palov)", 35000));
        cart.add_item(&food("5", "Somsa", 15000));

        cart.update_quantity("1", i64::MAX);
        cart.update_quantity("5", i64::from(u32::MAX) + 1);
        assert_eq!(cart.line("1").map(|l| l.quantity), Some(MAX_LINE_QUANTITY));
        assert_eq!(cart.total_items(), 2 * MAX_LINE_QUANTITY);
        assert_eq!(cart.total_price(), 99 * 35000 + 99 * 15000);
    }

    #[test]
    fn test_total_price_saturates() {
        let mut cart = Cart::new();
        cart.add_item(&food("1", "Oltin osh", i64::MAX / 2));
        cart.add_item(&food("2", "Kumush osh", i64::MAX / 2));
        cart.update_quantity("1", 3);
        assert_eq!(cart.total_price(), i64::MAX);
    }

    #[test]
    fn test_unknown_line_is_ignored() {
        let mut cart = Cart::new();
        cart.add_item(&food("1", "Osh (Palov)", 35000));
        cart.update_quantity("9", 4);
        cart.remove_item("9");
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_order_items_snapshot_lines() {
        let mut cart = Cart::new();
        cart.add_item(&food("2", "Lag'mon", 28000));
        cart.update_quantity("2", 2);

        let items = cart.to_order_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Lag'mon");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].subtotal(), 56000);
        assert_eq!(items[0].image.as_deref(), Some("https://img.example/2.jpg"));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(&food("1", "Osh (Palov)", 35000));
        cart.add_item(&food("4", "Shashlik", 45000));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }
}
