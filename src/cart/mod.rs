//! # Cart
//!
//! Items picked from a single canteen, in the order they were first added.
//!
//! The cart's canteen is `None` exactly when it has no lines. Every method keeps that true.

pub mod error;

pub use error::CartError;

use crate::model::{CanteenId, MenuItem, MenuItemId, Order, OrderLine};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub unit_price: u32,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> u64 {
        u64::from(self.unit_price) * u64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    canteen_id: Option<CanteenId>,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canteen_id(&self) -> Option<&CanteenId> {
        self.canteen_id.as_ref()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn quantity_of(&self, id: &MenuItemId) -> u32 {
        self.line(id).map_or(0, |l| l.quantity)
    }

    /// Adds one unit of `item`.
    ///
    /// An empty cart adopts the item's canteen. An item from a different canteen is refused
    /// with [`CartError::CanteenConflict`] and the cart is left as it was.
    pub fn add_item(&mut self, item: &MenuItem) -> Result<(), CartError> {
        self.check_canteen(&item.canteen_id)?;
        self.add_units(&item.canteen_id, &item.id, &item.name, item.price, 1);
        debug!(item = %item.id, quantity = self.quantity_of(&item.id), "Added to cart");
        Ok(())
    }

    /// Empties the cart and adds `item`. Use after the user confirmed a canteen conflict.
    pub fn switch_canteen(&mut self, item: &MenuItem) {
        info!(canteen_id = %item.canteen_id, "Switching cart canteen");
        self.clear();
        self.add_units(&item.canteen_id, &item.id, &item.name, item.price, 1);
    }

    /// Deletes the line for `id`. No-op when the item is not in the cart.
    pub fn remove_item(&mut self, id: &MenuItemId) {
        self.lines.retain(|l| &l.menu_item_id != id);
        if self.lines.is_empty() {
            self.canteen_id = None;
        }
    }

    /// Sets a line's quantity exactly. Zero or negative removes the line. No-op when the item
    /// is not in the cart.
    pub fn set_quantity(&mut self, id: &MenuItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|l| &l.menu_item_id == id) {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.canteen_id = None;
    }

    pub fn total_price(&self) -> u64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Copies the lines into order lines. The result shares nothing with the cart.
    pub fn snapshot(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|l| OrderLine {
                menu_item_id: l.menu_item_id.clone(),
                name: l.name.clone(),
                unit_price: l.unit_price,
                quantity: l.quantity,
            })
            .collect()
    }

    /// Puts a past order's lines back in the cart with their quantities.
    ///
    /// Lines merge into a cart for the same canteen. A cart holding another canteen is
    /// refused with [`CartError::CanteenConflict`] unless `confirm_switch`, in which case it
    /// is cleared first.
    pub fn reorder(&mut self, order: &Order, confirm_switch: bool) -> Result<(), CartError> {
        if let Err(conflict) = self.check_canteen(&order.canteen_id) {
            if !confirm_switch {
                return Err(conflict);
            }
            self.clear();
        }
        for line in order.lines.iter().filter(|l| l.quantity > 0) {
            self.add_units(
                &order.canteen_id,
                &line.menu_item_id,
                &line.name,
                line.unit_price,
                line.quantity,
            );
        }
        info!(order_id = %order.id, lines = self.lines.len(), "Reordered into cart");
        Ok(())
    }

    fn line(&self, id: &MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.menu_item_id == id)
    }

    fn check_canteen(&self, requested: &CanteenId) -> Result<(), CartError> {
        match &self.canteen_id {
            Some(current) if current != requested => Err(CartError::CanteenConflict {
                current: current.clone(),
                requested: requested.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn add_units(&mut self, canteen_id: &CanteenId, id: &MenuItemId, name: &str, unit_price: u32, units: u32) {
        if self.canteen_id.is_none() {
            self.canteen_id = Some(canteen_id.clone());
        }
        match self.lines.iter_mut().find(|l| &l.menu_item_id == id) {
            Some(line) => line.quantity = line.quantity.saturating_add(units),
            None => self.lines.push(CartLine {
                menu_item_id: id.clone(),
                name: name.to_string(),
                unit_price,
                quantity: units,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerRef, UserId};

    fn item(id: &str, canteen: &str, price: u32) -> MenuItem {
        MenuItem::new(id, canteen, format!("Item {id}"), price, "Snacks")
    }

    fn assert_canteen_invariant(cart: &Cart) {
        assert_eq!(cart.canteen_id().is_none(), cart.is_empty());
    }

    #[test]
    fn test_quantities_count_repeated_adds() {
        let mut cart = Cart::new();
        let a = item("a", "c1", 100);
        let b = item("b", "c1", 50);
        for it in [&a, &b, &a, &a, &b] {
            cart.add_item(it).unwrap();
        }
        assert_eq!(cart.quantity_of(&a.id), 3);
        assert_eq!(cart.quantity_of(&b.id), 2);
        assert_eq!(cart.lines()[0].menu_item_id, a.id);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_total_price_example() {
        let mut cart = Cart::new();
        let a = item("a", "c1", 100);
        cart.add_item(&a).unwrap();
        cart.add_item(&a).unwrap();
        cart.add_item(&item("b", "c1", 50)).unwrap();
        assert_eq!(cart.total_price(), 250);

        let c = item("c", "c1", 70);
        cart.add_item(&c).unwrap();
        cart.remove_item(&c.id);
        assert_eq!(cart.total_price(), 250);
    }

    #[test]
    fn test_other_canteen_conflicts_without_mutation() {
        let mut cart = Cart::new();
        cart.add_item(&item("a", "c1", 100)).unwrap();
        let before = cart.clone();

        let err = cart.add_item(&item("x", "c2", 10)).unwrap_err();
        assert_eq!(
            err,
            CartError::CanteenConflict {
                current: "c1".into(),
                requested: "c2".into()
            }
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_switch_canteen_replaces_contents() {
        let mut cart = Cart::new();
        cart.add_item(&item("a", "c1", 100)).unwrap();
        let x = item("x", "c2", 10);
        cart.switch_canteen(&x);
        assert_eq!(cart.canteen_id(), Some(&CanteenId::from("c2")));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(&x.id), 1);
    }

    #[test]
    fn test_set_quantity_zero_matches_remove() {
        let a = item("a", "c1", 100);
        let b = item("b", "c1", 50);
        let mut one = Cart::new();
        one.add_item(&a).unwrap();
        one.add_item(&b).unwrap();
        let mut two = one.clone();

        one.set_quantity(&a.id, 0);
        two.remove_item(&a.id);
        assert_eq!(one, two);

        one.set_quantity(&b.id, -3);
        assert!(one.is_empty());
        assert_canteen_invariant(&one);
    }

    #[test]
    fn test_set_quantity_exact_and_missing_item() {
        let mut cart = Cart::new();
        let a = item("a", "c1", 100);
        cart.add_item(&a).unwrap();
        cart.set_quantity(&a.id, 4);
        assert_eq!(cart.total_price(), 400);
        cart.set_quantity(&MenuItemId::from("ghost"), 2);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_invariant_across_operations() {
        let mut cart = Cart::new();
        assert_canteen_invariant(&cart);
        let a = item("a", "c1", 100);
        cart.add_item(&a).unwrap();
        assert_canteen_invariant(&cart);
        cart.remove_item(&a.id);
        assert_canteen_invariant(&cart);
        cart.add_item(&a).unwrap();
        cart.clear();
        assert_canteen_invariant(&cart);
        cart.remove_item(&a.id);
        assert_canteen_invariant(&cart);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut cart = Cart::new();
        let a = item("a", "c1", 100);
        cart.add_item(&a).unwrap();
        let lines = cart.snapshot();
        cart.set_quantity(&a.id, 9);
        cart.clear();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 1);
    }

    #[test]
    fn test_reorder_merges_or_requires_confirmation() {
        let customer = CustomerRef {
            id: UserId("u1".into()),
            name: "Sami".into(),
        };
        let past = Order::pending(
            "c2".into(),
            customer,
            vec![OrderLine {
                menu_item_id: "x".into(),
                name: "Paratha".into(),
                unit_price: 60,
                quantity: 2,
            }],
            "Library",
        );

        let mut cart = Cart::new();
        cart.add_item(&item("a", "c1", 100)).unwrap();
        let before = cart.clone();
        assert!(matches!(
            cart.reorder(&past, false),
            Err(CartError::CanteenConflict { .. })
        ));
        assert_eq!(cart, before);

        cart.reorder(&past, true).unwrap();
        assert_eq!(cart.canteen_id(), Some(&CanteenId::from("c2")));
        assert_eq!(cart.total_price(), 120);

        cart.reorder(&past, false).unwrap();
        assert_eq!(cart.quantity_of(&MenuItemId::from("x")), 4);
    }
}
