//! [`TableRow`] implementations for [`Canteen`] and [`MenuItem`].
//!
//! The catalog is seeded by the backend and read-only for clients.

use super::error::CatalogError;
use crate::framework::TableRow;
use crate::model::{Canteen, CanteenId, MenuItem, MenuItemId};
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl TableRow for Canteen {
    type Id = CanteenId;
    type Update = Infallible;
    type Error = CatalogError;
    const TABLE: &'static str = "canteens";

    fn id(&self) -> CanteenId {
        self.id.clone()
    }

    async fn on_insert(&mut self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::ValidationError("canteen name is required".into()));
        }
        Ok(())
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), CatalogError> {
        match update {}
    }
}

#[async_trait]
impl TableRow for MenuItem {
    type Id = MenuItemId;
    type Update = Infallible;
    type Error = CatalogError;
    const TABLE: &'static str = "menu_items";

    fn id(&self) -> MenuItemId {
        self.id.clone()
    }

    async fn on_insert(&mut self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::ValidationError("menu item name is required".into()));
        }
        if self.price == 0 {
            return Err(CatalogError::ValidationError(format!("{} has no price", self.name)));
        }
        Ok(())
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), CatalogError> {
        match update {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_menu_item_requires_price() {
        let mut item = MenuItem::new("m1", "c1", "Water", 0, "Drinks");
        assert!(matches!(item.on_insert().await, Err(CatalogError::ValidationError(_))));
    }
}
