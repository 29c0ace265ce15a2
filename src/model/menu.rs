use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a canteen (a single food vendor location).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanteenId(pub String);

impl From<&str> for CanteenId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for CanteenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub String);

impl From<&str> for MenuItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canteen {
    pub id: CanteenId,
    pub name: String,
    pub is_open: bool,
    /// Human-readable estimate, e.g. "15 mins".
    pub delivery_time: String,
}

impl Canteen {
    pub fn new(id: impl Into<String>, name: impl Into<String>, delivery_time: impl Into<String>) -> Self {
        Self {
            id: CanteenId(id.into()),
            name: name.into(),
            is_open: true,
            delivery_time: delivery_time.into(),
        }
    }
}

/// An item on a canteen's menu. Prices are whole rupees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub canteen_id: CanteenId,
    pub name: String,
    pub price: u32,
    pub category: String,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        canteen_id: impl Into<String>,
        name: impl Into<String>,
        price: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: MenuItemId(id.into()),
            canteen_id: CanteenId(canteen_id.into()),
            name: name.into(),
            price,
            category: category.into(),
        }
    }
}
