use crate::model::CanteenId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The item belongs to another canteen than the cart. Nothing was changed; confirm with
    /// the user and call `switch_canteen`.
    #[error("Cart holds items from canteen {current}, item is from {requested}")]
    CanteenConflict {
        current: CanteenId,
        requested: CanteenId,
    },
}
