//! # Table Messages
//!
//! Requests sent from a [`TableClient`](crate::framework::TableClient) to its
//! [`TableActor`](crate::framework::TableActor).

use crate::framework::entity::TableRow;
use crate::framework::error::StoreError;
use tokio::sync::{mpsc, oneshot};

/// Type alias for the one-shot response channel used by tables.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Row predicate used by `Select`.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Receiving half of a row change feed. Dropping it releases the subscription.
pub type ChangeReceiver<T> = mpsc::UnboundedReceiver<T>;

/// Internal message type sent to the table actor.
///
/// The variants are the relational operations the hosted service offers (insert, select by
/// key, filtered select, update, delete) plus `Subscribe`, which opens a change feed scoped to
/// one row.
pub enum TableRequest<T: TableRow> {
    Insert {
        row: T,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Select {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Subscribe {
        id: T::Id,
        respond_to: Response<ChangeReceiver<T>>,
    },
    /// Number of live feeds on a row. Closed feeds are pruned first.
    Subscribers {
        id: T::Id,
        respond_to: Response<usize>,
    },
}
