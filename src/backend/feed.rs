//! Live change feed for one order.

use crate::model::{Order, OrderId};
use tokio::sync::mpsc;
use tracing::debug;

/// Subscription handle returned by
/// [`Backend::subscribe_order_changes`](crate::backend::Backend::subscribe_order_changes).
///
/// Yields the full order row after every change. The subscription is released when the feed
/// is dropped or [`OrderFeed::unsubscribe`] is called; there is no separate call to forget.
#[derive(Debug)]
pub struct OrderFeed {
    order_id: OrderId,
    receiver: mpsc::UnboundedReceiver<Order>,
}

impl OrderFeed {
    /// Wraps the receiving half of a change channel. Backends push each new row into the
    /// matching sender and stop once it reports the receiver closed.
    pub fn new(order_id: OrderId, receiver: mpsc::UnboundedReceiver<Order>) -> Self {
        Self { order_id, receiver }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Next snapshot of the order, or `None` once the backend closed the feed.
    pub async fn next(&mut self) -> Option<Order> {
        self.receiver.recv().await
    }

    /// Releases the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for OrderFeed {
    fn drop(&mut self) {
        self.receiver.close();
        debug!(order_id = %self.order_id, "Order feed released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerRef, OrderLine, UserId};

    fn order() -> Order {
        Order::pending(
            "c1".into(),
            CustomerRef {
                id: UserId("u1".into()),
                name: "Sami".into(),
            },
            vec![OrderLine {
                menu_item_id: "m1".into(),
                name: "Tea".into(),
                unit_price: 40,
                quantity: 1,
            }],
            "Library",
        )
    }

    #[tokio::test]
    async fn test_feed_yields_in_order_then_ends() {
        let (tx, rx) = mpsc::unbounded_channel();
        let first = order();
        let mut second = first.clone();
        second.revision = 1;
        let mut feed = OrderFeed::new(first.id, rx);

        tx.send(first.clone()).unwrap();
        tx.send(second.clone()).unwrap();
        drop(tx);

        assert_eq!(feed.next().await, Some(first));
        assert_eq!(feed.next().await, Some(second));
        assert_eq!(feed.next().await, None);
    }

    #[tokio::test]
    async fn test_unsubscribe_closes_sender_side() {
        let (tx, rx) = mpsc::unbounded_channel::<Order>();
        let feed = OrderFeed::new(OrderId::new(), rx);
        assert!(!tx.is_closed());
        feed.unsubscribe();
        assert!(tx.is_closed());
    }
}
