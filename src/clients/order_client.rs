use crate::clients::row_client::RowClient;
use crate::framework::{ChangeReceiver, StoreError, TableClient};
use crate::model::{Order, OrderId, OrderStatus, OrderUpdate, UserId};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for the orders table.
#[derive(Clone)]
pub struct OrderClient {
    inner: TableClient<Order>,
}

impl OrderClient {
    pub fn new(inner: TableClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn insert_order(&self, order: Order) -> Result<OrderId, OrderError> {
        debug!(?order, "insert_order called");
        self.inner.insert(order).await.map_err(Self::map_error)
    }

    /// Opens a change feed for one order. The feed yields the full row after every change.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, id: OrderId) -> Result<ChangeReceiver<Order>, OrderError> {
        self.inner.subscribe(id).await.map_err(Self::map_error)
    }

    /// Number of open change feeds for an order.
    #[instrument(skip(self))]
    pub async fn subscribers(&self, id: OrderId) -> Result<usize, OrderError> {
        self.inner.subscribers(id).await.map_err(Self::map_error)
    }

    /// Staff-side status change. Rejected unless it moves the order forward.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        let order = self
            .inner
            .update(id, OrderUpdate { status })
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %id, status = %order.status, revision = order.revision, "Order status changed");
        Ok(order)
    }

    /// Orders placed by one customer, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_customer(&self, customer: UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .inner
            .select(move |o: &Order| o.customer.id == customer)
            .await
            .map_err(Self::map_error)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[async_trait]
impl RowClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &TableClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.into_row_error::<OrderError>() {
            Ok(row) => row,
            Err(StoreError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::TableCommunicationError(other.to_string()),
        }
    }
}
