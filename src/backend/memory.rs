//! In-process [`Backend`] over the table engine.

use super::{Backend, BackendError, OrderFeed};
use crate::clients::{CatalogClient, OrderClient, ReviewClient, RowClient, UserClient};
use crate::model::{
    Canteen, CanteenId, MenuItem, Order, OrderId, OrderStatus, Review, ReviewId, SignUp, UserId,
    UserProfile,
};
use async_trait::async_trait;
use tracing::{info, instrument, warn};

/// Backend backed by five in-memory tables.
///
/// Besides the [`Backend`] operations it exposes the staff side (catalog seeding and order
/// status changes), which the client never calls.
#[derive(Clone)]
pub struct MemoryBackend {
    users: UserClient,
    catalog: CatalogClient,
    orders: OrderClient,
    reviews: ReviewClient,
}

impl MemoryBackend {
    pub fn new(
        users: UserClient,
        catalog: CatalogClient,
        orders: OrderClient,
        reviews: ReviewClient,
    ) -> Self {
        Self {
            users,
            catalog,
            orders,
            reviews,
        }
    }

    pub async fn add_canteen(&self, canteen: Canteen) -> Result<CanteenId, BackendError> {
        Ok(self.catalog.add_canteen(canteen).await?)
    }

    /// Adds a menu item. The canteen must exist.
    pub async fn add_menu_item(&self, item: MenuItem) -> Result<(), BackendError> {
        Ok(self.catalog.add_menu_item(item).await?)
    }

    /// Canteen staff or rider moving an order along. Every open feed for the order receives
    /// the updated row.
    #[instrument(skip(self))]
    pub async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, BackendError> {
        Ok(self.orders.set_status(id, status).await?)
    }

    /// Number of open change feeds for an order.
    pub async fn active_subscriptions(&self, id: OrderId) -> Result<usize, BackendError> {
        Ok(self.orders.subscribers(id).await?)
    }

    pub async fn reviews_for_order(&self, id: OrderId) -> Result<Vec<Review>, BackendError> {
        Ok(self.reviews.for_order(id).await?)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn sign_up(&self, sign_up: SignUp) -> Result<UserProfile, BackendError> {
        Ok(self.users.register(sign_up).await?)
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, BackendError> {
        match self.users.authenticate(email, password).await? {
            Some(profile) => {
                info!(user_id = %profile.id, "Signed in");
                Ok(profile)
            }
            None => {
                warn!("Sign-in rejected");
                Err(BackendError::InvalidCredentials)
            }
        }
    }

    async fn list_canteens(&self) -> Result<Vec<Canteen>, BackendError> {
        Ok(self.catalog.list_canteens().await?)
    }

    async fn fetch_canteen(&self, id: CanteenId) -> Result<Option<Canteen>, BackendError> {
        Ok(self.catalog.get(id).await?)
    }

    async fn list_menu_items(&self, canteen_id: CanteenId) -> Result<Vec<MenuItem>, BackendError> {
        Ok(self.catalog.menu_for(canteen_id).await?)
    }

    async fn insert_order(&self, order: Order) -> Result<OrderId, BackendError> {
        Ok(self.orders.insert_order(order).await?)
    }

    async fn fetch_order_by_id(&self, id: OrderId) -> Result<Option<Order>, BackendError> {
        Ok(self.orders.get(id).await?)
    }

    async fn subscribe_order_changes(&self, id: OrderId) -> Result<OrderFeed, BackendError> {
        let receiver = self.orders.subscribe(id).await?;
        Ok(OrderFeed::new(id, receiver))
    }

    async fn list_orders_for_customer(&self, customer: UserId) -> Result<Vec<Order>, BackendError> {
        Ok(self.orders.list_for_customer(customer).await?)
    }

    async fn insert_review(&self, review: Review) -> Result<ReviewId, BackendError> {
        Ok(self.reviews.insert_review(review).await?)
    }
}
