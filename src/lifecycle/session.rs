//! # Canteen Session
//!
//! Everything one signed-in user works with: profile, cart, live order and its tracker.
//! Components receive the cart and live order from here explicitly; nothing is global.

use crate::backend::{Backend, BackendError};
use crate::cart::{Cart, CartError};
use crate::checkout::{CheckoutError, LiveOrder, OrderSubmitter};
use crate::lifecycle::AppConfig;
use crate::model::{Canteen, CanteenId, CustomerRef, MenuItem, Order, OrderId, ReviewId, SignUp, UserProfile};
use crate::phase::{Phase, UnknownStatusPolicy};
use crate::review::{ReviewDraft, ReviewError, ReviewSubmitter};
use crate::tracker::{OrderTracker, TrackError, TrackerHandle, TrackerState};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("No order is being tracked")]
    NoLiveOrder,

    #[error("Canteen not found: {0}")]
    CanteenNotFound(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Track(#[from] TrackError),

    #[error(transparent)]
    Review(#[from] ReviewError),
}

pub struct CanteenSession {
    backend: Arc<dyn Backend>,
    policy: UnknownStatusPolicy,
    profile: Option<UserProfile>,
    cart: Cart,
    live_order: LiveOrder,
    tracker: Option<TrackerHandle>,
}

impl CanteenSession {
    pub fn new(backend: Arc<dyn Backend>, config: &AppConfig) -> Self {
        Self {
            backend,
            policy: config.unknown_status,
            profile: None,
            cart: Cart::new(),
            live_order: LiveOrder::default(),
            tracker: None,
        }
    }

    /// Creates an account and signs into it.
    #[instrument(skip(self))]
    pub async fn sign_up(&mut self, sign_up: SignUp) -> Result<UserProfile, SessionError> {
        let profile = self.backend.sign_up(sign_up).await?;
        self.sign_out().await;
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<UserProfile, SessionError> {
        let profile = self.backend.sign_in(email, password).await?;
        self.sign_out().await;
        info!(user_id = %profile.id, "Session started");
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Stops tracking and forgets the user, cart and live order.
    pub async fn sign_out(&mut self) {
        self.stop_tracking().await;
        self.cart.clear();
        if let Some(profile) = self.profile.take() {
            info!(user_id = %profile.id, "Signed out");
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub async fn canteens(&self) -> Result<Vec<Canteen>, SessionError> {
        Ok(self.backend.list_canteens().await?)
    }

    pub async fn canteen(&self, id: CanteenId) -> Result<Canteen, SessionError> {
        self.backend
            .fetch_canteen(id.clone())
            .await?
            .ok_or_else(|| SessionError::CanteenNotFound(id.to_string()))
    }

    pub async fn menu(&self, canteen_id: CanteenId) -> Result<Vec<MenuItem>, SessionError> {
        Ok(self.backend.list_menu_items(canteen_id).await?)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn live_order(&self) -> Option<OrderId> {
        self.live_order.get()
    }

    /// Places the cart as an order and starts tracking it.
    #[instrument(skip(self))]
    pub async fn checkout(&mut self, delivery_location: &str) -> Result<Order, SessionError> {
        let customer = {
            let profile = self.require_profile()?;
            CustomerRef {
                id: profile.id.clone(),
                name: profile.name.clone(),
            }
        };
        let order = OrderSubmitter::new(self.backend.clone())
            .submit(&mut self.cart, &mut self.live_order, delivery_location, customer)
            .await?;
        self.track(order.id).await;
        Ok(order)
    }

    /// Makes `order_id` the live order and starts tracking it, stopping any previous tracker.
    pub async fn track(&mut self, order_id: OrderId) -> &mut TrackerHandle {
        if let Some(previous) = self.tracker.take() {
            previous.stop().await;
        }
        self.live_order.set(order_id);
        self.tracker.insert(OrderTracker::spawn(self.backend.clone(), order_id))
    }

    /// Releases the live order's subscription and clears the live order.
    pub async fn stop_tracking(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            tracker.stop().await;
        }
        self.live_order.clear();
    }

    pub fn tracker(&self) -> Option<&TrackerHandle> {
        self.tracker.as_ref()
    }

    pub fn tracker_mut(&mut self) -> Option<&mut TrackerHandle> {
        self.tracker.as_mut()
    }

    pub fn tracker_state(&self) -> Option<TrackerState> {
        self.tracker.as_ref().map(TrackerHandle::state)
    }

    /// Presentation of the live order's current status.
    pub fn current_phase(&self) -> Option<&'static Phase> {
        self.tracker_state()?.phase(self.policy)
    }

    pub fn current_phase_index(&self) -> Option<usize> {
        self.tracker_state()?.phase_index(self.policy)
    }

    /// Reviews the live order. Allowed once the tracker reports it completed.
    #[instrument(skip(self))]
    pub async fn submit_review(&self, draft: &ReviewDraft) -> Result<ReviewId, SessionError> {
        let profile = self.require_profile()?;
        let tracker = self.tracker.as_ref().ok_or(SessionError::NoLiveOrder)?;
        let state = tracker.state();
        let order = match &state {
            TrackerState::NotFound => return Err(TrackError::NotFound(tracker.order_id().to_string()).into()),
            other => other
                .order()
                .ok_or_else(|| ReviewError::NotCompleted(tracker.order_id().to_string()))?,
        };
        Ok(ReviewSubmitter::new(self.backend.clone())
            .submit(order, draft, &profile.name)
            .await?)
    }

    /// The signed-in user's orders, newest first.
    pub async fn order_history(&self) -> Result<Vec<Order>, SessionError> {
        let profile = self.require_profile()?;
        Ok(self.backend.list_orders_for_customer(profile.id.clone()).await?)
    }

    /// Copies a past order into the cart. See [`Cart::reorder`].
    pub fn reorder(&mut self, order: &Order, confirm_switch: bool) -> Result<(), SessionError> {
        Ok(self.cart.reorder(order, confirm_switch)?)
    }

    fn require_profile(&self) -> Result<&UserProfile, SessionError> {
        self.profile.as_ref().ok_or(SessionError::NotSignedIn)
    }
}
