//! # Order Tracker
//!
//! Follows one order's status through the backend's change feed.
//!
//! [`OrderTracker::spawn`] starts a task that owns the [`OrderFeed`]. The task publishes
//! [`TrackerState`] through a `watch` channel and ends by itself once the order reaches a
//! terminal status or the feed closes. Every way out of the task drops the feed, so the
//! subscription is released on stop, on drop of the handle, on error and on completion.
//!
//! The tracker subscribes before the initial fetch, so a change committed between the two
//! is not lost. Snapshots with a lower `revision` than the one held are discarded as stale.

pub mod error;
pub mod state;

pub use error::TrackError;
pub use state::TrackerState;

use crate::backend::{Backend, OrderFeed};
use crate::model::{Order, OrderId};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

pub struct OrderTracker;

impl OrderTracker {
    /// Starts tracking `order_id`. The returned handle starts in [`TrackerState::Loading`].
    pub fn spawn(backend: Arc<dyn Backend>, order_id: OrderId) -> TrackerHandle {
        let (state_tx, state_rx) = watch::channel(TrackerState::Loading);
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(track(backend, order_id, state_tx, stop_rx));
        info!(order_id = %order_id, "Tracker started");
        TrackerHandle {
            order_id,
            state: state_rx,
            stop: Some(stop_tx),
            task: Some(task),
        }
    }
}

/// Owner side of a running tracker. Dropping it aborts the task.
pub struct TrackerHandle {
    order_id: OrderId,
    state: watch::Receiver<TrackerState>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TrackerHandle {
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Current state.
    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    /// Another receiver for the state, e.g. for a render loop.
    pub fn watch(&self) -> watch::Receiver<TrackerState> {
        self.state.clone()
    }

    /// Waits for the next state change.
    ///
    /// Returns `Stopped` once the task has ended; the last state stays readable via
    /// [`TrackerHandle::state`].
    pub async fn changed(&mut self) -> Result<TrackerState, TrackError> {
        self.state.changed().await.map_err(|_| TrackError::Stopped)?;
        Ok(self.state.borrow_and_update().clone())
    }

    /// Waits until the initial fetch has been answered.
    pub async fn ready(&mut self) -> Result<TrackerState, TrackError> {
        self.wait_for(|s| !s.is_loading()).await
    }

    /// Waits until the order is terminal, missing, or tracking failed.
    pub async fn settled(&mut self) -> Result<TrackerState, TrackError> {
        self.wait_for(TrackerState::is_settled).await
    }

    async fn wait_for(&mut self, ready: impl FnMut(&TrackerState) -> bool) -> Result<TrackerState, TrackError> {
        match self.state.wait_for(ready).await {
            Ok(state) => Ok(state.clone()),
            Err(_) => Err(TrackError::Stopped),
        }
    }

    /// Releases the subscription and waits for the task to finish.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(order_id = %self.order_id, error = ?e, "Tracker task failed");
            }
        }
        info!(order_id = %self.order_id, "Tracker stopped");
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!(order_id = %self.order_id, "Tracker handle dropped, aborting task");
            task.abort();
        }
    }
}

#[instrument(skip_all, fields(order_id = %order_id))]
async fn track(
    backend: Arc<dyn Backend>,
    order_id: OrderId,
    state: watch::Sender<TrackerState>,
    mut stop: oneshot::Receiver<()>,
) {
    let subscribed = tokio::select! {
        _ = &mut stop => {
            debug!("Stop requested before subscribing");
            return;
        }
        subscribed = backend.subscribe_order_changes(order_id) => subscribed,
    };
    let mut feed = match subscribed {
        Ok(feed) => feed,
        Err(e) => {
            warn!(error = %e, "Subscribe failed");
            state.send_replace(TrackerState::Failed(e.into()));
            return;
        }
    };

    let fetched = tokio::select! {
        _ = &mut stop => {
            debug!("Stop requested during initial fetch");
            release(feed);
            return;
        }
        fetched = backend.fetch_order_by_id(order_id) => fetched,
    };
    let mut held = match fetched {
        Ok(Some(order)) => order,
        Ok(None) => {
            warn!("Order not found");
            feed.unsubscribe();
            state.send_replace(TrackerState::NotFound);
            return;
        }
        Err(e) => {
            warn!(error = %e, "Initial fetch failed");
            feed.unsubscribe();
            state.send_replace(TrackerState::Failed(e.into()));
            return;
        }
    };
    if publish(&state, &held) {
        feed.unsubscribe();
        return;
    }

    loop {
        tokio::select! {
            _ = &mut stop => {
                debug!("Stop requested");
                break;
            }
            next = feed.next() => {
                let Some(order) = next else {
                    warn!("Order feed closed by backend");
                    state.send_replace(TrackerState::Failed(TrackError::Stopped));
                    break;
                };
                if accept(&mut held, order) && publish(&state, &held) {
                    break;
                }
            }
        }
    }
    release(feed);
}

/// Keeps `incoming` unless it is older than `held`.
fn accept(held: &mut Order, incoming: Order) -> bool {
    if incoming.revision < held.revision {
        warn!(
            held = held.revision,
            incoming = incoming.revision,
            status = %incoming.status,
            "Discarding stale order snapshot"
        );
        return false;
    }
    if incoming.status != held.status {
        info!(from = %held.status, to = %incoming.status, revision = incoming.revision, "Order status changed");
    }
    *held = incoming;
    true
}

/// Publishes the snapshot. Returns true when it is terminal.
fn publish(state: &watch::Sender<TrackerState>, order: &Order) -> bool {
    let terminal = order.status.is_terminal();
    let next = if terminal {
        TrackerState::Finished(order.clone())
    } else {
        TrackerState::Live(order.clone())
    };
    state.send_replace(next);
    if terminal {
        info!(status = %order.status, "Order reached terminal status");
    }
    terminal
}

fn release(feed: OrderFeed) {
    debug!(order_id = %feed.order_id(), "Releasing order feed");
    feed.unsubscribe();
}
