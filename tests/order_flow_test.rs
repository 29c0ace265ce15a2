use canteen_orders::backend::{Backend, BackendError, MemoryBackend};
use canteen_orders::cart::Cart;
use canteen_orders::checkout::{CheckoutError, LiveOrder, OrderSubmitter};
use canteen_orders::clients::{CatalogClient, OrderClient, ReviewClient, UserClient};
use canteen_orders::framework::mock::{
    create_mock_client, expect_get, expect_insert, expect_subscribe, MockTable,
};
use canteen_orders::framework::{StoreError, TableClient};
use canteen_orders::model::{
    Account, Canteen, CustomerRef, MenuItem, Order, OrderId, OrderLine, OrderStatus, Review,
    UserId,
};
use canteen_orders::phase::{UnknownStatusPolicy, UNKNOWN_PHASE};
use canteen_orders::review::{ReviewDraft, ReviewError, ReviewSubmitter};
use canteen_orders::tracker::{OrderTracker, TrackerState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Backend whose orders and reviews tables are scripted; the other tables are idle mocks.
fn scripted_backend(orders: TableClient<Order>, reviews: TableClient<Review>) -> Arc<dyn Backend> {
    Arc::new(MemoryBackend::new(
        UserClient::new(MockTable::<Account>::new().client()),
        CatalogClient::new(
            MockTable::<Canteen>::new().client(),
            MockTable::<MenuItem>::new().client(),
        ),
        OrderClient::new(orders),
        ReviewClient::new(reviews),
    ))
}

fn customer() -> CustomerRef {
    CustomerRef {
        id: UserId("u1".into()),
        name: "Sami".into(),
    }
}

fn cart() -> Cart {
    let mut cart = Cart::new();
    let a = MenuItem::new("a", "c1", "Biryani", 100, "Main Course");
    let b = MenuItem::new("b", "c1", "Chai", 50, "Beverages");
    cart.add_item(&a).unwrap();
    cart.add_item(&a).unwrap();
    cart.add_item(&b).unwrap();
    cart
}

fn order_at(revision: u64, status: OrderStatus) -> Order {
    let mut order = Order::pending(
        "c1".into(),
        customer(),
        vec![OrderLine {
            menu_item_id: "a".into(),
            name: "Biryani".into(),
            unit_price: 100,
            quantity: 1,
        }],
        "CS Dept",
    );
    order.revision = revision;
    order.status = status;
    order
}

/// Pattern: scripted table failure. The cart must survive a failed insert.
#[tokio::test]
async fn test_failed_persistence_keeps_cart() {
    let mut orders = MockTable::<Order>::new();
    orders.expect_insert().return_err(StoreError::TableClosed);
    let reviews = MockTable::<Review>::new();
    let submitter = OrderSubmitter::new(scripted_backend(orders.client(), reviews.client()));

    let mut cart = cart();
    let before = cart.clone();
    let mut live = LiveOrder::default();

    let err = submitter
        .submit(&mut cart, &mut live, "CS Dept", customer())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::PersistenceError(BackendError::Unavailable(_))));
    assert_eq!(cart, before);
    assert_eq!(live.get(), None);
    orders.verify();
}

#[tokio::test]
async fn test_validation_happens_before_persistence() {
    // No expectations: any request would fail the mock
    let orders = MockTable::<Order>::new();
    let reviews = MockTable::<Review>::new();
    let submitter = OrderSubmitter::new(scripted_backend(orders.client(), reviews.client()));
    let mut live = LiveOrder::default();

    let mut empty = Cart::new();
    let err = submitter
        .submit(&mut empty, &mut live, "CS Dept", customer())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::ValidationError(_)));

    let mut full = cart();
    let err = submitter.submit(&mut full, &mut live, "", customer()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::ValidationError(_)));
    assert_eq!(full.total_price(), 250);
    orders.verify();
}

/// Pattern: hand-answered requests. Inspect the inserted row, then retry after a failure.
#[tokio::test]
async fn test_retry_after_failure_submits_snapshot() {
    let (orders, mut requests) = create_mock_client::<Order>(8);
    let reviews = MockTable::<Review>::new();
    let submitter = OrderSubmitter::new(scripted_backend(orders, reviews.client()));
    let mut cart = cart();
    let mut live = LiveOrder::default();

    let (result, _) = tokio::join!(
        submitter.submit(&mut cart, &mut live, "CS Dept", customer()),
        async {
            let (_, respond_to) = expect_insert(&mut requests).await.expect("expected insert");
            let _ = respond_to.send(Err(StoreError::TableDropped));
        }
    );
    assert!(result.is_err());
    assert_eq!(cart.total_price(), 250);

    let (result, inserted) = tokio::join!(
        submitter.submit(&mut cart, &mut live, " CS Dept ", customer()),
        async {
            let (row, respond_to) = expect_insert(&mut requests).await.expect("expected insert");
            let _ = respond_to.send(Ok(row.id));
            row
        }
    );
    let order = result.expect("retry should succeed");
    assert_eq!(inserted, order);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, 250);
    assert_eq!(order.delivery_location, "CS Dept");
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.lines[0].quantity, 2);
    assert!(cart.is_empty());
    assert_eq!(live.get(), Some(order.id));
}

/// The backend assigns the order id; the returned order and the live slot carry it.
#[tokio::test]
async fn test_submit_adopts_backend_order_id() {
    let (orders, mut requests) = create_mock_client::<Order>(8);
    let reviews = MockTable::<Review>::new();
    let submitter = OrderSubmitter::new(scripted_backend(orders, reviews.client()));
    let mut cart = cart();
    let mut live = LiveOrder::default();
    let assigned = OrderId::new();

    let (result, client_built) = tokio::join!(
        submitter.submit(&mut cart, &mut live, "CS Dept", customer()),
        async {
            let (row, respond_to) = expect_insert(&mut requests).await.expect("expected insert");
            let _ = respond_to.send(Ok(assigned));
            row.id
        }
    );
    let order = result.expect("submit should succeed");
    assert_ne!(client_built, assigned);
    assert_eq!(order.id, assigned);
    assert_eq!(live.get(), Some(assigned));
}

/// Pattern: hand-fed change feed. Stale snapshots are dropped, newer ones win.
#[tokio::test]
async fn test_tracker_discards_stale_notifications() {
    let initial = order_at(0, OrderStatus::Pending);
    let id = initial.id;
    let (feed_tx, feed_rx) = mpsc::unbounded_channel();

    let mut orders = MockTable::<Order>::new();
    orders.expect_subscribe(id).return_ok(feed_rx);
    orders.expect_get(id).return_ok(Some(initial.clone()));
    let reviews = MockTable::<Review>::new();

    let mut tracker = OrderTracker::spawn(scripted_backend(orders.client(), reviews.client()), id);
    let state = tracker.ready().await.unwrap();
    assert_eq!(state, TrackerState::Live(initial.clone()));

    let mut ready = initial.clone();
    ready.revision = 2;
    ready.status = OrderStatus::Ready;
    feed_tx.send(ready.clone()).unwrap();
    let state = tracker.changed().await.unwrap();
    assert_eq!(state.status(), Some(&OrderStatus::Ready));

    // Older revision arrives late: no state change is published
    let mut stale = initial.clone();
    stale.revision = 1;
    stale.status = OrderStatus::Preparing;
    feed_tx.send(stale).unwrap();
    let waited = tokio::time::timeout(Duration::from_millis(50), tracker.changed()).await;
    assert!(waited.is_err(), "stale snapshot must not be published");
    assert_eq!(tracker.state().status(), Some(&OrderStatus::Ready));
    assert_eq!(tracker.state().phase_index(UnknownStatusPolicy::Explicit), Some(2));

    let mut done = initial.clone();
    done.revision = 3;
    done.status = OrderStatus::Completed;
    feed_tx.send(done.clone()).unwrap();
    let state = tracker.settled().await.unwrap();
    assert_eq!(state, TrackerState::Finished(done));

    // Finished tracker let go of the feed
    assert!(feed_tx.is_closed());
    orders.verify();
}

#[tokio::test]
async fn test_tracker_drives_through_every_phase() {
    let initial = order_at(0, OrderStatus::Pending);
    let id = initial.id;
    let (feed_tx, feed_rx) = mpsc::unbounded_channel();

    let mut orders = MockTable::<Order>::new();
    orders.expect_subscribe(id).return_ok(feed_rx);
    orders.expect_get(id).return_ok(Some(initial.clone()));
    let reviews = MockTable::<Review>::new();

    let mut tracker = OrderTracker::spawn(scripted_backend(orders.client(), reviews.client()), id);
    tracker.ready().await.unwrap();

    for (revision, status) in OrderStatus::FLOW.into_iter().enumerate().skip(1) {
        let mut next = initial.clone();
        next.revision = revision as u64;
        next.status = status.clone();
        feed_tx.send(next).unwrap();
        let state = tracker.changed().await.unwrap();
        assert_eq!(state.status(), Some(&status));
        assert_eq!(state.phase_index(UnknownStatusPolicy::Explicit), Some(revision));
    }

    let state = tracker.state();
    assert!(state.is_completed());
    assert!(!state.is_cancelled());
    assert!(tracker.changed().await.is_err(), "task ends after a terminal status");
}

#[tokio::test]
async fn test_unknown_status_is_explicit() {
    let initial = order_at(0, OrderStatus::Pending);
    let id = initial.id;
    let (feed_tx, feed_rx) = mpsc::unbounded_channel();

    let mut orders = MockTable::<Order>::new();
    orders.expect_subscribe(id).return_ok(feed_rx);
    orders.expect_get(id).return_ok(Some(initial.clone()));
    let reviews = MockTable::<Review>::new();

    let mut tracker = OrderTracker::spawn(scripted_backend(orders.client(), reviews.client()), id);
    tracker.ready().await.unwrap();

    let mut odd = initial.clone();
    odd.revision = 1;
    odd.status = OrderStatus::from("onHold");
    feed_tx.send(odd).unwrap();
    let state = tracker.changed().await.unwrap();

    assert!(matches!(state, TrackerState::Live(_)));
    assert_eq!(state.phase_index(UnknownStatusPolicy::Explicit), None);
    assert_eq!(state.phase(UnknownStatusPolicy::Explicit), Some(&UNKNOWN_PHASE));
    assert_eq!(state.phase_index(UnknownStatusPolicy::PendingFallback), Some(0));

    tracker.stop().await;
    assert!(feed_tx.is_closed());
}

#[tokio::test]
async fn test_closed_feed_fails_tracking() {
    let initial = order_at(0, OrderStatus::Pending);
    let id = initial.id;
    let (feed_tx, feed_rx) = mpsc::unbounded_channel();

    let mut orders = MockTable::<Order>::new();
    orders.expect_subscribe(id).return_ok(feed_rx);
    orders.expect_get(id).return_ok(Some(initial));
    let reviews = MockTable::<Review>::new();

    let mut tracker = OrderTracker::spawn(scripted_backend(orders.client(), reviews.client()), id);
    tracker.ready().await.unwrap();
    drop(feed_tx);

    let state = tracker.settled().await.unwrap();
    assert!(matches!(state, TrackerState::Failed(_)));
}

#[tokio::test]
async fn test_subscribe_failure_is_reported() {
    let id = order_at(0, OrderStatus::Pending).id;
    let mut orders = MockTable::<Order>::new();
    orders.expect_subscribe(id).return_err(StoreError::TableClosed);
    let reviews = MockTable::<Review>::new();

    let mut tracker = OrderTracker::spawn(scripted_backend(orders.client(), reviews.client()), id);
    let state = tracker.ready().await.unwrap();
    assert!(matches!(state, TrackerState::Failed(_)));
    orders.verify();
}

#[tokio::test]
async fn test_review_rating_zero_never_reaches_backend() {
    let orders = MockTable::<Order>::new();
    let reviews = MockTable::<Review>::new();
    let submitter = ReviewSubmitter::new(scripted_backend(orders.client(), reviews.client()));
    let delivered = order_at(4, OrderStatus::Completed);

    let draft = ReviewDraft::new(0, "tasty");
    assert!(!draft.can_submit());
    let err = submitter.submit(&delivered, &draft, "Sami").await.unwrap_err();
    assert!(matches!(err, ReviewError::ValidationError(_)));

    let err = submitter
        .submit(&delivered, &ReviewDraft::new(6, ""), "Sami")
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::ValidationError(_)));
    reviews.verify();
}

#[tokio::test]
async fn test_review_failure_keeps_draft() {
    let orders = MockTable::<Order>::new();
    let mut reviews = MockTable::<Review>::new();
    reviews.expect_insert().return_err(StoreError::TableClosed);
    let submitter = ReviewSubmitter::new(scripted_backend(orders.client(), reviews.client()));
    let delivered = order_at(4, OrderStatus::Completed);

    let draft = ReviewDraft::new(4, "Hot and on time");
    let err = submitter.submit(&delivered, &draft, "Sami").await.unwrap_err();
    assert!(matches!(err, ReviewError::PersistenceError(_)));
    assert_eq!(draft, ReviewDraft::new(4, "Hot and on time"));
    reviews.verify();
}

/// Stopping while the initial fetch is still outstanding returns promptly and drops the feed.
#[tokio::test]
async fn test_stop_during_initial_fetch_releases_feed() {
    let id = OrderId::new();
    let (orders, mut requests) = create_mock_client::<Order>(8);
    let reviews = MockTable::<Review>::new();
    let tracker = OrderTracker::spawn(scripted_backend(orders, reviews.client()), id);

    let (subscribed, respond_to) = expect_subscribe(&mut requests).await.expect("expected subscribe");
    assert_eq!(subscribed, id);
    let (feed_tx, feed_rx) = mpsc::unbounded_channel();
    let _ = respond_to.send(Ok(feed_rx));

    // Hold the get unanswered, as a hung backend would
    let (fetched, _pending) = expect_get(&mut requests).await.expect("expected get");
    assert_eq!(fetched, id);

    let stopped = tokio::time::timeout(Duration::from_millis(500), tracker.stop()).await;
    assert!(stopped.is_ok(), "stop must not wait on the initial fetch");
    assert!(feed_tx.is_closed());
}
