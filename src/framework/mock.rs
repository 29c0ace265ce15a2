//! # Mock Tables
//!
//! Utilities for testing code that talks to a table without running a real `TableActor`.
//!
//! | | MockTable | Real table |
//! |---|---|---|
//! | **State** | None, answers are scripted | Real rows and feeds |
//! | **Error injection** | `return_err` | Requires a row hook to fail |
//! | **Use case** | Persistence failures, hand-fed change feeds | End-to-end flows |
//!
//! Use [`MockTable`] for scripted answers, or [`create_mock_client`] with [`expect_insert`],
//! [`expect_get`] or [`expect_subscribe`] to inspect each request and answer it by hand.
//!
//! ```rust,ignore
//! let mut orders = MockTable::<Order>::new();
//! orders.expect_insert().return_err(StoreError::TableClosed);
//! let client = OrderClient::new(orders.client());
//! // ... exercise code ...
//! orders.verify();
//! ```

use crate::framework::{ChangeReceiver, StoreError, TableClient, TableRequest, TableRow};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// Represents an expected request to the mock table.
enum Expectation<T: TableRow> {
    Insert {
        response: Result<T::Id, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Select {
        response: Result<Vec<T>, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Subscribe {
        id: T::Id,
        response: Result<ChangeReceiver<T>, StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock table with expectation tracking.
///
/// Requests are matched against expectations in the order they were registered. A request
/// that does not match the next expectation (kind or id) panics the mock task, which the
/// caller observes as `StoreError::TableDropped` and [`MockTable::verify`] reports.
pub struct MockTable<T: TableRow> {
    client: TableClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: TableRow> MockTable<T> {
    /// Creates a new mock table with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (TableRequest::Insert { respond_to, .. }, Some(Expectation::Insert { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response })) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Select { respond_to, .. }, Some(Expectation::Select { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: expected, response })) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Subscribe { id, respond_to }, Some(Expectation::Subscribe { id: expected, response })) => {
                        assert_eq!(id, expected, "subscribe called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch on {}", T::TABLE),
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, |response| Expectation::Insert { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    pub fn expect_select(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::Select { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Update { id, response })
    }

    pub fn expect_subscribe(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ChangeReceiver<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Subscribe { id, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: TableRow> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned by the `expect_*` methods; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<'a, T: TableRow, R> {
    mock: &'a MockTable<T>,
    build: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + 'a>,
}

impl<'a, T: TableRow, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockTable<T>,
        build: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.mock.push((self.build)(Err(error)));
    }
}

/// Creates a table client and the receiver its requests arrive on.
///
/// Pair it with the `expect_*` functions below to assert on each request and answer it.
pub fn create_mock_client<T: TableRow>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

/// Returns the next request if it is an `Insert`.
pub async fn expect_insert<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Insert { row, respond_to }) => Some((row, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a `Get`.
pub async fn expect_get<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a `Subscribe`.
pub async fn expect_subscribe<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<ChangeReceiver<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Subscribe { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
