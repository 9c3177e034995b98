//! Promise adapter over Rust futures.

use std::fmt;
use std::future::Future;

use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt, Shared};
use serde_json::Value;

use super::{Callback, Thenable};
use crate::executor::TestExecutor;

type Settlement = Result<Value, Value>;

/// A promise-like value backed by a future.
///
/// `Ok` settles the promise as resolved, `Err` as rejected, and a future that
/// never completes leaves it pending. Each [`then`](Thenable::then) schedules
/// one continuation on the executor; the underlying future is shared, so a
/// settled promise can be observed any number of times.
#[derive(Clone)]
pub struct Promise {
    executor: TestExecutor,
    settlement: Shared<BoxFuture<'static, Settlement>>,
}

impl Promise {
    /// Wrap a future.
    pub fn new<F>(executor: &TestExecutor, future: F) -> Self
    where
        F: Future<Output = Settlement> + Send + 'static,
    {
        Self {
            executor: executor.clone(),
            settlement: future.boxed().shared(),
        }
    }

    /// An already resolved promise.
    #[must_use]
    pub fn resolved(executor: &TestExecutor, value: Value) -> Self {
        Self::new(executor, future::ready(Ok(value)))
    }

    /// An already rejected promise.
    #[must_use]
    pub fn rejected(executor: &TestExecutor, reason: Value) -> Self {
        Self::new(executor, future::ready(Err(reason)))
    }

    /// A promise that never settles.
    #[must_use]
    pub fn pending(executor: &TestExecutor) -> Self {
        Self::new(executor, future::pending())
    }

    /// A promise settled later through the returned [`Deferred`].
    ///
    /// Dropping the `Deferred` without settling leaves the promise pending.
    #[must_use]
    pub fn deferred(executor: &TestExecutor) -> (Deferred, Self) {
        let (sender, receiver) = oneshot::channel();
        let promise = Self::new(executor, async move {
            match receiver.await {
                Ok(settlement) => settlement,
                Err(oneshot::Canceled) => future::pending().await,
            }
        });
        (Deferred { sender }, promise)
    }

    /// Returns the settlement if it is already known, without running anything.
    #[must_use]
    pub fn peek(&self) -> Option<Settlement> {
        self.settlement.peek().cloned()
    }
}

impl Thenable for Promise {
    fn then(&self, on_fulfilled: Callback, on_rejected: Callback) {
        let settlement = self.settlement.clone();
        self.executor.spawn(async move {
            match settlement.await {
                Ok(value) => on_fulfilled(value),
                Err(reason) => on_rejected(reason),
            }
        });
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("settlement", &self.peek())
            .finish_non_exhaustive()
    }
}

/// The settling side of [`Promise::deferred`].
#[derive(Debug)]
pub struct Deferred {
    sender: oneshot::Sender<Settlement>,
}

impl Deferred {
    /// Settle the promise as resolved.
    pub fn resolve(self, value: Value) {
        self.settle(Ok(value));
    }

    /// Settle the promise as rejected.
    pub fn reject(self, reason: Value) {
        self.settle(Err(reason));
    }

    fn settle(self, settlement: Settlement) {
        // The receiver lives inside the promise; if every copy of the promise
        // is gone there is nobody left to tell.
        let _ = self.sender.send(settlement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ScopeFactory;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    type Seen = Arc<Mutex<Vec<Settlement>>>;

    fn observe(promise: &Promise) -> Seen {
        let seen: Seen = Arc::default();
        let ok = Arc::clone(&seen);
        let err = Arc::clone(&seen);
        promise.then(
            Box::new(move |v| ok.lock().push(Ok(v))),
            Box::new(move |e| err.lock().push(Err(e))),
        );
        seen
    }

    #[test]
    fn test_continuations_wait_for_drain() {
        let executor = TestExecutor::new();
        let promise = Promise::resolved(&executor, json!(1));
        let seen = observe(&promise);

        assert!(seen.lock().is_empty());
        executor.acquire().drain_once();
        assert_eq!(*seen.lock(), vec![Ok(json!(1))]);
    }

    #[test]
    fn test_rejected_calls_failure_path() {
        let executor = TestExecutor::new();
        let seen = observe(&Promise::rejected(&executor, json!("boom")));
        executor.acquire().drain_once();
        assert_eq!(*seen.lock(), vec![Err(json!("boom"))]);
    }

    #[test]
    fn test_pending_never_calls_back() {
        let executor = TestExecutor::new();
        let seen = observe(&Promise::pending(&executor));
        executor.acquire().drain_once();
        assert!(seen.lock().is_empty());
        assert_eq!(executor.waiting_count(), 1);
    }

    #[test]
    fn test_deferred_settles_on_next_drain() {
        let executor = TestExecutor::new();
        let (deferred, promise) = Promise::deferred(&executor);
        let seen = observe(&promise);

        executor.acquire().drain_once();
        assert!(seen.lock().is_empty());

        deferred.resolve(json!({ "id": 3 }));
        executor.acquire().drain_once();
        assert_eq!(*seen.lock(), vec![Ok(json!({ "id": 3 }))]);
    }

    #[test]
    fn test_dropped_deferred_stays_pending() {
        let executor = TestExecutor::new();
        let (deferred, promise) = Promise::deferred(&executor);
        drop(deferred);
        let seen = observe(&promise);
        executor.acquire().drain_once();
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_settled_promise_observable_repeatedly() {
        let executor = TestExecutor::new();
        let promise = Promise::resolved(&executor, json!("again"));
        let first = observe(&promise);
        executor.acquire().drain_once();
        let second = observe(&promise);
        executor.acquire().drain_once();

        assert_eq!(*first.lock(), vec![Ok(json!("again"))]);
        assert_eq!(*second.lock(), vec![Ok(json!("again"))]);
        assert_eq!(promise.peek(), Some(Ok(json!("again"))));
    }
}
