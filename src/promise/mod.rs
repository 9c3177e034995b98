//! The promise-like capability and an adapter from Rust futures.
//!
//! Matchers never look inside a promise. All they need is the ability to
//! register a success and a failure continuation, which is what [`Thenable`]
//! expresses. [`Promise`] adapts any `Future<Output = Result<Value, Value>>` to
//! it by scheduling continuations on a [`TestExecutor`](crate::executor::TestExecutor).
//!
//! # Example
//!
//! ```rust
//! use mox_matchers::executor::{ScopeFactory, TestExecutor};
//! use mox_matchers::promise::{Promise, Thenable};
//! use serde_json::json;
//! use std::sync::{Arc, Mutex};
//!
//! let executor = TestExecutor::new();
//! let (deferred, promise) = Promise::deferred(&executor);
//! deferred.resolve(json!("value"));
//!
//! let seen = Arc::new(Mutex::new(None));
//! let slot = Arc::clone(&seen);
//! promise.then(
//!     Box::new(move |v| *slot.lock().unwrap() = Some(v)),
//!     Box::new(|_| {}),
//! );
//! executor.acquire().drain_once();
//! assert_eq!(*seen.lock().unwrap(), Some(json!("value")));
//! ```

mod future;

use serde_json::Value;

pub use future::{Deferred, Promise};

/// A one-shot continuation receiving the settled value.
pub type Callback = Box<dyn FnOnce(Value) + Send + 'static>;

/// Anything exposing a two-callback completion registration.
pub trait Thenable {
    /// Register continuations for fulfilment and rejection.
    ///
    /// At most one of them is ever called, and only when the environment's
    /// pending continuations are run.
    fn then(&self, on_fulfilled: Callback, on_rejected: Callback);
}
