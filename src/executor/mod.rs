//! Deterministic continuation draining.
//!
//! Promise continuations registered by matchers are scheduled as tasks on a
//! [`TestExecutor`]. Nothing runs until a [`Scope`] acquired from the executor
//! drains it, which is how a matcher turns an asynchronous outcome into a
//! synchronous assertion.
//!
//! # Example
//!
//! ```rust
//! use mox_matchers::executor::{ScopeFactory, TestExecutor};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let executor = TestExecutor::new();
//! let ran = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&ran);
//! executor.spawn(async move { flag.store(true, Ordering::SeqCst) });
//!
//! assert!(!ran.load(Ordering::SeqCst));
//! executor.acquire().drain_once();
//! assert!(ran.load(Ordering::SeqCst));
//! ```

mod scope;
mod task;
mod test_executor;

pub use scope::{ExecutorScope, Scope, ScopeFactory};
pub use task::TaskId;
pub use test_executor::TestExecutor;
