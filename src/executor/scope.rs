//! The "run pending continuations now" seam.

use tracing::trace;

use super::TestExecutor;

/// A disposable execution context that can drain scheduled continuations.
///
/// Released when dropped, including while unwinding from a panicking
/// continuation.
pub trait Scope {
    /// Synchronously run every continuation that is ready, including ones that
    /// become ready during the drain. Returns the number of polls performed.
    fn drain_once(&mut self) -> usize;
}

/// Hands out [`Scope`]s.
pub trait ScopeFactory: Send + Sync {
    /// Acquire a fresh scope.
    fn acquire(&self) -> Box<dyn Scope + '_>;
}

/// Scope over a [`TestExecutor`].
#[derive(Debug)]
pub struct ExecutorScope<'a> {
    executor: &'a TestExecutor,
    polls: usize,
}

impl<'a> ExecutorScope<'a> {
    /// Opens a scope on `executor`.
    #[must_use]
    pub fn new(executor: &'a TestExecutor) -> Self {
        trace!(?executor, "acquired scope");
        Self { executor, polls: 0 }
    }

    /// Total polls performed through this scope.
    #[must_use]
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl Scope for ExecutorScope<'_> {
    fn drain_once(&mut self) -> usize {
        let polls = self.executor.run_until_stalled();
        self.polls += polls;
        trace!(polls, "drained scope");
        polls
    }
}

impl Drop for ExecutorScope<'_> {
    fn drop(&mut self) {
        trace!(polls = self.polls, "released scope");
    }
}

impl ScopeFactory for TestExecutor {
    fn acquire(&self) -> Box<dyn Scope + '_> {
        Box::new(ExecutorScope::new(self))
    }
}
