//! The `TestExecutor` implementation.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use parking_lot::Mutex;
use tracing::trace;

use crate::executor::task::{Task, TaskId};

/// A single-threaded style executor that only runs when told to.
///
/// Continuations are queued by [`spawn`] and polled by [`step`] or
/// [`run_until_stalled`]. A continuation that returns `Poll::Pending` is parked
/// until its waker fires, at which point it moves back to the ready queue and
/// runs on the next drain.
///
/// Clones share the same queues.
///
/// # Example
///
/// ```rust
/// use mox_matchers::executor::TestExecutor;
///
/// let executor = TestExecutor::new();
/// executor.spawn(async {});
/// executor.spawn(std::future::pending::<()>());
///
/// assert_eq!(executor.pending_count(), 2);
/// assert_eq!(executor.run_until_stalled(), 2);
/// assert_eq!(executor.waiting_count(), 1);
/// ```
///
/// [`spawn`]: TestExecutor::spawn
/// [`step`]: TestExecutor::step
/// [`run_until_stalled`]: TestExecutor::run_until_stalled
#[derive(Clone, Default)]
pub struct TestExecutor {
    inner: Arc<ExecutorInner>,
}

#[derive(Default)]
struct ExecutorInner {
    /// Tasks ready to be polled.
    ready_queue: Mutex<VecDeque<Task>>,
    /// Tasks that returned Pending and have not been woken.
    waiting: Mutex<Vec<Task>>,
}

impl TestExecutor {
    /// Creates a new, empty executor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a continuation. It does not run until the executor is drained.
    pub fn spawn<F>(&self, future: F) -> TaskId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = Task::new(future);
        let id = task.id;
        trace!(task = %id, "scheduled continuation");
        self.inner.ready_queue.lock().push_back(task);
        id
    }

    /// Returns the number of tasks that are ready to run.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.ready_queue.lock().len()
    }

    /// Returns the number of parked tasks (returned `Poll::Pending`).
    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.inner.waiting.lock().len()
    }

    /// Returns the total number of unfinished tasks.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pending_count() + self.waiting_count()
    }

    /// Returns true if there are no unfinished tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Polls a single task from the front of the ready queue.
    ///
    /// Returns `true` if a task was polled, `false` if the ready queue was empty.
    pub fn step(&self) -> bool {
        let Some(mut task) = self.inner.ready_queue.lock().pop_front() else {
            return false;
        };

        let (waker, woken_flag) = self.create_waker(task.id);
        let mut cx = Context::from_waker(&waker);

        match task.poll(&mut cx) {
            Poll::Ready(()) => {
                trace!(task = %task.id, polls = task.poll_count, "continuation completed");
            }
            Poll::Pending => {
                if *woken_flag.lock() {
                    self.inner.ready_queue.lock().push_back(task);
                } else {
                    self.inner.waiting.lock().push(task);
                }
            }
        }
        true
    }

    /// Polls ready tasks until none are left.
    ///
    /// Tasks woken while the drain is running are polled in the same drain.
    /// Parked tasks stay parked. Returns the number of polls.
    pub fn run_until_stalled(&self) -> usize {
        let mut count = 0;
        while self.step() {
            count += 1;
        }
        count
    }

    fn create_waker(&self, id: TaskId) -> (Waker, Arc<Mutex<bool>>) {
        let woken_flag = Arc::new(Mutex::new(false));
        let waker = TaskWaker {
            executor: Arc::clone(&self.inner),
            id,
            woken_during_poll: Arc::clone(&woken_flag),
        };
        (Waker::from(Arc::new(waker)), woken_flag)
    }
}

impl std::fmt::Debug for TestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestExecutor")
            .field("pending", &self.pending_count())
            .field("waiting", &self.waiting_count())
            .finish()
    }
}

/// Waker that moves a parked task back to the ready queue.
struct TaskWaker {
    executor: Arc<ExecutorInner>,
    id: TaskId,
    /// Set when the wake happens while the task is being polled.
    woken_during_poll: Arc<Mutex<bool>>,
}

impl Wake for TaskWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let mut waiting = self.executor.waiting.lock();
        if let Some(pos) = waiting.iter().position(|t| t.id == self.id) {
            let task = waiting.remove(pos);
            self.executor.ready_queue.lock().push_back(task);
        } else {
            *self.woken_during_poll.lock() = true;
        }
    }
}
