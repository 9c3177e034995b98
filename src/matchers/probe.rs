//! Recorders attached to a promise's success and failure paths.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

use crate::promise::Callback;

/// Records whether a continuation fired and with what argument.
///
/// Clones share their record, so the [`callback`](Probe::callback) handed to a
/// promise reports back to the probe kept by the matcher.
#[derive(Debug, Clone)]
pub struct Probe {
    label: &'static str,
    calls: Arc<Mutex<Vec<Value>>>,
}

impl Probe {
    /// Creates a probe that has not fired.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            calls: Arc::default(),
        }
    }

    /// The continuation to register with a promise.
    #[must_use]
    pub fn callback(&self) -> Callback {
        let probe = self.clone();
        Box::new(move |value| {
            trace!(probe = probe.label, %value, "probe fired");
            probe.calls.lock().push(value);
        })
    }

    /// Check if the probe fired at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Number of times the probe fired.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The argument of the most recent call.
    #[must_use]
    pub fn most_recent(&self) -> Option<Value> {
        self.calls.lock().last().cloned()
    }

    /// The label given at creation.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}
