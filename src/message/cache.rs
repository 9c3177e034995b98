//! Resolved message templates keyed by matcher name.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::MessagePair;

/// Remembers the last formatted message pair per matcher name, so the legacy
/// convention can derive both of its messages.
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use mox_matchers::message::{MessageCache, MessagePair};
///
/// let cache = MessageCache::new();
/// cache.store("to_resolve", MessagePair::new("Expected promise {not} to have been resolved"));
/// assert_eq!(
///     cache.get("to_resolve").map(|pair| pair.negative()).as_deref(),
///     Some("Expected promise not to have been resolved")
/// );
/// ```
#[derive(Clone, Default)]
pub struct MessageCache {
    templates: Arc<Mutex<HashMap<String, MessagePair>>>,
}

impl MessageCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a message pair, replacing any previous one for `name`.
    pub fn store(&self, name: &str, pair: MessagePair) {
        self.templates.lock().insert(name.to_string(), pair);
    }

    /// Returns the last message pair stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<MessagePair> {
        self.templates.lock().get(name).cloned()
    }

    /// Number of matcher names with a stored template.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.lock().len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every template.
    pub fn clear(&self) {
        self.templates.lock().clear();
    }
}

impl std::fmt::Debug for MessageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_store_wins() {
        let cache = MessageCache::new();
        cache.store("m", MessagePair::new("first"));
        cache.store("m", MessagePair::new("second"));
        assert_eq!(cache.get("m"), Some(MessagePair::new("second")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_names_are_independent() {
        let cache = MessageCache::new();
        cache.store("a", MessagePair::new("A"));
        cache.store("b", MessagePair::new("B"));
        assert_eq!(cache.get("a"), Some(MessagePair::new("A")));
        assert_eq!(cache.get("b"), Some(MessagePair::new("B")));
        assert!(cache.get("c").is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = MessageCache::new();
        let other = cache.clone();
        other.store("m", MessagePair::new("shared"));
        assert_eq!(cache.get("m"), Some(MessagePair::new("shared")));
        cache.clear();
        assert!(other.is_empty());
    }
}
