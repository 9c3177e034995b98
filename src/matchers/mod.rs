//! The matcher catalogue.
//!
//! A [`Matcher`] is a canonical name plus a plain comparison function. The
//! [`catalogue`] maps every registered name, aliases included, to a
//! [`MatcherFactory`]; an alias holds the very same factory as its canonical
//! entry, so both report under one name.
//!
//! # Example
//!
//! ```rust
//! use mox_matchers::executor::TestExecutor;
//! use mox_matchers::matchers::{catalogue, MatcherEnv};
//! use mox_matchers::promise::Promise;
//! use serde_json::json;
//!
//! let executor = TestExecutor::new();
//! let env = MatcherEnv::new(executor.clone());
//! let promise = Promise::resolved(&executor, json!(42));
//!
//! let matcher = catalogue()["to_resolve_with"]();
//! let result = matcher.compare(&env, &promise, &[json!(42).into()]).unwrap();
//! assert!(result.pass);
//! ```

mod env;
mod flush;
mod isolate;
mod legacy;
mod probe;
mod promise;
mod query;

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::message::{MatcherResult, Render};
use crate::subject::{Arg, Subject};

pub use env::MatcherEnv;
pub use flush::{assert_promise, resolve_promise, settle, settles, Settled, Verb};
pub use isolate::to_contain_isolate_scope;
pub use legacy::{legacy_catalogue, LegacyCatalogue, LegacyContext, LegacyMatcher};
pub use probe::Probe;
pub use promise::{to_be_promise, to_reject, to_reject_with, to_resolve, to_resolve_with};
pub use query::{parse_query, to_have_query_params};

/// Signature of a matcher's comparison.
pub type CompareFn = fn(&MatcherEnv, &dyn Subject, &[Arg]) -> Result<MatcherResult>;

/// Builds a matcher. Catalogue entries are factories.
pub type MatcherFactory = fn() -> Matcher;

/// Registered name to factory.
pub type Catalogue = BTreeMap<&'static str, MatcherFactory>;

/// A named assertion.
#[derive(Clone, Copy)]
pub struct Matcher {
    name: &'static str,
    compare: CompareFn,
}

impl Matcher {
    /// Creates a matcher whose results are cached under `name`.
    #[must_use]
    pub fn new(name: &'static str, compare: CompareFn) -> Self {
        Self { name, compare }
    }

    /// The canonical name, also the message-cache key.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate against `actual`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperand`] if `actual` or `args` cannot be
    /// handled by this matcher at all. A failed assertion is not an error.
    pub fn compare(&self, env: &MatcherEnv, actual: &dyn Subject, args: &[Arg]) -> Result<MatcherResult> {
        debug!(matcher = self.name, args = args.len(), "evaluating matcher");
        let result = (self.compare)(env, actual, args)?;
        debug!(matcher = self.name, pass = result.pass, "matcher evaluated");
        Ok(result)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Every registered matcher.
///
/// `to_have_been_resolved`, `to_have_been_resolved_with`,
/// `to_have_been_rejected` and `to_have_been_rejected_with` are aliases of
/// `to_resolve`, `to_resolve_with`, `to_reject` and `to_reject_with`.
#[must_use]
pub fn catalogue() -> Catalogue {
    let mut catalogue = Catalogue::new();
    catalogue.insert("to_be_promise", to_be_promise);
    catalogue.insert("to_resolve", to_resolve);
    catalogue.insert("to_resolve_with", to_resolve_with);
    catalogue.insert("to_reject", to_reject);
    catalogue.insert("to_reject_with", to_reject_with);
    catalogue.insert("to_have_query_params", to_have_query_params);
    catalogue.insert("to_contain_isolate_scope", to_contain_isolate_scope);

    catalogue.insert("to_have_been_resolved", to_resolve);
    catalogue.insert("to_have_been_resolved_with", to_resolve_with);
    catalogue.insert("to_have_been_rejected", to_reject);
    catalogue.insert("to_have_been_rejected_with", to_reject_with);
    catalogue
}

/// The expected-value argument as a JSON object.
pub(crate) fn expected_object(env: &MatcherEnv, expected: Option<&Arg>) -> Result<Map<String, Value>> {
    match expected {
        Some(Arg::Value(Value::Object(map))) => Ok(map.clone()),
        Some(other) => Err(Error::invalid_operand(format!(
            "{} is not an object",
            other.render(env.printer())
        ))),
        None => Err(Error::invalid_operand("expected object is missing")),
    }
}

/// Every entry of `needles` is present in `haystack` with an equal value.
pub(crate) fn contains_all(haystack: &Map<String, Value>, needles: &Map<String, Value>) -> bool {
    needles
        .iter()
        .all(|(key, value)| haystack.get(key) == Some(value))
}
