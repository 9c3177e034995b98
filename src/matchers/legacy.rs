//! Adapter for hosts that expect the older matcher convention.
//!
//! Legacy matchers are invoked with a mutable context holding the actual
//! value, return only a boolean, and leave a positive/negative message pair in
//! the context. Each legacy matcher wraps the modern one and reads the message
//! pair that call just cached.

use std::collections::BTreeMap;

use tracing::warn;

use super::{Catalogue, Matcher, MatcherEnv, MatcherFactory};
use crate::error::Result;
use crate::message::MessagePair;
use crate::subject::{Arg, Subject};

/// The mutable receiver of a legacy matcher call.
#[derive(Debug)]
pub struct LegacyContext<'s> {
    /// The actual value under test.
    pub actual: &'s dyn Subject,
    /// Messages left by the last call.
    pub message: Option<MessagePair>,
}

impl<'s> LegacyContext<'s> {
    /// A context for `actual` with no messages yet.
    #[must_use]
    pub fn new(actual: &'s dyn Subject) -> Self {
        Self {
            actual,
            message: None,
        }
    }
}

/// A modern matcher exposed under the legacy convention.
#[derive(Debug, Clone, Copy)]
pub struct LegacyMatcher {
    factory: MatcherFactory,
}

impl LegacyMatcher {
    /// Wrap a modern matcher factory.
    #[must_use]
    pub fn new(factory: MatcherFactory) -> Self {
        Self { factory }
    }

    /// Evaluate against `context.actual`, store the message pair in `context`
    /// and return whether the assertion holds.
    ///
    /// # Errors
    ///
    /// Propagates hard failures of the wrapped matcher.
    pub fn call(&self, env: &MatcherEnv, context: &mut LegacyContext<'_>, args: &[Arg]) -> Result<bool> {
        let matcher: Matcher = (self.factory)();
        let result = matcher.compare(env, context.actual, args)?;

        let pair = env.messages().get(matcher.name()).unwrap_or_else(|| {
            warn!(matcher = matcher.name(), "no cached message pair, using result message");
            MessagePair::fixed(result.failure_message())
        });
        context.message = Some(pair);
        Ok(result.pass)
    }
}

/// Legacy matchers keyed by registered name.
pub type LegacyCatalogue = BTreeMap<&'static str, LegacyMatcher>;

/// Convert every entry of a modern catalogue, keeping names and aliases.
#[must_use]
pub fn legacy_catalogue(catalogue: &Catalogue) -> LegacyCatalogue {
    catalogue
        .iter()
        .map(|(name, factory)| (*name, LegacyMatcher::new(*factory)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::executor::TestExecutor;
    use crate::matchers::catalogue;
    use crate::message::MatcherResult;
    use crate::promise::Promise;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn setup() -> (TestExecutor, MatcherEnv, LegacyCatalogue) {
        let executor = TestExecutor::new();
        let env = MatcherEnv::new(executor.clone());
        (executor, env, legacy_catalogue(&catalogue()))
    }

    #[test]
    fn test_names_are_preserved() {
        let (_, _, legacy) = setup();
        let modern: Vec<_> = catalogue().into_keys().collect();
        let converted: Vec<_> = legacy.keys().copied().collect();
        assert_eq!(modern, converted);
    }

    #[test]
    fn test_message_pair_from_cached_template() {
        let (executor, env, legacy) = setup();
        let promise = Promise::resolved(&executor, json!("value"));
        let mut context = LegacyContext::new(&promise);

        let pass = legacy["to_resolve_with"]
            .call(&env, &mut context, &[json!("another").into()])
            .unwrap();

        assert!(!pass);
        let [positive, negative] = context.message.unwrap().pair();
        assert_eq!(
            positive,
            "Expected promise to have been resolved with 'another' but was resolved with 'value'"
        );
        assert_eq!(
            negative,
            "Expected promise not to have been resolved with 'another' but was resolved with 'value'"
        );
    }

    #[test]
    fn test_alias_reads_canonical_template() {
        let (executor, env, legacy) = setup();
        let promise = Promise::rejected(&executor, json!(1));
        let mut context = LegacyContext::new(&promise);

        assert!(legacy["to_have_been_rejected"].call(&env, &mut context, &[]).unwrap());
        assert_eq!(
            context.message.unwrap().negative(),
            "Expected promise not to have been rejected"
        );
    }

    #[test]
    fn test_falls_back_to_result_message() {
        fn silent(_env: &MatcherEnv, _actual: &dyn Subject, _args: &[Arg]) -> Result<MatcherResult> {
            Ok(MatcherResult {
                pass: true,
                message: "uncached".to_string(),
            })
        }
        fn uncached() -> Matcher {
            Matcher::new("uncached", silent)
        }

        let (_, env, _) = setup();
        let value = json!(null);
        let mut context = LegacyContext::new(&value);
        assert!(LegacyMatcher::new(uncached).call(&env, &mut context, &[]).unwrap());
        assert_eq!(context.message.unwrap().positive(), "uncached");
    }

    #[test]
    fn test_hard_failures_propagate() {
        let (_, env, legacy) = setup();
        let value = json!("not a promise");
        let mut context = LegacyContext::new(&value);
        let err = legacy["to_resolve"].call(&env, &mut context, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidOperand(_)));
        assert!(context.message.is_none());
    }
}
