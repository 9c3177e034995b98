//! Registering matchers with a test runner, and a minimal built-in runner.
//!
//! A [`MatcherHost`] is anything that can receive a matcher catalogue.
//! [`install`] hands it the modern catalogue or its legacy conversion,
//! depending on the convention the host speaks.
//!
//! [`TestHost`] is the in-crate host: it owns a [`TestExecutor`] and a
//! [`MatcherEnv`], and evaluates expectations by name.
//!
//! # Example
//!
//! ```rust
//! use mox_matchers::host::{install, TestHost};
//! use serde_json::json;
//!
//! let mut host = TestHost::new();
//! install(&mut host);
//!
//! let promise = host.resolved(json!("done"));
//! host.expect(&promise).to("to_resolve_with", &[json!("done").into()]);
//! host.expect(&promise).not().to("to_reject", &[]);
//! ```

use tracing::debug;

use crate::config::MatcherConfig;
use crate::error::{Error, Result};
use crate::executor::TestExecutor;
use crate::matchers::{
    catalogue, legacy_catalogue, Catalogue, LegacyCatalogue, LegacyContext, MatcherEnv,
};
use crate::promise::{Deferred, Promise};
use crate::subject::{Arg, Subject};

/// Which matcher convention a host expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Convention {
    /// Matchers return a structured result.
    #[default]
    Modern,
    /// Matchers return a boolean and leave a message pair behind.
    Legacy,
}

/// A test runner that matchers can be registered with.
pub trait MatcherHost {
    /// The convention this host expects.
    fn convention(&self) -> Convention;

    /// Register modern matchers.
    fn add_matchers(&mut self, catalogue: Catalogue);

    /// Register legacy matchers.
    fn add_legacy_matchers(&mut self, catalogue: LegacyCatalogue);
}

/// Register every matcher with `host`, in the convention it expects.
pub fn install(host: &mut dyn MatcherHost) {
    let catalogue = catalogue();
    let convention = host.convention();
    debug!(?convention, matchers = catalogue.len(), "installing matchers");
    match convention {
        Convention::Modern => host.add_matchers(catalogue),
        Convention::Legacy => host.add_legacy_matchers(legacy_catalogue(&catalogue)),
    }
}

/// A self-contained host for use inside ordinary `#[test]` functions.
#[derive(Debug)]
pub struct TestHost {
    convention: Convention,
    executor: TestExecutor,
    env: MatcherEnv,
    matchers: Catalogue,
    legacy: LegacyCatalogue,
}

impl TestHost {
    /// A modern-convention host with no matchers installed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_convention(Convention::Modern)
    }

    /// A host speaking `convention`, with no matchers installed.
    #[must_use]
    pub fn with_convention(convention: Convention) -> Self {
        let executor = TestExecutor::new();
        let env = MatcherEnv::new(executor.clone());
        Self {
            convention,
            executor,
            env,
            matchers: Catalogue::new(),
            legacy: LegacyCatalogue::new(),
        }
    }

    /// Rebuild the environment from `config`. Cached messages are discarded.
    #[must_use]
    pub fn with_config(mut self, config: &MatcherConfig) -> Self {
        self.env = MatcherEnv::from_config(self.executor.clone(), config);
        self
    }

    /// The executor promises created through this host run on.
    #[must_use]
    pub fn executor(&self) -> &TestExecutor {
        &self.executor
    }

    /// The environment matchers are evaluated in.
    #[must_use]
    pub fn env(&self) -> &MatcherEnv {
        &self.env
    }

    /// Check if `name` is registered under either convention.
    #[must_use]
    pub fn has_matcher(&self, name: &str) -> bool {
        self.matchers.contains_key(name) || self.legacy.contains_key(name)
    }

    /// A promise already resolved with `value`.
    #[must_use]
    pub fn resolved(&self, value: serde_json::Value) -> Promise {
        Promise::resolved(&self.executor, value)
    }

    /// A promise already rejected with `reason`.
    #[must_use]
    pub fn rejected(&self, reason: serde_json::Value) -> Promise {
        Promise::rejected(&self.executor, reason)
    }

    /// A promise that never settles.
    #[must_use]
    pub fn pending(&self) -> Promise {
        Promise::pending(&self.executor)
    }

    /// A promise settled later through the returned [`Deferred`].
    #[must_use]
    pub fn deferred(&self) -> (Deferred, Promise) {
        Promise::deferred(&self.executor)
    }

    /// Start an expectation about `actual`.
    pub fn expect<'h>(&'h self, actual: &'h dyn Subject) -> Expectation<'h> {
        Expectation {
            host: self,
            actual,
            negated: false,
        }
    }

    fn evaluate(&self, name: &str, actual: &dyn Subject, args: &[Arg], negated: bool) -> Result<()> {
        let (pass, message) = match self.convention {
            Convention::Modern => {
                let factory = self
                    .matchers
                    .get(name)
                    .ok_or_else(|| Error::UnknownMatcher(name.to_string()))?;
                let result = factory().compare(&self.env, actual, args)?;
                (result.pass, result.failure_message().to_string())
            }
            Convention::Legacy => {
                let matcher = self
                    .legacy
                    .get(name)
                    .ok_or_else(|| Error::UnknownMatcher(name.to_string()))?;
                let mut context = LegacyContext::new(actual);
                let pass = matcher.call(&self.env, &mut context, args)?;
                let message = context
                    .message
                    .map(|pair| if negated { pair.negative() } else { pair.positive() })
                    .unwrap_or_default();
                (pass, message)
            }
        };

        if pass == negated {
            debug!(matcher = name, negated, "expectation failed");
            return Err(Error::assertion_failed(message));
        }
        Ok(())
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherHost for TestHost {
    fn convention(&self) -> Convention {
        self.convention
    }

    fn add_matchers(&mut self, catalogue: Catalogue) {
        self.matchers.extend(catalogue);
    }

    fn add_legacy_matchers(&mut self, catalogue: LegacyCatalogue) {
        self.legacy.extend(catalogue);
    }
}

/// A pending assertion about one subject.
#[derive(Debug)]
pub struct Expectation<'h> {
    host: &'h TestHost,
    actual: &'h dyn Subject,
    negated: bool,
}

impl Expectation<'_> {
    /// Negate the assertion.
    #[must_use]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Evaluate matcher `name` with `args`.
    ///
    /// # Errors
    ///
    /// - [`Error::AssertionFailed`] if the (possibly negated) assertion fails
    /// - [`Error::InvalidOperand`] if the matcher cannot handle the subject
    /// - [`Error::UnknownMatcher`] if `name` is not installed
    pub fn try_to(&self, name: &str, args: &[Arg]) -> Result<()> {
        self.host.evaluate(name, self.actual, args, self.negated)
    }

    /// Like [`try_to`](Self::try_to), panicking with the error message.
    ///
    /// # Panics
    ///
    /// Panics if the expectation does not hold for any reason.
    #[track_caller]
    pub fn to(&self, name: &str, args: &[Arg]) {
        if let Err(err) = self.try_to(name, args) {
            panic!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn host(convention: Convention) -> TestHost {
        let mut host = TestHost::with_convention(convention);
        install(&mut host);
        host
    }

    #[test]
    fn test_install_follows_convention() {
        let modern = host(Convention::Modern);
        assert!(modern.has_matcher("to_resolve"));
        assert_eq!(modern.legacy.len(), 0);

        let legacy = host(Convention::Legacy);
        assert!(legacy.has_matcher("to_have_been_resolved_with"));
        assert_eq!(legacy.matchers.len(), 0);
    }

    #[test]
    fn test_uninstalled_host_knows_nothing() {
        let host = TestHost::new();
        let err = host.expect(&json!(1)).try_to("to_be_promise", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown matcher: to_be_promise");
    }

    #[test]
    fn test_negation_picks_message() {
        for convention in [Convention::Modern, Convention::Legacy] {
            let host = host(convention);
            let promise = host.resolved(json!(1));

            host.expect(&promise).to("to_resolve", &[]);
            let err = host.expect(&promise).not().try_to("to_resolve", &[]).unwrap_err();
            assert_eq!(err.to_string(), "Expected promise not to have been resolved");

            let err = host.expect(&promise).try_to("to_reject", &[]).unwrap_err();
            assert_eq!(err.to_string(), "Expected promise to have been rejected");
        }
    }

    #[test]
    fn test_invalid_operand_is_not_an_assertion_failure() {
        let host = host(Convention::Modern);
        let err = host.expect(&json!("x")).not().try_to("to_resolve", &[]).unwrap_err();
        assert!(!err.is_assertion_failure());
        assert_eq!(err.to_string(), "Invalid operand: 'x' is not a promise");
    }

    #[test]
    fn test_with_config_applies_policy() {
        let config = MatcherConfig::from_toml_str("[isolate_scope]\nreserved_prefixes = [\"_\"]")
            .unwrap();
        let host = TestHost::new().with_config(&config);
        assert!(host.env().policy().is_reserved("_x"));
        assert!(!host.env().policy().is_reserved("$x"));
    }

    #[test]
    #[should_panic(expected = "Expected promise to have been resolved")]
    fn test_to_panics_with_message() {
        let host = host(Convention::Modern);
        let promise = host.pending();
        host.expect(&promise).to("to_resolve", &[]);
    }

    #[test]
    fn test_deferred_settles_before_flush() {
        let host = host(Convention::Modern);
        let (deferred, promise) = host.deferred();
        host.expect(&promise).not().to("to_resolve", &[]);
        deferred.resolve(json!("late"));
        host.expect(&promise).to("to_resolve_with", &[json!("late").into()]);
    }
}
