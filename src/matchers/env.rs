//! Injected collaborators shared by every matcher call.

use std::fmt;
use std::sync::Arc;

use crate::config::{IsolatePolicy, MatcherConfig};
use crate::executor::{Scope, ScopeFactory};
use crate::message::{build_result, DiagnosticPrinter, MatcherResult, MessageCache, PrettyPrint, Render};

/// Everything a matcher needs besides its arguments.
///
/// Each test should own its own environment so message templates cannot
/// leak between tests.
#[derive(Clone)]
pub struct MatcherEnv {
    scopes: Arc<dyn ScopeFactory>,
    messages: MessageCache,
    printer: Arc<dyn PrettyPrint>,
    policy: IsolatePolicy,
}

impl MatcherEnv {
    /// Environment with default printer, policy and an empty message cache.
    pub fn new(scopes: impl ScopeFactory + 'static) -> Self {
        Self::from_config(scopes, &MatcherConfig::default())
    }

    /// Environment using the policies from `config`.
    pub fn from_config(scopes: impl ScopeFactory + 'static, config: &MatcherConfig) -> Self {
        Self {
            scopes: Arc::new(scopes),
            messages: MessageCache::new(),
            printer: Arc::new(DiagnosticPrinter),
            policy: config.isolate_scope.clone(),
        }
    }

    /// Replace the pretty-printer.
    #[must_use]
    pub fn with_printer(mut self, printer: impl PrettyPrint + 'static) -> Self {
        self.printer = Arc::new(printer);
        self
    }

    /// Use an existing message cache, e.g. one shared with a legacy host.
    #[must_use]
    pub fn with_messages(mut self, messages: MessageCache) -> Self {
        self.messages = messages;
        self
    }

    /// Replace the isolated-state key policy.
    #[must_use]
    pub fn with_policy(mut self, policy: IsolatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The message cache written by every result.
    #[must_use]
    pub fn messages(&self) -> &MessageCache {
        &self.messages
    }

    /// The pretty-printer used for messages.
    #[must_use]
    pub fn printer(&self) -> &dyn PrettyPrint {
        self.printer.as_ref()
    }

    /// The isolated-state key policy.
    #[must_use]
    pub fn policy(&self) -> &IsolatePolicy {
        &self.policy
    }

    /// Acquire a scope for draining pending continuations.
    #[must_use]
    pub fn acquire_scope(&self) -> Box<dyn Scope + '_> {
        self.scopes.acquire()
    }

    /// Shorthand for [`build_result`] with this environment's cache and printer.
    #[must_use]
    pub fn result(
        &self,
        name: &str,
        pass: bool,
        template: &str,
        values: &[&dyn Render],
    ) -> MatcherResult {
        build_result(&self.messages, self.printer(), name, pass, template, values)
    }
}

impl fmt::Debug for MatcherEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherEnv")
            .field("messages", &self.messages)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
