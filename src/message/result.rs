//! The structured matcher result and the legacy message pair.

use serde::Serialize;

use super::{format, MessageCache, PrettyPrint, Render};

/// Marks where "not" goes in a template.
pub const NOT_PLACEHOLDER: &str = "{not}";

/// Outcome of a single matcher evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatcherResult {
    /// Whether the assertion holds.
    pub pass: bool,
    /// Describes the failure the assertion guards against.
    ///
    /// Phrased negatively ("... not to ...") when `pass` is true, since it is
    /// then shown for a failed negated assertion.
    pub message: String,
}

impl MatcherResult {
    /// The message a host shows when the (possibly negated) assertion fails.
    #[must_use]
    pub fn failure_message(&self) -> &str {
        &self.message
    }
}

/// Build a [`MatcherResult`] from a template.
///
/// The template is split at its polarity placeholder and each half is
/// formatted with `values`, so rendered values never take part in polarity
/// resolution. The formatted halves are stored in `cache` under `name` as a
/// [`MessagePair`]. The returned message reads ` not` at the placeholder when
/// `pass` is true and drops it otherwise.
///
/// # Example
///
/// ```rust
/// use mox_matchers::message::{build_result, DiagnosticPrinter, MessageCache, MessagePair};
/// use serde_json::json;
///
/// let cache = MessageCache::new();
/// let result = build_result(
///     &cache,
///     &DiagnosticPrinter,
///     "to_be_even",
///     true,
///     "Expected {0} {not} to be even",
///     &[&json!(4)],
/// );
/// assert!(result.pass);
/// assert_eq!(result.message, "Expected 4 not to be even");
/// assert_eq!(cache.get("to_be_even"), Some(MessagePair::new("Expected 4 {not} to be even")));
/// ```
pub fn build_result(
    cache: &MessageCache,
    printer: &dyn PrettyPrint,
    name: &str,
    pass: bool,
    template: &str,
    values: &[&dyn Render],
) -> MatcherResult {
    let (head, tail) = split_polarity(template);
    let pair = MessagePair {
        head: format(head, printer, values),
        tail: tail.map(|tail| format(tail, printer, values)),
    };
    let message = if pass { pair.negative() } else { pair.positive() };
    cache.store(name, pair);
    MatcherResult { pass, message }
}

/// Splits at the first ` {not}`.
fn split_polarity(template: &str) -> (&str, Option<&str>) {
    match template.split_once(&format!(" {NOT_PLACEHOLDER}")) {
        Some((head, tail)) => (head, Some(tail)),
        None => (template, None),
    }
}

/// Both messages of the legacy convention.
///
/// Holds the text before and after the polarity placeholder; a message
/// without a placeholder reads the same both ways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePair {
    head: String,
    tail: Option<String>,
}

impl MessagePair {
    /// Splits a literal text at its first ` {not}`.
    ///
    /// The text is taken as is; use [`build_result`] to produce a pair from a
    /// template with values.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let (head, tail) = split_polarity(text);
        Self {
            head: head.to_string(),
            tail: tail.map(str::to_string),
        }
    }

    /// A message that reads the same both ways.
    #[must_use]
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            head: text.into(),
            tail: None,
        }
    }

    /// Message for a failed positive assertion.
    #[must_use]
    pub fn positive(&self) -> String {
        match &self.tail {
            Some(tail) => format!("{}{tail}", self.head),
            None => self.head.clone(),
        }
    }

    /// Message for a failed negated assertion.
    #[must_use]
    pub fn negative(&self) -> String {
        match &self.tail {
            Some(tail) => format!("{} not{tail}", self.head),
            None => self.head.clone(),
        }
    }

    /// `[positive, negative]`, in the order legacy hosts expect.
    #[must_use]
    pub fn pair(&self) -> [String; 2] {
        [self.positive(), self.negative()]
    }
}
