//! Message templates and matcher results.
//!
//! - [`format`] - Interpolate `{0}`, `{1}`, ... with pretty-printed values
//! - [`build_result`] - Produce a [`MatcherResult`] and remember its message pair
//! - [`MessageCache`] - Formatted message pairs keyed by matcher name
//! - [`PrettyPrint`] - Value rendering used in messages
//!
//! # Example
//!
//! ```rust
//! use mox_matchers::message::{format, DiagnosticPrinter, Render};
//! use serde_json::json;
//!
//! let expected = json!({ "a": "1" });
//! let message = format("Expected {0} {not} to match", &DiagnosticPrinter, &[&expected]);
//! assert_eq!(message, "Expected Object({ a: '1' }) {not} to match");
//! ```

mod cache;
mod printer;
mod result;

use std::sync::LazyLock;

use regex::{Captures, Regex};

pub use cache::MessageCache;
pub use printer::{DiagnosticPrinter, PrettyPrint, Render};
pub use result::{build_result, MatcherResult, MessagePair, NOT_PLACEHOLDER};

static POSITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("positional placeholder pattern is valid"));

/// Replace every `{i}` in `template` with `values[i]` rendered by `printer`.
///
/// The template is scanned once, so rendered values are never themselves
/// searched for placeholders. Placeholders without a matching value are left
/// as they are.
pub fn format(template: &str, printer: &dyn PrettyPrint, values: &[&dyn Render]) -> String {
    POSITIONAL
        .replace_all(template, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| values.get(index))
                .map_or_else(|| caps[0].to_string(), |value| value.render(printer))
        })
        .into_owned()
}
