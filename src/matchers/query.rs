//! Query-string matcher.

use serde_json::{Map, Value};

use super::{contains_all, expected_object, Matcher, MatcherEnv};
use crate::error::{Error, Result};
use crate::message::MatcherResult;
use crate::subject::{Arg, Subject};

/// `to_have_query_params(expected, strict?)`: every expected parameter is in
/// the URI's query string; with `strict`, nothing else is.
pub fn to_have_query_params() -> Matcher {
    Matcher::new("to_have_query_params", compare_to_have_query_params)
}

fn compare_to_have_query_params(
    env: &MatcherEnv,
    actual: &dyn Subject,
    args: &[Arg],
) -> Result<MatcherResult> {
    let uri = actual.as_str().ok_or_else(|| {
        Error::invalid_operand(format!("{} is not a string", actual.describe(env.printer())))
    })?;
    let expected = expected_object(env, args.first())?;
    let strict = args.get(1).is_some_and(Arg::is_truthy);

    let params = parse_query(uri);
    let pass = contains_all(&params, &expected) && (!strict || contains_all(&expected, &params));

    Ok(env.result(
        "to_have_query_params",
        pass,
        "Expected URI {not} to have params {0}, actual params were {1} in {2}",
        &[&expected, &params, &uri],
    ))
}

/// Parse the query string of `uri` into `key -> value`.
///
/// Only the text after the first `?` is considered. Pairs are split on `&`
/// and then on the first `=`. Values are kept as written, without
/// percent-decoding. A key without `=` maps to `""` and a repeated key keeps
/// its last value.
///
/// # Example
///
/// ```rust
/// use mox_matchers::matchers::parse_query;
/// use serde_json::json;
///
/// let params = parse_query("/items?page=2&sort=name&flag");
/// assert_eq!(
///     serde_json::Value::Object(params),
///     json!({ "page": "2", "sort": "name", "flag": "" })
/// );
/// ```
#[must_use]
pub fn parse_query(uri: &str) -> Map<String, Value> {
    let Some((_, query)) = uri.split_once('?') else {
        return Map::new();
    };

    let mut params = Map::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(key.to_string(), Value::String(value.to_string()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::TestExecutor;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn env() -> MatcherEnv {
        MatcherEnv::new(TestExecutor::new())
    }

    fn check(uri: &str, expected: Value, strict: bool) -> MatcherResult {
        to_have_query_params()
            .compare(&env(), &json!(uri), &[expected.into(), strict.into()])
            .unwrap()
    }

    #[test]
    fn test_parse_query_edge_cases() {
        assert!(parse_query("path").is_empty());
        assert!(parse_query("path?").is_empty());
        assert_eq!(Value::Object(parse_query("?a=1&&b=2")), json!({ "a": "1", "b": "2" }));
        assert_eq!(Value::Object(parse_query("p?a=1&a=2")), json!({ "a": "2" }));
        assert_eq!(Value::Object(parse_query("p?x=a=b")), json!({ "x": "a=b" }));
        assert_eq!(Value::Object(parse_query("p?q=a%20b")), json!({ "q": "a%20b" }));
        assert_eq!(Value::Object(parse_query("p?a=1?b=2")), json!({ "a": "1?b=2" }));
    }

    #[test]
    fn test_passes_when_params_present() {
        let result = check("path?param1=param1", json!({ "param1": "param1" }), false);
        assert!(result.pass);
        assert_eq!(
            result.message,
            "Expected URI not to have params Object({ param1: 'param1' }), actual params were \
             Object({ param1: 'param1' }) in 'path?param1=param1'"
        );
    }

    #[test]
    fn test_fails_when_param_missing() {
        let result = check("path?param1=param1", json!({ "param2": "param2" }), false);
        assert!(!result.pass);
        assert_eq!(
            result.message,
            "Expected URI to have params Object({ param2: 'param2' }), actual params were \
             Object({ param1: 'param1' }) in 'path?param1=param1'"
        );
    }

    #[test]
    fn test_strict_requires_exact_set() {
        let uri = "path?param1=param1&param2=param2";
        assert!(check(uri, json!({ "param1": "param1" }), false).pass);
        assert!(!check(uri, json!({ "param1": "param1" }), true).pass);
        assert!(check(uri, json!({ "param2": "param2", "param1": "param1" }), true).pass);
    }

    #[test]
    fn test_values_must_match() {
        assert!(!check("path?a=1", json!({ "a": "2" }), false).pass);
        assert!(!check("path?a=1", json!({ "a": 1 }), false).pass);
    }

    #[test]
    fn test_strict_option_defaults_off() {
        let result = to_have_query_params()
            .compare(&env(), &json!("path?a=1&b=2"), &[json!({ "a": "1" }).into()])
            .unwrap();
        assert!(result.pass);
    }

    #[test]
    fn test_non_string_subject_is_invalid() {
        let err = to_have_query_params()
            .compare(&env(), &json!(42), &[json!({}).into()])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid operand: 42 is not a string");
    }
}
