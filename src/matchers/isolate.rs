//! Isolated component state matcher.

use serde_json::{Map, Value};

use super::{contains_all, expected_object, Matcher, MatcherEnv};
use crate::error::Result;
use crate::message::MatcherResult;
use crate::subject::{Arg, Subject};

/// `to_contain_isolate_scope(expected)`: the subject's isolated state holds
/// every key/value of `expected`, ignoring framework-reserved keys.
pub fn to_contain_isolate_scope() -> Matcher {
    Matcher::new("to_contain_isolate_scope", compare_to_contain_isolate_scope)
}

fn compare_to_contain_isolate_scope(
    env: &MatcherEnv,
    actual: &dyn Subject,
    args: &[Arg],
) -> Result<MatcherResult> {
    let Some(state) = actual.isolated_state() else {
        let null = Arg::Value(Value::Null);
        return Ok(env.result(
            "to_contain_isolate_scope",
            false,
            "Expected element isolate scope {not} to contain {0} but the expected element has no isolate scope",
            &[args.first().unwrap_or(&null)],
        ));
    };
    let expected = expected_object(env, args.first())?;

    let scope = user_keys(env, state);
    let pass = contains_all(&scope, &expected);
    Ok(env.result(
        "to_contain_isolate_scope",
        pass,
        "Expected element isolate scope {not} to contain {0} but got {1}",
        &[&expected, &scope],
    ))
}

fn user_keys(env: &MatcherEnv, state: Map<String, Value>) -> Map<String, Value> {
    state
        .into_iter()
        .filter(|(key, _)| !env.policy().is_reserved(key))
        .collect()
}
