//! Promise matchers.

use super::flush::{assert_promise, resolve_promise, settles, Verb};
use super::{Matcher, MatcherEnv};
use crate::error::Result;
use crate::message::MatcherResult;
use crate::subject::{Arg, Subject};

/// `to_be_promise`: the subject exposes a completion registration.
///
/// Only inspects the subject; nothing is run.
pub fn to_be_promise() -> Matcher {
    Matcher::new("to_be_promise", compare_to_be_promise)
}

fn compare_to_be_promise(env: &MatcherEnv, actual: &dyn Subject, _args: &[Arg]) -> Result<MatcherResult> {
    let pass = assert_promise(env, actual).is_ok();
    Ok(env.result(
        "to_be_promise",
        pass,
        "Expected {0} {not} to be a promise",
        &[&actual],
    ))
}

/// `to_resolve`: the promise settles along its success path.
pub fn to_resolve() -> Matcher {
    Matcher::new("to_resolve", compare_to_resolve)
}

fn compare_to_resolve(env: &MatcherEnv, actual: &dyn Subject, _args: &[Arg]) -> Result<MatcherResult> {
    settles(env, "to_resolve", actual, Verb::Resolved)
}

/// `to_resolve_with(expected)`: the promise resolves with `expected`, or, for
/// a callback expectation, resolves at all and the callback sees the value.
pub fn to_resolve_with() -> Matcher {
    Matcher::new("to_resolve_with", compare_to_resolve_with)
}

fn compare_to_resolve_with(env: &MatcherEnv, actual: &dyn Subject, args: &[Arg]) -> Result<MatcherResult> {
    resolve_promise(env, "to_resolve_with", actual, args.first(), Verb::Resolved)
}

/// `to_reject`: the promise settles along its failure path.
pub fn to_reject() -> Matcher {
    Matcher::new("to_reject", compare_to_reject)
}

fn compare_to_reject(env: &MatcherEnv, actual: &dyn Subject, _args: &[Arg]) -> Result<MatcherResult> {
    settles(env, "to_reject", actual, Verb::Rejected)
}

/// `to_reject_with(expected)`: the rejection counterpart of [`to_resolve_with`].
pub fn to_reject_with() -> Matcher {
    Matcher::new("to_reject_with", compare_to_reject_with)
}

fn compare_to_reject_with(env: &MatcherEnv, actual: &dyn Subject, args: &[Arg]) -> Result<MatcherResult> {
    resolve_promise(env, "to_reject_with", actual, args.first(), Verb::Rejected)
}
