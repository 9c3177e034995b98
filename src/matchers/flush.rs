//! Forcing a promise to report its outcome synchronously.
//!
//! [`settle`] attaches a [`Probe`] to each path of a promise, acquires a scope
//! and drains it once. Whatever has fired by then is the outcome; a promise
//! that has not settled is reported as such, with no waiting or retrying.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use super::probe::Probe;
use super::MatcherEnv;
use crate::error::{Error, Result};
use crate::message::MatcherResult;
use crate::promise::Thenable;
use crate::subject::{Arg, Subject};

/// Which settlement an assertion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// The success path.
    Resolved,
    /// The failure path.
    Rejected,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Resolved => write!(f, "resolved"),
            Verb::Rejected => write!(f, "rejected"),
        }
    }
}

/// The probes of one flush.
#[derive(Debug)]
pub struct Settled {
    fulfilled: Probe,
    rejected: Probe,
}

impl Settled {
    /// The probe for `verb`.
    #[must_use]
    pub fn probe(&self, verb: Verb) -> &Probe {
        match verb {
            Verb::Resolved => &self.fulfilled,
            Verb::Rejected => &self.rejected,
        }
    }

    /// The value passed to the `verb` path, if it fired.
    #[must_use]
    pub fn value(&self, verb: Verb) -> Option<Value> {
        self.probe(verb).most_recent()
    }
}

/// Returns the promise-like view of `actual`, or an invalid-operand error.
///
/// # Errors
///
/// Returns [`Error::InvalidOperand`] if `actual` is not promise-like.
pub fn assert_promise<'a>(env: &MatcherEnv, actual: &'a dyn Subject) -> Result<&'a dyn Thenable> {
    actual.as_thenable().ok_or_else(|| {
        Error::invalid_operand(format!("{} is not a promise", actual.describe(env.printer())))
    })
}

/// Register probes on both paths of `actual` and drain pending continuations once.
///
/// # Errors
///
/// Returns [`Error::InvalidOperand`] if `actual` is not promise-like.
pub fn settle(env: &MatcherEnv, actual: &dyn Subject) -> Result<Settled> {
    let thenable = assert_promise(env, actual)?;
    let settled = Settled {
        fulfilled: Probe::new("Promise success callback"),
        rejected: Probe::new("Promise failure callback"),
    };
    thenable.then(settled.fulfilled.callback(), settled.rejected.callback());

    let mut scope = env.acquire_scope();
    let polls = scope.drain_once();
    debug!(
        polls,
        resolved = settled.fulfilled.was_called(),
        rejected = settled.rejected.was_called(),
        "flushed promise"
    );
    Ok(settled)
}

/// Whether `actual` settled along the `verb` path at all.
///
/// # Errors
///
/// Returns [`Error::InvalidOperand`] if `actual` is not promise-like.
pub fn settles(env: &MatcherEnv, name: &str, actual: &dyn Subject, verb: Verb) -> Result<MatcherResult> {
    let settled = settle(env, actual)?;
    let pass = settled.probe(verb).was_called();
    let template = format!("Expected promise {{not}} to have been {verb}");
    Ok(env.result(name, pass, &template, &[]))
}

/// Whether `actual` settled along the `verb` path with `expected`.
///
/// A callback expectation is invoked with the settled value and the
/// assertion then passes; any other expectation is compared structurally.
/// A missing expectation stands for `null`.
///
/// # Errors
///
/// Returns [`Error::InvalidOperand`] if `actual` is not promise-like.
pub fn resolve_promise(
    env: &MatcherEnv,
    name: &str,
    actual: &dyn Subject,
    expected: Option<&Arg>,
    verb: Verb,
) -> Result<MatcherResult> {
    let settled = settle(env, actual)?;
    let expected = expected.cloned().unwrap_or(Arg::Value(Value::Null));

    let Some(value) = settled.value(verb) else {
        let template =
            format!("Expected promise to have been {verb} with {{0}} but it was not {verb} at all");
        return Ok(env.result(name, false, &template, &[&expected]));
    };

    let pass = match &expected {
        Arg::Callback(check) => {
            check(&value);
            true
        }
        Arg::Value(expected) => *expected == value,
    };
    let template =
        format!("Expected promise {{not}} to have been {verb} with {{0}} but was {verb} with {{1}}");
    Ok(env.result(name, pass, &template, &[&expected, &value]))
}
