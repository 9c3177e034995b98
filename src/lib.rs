//! # mox-matchers
//!
//! > Custom matchers for behavior tests of promise-based code
//!
//! **mox-matchers** provides assertions over promise outcomes, URI query
//! strings and the isolated state of components. Promise assertions are
//! synchronous: the matcher drains the pending continuations once and reports
//! what has settled by then.
//!
//! ## Quick Start
//!
//! ```rust
//! use mox_matchers::prelude::*;
//! use serde_json::json;
//!
//! let mut host = TestHost::new();
//! install(&mut host);
//!
//! let promise = host.rejected(json!({ "status": 404 }));
//! host.expect(&promise).to("to_reject_with", &[json!({ "status": 404 }).into()]);
//!
//! host.expect(&json!("/users?page=2&sort=name"))
//!     .to("to_have_query_params", &[json!({ "page": "2" }).into()]);
//! ```
//!
//! ## Features
//!
//! - **Promise matchers** - `to_resolve`, `to_resolve_with`, `to_reject`,
//!   `to_reject_with` and `to_be_promise`
//! - **Query parameters** - `to_have_query_params`, optionally strict
//! - **Isolated state** - `to_contain_isolate_scope`
//! - **Legacy convention** - boolean matchers with positive/negative message pairs
//! - **Test attribute** - `#[mox_matchers::test]` with the `macros` feature

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod executor;
pub mod host;
pub mod matchers;
pub mod message;
pub mod promise;
pub mod subject;

/// Prelude for convenient imports
///
/// ```rust
/// use mox_matchers::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::MatcherConfig;
    pub use crate::error::{Error, Result};
    pub use crate::executor::TestExecutor;
    pub use crate::host::{install, Convention, Expectation, MatcherHost, TestHost};
    pub use crate::matchers::{catalogue, Matcher, MatcherEnv};
    pub use crate::message::MatcherResult;
    pub use crate::promise::{Deferred, Promise, Thenable};
    pub use crate::subject::{Arg, Subject};
}

// Re-exports
pub use error::{Error, Result};

// Re-export the test macro when macros feature is enabled
#[cfg(feature = "macros")]
pub use mox_matchers_macros::test;
