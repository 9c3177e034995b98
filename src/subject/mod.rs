//! What matchers are applied to, and what they are given.
//!
//! A [`Subject`] is the actual value of an expectation. Rather than inspecting
//! its shape, matchers ask it for capabilities: a promise-like view, a string
//! view, or an isolated-state accessor. An [`Arg`] is one positional argument
//! passed after the subject.

use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::message::{PrettyPrint, Render};
use crate::promise::{Promise, Thenable};

/// The actual value under test.
///
/// Implement this for component handles to make them usable with
/// `to_contain_isolate_scope`.
///
/// # Example
///
/// ```rust
/// use mox_matchers::message::PrettyPrint;
/// use mox_matchers::subject::Subject;
/// use serde_json::{json, Map, Value};
///
/// struct Widget {
///     scope: Map<String, Value>,
/// }
///
/// impl Subject for Widget {
///     fn describe(&self, _printer: &dyn PrettyPrint) -> String {
///         "Widget".to_string()
///     }
///
///     fn isolated_state(&self) -> Option<Map<String, Value>> {
///         Some(self.scope.clone())
///     }
/// }
///
/// let widget = Widget { scope: Map::new() };
/// assert!(widget.isolated_state().is_some());
/// assert!(widget.as_thenable().is_none());
/// ```
pub trait Subject {
    /// Render the subject for diagnostics.
    fn describe(&self, printer: &dyn PrettyPrint) -> String;

    /// The promise-like view, if the subject has one.
    fn as_thenable(&self) -> Option<&dyn Thenable> {
        None
    }

    /// The string view, if the subject has one.
    fn as_str(&self) -> Option<&str> {
        None
    }

    /// The component-local state, if the subject exposes it.
    fn isolated_state(&self) -> Option<Map<String, Value>> {
        None
    }
}

impl Subject for Value {
    fn describe(&self, printer: &dyn PrettyPrint) -> String {
        printer.print(self)
    }

    fn as_str(&self) -> Option<&str> {
        Value::as_str(self)
    }
}

impl Subject for str {
    fn describe(&self, printer: &dyn PrettyPrint) -> String {
        self.render(printer)
    }

    fn as_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl Subject for String {
    fn describe(&self, printer: &dyn PrettyPrint) -> String {
        self.as_str().render(printer)
    }

    fn as_str(&self) -> Option<&str> {
        Some(String::as_str(self))
    }
}

impl Subject for Promise {
    fn describe(&self, _printer: &dyn PrettyPrint) -> String {
        "Promise".to_string()
    }

    fn as_thenable(&self) -> Option<&dyn Thenable> {
        Some(self)
    }
}

impl<T: Subject + ?Sized> Subject for &T {
    fn describe(&self, printer: &dyn PrettyPrint) -> String {
        (**self).describe(printer)
    }

    fn as_thenable(&self) -> Option<&dyn Thenable> {
        (**self).as_thenable()
    }

    fn as_str(&self) -> Option<&str> {
        (**self).as_str()
    }

    fn isolated_state(&self) -> Option<Map<String, Value>> {
        (**self).isolated_state()
    }
}

impl<T: Subject + ?Sized> Subject for Box<T> {
    fn describe(&self, printer: &dyn PrettyPrint) -> String {
        (**self).describe(printer)
    }

    fn as_thenable(&self) -> Option<&dyn Thenable> {
        (**self).as_thenable()
    }

    fn as_str(&self) -> Option<&str> {
        (**self).as_str()
    }

    fn isolated_state(&self) -> Option<Map<String, Value>> {
        (**self).isolated_state()
    }
}

impl fmt::Debug for dyn Subject + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subject")
            .field(&self.describe(&crate::message::DiagnosticPrinter))
            .finish()
    }
}

impl Render for dyn Subject + '_ {
    fn render(&self, printer: &dyn PrettyPrint) -> String {
        self.describe(printer)
    }
}

/// A positional matcher argument.
#[derive(Clone)]
pub enum Arg {
    /// A plain expected value or option.
    Value(Value),
    /// A callback-style expectation, invoked with the settled value so the
    /// test can run its own nested assertions.
    Callback(Rc<dyn Fn(&Value)>),
}

impl Arg {
    /// Wrap a callback-style expectation.
    ///
    /// ```rust
    /// use mox_matchers::subject::Arg;
    ///
    /// let arg = Arg::callback(|v| assert!(v.is_string()));
    /// assert!(arg.as_value().is_none());
    /// ```
    pub fn callback(f: impl Fn(&Value) + 'static) -> Self {
        Self::Callback(Rc::new(f))
    }

    /// The plain value, if this is not a callback.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Callback(_) => None,
        }
    }

    /// Truthiness as used for boolean options: `true`, non-zero numbers and
    /// non-empty strings, any array, object or callback.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Value(Value::Null) => false,
            Self::Value(Value::Bool(b)) => *b,
            Self::Value(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Self::Value(Value::String(s)) => !s.is_empty(),
            Self::Value(Value::Array(_) | Value::Object(_)) | Self::Callback(_) => true,
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl Render for Arg {
    fn render(&self, printer: &dyn PrettyPrint) -> String {
        match self {
            Self::Value(v) => printer.print(v),
            Self::Callback(_) => printer.print_callback(),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}
