//! Diagnostic rendering of values.

use serde_json::{Map, Value};

/// Renders values into diagnostic text.
///
/// Output is only ever used in messages, never for equality.
pub trait PrettyPrint: Send + Sync {
    /// Render a value.
    fn print(&self, value: &Value) -> String;

    /// Render a callback-style expectation.
    fn print_callback(&self) -> String {
        "Function".to_string()
    }
}

/// Default printer, in the style of browser test runners:
/// `'text'`, `Object({ key: 'value' })`, `[ 1, 2 ]`.
///
/// # Example
///
/// ```rust
/// use mox_matchers::message::{DiagnosticPrinter, PrettyPrint};
/// use serde_json::json;
///
/// let printer = DiagnosticPrinter;
/// assert_eq!(printer.print(&json!({ "a": "b" })), "Object({ a: 'b' })");
/// assert_eq!(printer.print(&json!([1, "x"])), "[ 1, 'x' ]");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticPrinter;

impl PrettyPrint for DiagnosticPrinter {
    fn print(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => format!("'{s}'"),
            Value::Array(items) => {
                let items: Vec<_> = items.iter().map(|item| self.print(item)).collect();
                format!("[ {} ]", items.join(", "))
            }
            Value::Object(map) => self.print_map(map),
        }
    }
}

impl DiagnosticPrinter {
    fn print_map(&self, map: &Map<String, Value>) -> String {
        let entries: Vec<_> = map
            .iter()
            .map(|(key, value)| format!("{key}: {}", self.print(value)))
            .collect();
        format!("Object({{ {} }})", entries.join(", "))
    }
}

/// Something that can be embedded in a message template.
pub trait Render {
    /// Render through the given printer.
    fn render(&self, printer: &dyn PrettyPrint) -> String;
}

impl Render for Value {
    fn render(&self, printer: &dyn PrettyPrint) -> String {
        printer.print(self)
    }
}

impl Render for Map<String, Value> {
    fn render(&self, printer: &dyn PrettyPrint) -> String {
        printer.print(&Value::Object(self.clone()))
    }
}

impl Render for str {
    fn render(&self, printer: &dyn PrettyPrint) -> String {
        printer.print(&Value::String(self.to_string()))
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, printer: &dyn PrettyPrint) -> String {
        (**self).render(printer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_print_scalars() {
        let p = DiagnosticPrinter;
        assert_eq!(p.print(&Value::Null), "null");
        assert_eq!(p.print(&json!(true)), "true");
        assert_eq!(p.print(&json!(42)), "42");
        assert_eq!(p.print(&json!(1.5)), "1.5");
        assert_eq!(p.print(&json!("value")), "'value'");
    }

    #[test]
    fn test_print_empty_containers() {
        let p = DiagnosticPrinter;
        assert_eq!(p.print(&json!({})), "Object({  })");
        assert_eq!(p.print(&json!([])), "[  ]");
    }

    #[test]
    fn test_print_keeps_insertion_order() {
        let p = DiagnosticPrinter;
        let value = json!({ "param2": "b", "param1": "a" });
        assert_eq!(p.print(&value), "Object({ param2: 'b', param1: 'a' })");
    }

    #[test]
    fn test_print_nested() {
        let p = DiagnosticPrinter;
        let value = json!({ "list": [1, { "x": null }] });
        assert_eq!(p.print(&value), "Object({ list: [ 1, Object({ x: null }) ] })");
    }

    #[test]
    fn test_print_callback() {
        assert_eq!(DiagnosticPrinter.print_callback(), "Function");
    }
}
