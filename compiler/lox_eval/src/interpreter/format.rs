//! Value rendering for `print`.

use lox_ir::format_number;

use super::Interpreter;
use crate::value::Value;

impl Interpreter<'_> {
    /// Render a value the way Lox prints it: numbers drop an integral
    /// fraction, strings appear without quotes, and the callable kinds
    /// identify themselves by name.
    pub fn stringify(&self, value: &Value) -> String {
        match value {
            Value::Nil => "nil".to_string(),
            Value::Bool(value) => value.to_string(),
            Value::Number(value) => format_number(*value),
            Value::Str(value) => value.to_string(),
            Value::Function(function) => {
                format!("<fn {}>", self.interner.lookup(function.name()))
            }
            Value::Native(_) => "<native fn>".to_string(),
            Value::Class(class) => self.interner.lookup(class.name()).to_string(),
            Value::Instance(instance) => {
                format!("{} instance", self.interner.lookup(instance.class().name()))
            }
        }
    }
}
