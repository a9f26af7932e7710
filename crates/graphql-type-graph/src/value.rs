use std::fmt::{self, Display};

use cynic_parser::ConstValue;
use itertools::Itertools;

use crate::render_sdl::write_quoted;

/// A constant GraphQL value, as found in default values and directive arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl From<ConstValue<'_>> for Value {
    fn from(value: ConstValue<'_>) -> Self {
        match value {
            ConstValue::Null(_) => Value::Null,
            ConstValue::Int(n) => Value::Int(n.as_i64()),
            ConstValue::Float(n) => Value::Float(n.as_f64()),
            ConstValue::String(s) => Value::String(s.as_str().to_owned()),
            ConstValue::Boolean(b) => Value::Boolean(b.value()),
            ConstValue::Enum(e) => Value::Enum(e.name().to_owned()),
            ConstValue::List(list) => Value::List(list.items().map(Value::from).collect()),
            ConstValue::Object(object) => Value::Object(
                object
                    .fields()
                    .map(|field| (field.name().to_owned(), Value::from(field.value())))
                    .collect(),
            ),
        }
    }
}

/// Renders the value as a GraphQL literal.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(n) => Display::fmt(n, f),
            Value::Float(n) => {
                let rendered = n.to_string();
                f.write_str(&rendered)?;

                // `1.0_f64` displays as `1`, which would read back as an Int.
                if !rendered.contains(['.', 'e', 'E']) {
                    f.write_str(".0")?;
                }

                Ok(())
            }
            Value::String(s) => write_quoted(f, s),
            Value::Boolean(true) => f.write_str("true"),
            Value::Boolean(false) => f.write_str("false"),
            Value::Enum(name) => f.write_str(name),
            Value::List(items) => write!(f, "[{}]", items.iter().format(", ")),
            Value::Object(fields) => {
                let fields = fields
                    .iter()
                    .format_with(", ", |(name, value), f| f(&format_args!("{name}: {value}")));

                write!(f, "{{{fields}}}")
            }
        }
    }
}
