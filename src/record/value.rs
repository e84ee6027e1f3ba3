use std::fmt;

/// A parsed field value. Typing is decided at parse time: `true`/`false`
/// (case-insensitive) become `Bool`, anything parseable as f64 becomes
/// `Number`, the rest stays `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn parse(raw: &str) -> Value {
        if raw.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        match raw.parse::<f64>() {
            Ok(number) => Value::Number(number),
            Err(_) => Value::Text(raw.to_string()),
        }
    }

    /// Numeric view used by the scorer. Booleans coerce to 1/0; text is
    /// re-parsed so a quoted number still scores.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Value::Number(number) => Some(*number),
            Value::Text(text) => text.parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Number(number) => write!(f, "{number}"),
            Value::Text(text) => write!(f, "{text}"),
        }
    }
}
