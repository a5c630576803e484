//! Typed values for scalar configuration entries.

/// A configuration string coerced to the type it spells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Bool(bool),
    Int(i64),
    /// The text is neither a boolean nor an integer.
    Error(String),
}

/// Parse a configuration scalar.
///
/// Booleans are `true/false`, `yes/no` and `on/off` in any case; integers
/// are anything `i64` accepts. Everything else, including the empty
/// string, is [`TypedValue::Error`].
pub fn parse_value(text: &str) -> TypedValue {
    let text = text.trim();
    match text.to_lowercase().as_str() {
        "true" | "yes" | "on" => return TypedValue::Bool(true),
        "false" | "no" | "off" => return TypedValue::Bool(false),
        _ => {}
    }

    match text.parse::<i64>() {
        Ok(n) => TypedValue::Int(n),
        Err(_) => TypedValue::Error(format!("'{}' is not a boolean or an integer", text)),
    }
}

impl TypedValue {
    /// Interpret as a flag: booleans as-is, integers as non-zero.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            TypedValue::Int(n) => Some(*n != 0),
            TypedValue::Error(_) => None,
        }
    }

    /// Interpret as a count of at least one.
    pub fn as_positive(&self) -> Option<usize> {
        match self {
            TypedValue::Int(n) if *n >= 1 => usize::try_from(*n).ok(),
            _ => None,
        }
    }
}
