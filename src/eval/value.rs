use core::fmt;

use serde::{ser::Error as _, Deserialize, Serialize, Serializer};

/// Integral numbers below this magnitude print with a trailing `.0`.
const PLAIN_INTEGRAL_LIMIT: f64 = 1e16;

/// Runtime values of the expression language.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Boolean(bool),
}

impl Value {
    /// Truthiness used by `assert`, `not`, `and` and `or`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0,
        }
    }

    /// Numeric view used by arithmetic and comparisons; booleans are 0 or 1.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(true) => 1.0,
            Value::Boolean(false) => 0.0,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Number(0.0)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// Text produced by `print`: `20.0`, `2.5`, `true`. Booleans are lowercase and
/// exponents have no sign or padding (`1e20`, `2.5e-7`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < PLAIN_INTEGRAL_LIMIT => {
                write!(f, "{:.1}", n)
            }
            Value::Number(n) => write!(f, "{:?}", n),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Value::Number(n) => Err(S::Error::custom(format!(
                "non-finite number {:?} cannot be encoded",
                n
            ))),
        }
    }
}
