//! Host-level values exchanged with the pack and unpack engines.

/// A single value of a value sequence.
///
/// Unpacking produces `Unsigned` for `u`, `Signed` for `s`, `Float` for `f`,
/// `Bool` for `b`, `Raw` for `r` and `Text` for `t` fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Unsigned(u128),
    Signed(i128),
    Float(f64),
    Bool(bool),
    Raw(Vec<u8>),
    Text(String),
}

impl Value {
    /// Two's complement bit pattern of integer-like values.
    pub fn as_bits(&self) -> Option<u128> {
        match *self {
            Value::Unsigned(v) => Some(v),
            Value::Signed(v) => Some(v as u128),
            Value::Bool(v) => Some(v as u128),
            _ => None,
        }
    }

    /// Truthiness of bool and integer values.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(v) => Some(v),
            Value::Unsigned(v) => Some(v != 0),
            Value::Signed(v) => Some(v != 0),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v),
            Value::Unsigned(v) => Some(v as f64),
            Value::Signed(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Bytes of raw and text values.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Raw(v) => Some(v.as_slice()),
            Value::Text(v) => Some(v.as_bytes()),
            _ => None,
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Unsigned(value as u128)
            }
        })*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Signed(value as i128)
            }
        })*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Raw(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Raw(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(value: &[u8; N]) -> Self {
        Value::Raw(value.to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// Builds a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use bitstruct::{values, Value};
///
/// let v = values![1u8, -2, 1.5, true, b"\x80"];
/// assert_eq!(v[1], Value::Signed(-2));
/// ```
#[macro_export]
macro_rules! values {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::Value::from($value)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_bits_wrap() {
        assert_eq!(Value::from(-1i8).as_bits(), Some(u128::MAX));
        assert_eq!(Value::from(true).as_bits(), Some(1));
        assert_eq!(Value::from(1.0).as_bits(), None);
    }

    #[test]
    fn test_truthiness() {
        assert_eq!(Value::from(0u8).as_bool(), Some(false));
        assert_eq!(Value::from(-3).as_bool(), Some(true));
        assert_eq!(Value::from("x").as_bool(), None);
    }

    #[test]
    fn test_text_bytes() {
        assert_eq!(Value::from("ab").as_bytes(), Some(&b"ab"[..]));
    }

    #[test]
    fn test_values_macro() {
        let v = crate::values![0u8, -2, 3.75, b"\x00\xff"];
        assert_eq!(
            v,
            vec![
                Value::Unsigned(0),
                Value::Signed(-2),
                Value::Float(3.75),
                Value::Raw(vec![0x00, 0xff])
            ]
        );
    }
}
