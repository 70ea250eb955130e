//! Property values and typed extraction.
//!
//! Destination configuration arrives loosely typed: URIs and TLS versions
//! are strings, proxy ports are integers, feature toggles are booleans.
//! [`PropertyValue`] stores all three shapes in one enum, and
//! [`FromPropertyValue`] converts back out with explicit failure instead of
//! silent coercion.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a stored value cannot be read as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot convert property value `{value}` to {expected}")]
pub struct ConversionError {
    /// Name of the requested type.
    pub expected: &'static str,
    /// Display rendering of the stored value.
    pub value: String,
}

impl ConversionError {
    fn mismatch(expected: &'static str, value: &PropertyValue) -> Self {
        Self {
            expected,
            value: value.to_string(),
        }
    }
}

/// A single destination property value.
///
/// Serialized untagged, so JSON `"TLSv1.2"`, `8080`, and `true` map to the
/// natural variants without a wrapper object.
///
/// # Examples
///
/// ```
/// use waypost_properties::PropertyValue;
///
/// let port = PropertyValue::from(8080_i64);
/// assert!(port.is_integer());
/// assert_eq!(port.to_string(), "8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum PropertyValue {
    /// UTF-8 text.
    String(String),
    /// Signed integer, wide enough for any port or size attribute.
    Integer(i64),
    /// Boolean flag.
    Boolean(bool),
}

impl PropertyValue {
    /// Whether this value is textual.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Whether this value is an integer.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Whether this value is a boolean.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Borrows the string content, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u16> for PropertyValue {
    fn from(value: u16) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Typed extraction out of a [`PropertyValue`].
///
/// `String` extraction is total: integers and booleans stringify. The
/// numeric and boolean extractions are strict apart from parsing numeric or
/// boolean strings, which keeps values round-tripping through text-based
/// configuration sources.
///
/// # Examples
///
/// ```
/// use waypost_properties::{FromPropertyValue, PropertyValue};
///
/// let value = PropertyValue::from("8080");
/// assert_eq!(u16::from_property_value(&value), Ok(8080));
/// assert!(bool::from_property_value(&value).is_err());
/// ```
pub trait FromPropertyValue: Sized {
    /// Attempts to extract `Self` from the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] when the stored value cannot represent
    /// `Self`.
    fn from_property_value(value: &PropertyValue) -> Result<Self, ConversionError>;
}

impl FromPropertyValue for String {
    fn from_property_value(value: &PropertyValue) -> Result<Self, ConversionError> {
        Ok(value.to_string())
    }
}

impl FromPropertyValue for i64 {
    fn from_property_value(value: &PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::Integer(i) => Ok(*i),
            PropertyValue::String(s) => s
                .parse()
                .map_err(|_| ConversionError::mismatch("i64", value)),
            PropertyValue::Boolean(_) => Err(ConversionError::mismatch("i64", value)),
        }
    }
}

impl FromPropertyValue for u16 {
    fn from_property_value(value: &PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::Integer(i) => {
                Self::try_from(*i).map_err(|_| ConversionError::mismatch("u16", value))
            }
            PropertyValue::String(s) => s
                .parse()
                .map_err(|_| ConversionError::mismatch("u16", value)),
            PropertyValue::Boolean(_) => Err(ConversionError::mismatch("u16", value)),
        }
    }
}

impl FromPropertyValue for bool {
    fn from_property_value(value: &PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::Boolean(b) => Ok(*b),
            PropertyValue::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            PropertyValue::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(ConversionError::mismatch("bool", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_from_impls() {
        assert_eq!(PropertyValue::from("x"), PropertyValue::String("x".into()));
        assert_eq!(PropertyValue::from(7_i64), PropertyValue::Integer(7));
        assert_eq!(PropertyValue::from(7_i32), PropertyValue::Integer(7));
        assert_eq!(PropertyValue::from(7_u16), PropertyValue::Integer(7));
        assert_eq!(PropertyValue::from(true), PropertyValue::Boolean(true));
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::from("TLSv1.2").to_string(), "TLSv1.2");
        assert_eq!(PropertyValue::from(443_i64).to_string(), "443");
        assert_eq!(PropertyValue::from(false).to_string(), "false");
    }

    #[test]
    fn test_string_extraction_is_total() {
        assert_eq!(
            String::from_property_value(&PropertyValue::from("a")).unwrap(),
            "a"
        );
        assert_eq!(
            String::from_property_value(&PropertyValue::from(42_i64)).unwrap(),
            "42"
        );
        assert_eq!(
            String::from_property_value(&PropertyValue::from(true)).unwrap(),
            "true"
        );
    }

    #[test]
    fn test_integer_extraction() {
        assert_eq!(
            i64::from_property_value(&PropertyValue::from(42_i64)).unwrap(),
            42
        );
        assert_eq!(
            i64::from_property_value(&PropertyValue::from("42")).unwrap(),
            42
        );
        assert!(i64::from_property_value(&PropertyValue::from("4x2")).is_err());
        assert!(i64::from_property_value(&PropertyValue::from(true)).is_err());
    }

    #[test]
    fn test_port_extraction() {
        assert_eq!(
            u16::from_property_value(&PropertyValue::from(8080_i64)).unwrap(),
            8080
        );
        assert_eq!(
            u16::from_property_value(&PropertyValue::from("8080")).unwrap(),
            8080
        );
        assert!(u16::from_property_value(&PropertyValue::from(70000_i64)).is_err());
        assert!(u16::from_property_value(&PropertyValue::from(-1_i64)).is_err());
    }

    #[test]
    fn test_boolean_extraction() {
        assert!(bool::from_property_value(&PropertyValue::from(true)).unwrap());
        assert!(bool::from_property_value(&PropertyValue::from("TRUE")).unwrap());
        assert!(!bool::from_property_value(&PropertyValue::from("false")).unwrap());
        assert!(bool::from_property_value(&PropertyValue::from("yes")).is_err());
        assert!(bool::from_property_value(&PropertyValue::from(1_i64)).is_err());
    }

    #[test]
    fn test_conversion_error_message() {
        let err = u16::from_property_value(&PropertyValue::from(-1_i64)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert property value `-1` to u16");
    }

    #[test]
    fn test_untagged_serde() {
        let json = serde_json::to_string(&PropertyValue::from("TLSv1.2")).unwrap();
        assert_eq!(json, "\"TLSv1.2\"");

        let value: PropertyValue = serde_json::from_str("8080").unwrap();
        assert_eq!(value, PropertyValue::Integer(8080));

        let value: PropertyValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, PropertyValue::Boolean(true));
    }
}

#[cfg(test)]
mod proptests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn integer_values_round_trip_through_strings(i in any::<i64>()) {
            let rendered = String::from_property_value(&PropertyValue::Integer(i)).unwrap();
            let reparsed = i64::from_property_value(&PropertyValue::String(rendered)).unwrap();
            prop_assert_eq!(reparsed, i);
        }

        #[test]
        fn ports_extract_within_range(p in any::<u16>()) {
            let value = PropertyValue::from(p);
            prop_assert_eq!(u16::from_property_value(&value).unwrap(), p);
        }

        #[test]
        fn string_extraction_never_fails(s in ".*") {
            let value = PropertyValue::from(s.as_str());
            prop_assert_eq!(String::from_property_value(&value).unwrap(), s);
        }
    }
}
