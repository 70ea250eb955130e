//! Error types for destination construction and attribute access.

use thiserror::Error;

use waypost_properties::PropertyError;

use crate::proxy::ProxyDerivationError;

/// Errors surfaced by destination builders and the destination read
/// contract.
///
/// The taxonomy keeps three outcomes apart that callers must not confuse:
/// an attribute that is supported but absent (`Ok(None)` at the call
/// site), an attribute this destination kind never provides
/// ([`UnsupportedAttribute`](Self::UnsupportedAttribute)), and a stored
/// value that exists but is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DestinationError {
    /// A property the read contract requires is not stored.
    ///
    /// Builders default the URI, so hitting this means the destination was
    /// assembled outside the builder path.
    #[error("Required property `{0}` is missing")]
    MissingProperty(&'static str),

    /// A stored URI value failed to parse at first use.
    ///
    /// URI well-formedness is checked lazily, so the error surfaces on the
    /// read, not at build time.
    #[error("Property `{key}` holds a malformed URI: {source}")]
    InvalidUri {
        /// Canonical name of the offending property.
        key: &'static str,
        /// The parser's verdict.
        #[source]
        source: url::ParseError,
    },

    /// The attribute is never provided by this destination kind.
    ///
    /// Distinct from a supported attribute that happens to be absent,
    /// which reads as `Ok(None)`.
    #[error("Attribute `{0}` is not supported by this destination kind")]
    UnsupportedAttribute(&'static str),

    /// A stored property exists but cannot be read as its expected type.
    #[error("Destination property is unreadable: {0}")]
    Property(#[from] PropertyError),

    /// Proxy settings could not be derived while building.
    #[error("Proxy configuration could not be derived: {0}")]
    Derivation(#[from] ProxyDerivationError),
}

impl DestinationError {
    /// Whether this error marks an attribute outside the destination
    /// kind's contract, as opposed to a bad or missing value.
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedAttribute(_))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_is_unsupported() {
        assert!(DestinationError::UnsupportedAttribute("key_store").is_unsupported());
        assert!(!DestinationError::MissingProperty("URI").is_unsupported());
        assert!(!DestinationError::Derivation(ProxyDerivationError::MissingPort).is_unsupported());
    }

    #[test]
    fn test_messages_name_the_attribute() {
        assert_eq!(
            DestinationError::MissingProperty("URI").to_string(),
            "Required property `URI` is missing"
        );
        assert_eq!(
            DestinationError::UnsupportedAttribute("basic_credentials").to_string(),
            "Attribute `basic_credentials` is not supported by this destination kind"
        );
    }

    #[test]
    fn test_invalid_uri_chains_parse_error() {
        let source = url::Url::parse("not a uri").unwrap_err();
        let error = DestinationError::InvalidUri { key: "URI", source };
        assert!(error.source().is_some());
        assert!(error.to_string().contains("URI"));
    }

    #[test]
    fn test_derivation_errors_convert() {
        let error: DestinationError = ProxyDerivationError::MissingHost.into();
        assert!(matches!(
            error,
            DestinationError::Derivation(ProxyDerivationError::MissingHost)
        ));
    }

    #[test]
    fn test_property_errors_convert() {
        let conversion = waypost_properties::ConversionError {
            expected: "u16",
            value: "70000".to_owned(),
        };
        let error: DestinationError = PropertyError::Conversion {
            key: "PROXY_PORT".to_owned(),
            source: conversion,
        }
        .into();
        assert!(matches!(error, DestinationError::Property(_)));
        assert!(error.source().is_some());
    }
}
