//! Well-known destination property keys.
//!
//! Key names are the wire contract: destination payloads store attributes
//! under these exact strings, so the constants must not drift.

use waypost_properties::PropertyKey;

/// Target endpoint URI. Required on every destination; the builder applies
/// a default when none is configured.
pub const URI: PropertyKey<String> = PropertyKey::new("URI");

/// Minimum TLS version requested from the execution layer.
pub const TLS_VERSION: PropertyKey<String> = PropertyKey::new("TLS_VERSION");

/// Host of the forward proxy, read during proxy derivation.
pub const PROXY_HOST: PropertyKey<String> = PropertyKey::new("PROXY_HOST");

/// Port of the forward proxy, read during proxy derivation.
pub const PROXY_PORT: PropertyKey<u16> = PropertyKey::new("PROXY_PORT");

/// Username presented to the forward proxy.
pub const PROXY_USER: PropertyKey<String> = PropertyKey::new("PROXY_USER");

/// Password presented to the forward proxy.
pub const PROXY_PASSWORD: PropertyKey<String> = PropertyKey::new("PROXY_PASSWORD");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_are_stable() {
        assert_eq!(URI.name(), "URI");
        assert_eq!(TLS_VERSION.name(), "TLS_VERSION");
        assert_eq!(PROXY_HOST.name(), "PROXY_HOST");
        assert_eq!(PROXY_PORT.name(), "PROXY_PORT");
        assert_eq!(PROXY_USER.name(), "PROXY_USER");
        assert_eq!(PROXY_PASSWORD.name(), "PROXY_PASSWORD");
    }
}
