//! # waypost-properties
//!
//! Typed key-value property store backing waypost destination configuration.
//!
//! This crate provides the storage layer destinations are built on:
//! - Loosely typed property values with checked extraction
//! - Zero-cost typed keys for well-known attributes
//! - An ordered, immutable store produced by a fluent builder
//!
//! ## Example
//!
//! ```
//! use waypost_properties::{DestinationProperties, PropertyKey};
//!
//! const URI: PropertyKey<String> = PropertyKey::new("URI");
//! const PROXY_PORT: PropertyKey<u16> = PropertyKey::new("PROXY_PORT");
//!
//! let properties = DestinationProperties::builder()
//!     .property("URI", "https://example.com")
//!     .property("PROXY_PORT", 8080_i64)
//!     .build();
//!
//! assert_eq!(properties.get(URI), Some("https://example.com".to_owned()));
//! assert_eq!(properties.get(PROXY_PORT), Some(8080));
//! assert!(properties.get_raw("TLS_VERSION").is_none());
//! ```

/// Typed property keys.
///
/// Provides `PropertyKey`, a zero-cost name tagged with its expected value type.
pub mod key;
/// The destination property store and its fluent builder.
///
/// Provides the immutable `DestinationProperties` store and the
/// `PropertiesBuilder` that accumulates entries before freezing them.
pub mod store;

pub mod value;

pub use key::PropertyKey;
pub use store::{DestinationProperties, PropertiesBuilder, PropertyError};
pub use value::{ConversionError, FromPropertyValue, PropertyValue};
