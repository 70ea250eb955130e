//! The destination property store and its fluent builder.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::key::PropertyKey;
use crate::value::{ConversionError, FromPropertyValue, PropertyValue};

/// Error returned by checked typed lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PropertyError {
    /// A value exists under the key but cannot be read as the requested type.
    #[error("Property `{key}` has an incompatible value")]
    Conversion {
        /// Canonical key name.
        key: String,
        /// The failed conversion.
        #[source]
        source: ConversionError,
    },
}

/// Immutable, ordered store of destination properties.
///
/// Built once through [`PropertiesBuilder`] and never mutated afterwards;
/// destinations hold it behind `Arc` and compare it by value. Entries are
/// key-ordered, so iteration, `Debug`, and serialized output are
/// deterministic.
///
/// # Examples
///
/// ```
/// use waypost_properties::{DestinationProperties, PropertyKey};
///
/// const TLS_VERSION: PropertyKey<String> = PropertyKey::new("TLS_VERSION");
///
/// let properties = DestinationProperties::builder()
///     .property("URI", "https://example.com")
///     .property("TLS_VERSION", "TLSv1.2")
///     .build();
///
/// assert_eq!(properties.get(TLS_VERSION), Some("TLSv1.2".to_owned()));
/// assert_eq!(properties.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationProperties {
    entries: BTreeMap<String, PropertyValue>,
}

impl DestinationProperties {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> PropertiesBuilder {
        PropertiesBuilder::default()
    }

    /// Typed lookup by key.
    ///
    /// Returns `None` when the property is absent, and also when a stored
    /// value cannot convert to `T` (the failure is logged and the value
    /// dropped). Callers that need to distinguish the two use
    /// [`try_get`](Self::try_get).
    #[must_use]
    pub fn get<T: FromPropertyValue>(&self, key: PropertyKey<T>) -> Option<T> {
        let raw = self.entries.get(key.name())?;
        match T::from_property_value(raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!("Dropping unreadable property `{}`: {error}", key.name());
                None
            }
        }
    }

    /// Checked typed lookup: absent is `Ok(None)`, a present-but-unreadable
    /// value is an error.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Conversion`] when the stored value cannot
    /// represent `T`.
    pub fn try_get<T: FromPropertyValue>(
        &self,
        key: PropertyKey<T>,
    ) -> Result<Option<T>, PropertyError> {
        let Some(raw) = self.entries.get(key.name()) else {
            return Ok(None);
        };
        T::from_property_value(raw)
            .map(Some)
            .map_err(|source| PropertyError::Conversion {
                key: key.name().to_owned(),
                source,
            })
    }

    /// Raw lookup by name, without conversion.
    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.get(name)
    }

    /// Whether a property is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over `(name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over property names in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reopens the store as a builder seeded with its entries.
    #[must_use]
    pub fn to_builder(&self) -> PropertiesBuilder {
        PropertiesBuilder {
            entries: self.entries.clone(),
        }
    }
}

/// Fluent accumulator for [`DestinationProperties`].
///
/// Mutators consume and return the builder. The builder is `Clone`, so one
/// configured builder can seed several stores; `build()` freezes the
/// accumulated entries.
#[derive(Debug, Clone, Default)]
pub struct PropertiesBuilder {
    entries: BTreeMap<String, PropertyValue>,
}

impl PropertiesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(name, value);
        self
    }

    /// In-place variant of [`property`](Self::property).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Removes a property if present; absent names are ignored.
    #[must_use]
    pub fn remove(mut self, name: &str) -> Self {
        self.entries.remove(name);
        self
    }

    /// Reads back an accumulated value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.get(name)
    }

    /// Whether a property has been accumulated under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Freezes the accumulated entries into an immutable store.
    #[must_use]
    pub fn build(self) -> DestinationProperties {
        DestinationProperties {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    const TLS_VERSION: PropertyKey<String> = PropertyKey::new("TLS_VERSION");
    const PROXY_PORT: PropertyKey<u16> = PropertyKey::new("PROXY_PORT");

    fn hash_of(properties: &DestinationProperties) -> u64 {
        let mut hasher = DefaultHasher::new();
        properties.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_build_and_get() {
        let properties = DestinationProperties::builder()
            .property("TLS_VERSION", "TLSv1.2")
            .property("PROXY_PORT", 8080_i64)
            .build();

        assert_eq!(properties.get(TLS_VERSION), Some("TLSv1.2".to_owned()));
        assert_eq!(properties.get(PROXY_PORT), Some(8080));
        assert_eq!(properties.len(), 2);
        assert!(!properties.is_empty());
    }

    #[test]
    fn test_get_absent_returns_none() {
        let properties = DestinationProperties::builder().build();
        assert_eq!(properties.get(TLS_VERSION), None);
        assert!(properties.is_empty());
    }

    #[test]
    fn test_get_drops_unreadable_values() {
        let properties = DestinationProperties::builder()
            .property("PROXY_PORT", "not-a-port")
            .build();
        assert_eq!(properties.get(PROXY_PORT), None);
    }

    #[test]
    fn test_try_get_distinguishes_absent_from_unreadable() {
        let properties = DestinationProperties::builder()
            .property("PROXY_PORT", "not-a-port")
            .build();

        assert_eq!(properties.try_get(TLS_VERSION), Ok(None));
        assert!(matches!(
            properties.try_get(PROXY_PORT),
            Err(PropertyError::Conversion { ref key, .. }) if key == "PROXY_PORT"
        ));
    }

    #[test]
    fn test_overwrite_keeps_last_value() {
        let properties = DestinationProperties::builder()
            .property("URI", "http://first")
            .property("URI", "http://second")
            .build();
        assert_eq!(
            properties.get_raw("URI"),
            Some(&PropertyValue::from("http://second"))
        );
        assert_eq!(properties.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let builder = DestinationProperties::builder()
            .property("URI", "http://x")
            .remove("URI")
            .remove("URI");
        let properties = builder.build();
        assert!(!properties.contains("URI"));
    }

    #[test]
    fn test_builder_read_back() {
        let builder = PropertiesBuilder::new().property("URI", "http://x");
        assert!(builder.contains("URI"));
        assert_eq!(builder.get("URI"), Some(&PropertyValue::from("http://x")));
        assert!(!builder.contains("TLS_VERSION"));
    }

    #[test]
    fn test_names_are_ordered() {
        let properties = DestinationProperties::builder()
            .property("URI", "http://x")
            .property("PROXY_HOST", "proxy.internal")
            .property("TLS_VERSION", "TLSv1.3")
            .build();
        let names: Vec<&str> = properties.names().collect();
        assert_eq!(names, ["PROXY_HOST", "TLS_VERSION", "URI"]);
    }

    #[test]
    fn test_to_builder_round_trip() {
        let original = DestinationProperties::builder()
            .property("URI", "http://x")
            .property("PROXY_PORT", 8080_i64)
            .build();
        assert_eq!(original.to_builder().build(), original);
    }

    #[test]
    fn test_to_builder_edit_leaves_original_untouched() {
        let original = DestinationProperties::builder()
            .property("URI", "http://x")
            .build();
        let edited = original.to_builder().property("URI", "http://y").build();

        assert_eq!(original.get_raw("URI"), Some(&PropertyValue::from("http://x")));
        assert_eq!(edited.get_raw("URI"), Some(&PropertyValue::from("http://y")));
        assert_ne!(original, edited);
    }

    #[test]
    fn test_equal_stores_hash_equal() {
        let a = DestinationProperties::builder()
            .property("URI", "http://x")
            .property("TLS_VERSION", "TLSv1.2")
            .build();
        let b = DestinationProperties::builder()
            .property("TLS_VERSION", "TLSv1.2")
            .property("URI", "http://x")
            .build();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_serde_round_trip() {
        let properties = DestinationProperties::builder()
            .property("URI", "http://x")
            .property("PROXY_PORT", 8080_i64)
            .property("TRUST_ALL", false)
            .build();

        let json = serde_json::to_string(&properties).unwrap();
        assert_eq!(
            json,
            "{\"PROXY_PORT\":8080,\"TRUST_ALL\":false,\"URI\":\"http://x\"}"
        );

        let restored: DestinationProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, properties);
    }
}
