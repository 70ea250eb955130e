//! Typed property keys.

use std::fmt;
use std::marker::PhantomData;

/// A property key carrying the value type expected under its name.
///
/// Keys are plain `&'static str` names tagged with a marker type, so
/// well-known keys can live as constants and typed lookups resolve to the
/// right [`FromPropertyValue`](crate::FromPropertyValue) impl without turbofish
/// noise at the call site.
///
/// # Examples
///
/// ```
/// use waypost_properties::PropertyKey;
///
/// const TLS_VERSION: PropertyKey<String> = PropertyKey::new("TLS_VERSION");
/// assert_eq!(TLS_VERSION.name(), "TLS_VERSION");
/// ```
pub struct PropertyKey<T> {
    name: &'static str,
    marker: PhantomData<fn() -> T>,
}

impl<T> PropertyKey<T> {
    /// Creates a key with the given canonical name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            marker: PhantomData,
        }
    }

    /// The canonical name this key stores under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// Manual impls: derives would put bounds on `T`, and a key is just a name.
impl<T> Clone for PropertyKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropertyKey<T> {}

impl<T> PartialEq for PropertyKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for PropertyKey<T> {}

impl<T> fmt::Debug for PropertyKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyKey").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URI: PropertyKey<String> = PropertyKey::new("URI");
    const PORT: PropertyKey<u16> = PropertyKey::new("PORT");

    #[test]
    fn test_name() {
        assert_eq!(URI.name(), "URI");
        assert_eq!(PORT.name(), "PORT");
    }

    #[test]
    fn test_copy_and_eq() {
        let a = URI;
        let b = a;
        assert_eq!(a, b);
        assert_ne!(URI, PropertyKey::<String>::new("OTHER"));
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{URI:?}"), "PropertyKey(\"URI\")");
    }

    #[test]
    fn test_no_bounds_on_value_type() {
        struct Opaque;
        let key: PropertyKey<Opaque> = PropertyKey::new("OPAQUE");
        let copy = key;
        assert_eq!(copy.name(), "OPAQUE");
    }
}
