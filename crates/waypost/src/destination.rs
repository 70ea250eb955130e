//! The transparent-proxy destination and its builder.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;
use url::Url;

use waypost_properties::{DestinationProperties, PropertiesBuilder, PropertyKey, PropertyValue};

use crate::HttpDestination;
use crate::error::DestinationError;
use crate::header::{self, DestinationHeaderProvider, Header};
use crate::keys;
use crate::proxy::{ProxyConfiguration, ProxyType, derive_proxy_configuration};
use crate::security::AuthenticationType;

/// URI assigned when a builder is built without one.
///
/// A sentinel routing address: the transparent proxy resolves the real
/// target from the request headers, so a destination without an explicit
/// URI still has somewhere to point.
pub const DEFAULT_URI: &str = "http://dynamic:80";

/// Immutable destination routing every request through a transparent
/// forward proxy.
///
/// Built once by [`TransparentProxyDestinationBuilder`]; afterwards the
/// property store, the custom-header sequence, and the registered header
/// providers are frozen, and the proxy configuration derived during the
/// build never changes. The whole value is safe to share across threads
/// without locks.
///
/// Equality and hashing cover the property store and the custom headers
/// only. The cached proxy configuration is a pure function of the
/// properties already being compared, and provider objects have no value
/// identity.
///
/// # Examples
///
/// ```
/// use waypost::{HttpDestination, TransparentProxyDestination};
///
/// # fn main() -> Result<(), waypost::DestinationError> {
/// let destination = TransparentProxyDestination::builder()
///     .destination_name("orders-eu")
///     .tenant_subdomain("acme")
///     .build()?;
///
/// // No URI was configured, so the builder applied the routing default.
/// assert_eq!(destination.uri()?.host_str(), Some("dynamic"));
/// assert_eq!(destination.uri()?.port_or_known_default(), Some(80));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TransparentProxyDestination {
    properties: Arc<DestinationProperties>,
    custom_headers: Arc<[Header]>,
    header_providers: Arc<[Arc<dyn DestinationHeaderProvider>]>,
    cached_proxy_configuration: Option<ProxyConfiguration>,
}

impl TransparentProxyDestination {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> TransparentProxyDestinationBuilder {
        TransparentProxyDestinationBuilder::new()
    }

    /// The frozen property store backing this destination.
    #[must_use]
    pub fn properties(&self) -> &DestinationProperties {
        &self.properties
    }

    /// Registered per-request header providers, in registration order.
    ///
    /// The destination only carries them; the HTTP execution layer invokes
    /// them per outgoing request.
    #[must_use]
    pub fn header_providers(&self) -> &[Arc<dyn DestinationHeaderProvider>] {
        &self.header_providers
    }

    /// Reopens this destination as a builder seeded with its properties,
    /// headers, and providers.
    ///
    /// Rebuilding without further changes produces an equal destination.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypost::TransparentProxyDestination;
    ///
    /// # fn main() -> Result<(), waypost::DestinationError> {
    /// let original = TransparentProxyDestination::builder()
    ///     .instance_name("orders")
    ///     .build()?;
    ///
    /// let copy = original.to_builder().build()?;
    /// assert_eq!(copy, original);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn to_builder(&self) -> TransparentProxyDestinationBuilder {
        TransparentProxyDestinationBuilder {
            headers: self.custom_headers.to_vec(),
            properties: self.properties.to_builder(),
            header_providers: self.header_providers.to_vec(),
        }
    }
}

impl HttpDestination for TransparentProxyDestination {
    fn uri(&self) -> Result<Url, DestinationError> {
        let raw: String = self
            .properties
            .get(keys::URI)
            .ok_or(DestinationError::MissingProperty(keys::URI.name()))?;
        Url::parse(&raw).map_err(|source| DestinationError::InvalidUri {
            key: keys::URI.name(),
            source,
        })
    }

    fn headers(&self, _request_uri: &Url) -> Arc<[Header]> {
        // Fixed for every request; the parameter exists for interface
        // symmetry with per-request header computation.
        Arc::clone(&self.custom_headers)
    }

    fn tls_version(&self) -> Option<String> {
        self.properties.get(keys::TLS_VERSION)
    }

    fn proxy_configuration(&self) -> Option<ProxyConfiguration> {
        self.cached_proxy_configuration.clone()
    }

    fn proxy_type(&self) -> Option<ProxyType> {
        Some(ProxyType::Internet)
    }

    fn trusts_all_certificates(&self) -> bool {
        false
    }

    fn authentication_type(&self) -> AuthenticationType {
        AuthenticationType::NoAuthentication
    }
}

impl fmt::Debug for TransparentProxyDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransparentProxyDestination")
            .field("properties", &self.properties)
            .field("custom_headers", &self.custom_headers)
            .field("header_providers", &self.header_providers.len())
            .field("cached_proxy_configuration", &self.cached_proxy_configuration)
            .finish()
    }
}

// Equality ignores the cached proxy configuration, a pure function of the
// properties already compared, and the provider objects.
impl PartialEq for TransparentProxyDestination {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties && self.custom_headers == other.custom_headers
    }
}

impl Eq for TransparentProxyDestination {}

impl Hash for TransparentProxyDestination {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.properties.hash(state);
        self.custom_headers.hash(state);
    }
}

/// Fluent accumulator producing [`TransparentProxyDestination`].
///
/// Mutators consume and return the builder; `build()` consumes it for
/// good. The builder is `Clone`, so one configured builder can stamp out
/// several destinations, with accumulated state persisting across clones.
///
/// # Examples
///
/// ```
/// use waypost::{HttpDestination, TransparentProxyDestination};
/// use url::Url;
///
/// # fn main() -> Result<(), waypost::DestinationError> {
/// let destination = TransparentProxyDestination::builder()
///     .instance_name("orders")
///     .destination_name("orders-eu")
///     .header(("X-Correlation-Id", "00f6"))
///     .build()?;
///
/// assert_eq!(destination.uri()?.host_str(), Some("dynamic-orders"));
///
/// let request_uri = Url::parse("https://api.example.com/v1/orders").unwrap();
/// let headers = destination.headers(&request_uri);
/// let names: Vec<&str> = headers.iter().map(|h| h.name.as_str()).collect();
/// assert_eq!(names, ["X-Destination-Name", "X-Correlation-Id"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct TransparentProxyDestinationBuilder {
    headers: Vec<Header>,
    properties: PropertiesBuilder,
    header_providers: Vec<Arc<dyn DestinationHeaderProvider>>,
}

impl TransparentProxyDestinationBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a property by name.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(name, value);
        self
    }

    /// Inserts or overwrites a property under a typed key's canonical
    /// name.
    #[must_use]
    pub fn property_typed<T>(self, key: PropertyKey<T>, value: impl Into<PropertyValue>) -> Self {
        self.property(key.name(), value)
    }

    /// Removes a property if present; absent names are ignored.
    #[must_use]
    pub fn remove_property(mut self, name: &str) -> Self {
        self.properties = self.properties.remove(name);
        self
    }

    /// Typed-key form of [`remove_property`](Self::remove_property).
    #[must_use]
    pub fn remove_property_typed<T>(self, key: PropertyKey<T>) -> Self {
        self.remove_property(key.name())
    }

    /// Appends one header. Insertion order is preserved on the built
    /// destination.
    #[must_use]
    pub fn header(mut self, header: impl Into<Header>) -> Self {
        self.headers.push(header.into());
        self
    }

    /// Appends a batch of headers after any already accumulated, keeping
    /// the batch's iteration order.
    #[must_use]
    pub fn headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Header>,
    {
        self.headers.extend(headers.into_iter().map(Into::into));
        self
    }

    /// Appends an `X-Destination-Name` header carrying `name`.
    #[must_use]
    pub fn destination_name(self, name: impl Into<String>) -> Self {
        self.header((header::X_DESTINATION_NAME, name.into()))
    }

    /// Appends an `X-Fragment-Name` header carrying `name`.
    #[must_use]
    pub fn fragment_name(self, name: impl Into<String>) -> Self {
        self.header((header::X_FRAGMENT_NAME, name.into()))
    }

    /// Appends an `X-Tenant-Subdomain` header carrying `subdomain`.
    #[must_use]
    pub fn tenant_subdomain(self, subdomain: impl Into<String>) -> Self {
        self.header((header::X_TENANT_SUBDOMAIN, subdomain.into()))
    }

    /// Appends an `X-Tenant-Id` header carrying `id`.
    #[must_use]
    pub fn tenant_id(self, id: impl Into<String>) -> Self {
        self.header((header::X_TENANT_ID, id.into()))
    }

    /// Appends an `X-Fragment-Optional` header carrying `value`.
    #[must_use]
    pub fn fragment_optional(self, value: impl Into<String>) -> Self {
        self.header((header::X_FRAGMENT_OPTIONAL, value.into()))
    }

    /// Sets the URI property to the fixed routing scheme
    /// `http://dynamic-<name>:80`.
    ///
    /// A convenience for addressing a named service instance behind the
    /// proxy, not a general URI facility. Overwrites any previously set
    /// URI.
    #[must_use]
    pub fn instance_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.properties
            .set(keys::URI.name(), format!("http://dynamic-{name}:80"));
        self
    }

    /// Registers per-request header providers, in iteration order, after
    /// any already registered.
    #[must_use]
    pub fn header_providers<I>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn DestinationHeaderProvider>>,
    {
        self.header_providers.extend(providers);
        self
    }

    /// Builds the destination.
    ///
    /// When no URI property is set, [`DEFAULT_URI`] is applied first. The
    /// property snapshot and header sequence are then frozen, and proxy
    /// settings are derived from the snapshot exactly once. No other
    /// validation happens here; URI well-formedness is checked lazily by
    /// [`HttpDestination::uri`].
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::Derivation`] when proxy properties are
    /// present but unusable. A failed derivation never degrades into a
    /// destination without a proxy.
    pub fn build(mut self) -> Result<TransparentProxyDestination, DestinationError> {
        if !self.properties.contains(keys::URI.name()) {
            debug!("No URI configured; defaulting to {DEFAULT_URI}");
            self.properties.set(keys::URI.name(), DEFAULT_URI);
        }

        let properties = Arc::new(self.properties.build());
        let cached_proxy_configuration = derive_proxy_configuration(&properties)?;

        Ok(TransparentProxyDestination {
            properties,
            custom_headers: self.headers.into(),
            header_providers: self.header_providers.into(),
            cached_proxy_configuration,
        })
    }
}

impl fmt::Debug for TransparentProxyDestinationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransparentProxyDestinationBuilder")
            .field("headers", &self.headers)
            .field("properties", &self.properties)
            .field("header_providers", &self.header_providers.len())
            .finish()
    }
}
