//! # waypost
//!
//! Immutable HTTP destination model routed through a transparent forward
//! proxy.
//!
//! A destination bundles everything the HTTP execution layer needs to
//! reach a remote endpoint: the target URI, TLS expectations, derived
//! proxy settings, and the custom headers every request carries. This
//! crate models the transparent-proxy flavor of that bundle:
//! - A fluent builder with URI defaulting and named header conveniences
//! - Proxy settings derived exactly once at build time, with failures
//!   surfacing as build errors
//! - Deeply immutable values, safe for unsynchronized concurrent reads
//!
//! ## Example
//!
//! ```
//! use waypost::{HttpDestination, TransparentProxyDestination};
//!
//! # fn main() -> Result<(), waypost::DestinationError> {
//! let destination = TransparentProxyDestination::builder()
//!     .instance_name("orders")
//!     .destination_name("orders-eu")
//!     .tenant_id("tenant-1")
//!     .build()?;
//!
//! assert_eq!(destination.uri()?.host_str(), Some("dynamic-orders"));
//! assert!(destination.proxy_type().unwrap().is_internet());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use secrecy::SecretString;
use url::Url;

use waypost_properties::PropertyValue;

pub mod destination;
pub mod error;
pub mod header;
pub mod keys;
pub mod proxy;
pub mod security;

pub use destination::{
    DEFAULT_URI, TransparentProxyDestination, TransparentProxyDestinationBuilder,
};
pub use error::DestinationError;
pub use header::{DestinationHeaderProvider, Header, RequestContext};
pub use proxy::{ProxyConfiguration, ProxyDerivationError, ProxyType, derive_proxy_configuration};
pub use security::{AuthenticationType, BasicCredentials, KeyStore};

/// Read contract for HTTP destinations.
///
/// The execution layer consumes destinations exclusively through this
/// trait. Implementations are immutable once constructed and thread-safe.
///
/// An attribute a destination kind supports reads as `Option` (or
/// `Ok(Some)`/`Ok(None)` where the read itself can fail). An attribute a
/// kind never provides must report
/// [`DestinationError::UnsupportedAttribute`] instead of a counterfeit
/// "absent". The default methods below implement the unsupported shape;
/// kinds that do provide the attribute override them.
#[must_use = "HttpDestination must be read to route requests"]
pub trait HttpDestination: Send + Sync {
    /// Parses and returns the target URI.
    ///
    /// Well-formedness is checked here, on first use, not at build time.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::InvalidUri`] when the stored value does
    /// not parse, and [`DestinationError::MissingProperty`] when no URI
    /// property exists at all. Builders guarantee a default, so the latter
    /// only occurs on hand-assembled stores.
    fn uri(&self) -> Result<Url, DestinationError>;

    /// Headers to attach to a request targeting `request_uri`.
    fn headers(&self, request_uri: &Url) -> Arc<[Header]>;

    /// Minimum TLS version requested from the execution layer, if
    /// configured.
    fn tls_version(&self) -> Option<String>;

    /// Proxy settings for this destination, when it routes through one.
    fn proxy_configuration(&self) -> Option<ProxyConfiguration>;

    /// Kind of proxy the destination routes through, when it routes
    /// through one.
    fn proxy_type(&self) -> Option<ProxyType>;

    /// Whether the execution layer should skip certificate validation.
    fn trusts_all_certificates(&self) -> bool;

    /// How requests authenticate against the target endpoint.
    fn authentication_type(&self) -> AuthenticationType;

    /// Client key store presented during TLS client authentication.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::UnsupportedAttribute`] unless the
    /// destination kind overrides this.
    fn key_store(&self) -> Result<Option<KeyStore>, DestinationError> {
        Err(DestinationError::UnsupportedAttribute("key_store"))
    }

    /// Password unlocking the client key store.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::UnsupportedAttribute`] unless the
    /// destination kind overrides this.
    fn key_store_password(&self) -> Result<Option<SecretString>, DestinationError> {
        Err(DestinationError::UnsupportedAttribute("key_store_password"))
    }

    /// Trust store validating the remote certificate chain.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::UnsupportedAttribute`] unless the
    /// destination kind overrides this.
    fn trust_store(&self) -> Result<Option<KeyStore>, DestinationError> {
        Err(DestinationError::UnsupportedAttribute("trust_store"))
    }

    /// Password unlocking the trust store.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::UnsupportedAttribute`] unless the
    /// destination kind overrides this.
    fn trust_store_password(&self) -> Result<Option<SecretString>, DestinationError> {
        Err(DestinationError::UnsupportedAttribute("trust_store_password"))
    }

    /// Credentials for basic authentication against the target endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::UnsupportedAttribute`] unless the
    /// destination kind overrides this.
    fn basic_credentials(&self) -> Result<Option<BasicCredentials>, DestinationError> {
        Err(DestinationError::UnsupportedAttribute("basic_credentials"))
    }

    /// Arbitrary named property lookup.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::UnsupportedAttribute`] unless the
    /// destination kind overrides this.
    fn property(&self, _name: &str) -> Result<Option<PropertyValue>, DestinationError> {
        Err(DestinationError::UnsupportedAttribute("property lookup"))
    }
}
