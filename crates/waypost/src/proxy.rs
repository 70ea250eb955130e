//! Proxy classification and derivation from destination properties.
//!
//! Derivation is the one place proxy settings are computed. Destinations
//! call it exactly once while building and keep the result as a cached
//! value, so read paths never re-derive.

use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use typed_builder::TypedBuilder;
use url::Url;

use waypost_properties::{DestinationProperties, FromPropertyValue};

use crate::keys;
use crate::security::BasicCredentials;

/// Kind of proxy a destination routes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ProxyType {
    /// Forward proxy reached over the public network.
    Internet,
    /// Connectivity tunnel into a private network.
    OnPremise,
}

impl ProxyType {
    /// Whether this is the public-network forward proxy kind.
    #[must_use]
    pub const fn is_internet(&self) -> bool {
        matches!(self, Self::Internet)
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internet => f.write_str("internet"),
            Self::OnPremise => f.write_str("on_premise"),
        }
    }
}

/// Errors that can occur while deriving proxy settings from a property
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProxyDerivationError {
    /// `PROXY_HOST` is set but `PROXY_PORT` is missing.
    #[error("Proxy host is set but `PROXY_PORT` is missing")]
    MissingPort,

    /// `PROXY_PORT` is set but `PROXY_HOST` is missing.
    #[error("Proxy port is set but `PROXY_HOST` is missing")]
    MissingHost,

    /// The stored proxy port is not a valid TCP port.
    #[error("`{value}` is not a valid proxy port")]
    InvalidPort {
        /// The unusable stored value.
        value: String,
    },

    /// Host and port combined into an address the URL parser rejects.
    #[error("Derived proxy address is not a valid URI: {0}")]
    InvalidProxyUri(#[from] url::ParseError),

    /// Exactly one of `PROXY_USER` and `PROXY_PASSWORD` is set.
    #[error("Proxy credentials are incomplete: both `PROXY_USER` and `PROXY_PASSWORD` are required")]
    IncompleteCredentials,
}

/// Derived forward-proxy settings for one destination.
///
/// A pure function of the destination's property store; never constructed
/// from anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct ProxyConfiguration {
    /// Address requests are tunneled through.
    pub uri: Url,

    /// Credentials presented to the proxy, when it requires them.
    #[builder(default)]
    pub credentials: Option<BasicCredentials>,
}

impl ProxyConfiguration {
    /// Whether credentials accompany the proxy address.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Derives the proxy configuration a property store implies.
///
/// Reads `PROXY_HOST` and `PROXY_PORT` into the proxy address and
/// `PROXY_USER`/`PROXY_PASSWORD` into optional credentials. With neither
/// host nor port set the store implies no proxy at all, which is a valid
/// outcome, not an error. Pure and deterministic over the frozen store.
///
/// # Errors
///
/// Returns [`ProxyDerivationError`] when the proxy properties are present
/// but unusable: one of host/port missing, an out-of-range port, an
/// address the URL parser rejects, or a lone username/password.
///
/// # Examples
///
/// ```
/// use waypost::derive_proxy_configuration;
/// use waypost_properties::DestinationProperties;
///
/// let properties = DestinationProperties::builder()
///     .property("PROXY_HOST", "proxy.internal")
///     .property("PROXY_PORT", 8080_i64)
///     .build();
///
/// let configuration = derive_proxy_configuration(&properties)?.unwrap();
/// assert_eq!(configuration.uri.host_str(), Some("proxy.internal"));
/// assert!(!configuration.has_credentials());
/// # Ok::<(), waypost::ProxyDerivationError>(())
/// ```
pub fn derive_proxy_configuration(
    properties: &DestinationProperties,
) -> Result<Option<ProxyConfiguration>, ProxyDerivationError> {
    let host: Option<String> = properties.get(keys::PROXY_HOST);
    let port = match properties.get_raw(keys::PROXY_PORT.name()) {
        None => None,
        Some(raw) => Some(u16::from_property_value(raw).map_err(|error| {
            ProxyDerivationError::InvalidPort { value: error.value }
        })?),
    };

    let (host, port) = match (host, port) {
        (None, None) => {
            trace!("No proxy properties set; destination connects directly");
            return Ok(None);
        }
        (Some(_), None) => return Err(ProxyDerivationError::MissingPort),
        (None, Some(_)) => return Err(ProxyDerivationError::MissingHost),
        (Some(host), Some(port)) => (host, port),
    };

    let uri = Url::parse(&format!("http://{host}:{port}"))?;

    let credentials = match (
        properties.get(keys::PROXY_USER),
        properties.get(keys::PROXY_PASSWORD),
    ) {
        (Some(username), Some(password)) => Some(BasicCredentials::new(username, password)),
        (None, None) => None,
        _ => return Err(ProxyDerivationError::IncompleteCredentials),
    };

    debug!("Derived proxy configuration via {uri}");
    Ok(Some(ProxyConfiguration { uri, credentials }))
}
