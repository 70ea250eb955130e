//! Request headers and per-request header providers.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Header naming the logical destination a request targets.
pub const X_DESTINATION_NAME: &str = "X-Destination-Name";

/// Header naming the destination fragment to merge in.
pub const X_FRAGMENT_NAME: &str = "X-Fragment-Name";

/// Header carrying the tenant subdomain the request acts for.
pub const X_TENANT_SUBDOMAIN: &str = "X-Tenant-Subdomain";

/// Header carrying the tenant identifier the request acts for.
pub const X_TENANT_ID: &str = "X-Tenant-Id";

/// Header marking the fragment lookup as optional.
pub const X_FRAGMENT_OPTIONAL: &str = "X-Fragment-Optional";

/// An immutable request header.
///
/// # Examples
///
/// ```
/// use waypost::Header;
///
/// let header = Header::new("X-Destination-Name", "orders-eu");
/// assert_eq!(header.to_string(), "X-Destination-Name: orders-eu");
///
/// // Tuples convert for batch APIs.
/// let same: Header = ("X-Destination-Name", "orders-eu").into();
/// assert_eq!(header, same);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    /// Name as sent on the wire.
    pub name: String,
    /// Value as sent on the wire.
    pub value: String,
}

impl Header {
    /// Creates a header from anything string-like.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Header {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Per-request view handed to header providers.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// URI the outgoing request targets.
    pub request_uri: &'a Url,
}

impl<'a> RequestContext<'a> {
    /// Creates a context for one outgoing request.
    #[must_use]
    pub const fn new(request_uri: &'a Url) -> Self {
        Self { request_uri }
    }
}

/// Computes additional headers for each outgoing request.
///
/// Providers are registered on a destination builder and carried by the
/// built destination. The destination never invokes them; the HTTP
/// execution layer does, once per outgoing request, and appends the result
/// to the destination's fixed custom headers.
pub trait DestinationHeaderProvider: Send + Sync {
    /// Returns the headers to append for the request in `context`.
    fn headers_for(&self, context: &RequestContext<'_>) -> Vec<Header>;
}
