//! Authentication classification and credential material.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// How the execution layer authenticates against the target endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AuthenticationType {
    /// No credentials accompany outgoing requests.
    #[default]
    NoAuthentication,
    /// HTTP basic authentication with username and password.
    BasicAuthentication,
}

impl AuthenticationType {
    /// Whether requests go out without credentials.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::NoAuthentication)
    }
}

impl fmt::Display for AuthenticationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAuthentication => f.write_str("no_authentication"),
            Self::BasicAuthentication => f.write_str("basic_authentication"),
        }
    }
}

/// Username and password pair for basic authentication.
///
/// The password is secret-wrapped: `Debug` output redacts it, and reading
/// it back requires an explicit [`expose_secret`](ExposeSecret::expose_secret)
/// call at the use site.
#[derive(Clone)]
pub struct BasicCredentials {
    username: String,
    password: SecretString,
}

impl BasicCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// The username presented to the remote side.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The secret-wrapped password.
    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Comparing credentials exposes both secrets; that stays confined to this impl.
impl PartialEq for BasicCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Eq for BasicCredentials {}

/// Opaque key or trust archive attached to a destination.
///
/// Destination kinds in this crate never provide one; the type exists so
/// the key-store and trust-store attributes have an honest signature for
/// kinds that do.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyStore {
    name: String,
    archive: Vec<u8>,
}

impl KeyStore {
    /// Wraps raw archive bytes under a friendly name.
    #[must_use]
    pub fn new(name: impl Into<String>, archive: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            archive,
        }
    }

    /// The archive's friendly name, usually its file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw archive bytes.
    #[must_use]
    pub fn archive(&self) -> &[u8] {
        &self.archive
    }
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore")
            .field("name", &self.name)
            .field("archive_bytes", &self.archive.len())
            .finish()
    }
}
