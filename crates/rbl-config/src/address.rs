use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::{Host, Url};

const SCHEME: &str = "tcp";

/// TCP address the policy-check listener binds to.
///
/// Accepts either a bare `host:port` pair, as operators usually write it, or
/// the `tcp://host:port` form used when the address is displayed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct ServerAddress {
    host: String,
    port: u16,
}

impl ServerAddress {
    /// Builds an address from its parts.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or IP literal, without IPv6 brackets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "{SCHEME}://[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "{SCHEME}://{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ServerAddress {
    type Err = ServerAddressParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let url = if trimmed.contains("://") {
            Url::parse(trimmed)?
        } else {
            Url::parse(&format!("{SCHEME}://{trimmed}"))?
        };
        if url.scheme() != SCHEME {
            return Err(ServerAddressParseError::UnsupportedScheme(
                url.scheme().to_owned(),
            ));
        }
        let host = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_owned(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            _ => return Err(ServerAddressParseError::MissingHost(input.to_owned())),
        };
        let port = url
            .port()
            .ok_or_else(|| ServerAddressParseError::MissingPort(input.to_owned()))?;
        Ok(Self::new(host, port))
    }
}

impl TryFrom<String> for ServerAddress {
    type Error = ServerAddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServerAddress> for String {
    fn from(value: ServerAddress) -> Self {
        value.to_string()
    }
}

/// Errors encountered while parsing a [`ServerAddress`] from text.
#[derive(Debug, Error)]
pub enum ServerAddressParseError {
    /// Scheme was something other than `tcp`.
    #[error("unsupported address scheme '{0}'")]
    UnsupportedScheme(String),
    /// Host name was missing.
    #[error("missing host in '{0}'")]
    MissingHost(String),
    /// Port was missing from the address.
    #[error("missing port in '{0}'")]
    MissingPort(String),
    /// Address failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}
