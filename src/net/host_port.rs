use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostAndPortError {
    #[error("{0} is not in format host:port")]
    Format(String),

    #[error("invalid port in {input}: {source}")]
    Port {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

/// A `host:port` pair.
///
/// Only the exact `host:port` form is understood. Neither part is validated:
/// an empty host or a negative port is accepted as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleHostAndPort {
    host: String,
    port: i32,
}

impl SimpleHostAndPort {
    /// Parse text of the form `host:port`.
    ///
    /// Trailing empty segments are ignored, so `host:80:` parses and `host:` does
    /// not.
    pub fn parse(text: &str) -> Result<Self, HostAndPortError> {
        let mut parts: Vec<&str> = text.split(':').collect();
        while parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }

        let [host, port] = parts[..] else {
            return Err(HostAndPortError::Format(text.to_owned()));
        };

        let port = port.parse::<i32>().map_err(|source| HostAndPortError::Port {
            input: text.to_owned(),
            source,
        })?;

        Ok(Self {
            host: host.to_owned(),
            port,
        })
    }

    /// Parse `text`, or use the defaults when it is missing or blank.
    /// The defaults are taken as-is.
    pub fn parse_or_default(
        text: Option<&str>,
        default_host: &str,
        default_port: i32,
    ) -> Result<Self, HostAndPortError> {
        match text {
            Some(text) if !text.trim().is_empty() => Self::parse(text),
            _ => Ok(Self {
                host: default_host.to_owned(),
                port: default_port,
            }),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> i32 {
        self.port
    }
}

impl FromStr for SimpleHostAndPort {
    type Err = HostAndPortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SimpleHostAndPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
