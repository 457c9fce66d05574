use anyhow::{Context, Result};
use std::env;

use crate::net::SimpleHostAndPort;
use crate::utils::first_some;

/// Largest error body read from a live response: 1 MiB
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

const DEFAULT_PROBE_HOST: &str = "127.0.0.1";
const DEFAULT_PROBE_PORT: i32 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub body_limit_bytes: usize,
    pub probe_address: SimpleHostAndPort,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let body_limit_bytes = match env::var("ERROR_BODY_LIMIT_BYTES") {
            Ok(value) => value
                .parse()
                .context("ERROR_BODY_LIMIT_BYTES must be a valid number")?,
            Err(_) => DEFAULT_BODY_LIMIT_BYTES,
        };

        // PROBE_ADDRESS wins over the more general SERVICE_ADDRESS
        let address = first_some(
            env::var("PROBE_ADDRESS").ok(),
            env::var("SERVICE_ADDRESS").ok(),
            std::iter::empty(),
        );

        Ok(Config {
            body_limit_bytes,
            probe_address: SimpleHostAndPort::parse_or_default(
                address.as_deref(),
                DEFAULT_PROBE_HOST,
                DEFAULT_PROBE_PORT,
            )
            .context("PROBE_ADDRESS must be in host:port format")?,
        })
    }

    pub fn probe_url(&self, path: &str) -> String {
        format!(
            "http://{}/{}",
            self.probe_address,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_url() {
        let config = Config {
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            probe_address: SimpleHostAndPort::parse("127.0.0.1:3000").unwrap(),
        };

        assert_eq!(config.probe_url("/cards/42"), "http://127.0.0.1:3000/cards/42");
        assert_eq!(config.probe_url("health"), "http://127.0.0.1:3000/health");
    }
}
