use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 9200;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// "http" or "https"
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        let config = Self {
            host: host.into(),
            port,
            scheme: default_scheme(),
            request_timeout_secs: default_request_timeout_secs(),
            insecure_skip_verify: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a config from `host` or `host:port`.
    ///
    /// IPv6 literals must be bracketed (`[::1]:9200`). Without a port the
    /// default 9200 is used.
    pub fn from_address(address: &str) -> Result<Self> {
        let address = address.trim();
        let (host, port) = match address.rsplit_once(':') {
            Some((host, port))
                if !host.is_empty()
                    && (!host.contains(':') || host.ends_with(']'))
                    && !port.is_empty() =>
            {
                let port = port.parse::<u16>().map_err(|_| {
                    Error::InvalidArgument(format!("Invalid port in address: {}", address))
                })?;
                (host, port)
            }
            _ => (address, DEFAULT_PORT),
        };
        Self::new(host, port)
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let host = self.host.as_str();
        if host.is_empty() {
            return Err(Error::InvalidArgument("Host address must not be empty".to_string()));
        }
        if host.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(Error::InvalidArgument(format!("Invalid host address: {:?}", host)));
        }
        let bracketed = host.starts_with('[') && host.ends_with(']') && host.len() > 2;
        if host.contains(':') && !bracketed {
            return Err(Error::InvalidArgument(format!(
                "Invalid host address (IPv6 literals need brackets): {}",
                host
            )));
        }
        if self.port == 0 {
            return Err(Error::InvalidArgument("Port must be non-zero".to_string()));
        }
        if self.scheme != "http" && self.scheme != "https" {
            return Err(Error::InvalidArgument(format!("Unsupported scheme: {}", self.scheme)));
        }
        Ok(())
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_without_port_defaults_to_9200() {
        let config = ClientConfig::from_address("10.10.10.10").unwrap();
        assert_eq!(config.host, "10.10.10.10");
        assert_eq!(config.port, 9200);
        assert_eq!(config.base_url(), "http://10.10.10.10:9200");
    }

    #[test]
    fn test_address_with_port() {
        let config = ClientConfig::from_address("search.local:9300").unwrap();
        assert_eq!(config.host, "search.local");
        assert_eq!(config.port, 9300);

        let v6 = ClientConfig::from_address("[::1]:9201").unwrap();
        assert_eq!(v6.host, "[::1]");
        assert_eq!(v6.port, 9201);

        let v6_default = ClientConfig::from_address("[::1]").unwrap();
        assert_eq!(v6_default.port, 9200);
    }

    #[test]
    fn test_invalid_addresses() {
        for address in ["", "   ", "bad host", "http://host", "::1", "host:notaport", "host:0"] {
            let err = ClientConfig::from_address(address).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{:?}", address);
        }
        assert!(matches!(ClientConfig::new("", 9000), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"host": "localhost"}"#).unwrap();
        assert_eq!(config.port, 9200);
        assert_eq!(config.scheme, "http");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.insecure_skip_verify);
    }

    #[test]
    fn test_unsupported_scheme() {
        let mut config = ClientConfig::new("localhost", 9200).unwrap();
        config.scheme = "ftp".to_string();
        assert!(config.validate().is_err());
    }
}
