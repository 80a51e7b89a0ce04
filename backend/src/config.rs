use axum::http::HeaderValue;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `None` means any origin may call the API.
    pub allowed_origin: Option<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            allowed_origin: None,
        }
    }
}

impl ServerConfig {
    /// Reads `TRACKER_HOST`, `TRACKER_PORT` and `TRACKER_ALLOWED_ORIGIN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("TRACKER_HOST") {
            match host.trim().parse() {
                Ok(host) => config.host = host,
                Err(_) => warn!("Ignoring invalid TRACKER_HOST {:?}, using {}", host, DEFAULT_HOST),
            }
        }

        if let Some(port) = lookup("TRACKER_PORT") {
            match port.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring invalid TRACKER_PORT {:?}, using {}", port, DEFAULT_PORT),
            }
        }

        if let Some(origin) = lookup("TRACKER_ALLOWED_ORIGIN") {
            match origin.trim().parse::<HeaderValue>() {
                Ok(origin) => config.allowed_origin = Some(origin),
                Err(_) => warn!("Ignoring invalid TRACKER_ALLOWED_ORIGIN {:?}", origin),
            }
        }

        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.socket_addr(), "127.0.0.1:3000".parse().unwrap());
        assert!(config.allowed_origin.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("TRACKER_HOST", "0.0.0.0"),
            ("TRACKER_PORT", "8081"),
            ("TRACKER_ALLOWED_ORIGIN", "http://127.0.0.1:8080"),
        ]));
        assert_eq!(config.socket_addr(), "0.0.0.0:8081".parse().unwrap());
        assert_eq!(
            config.allowed_origin,
            Some(HeaderValue::from_static("http://127.0.0.1:8080"))
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("TRACKER_HOST", "not-a-host"),
            ("TRACKER_PORT", "99999"),
        ]));
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
