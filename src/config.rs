//! Service configuration.

use crate::error::{Result, StoreError};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Where data lives and where the HTTP API listens.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Directory holding the subscriber log.
    pub data_dir: PathBuf,

    /// File name of the subscriber log inside `data_dir`.
    pub subscribers_file: String,

    /// Address to bind the HTTP listener to.
    pub bind_addr: IpAddr,

    /// Port to bind the HTTP listener to.
    pub port: u16,

    /// Static assets served for non-API paths (None = API only).
    pub static_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            subscribers_file: "subscribers.txt".to_string(),
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
            static_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Defaults overlaid with `PORT`, `ROSTER_BIND_ADDR`, `ROSTER_DATA_DIR`,
    /// `ROSTER_SUBSCRIBERS_FILE` and `ROSTER_STATIC_DIR`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| StoreError::Config(format!("PORT is not a valid port: {:?}", port)))?;
        }
        if let Some(addr) = lookup("ROSTER_BIND_ADDR") {
            config.bind_addr = addr.trim().parse().map_err(|_| {
                StoreError::Config(format!("ROSTER_BIND_ADDR is not an IP address: {:?}", addr))
            })?;
        }
        if let Some(dir) = lookup("ROSTER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("ROSTER_SUBSCRIBERS_FILE") {
            if file.trim().is_empty() {
                return Err(StoreError::Config("ROSTER_SUBSCRIBERS_FILE is empty".into()));
            }
            config.subscribers_file = file;
        }
        if let Some(dir) = lookup("ROSTER_STATIC_DIR") {
            config.static_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn subscribers_path(&self) -> PathBuf {
        self.data_dir.join(&self.subscribers_file)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.subscribers_path(), PathBuf::from("./data/subscribers.txt"));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("ROSTER_BIND_ADDR", "127.0.0.1"),
            ("ROSTER_DATA_DIR", "/var/lib/roster"),
            ("ROSTER_STATIC_DIR", "public"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.subscribers_path(),
            PathBuf::from("/var/lib/roster/subscribers.txt")
        );
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn test_bad_port_rejected() {
        let result = ServiceConfig::from_lookup(lookup(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(StoreError::Config(_))));
    }
}
