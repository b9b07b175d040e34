//! Server configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// JSON file mirroring the collection. `None` keeps everything in memory.
    pub db_file: Option<PathBuf>,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on, on all interfaces
    /// - `PWKEEP_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `PWKEEP_DB_FILE` — JSON file to load from and write through to (optional)
    /// - `PWKEEP_LOG_LEVEL` — log filter (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup.
    #[must_use]
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Self {
        let default_addr = SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT));

        // Priority: PWKEEP_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = env("PWKEEP_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port_str) = env("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let db_file = env("PWKEEP_DB_FILE")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let log_level = env("PWKEEP_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        Self {
            bind_addr,
            db_file,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ServerConfig::from_lookup(|_| None);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert!(cfg.db_file.is_none());
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn port_binds_all_interfaces() {
        let cfg = ServerConfig::from_lookup(|name| (name == "PORT").then(|| "8080".to_owned()));
        assert_eq!(cfg.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_overrides_port() {
        let cfg = ServerConfig::from_lookup(|name| match name {
            "PWKEEP_BIND_ADDR" => Some("127.0.0.1:4000".to_owned()),
            "PORT" => Some("8080".to_owned()),
            "PWKEEP_DB_FILE" => Some("db.json".to_owned()),
            _ => None,
        });
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 4000)));
        assert_eq!(cfg.db_file, Some(PathBuf::from("db.json")));
    }
}
