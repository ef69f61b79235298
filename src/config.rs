//! Generic connection configuration
//!
//! This module defines the configuration record handed to the opener by the
//! calling framework. Fields are passed through as-is; malformed values
//! (empty host, zero port) surface as native connector errors rather than
//! being rejected here.

use serde::{Deserialize, Serialize};

/// Configuration for an Oracle session pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database host/hostname
    pub host: String,

    /// Database port (typically 1521)
    pub port: u16,

    /// Wire protocol, e.g. `tcp` or `tcps`
    pub protocol: String,

    /// Oracle service name
    pub name: String,

    /// Database username
    pub user: String,

    /// Database password
    pub pass: String,

    /// IANA timezone name; empty means "use the default zone"
    #[serde(default)]
    pub timezone: String,

    /// Enables driver trace output
    #[serde(default)]
    pub debug: bool,

    /// Free-form `key=value` pairs separated by `&`, appended verbatim to
    /// the connect string and merged into the option set
    #[serde(default)]
    pub extra: String,

    /// Upper bound on pooled sessions (maps to max sessions)
    pub max_open_conns: u32,

    /// Sessions kept open while idle (maps to min sessions)
    pub max_idle_conns: u32,
}

impl ConnectionConfig {
    /// Creates a configuration with empty timezone/extra and debug off.
    pub fn new(
        host: String,
        port: u16,
        protocol: String,
        name: String,
        user: String,
        pass: String,
        max_open_conns: u32,
        max_idle_conns: u32,
    ) -> Self {
        Self {
            host,
            port,
            protocol,
            name,
            user,
            pass,
            timezone: String::new(),
            debug: false,
            extra: String::new(),
            max_open_conns,
            max_idle_conns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = ConnectionConfig::new(
            "localhost".to_string(),
            1521,
            "tcp".to_string(),
            "ORCL".to_string(),
            "scott".to_string(),
            "tiger".to_string(),
            10,
            2,
        );
        assert!(config.timezone.is_empty());
        assert!(config.extra.is_empty());
        assert!(!config.debug);
    }

    #[test]
    fn test_deserialize_optional_fields() {
        let json = r#"{
            "host": "dbhost",
            "port": 1521,
            "protocol": "tcp",
            "name": "XEPDB1",
            "user": "app",
            "pass": "secret",
            "max_open_conns": 8,
            "max_idle_conns": 1
        }"#;
        let config: ConnectionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.host, "dbhost");
        assert!(config.timezone.is_empty());
        assert!(!config.debug);
        assert!(config.extra.is_empty());
    }
}
