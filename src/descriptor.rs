//! Native connection descriptor
//!
//! This module translates a [`ConnectionConfig`] into the fully-resolved
//! parameter record handed to the native connector: connect string, resolved
//! timezone, credentials and pool sizing. Construction is infallible; option
//! parsing and timezone resolution degrade silently (with a log line) rather
//! than erroring.

use std::fmt;

use chrono_tz::Tz;

use crate::config::ConnectionConfig;
use crate::options::OptionSet;
use crate::timezone::resolve_timezone;

/// Identifier of the underlying native driver, used in error messages.
pub const DRIVER_NAME: &str = "instantclient";

/// Number of sessions the pool grows by when exhausted.
pub const SESSION_INCREMENT: u32 = 1;

/// Connection class requested for pooled sessions.
pub const CONNECTION_CLASS: &str = "POOLED";

/// A password kept out of `Debug`/`Display` output.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Wraps a secret.
    pub fn new<S: Into<String>>(secret: S) -> Self {
        Self(secret.into())
    }

    /// Returns the wrapped secret for handing to the native connector.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Fully-resolved native connection parameters
///
/// Built once per open call and consumed by the pool builder; never
/// persisted.
#[derive(Debug, Clone)]
pub struct ConnectDescriptor {
    /// `protocol://host:port/name`, with `?<extra>` appended verbatim when
    /// the extra string is non-empty
    pub connect_string: String,

    /// Resolved session timezone
    pub timezone: Tz,

    /// True when the configured timezone name did not resolve and the
    /// default zone was substituted
    pub timezone_fallback: bool,

    /// Database username
    pub username: String,

    /// Database password
    pub password: Password,

    /// Upper bound on pooled sessions
    pub max_sessions: u32,

    /// Sessions kept open while idle
    pub min_sessions: u32,

    /// Pool growth step, fixed at 1
    pub session_increment: u32,

    /// Connection class for pooled sessions
    pub connection_class: &'static str,

    /// All sessions share the pool credentials
    pub homogeneous: bool,

    /// A pool is requested rather than a standalone connection
    pub standalone: bool,

    /// Subscription events are not requested
    pub enable_events: bool,

    /// Preliminary authentication (for startup/shutdown) is not requested
    pub prelim_auth: bool,

    /// Merged driver options. Note: these are carried for inspection but
    /// are not substituted into the connect string; the raw extra text is
    /// appended verbatim instead, matching the long-standing observed
    /// behavior of the driver this replaces.
    pub options: OptionSet,

    /// Number of malformed entries dropped while parsing the extra string
    pub dropped_extra_entries: usize,
}

impl ConnectDescriptor {
    /// Builds a descriptor from a configuration record.
    ///
    /// `default_tz` is used when the configured timezone is absent or does
    /// not resolve. This step never fails; malformed extra entries are
    /// dropped and logged.
    pub fn from_config(config: &ConnectionConfig, default_tz: Tz) -> Self {
        let mut options = OptionSet::with_defaults();
        if config.debug {
            options.enable_trace_file();
        }
        let dropped_extra_entries = options.merge_extra(&config.extra);

        let (timezone, timezone_fallback) = resolve_timezone(&config.timezone, default_tz);

        Self {
            connect_string: build_connect_string(config),
            timezone,
            timezone_fallback,
            username: config.user.clone(),
            password: Password::new(config.pass.clone()),
            max_sessions: config.max_open_conns,
            min_sessions: config.max_idle_conns,
            session_increment: SESSION_INCREMENT,
            connection_class: CONNECTION_CLASS,
            homogeneous: true,
            standalone: false,
            enable_events: false,
            prelim_auth: false,
            options,
            dropped_extra_entries,
        }
    }
}

/// Builds the native connect string.
///
/// Format: `protocol://host:port/name`, with `?<extra>` appended verbatim
/// iff the extra string is non-empty.
fn build_connect_string(config: &ConnectionConfig) -> String {
    let mut s = format!(
        "{}://{}:{}/{}",
        config.protocol, config.host, config.port, config.name
    );
    if !config.extra.is_empty() {
        s.push('?');
        s.push_str(&config.extra);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OPT_CONNECTION_TIMEOUT, OPT_PREFETCH_ROWS, OPT_TRACE_FILE};

    fn base_config() -> ConnectionConfig {
        ConnectionConfig::new(
            "dbhost".to_string(),
            1521,
            "tcp".to_string(),
            "XEPDB1".to_string(),
            "app".to_string(),
            "secret".to_string(),
            10,
            2,
        )
    }

    #[test]
    fn test_connect_string_without_extra() {
        let desc = ConnectDescriptor::from_config(&base_config(), Tz::UTC);
        assert_eq!(desc.connect_string, "tcp://dbhost:1521/XEPDB1");
        assert!(!desc.connect_string.contains('?'));
    }

    #[test]
    fn test_connect_string_with_extra() {
        let mut config = base_config();
        config.extra = "a=1&b=2".to_string();
        let desc = ConnectDescriptor::from_config(&config, Tz::UTC);
        assert_eq!(desc.connect_string, "tcp://dbhost:1521/XEPDB1?a=1&b=2");
        assert_eq!(desc.connect_string.matches('?').count(), 1);
        assert_eq!(desc.options.get("a"), Some("1"));
        assert_eq!(desc.options.get("b"), Some("2"));
        assert_eq!(desc.options.get(OPT_CONNECTION_TIMEOUT), Some("60"));
        assert_eq!(desc.options.get(OPT_PREFETCH_ROWS), Some("25"));
    }

    #[test]
    fn test_malformed_extra_kept_verbatim_in_connect_string() {
        let mut config = base_config();
        config.extra = "malformed&x=1=2&y=3".to_string();
        let desc = ConnectDescriptor::from_config(&config, Tz::UTC);
        // The raw extra text wins in the connect string even though two
        // entries were dropped from the option set.
        assert_eq!(
            desc.connect_string,
            "tcp://dbhost:1521/XEPDB1?malformed&x=1=2&y=3"
        );
        assert_eq!(desc.options.get("y"), Some("3"));
        assert!(!desc.options.contains("x"));
        assert_eq!(desc.dropped_extra_entries, 2);
    }

    #[test]
    fn test_debug_toggles_trace_file() {
        let mut config = base_config();
        config.debug = true;
        let desc = ConnectDescriptor::from_config(&config, Tz::UTC);
        assert!(desc.options.contains(OPT_TRACE_FILE));

        config.debug = false;
        let desc = ConnectDescriptor::from_config(&config, Tz::UTC);
        assert!(!desc.options.contains(OPT_TRACE_FILE));
    }

    #[test]
    fn test_timezone_resolution() {
        let mut config = base_config();
        config.timezone = "UTC".to_string();
        let desc = ConnectDescriptor::from_config(&config, Tz::Asia__Jakarta);
        assert_eq!(desc.timezone, Tz::UTC);
        assert!(!desc.timezone_fallback);

        config.timezone = "invalid/zone".to_string();
        let desc = ConnectDescriptor::from_config(&config, Tz::Asia__Jakarta);
        assert_eq!(desc.timezone, Tz::Asia__Jakarta);
        assert!(desc.timezone_fallback);

        config.timezone = String::new();
        let desc = ConnectDescriptor::from_config(&config, Tz::Asia__Jakarta);
        assert_eq!(desc.timezone, Tz::Asia__Jakarta);
        assert!(!desc.timezone_fallback);
    }

    #[test]
    fn test_session_mapping() {
        let desc = ConnectDescriptor::from_config(&base_config(), Tz::UTC);
        assert_eq!(desc.max_sessions, 10);
        assert_eq!(desc.min_sessions, 2);
        assert_eq!(desc.session_increment, 1);
        assert_eq!(desc.connection_class, "POOLED");
        assert!(desc.homogeneous);
        assert!(!desc.standalone);
        assert!(!desc.enable_events);
        assert!(!desc.prelim_auth);
        assert_eq!(desc.dropped_extra_entries, 0);
    }

    #[test]
    fn test_password_is_redacted() {
        let desc = ConnectDescriptor::from_config(&base_config(), Tz::UTC);
        let dump = format!("{:?}", desc);
        assert!(!dump.contains("secret"));
        assert_eq!(desc.password.expose(), "secret");
        assert_eq!(format!("{}", desc.password), "***");
    }
}
