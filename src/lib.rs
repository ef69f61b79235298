//! Oracle session-pool opener
//!
//! Translates a generic connection configuration into fully-specified
//! native connection parameters, opens a session pool through Oracle
//! Instant Client and validates connectivity with a liveness probe.
//! Pooling, protocol handling and SQL execution stay with the native
//! client; this crate owns only the deterministic configuration
//! translation in front of it.
//!
//! ```no_run
//! use orapool::ConnectionConfig;
//!
//! let config = ConnectionConfig::new(
//!     "dbhost".to_string(),
//!     1521,
//!     "tcp".to_string(),
//!     "XEPDB1".to_string(),
//!     "app".to_string(),
//!     "secret".to_string(),
//!     10,
//!     2,
//! );
//! let pool = orapool::open(&config)?;
//! let conn = pool.get()?;
//! # Ok::<(), orapool::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod options;
pub mod pool;
pub mod timezone;

pub use config::ConnectionConfig;
pub use descriptor::{ConnectDescriptor, Password, DRIVER_NAME};
pub use error::{Error, Result};
pub use options::OptionSet;
pub use pool::{open, open_with_timezone, OraclePool};
