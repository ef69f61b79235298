//! Session pool opening
//!
//! Translates a [`ConnectionConfig`] into a native session pool: build the
//! connect descriptor, create the pool through the native connector and
//! probe one session for liveness before handing the pool to the caller.
//! The probe is the only step that touches the network; a failed probe
//! discards the pool and surfaces a database-operation error.

use chrono_tz::Tz;
use oracle::pool::{CloseMode, Pool, PoolBuilder, PoolOptions, PoolType};
use oracle::Connection;

use crate::client;
use crate::config::ConnectionConfig;
use crate::descriptor::{ConnectDescriptor, CONNECTION_CLASS};
use crate::error::{Error, Result};
use crate::timezone;

/// An opened, liveness-checked Oracle session pool
///
/// Carries the resolved session timezone and the connect string the pool
/// was opened with, for callers interpreting date values or reporting
/// errors.
#[derive(Debug)]
pub struct OraclePool {
    pool: Pool,
    timezone: Tz,
    connect_string: String,
}

impl OraclePool {
    /// Checks a session out of the pool.
    ///
    /// The session returns to the pool when dropped.
    pub fn get(&self) -> Result<Connection> {
        self.pool
            .get_with_options(&PoolOptions::new().connection_class(CONNECTION_CLASS))
            .map_err(|e| Error::db_operation(&self.connect_string, e))
    }

    /// The resolved session timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The connect string the pool was opened with.
    pub fn connect_string(&self) -> &str {
        &self.connect_string
    }

    /// The underlying native pool handle.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Closes the pool, forcing active sessions closed.
    pub fn close(&self) -> Result<()> {
        self.pool
            .close(&CloseMode::Force)
            .map_err(|e| Error::db_operation(&self.connect_string, e))
    }
}

/// Opens a session pool using the process-local timezone as the default.
///
/// See [`open_with_timezone`].
pub fn open(config: &ConnectionConfig) -> Result<OraclePool> {
    open_with_timezone(config, timezone::local_timezone())
}

/// Opens a session pool, resolving timezones against `default_tz`.
///
/// Builds the option set and connect descriptor (infallible; malformed
/// extra entries and unresolvable timezones degrade with a warning), primes
/// the Instant Client when one is locally installed, creates the native
/// pool and pings one session. The pool is discarded on probe failure so no
/// connection resource reaches the caller on the error path.
pub fn open_with_timezone(config: &ConnectionConfig, default_tz: Tz) -> Result<OraclePool> {
    client::prime_if_available();

    let desc = ConnectDescriptor::from_config(config, default_tz);
    log::info!(
        "opening oracle session pool at {} (sessions {}..{}, timezone {})",
        desc.connect_string,
        desc.min_sessions,
        desc.max_sessions,
        desc.timezone
    );

    let pool = PoolBuilder::new(
        desc.username.as_str(),
        desc.password.expose(),
        desc.connect_string.as_str(),
    )
    .max_connections(desc.max_sessions)
    .min_connections(desc.min_sessions)
    .connection_increment(desc.session_increment)
    .pool_type(PoolType::Homogeneous)
    .events(desc.enable_events)
    .build()
    .map_err(|e| Error::db_operation(&desc.connect_string, e))?;

    // Liveness probe: the single step that performs network I/O.
    let probe = pool
        .get_with_options(&PoolOptions::new().connection_class(desc.connection_class))
        .and_then(|conn| conn.ping().map(|_| conn));

    match probe {
        Ok(conn) => {
            drop(conn);
            log::info!("oracle session pool is live at {}", desc.connect_string);
            Ok(OraclePool {
                pool,
                timezone: desc.timezone,
                connect_string: desc.connect_string,
            })
        }
        Err(e) => {
            log::error!("liveness probe failed for {}: {}", desc.connect_string, e);
            let _ = pool.close(&CloseMode::Force);
            Err(Error::db_operation(&desc.connect_string, e))
        }
    }
}
