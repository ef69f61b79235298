//! Error type for the opener
//!
//! A single "database operation" error covers everything the native
//! connector can fail with; the Instant Client being absent gets its own
//! variant so callers can distinguish an installation problem from an
//! unreachable database. Option parsing and timezone resolution never
//! produce errors (best-effort configuration, fail-fast on connectivity).

use thiserror::Error;

use crate::descriptor::DRIVER_NAME;

/// Errors surfaced by the pool opener.
#[derive(Debug, Error)]
pub enum Error {
    /// The native connector reported a failure while building the pool or
    /// probing it for liveness.
    #[error("sql open failed for driver \"{driver}\" by connect string \"{connect_string}\"")]
    DbOperation {
        /// Native driver identifier
        driver: &'static str,
        /// Connect string the attempt was made with
        connect_string: String,
        /// Underlying connector error
        #[source]
        source: oracle::Error,
    },

    /// The Oracle Instant Client library could not be found or loaded.
    #[error("oracle instant client is not ready: {0}")]
    ClientNotReady(String),
}

impl Error {
    /// Wraps a native connector error as a database-operation failure.
    ///
    /// DPI-1047 ("cannot locate library") means the Instant Client is not
    /// installed, which is an environment problem rather than a
    /// connectivity one, so it maps to [`Error::ClientNotReady`].
    pub fn db_operation(connect_string: &str, source: oracle::Error) -> Self {
        let text = source.to_string();
        if text.contains("DPI-1047") || text.contains("Cannot locate") {
            return Error::ClientNotReady(text);
        }
        Error::DbOperation {
            driver: DRIVER_NAME,
            connect_string: connect_string.to_string(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_not_ready_message() {
        let err = Error::ClientNotReady("DPI-1047: Cannot locate library".to_string());
        assert!(err.to_string().contains("instant client is not ready"));
    }
}
