//! Oracle Instant Client detection and loading
//!
//! The native connector needs `libclntsh` on the loader path. This module
//! locates the Instant Client directory, verifies the library file looks
//! usable and loads it once for the lifetime of the process. Priming is
//! best-effort from the opener's point of view: a system-wide client
//! installation works without it.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use crate::error::{Error, Result};

/// Reference to the loaded client library, held for the process lifetime.
static ORACLE_CLIENT: OnceLock<Mutex<Option<libloading::Library>>> = OnceLock::new();

/// Environment variable overriding the Instant Client directory.
pub const CLIENT_DIR_ENV: &str = "ORACLE_CLIENT_DIR";

/// Well-known Instant Client locations, probed in order.
const DEFAULT_CLIENT_PATHS: &[&str] = &["/opt/oracle/instantclient", "~/instantclient", "~/lib"];

#[cfg(target_os = "macos")]
const ORACLE_LIB_NAME: &str = "libclntsh.dylib";

#[cfg(target_os = "linux")]
const ORACLE_LIB_NAME: &str = "libclntsh.so";

#[cfg(target_os = "windows")]
const ORACLE_LIB_NAME: &str = "oci.dll";

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolves the Instant Client directory.
///
/// A custom path wins outright. Otherwise the `ORACLE_CLIENT_DIR`
/// environment variable is honored, then the well-known locations are
/// probed for the client library. When nothing is found the first default
/// is returned so diagnostics can show the expected location.
pub fn resolve_client_path(custom_path: Option<&str>) -> PathBuf {
    if let Some(path) = custom_path {
        return expand_home(path);
    }

    if let Ok(dir) = std::env::var(CLIENT_DIR_ENV) {
        if !dir.is_empty() {
            return expand_home(&dir);
        }
    }

    for candidate in DEFAULT_CLIENT_PATHS {
        let dir = expand_home(candidate);
        if dir.join(ORACLE_LIB_NAME).exists() {
            return dir;
        }
    }

    expand_home(DEFAULT_CLIENT_PATHS[0])
}

/// Checks whether the Instant Client library exists and looks usable.
///
/// Verifies the file exists (following symlinks) and has a plausible size.
/// This does not load the library; see [`prime_client`].
pub fn check_client_ready(custom_path: Option<&str>) -> bool {
    let client_dir = resolve_client_path(custom_path);
    let lib_path = client_dir.join(ORACLE_LIB_NAME);

    if !lib_path.exists() {
        log::debug!("oracle client library not found at: {:?}", lib_path);
        return false;
    }

    if !lib_path.is_file() {
        log::warn!(
            "oracle client library path exists but is not a file: {:?}",
            lib_path
        );
        return false;
    }

    // A real libclntsh is tens of megabytes; anything under 1MB is a stub
    // or a broken download.
    match std::fs::metadata(&lib_path) {
        Ok(metadata) if metadata.len() < 1_048_576 => {
            log::warn!(
                "oracle client library is suspiciously small ({} bytes): {:?}",
                metadata.len(),
                lib_path
            );
            false
        }
        Ok(_) => true,
        Err(e) => {
            log::warn!("failed to stat oracle client library {:?}: {}", lib_path, e);
            false
        }
    }
}

/// Loads the Instant Client library into the process.
///
/// Sets the platform loader-path variable before loading so the native
/// connector can find the library later, then loads it with `RTLD_GLOBAL`
/// on unix to make its symbols visible globally. The handle is retained in
/// a static for the process lifetime.
pub fn prime_client(custom_path: Option<&str>) -> Result<()> {
    let client_dir = resolve_client_path(custom_path);
    let lib_path = client_dir.join(ORACLE_LIB_NAME);

    if !lib_path.exists() {
        return Err(Error::ClientNotReady(format!(
            "client library not found at {}",
            lib_path.display()
        )));
    }

    // The loader path must be set before the first dpiContext creation.
    #[cfg(target_os = "macos")]
    std::env::set_var("DYLD_LIBRARY_PATH", client_dir.as_os_str());

    #[cfg(target_os = "linux")]
    std::env::set_var("LD_LIBRARY_PATH", client_dir.as_os_str());

    #[cfg(target_os = "windows")]
    std::env::set_var("PATH", client_dir.as_os_str());

    #[cfg(unix)]
    let library = unsafe {
        use libloading::os::unix::{Library as UnixLibrary, RTLD_GLOBAL, RTLD_NOW};
        let unix_lib = UnixLibrary::open(Some(&lib_path), RTLD_NOW | RTLD_GLOBAL)
            .map_err(|e| Error::ClientNotReady(format!("failed to load {:?}: {}", lib_path, e)))?;
        libloading::Library::from(unix_lib)
    };

    #[cfg(not(unix))]
    let library = unsafe {
        libloading::Library::new(&lib_path)
            .map_err(|e| Error::ClientNotReady(format!("failed to load {:?}: {}", lib_path, e)))?
    };

    let mutex = ORACLE_CLIENT.get_or_init(|| Mutex::new(None));
    let mut guard = mutex
        .lock()
        .map_err(|e| Error::ClientNotReady(format!("client lock poisoned: {}", e)))?;
    *guard = Some(library);

    log::info!("oracle client library loaded from: {:?}", lib_path);
    Ok(())
}

/// Returns true when the client library has been loaded by [`prime_client`].
pub fn is_client_primed() -> bool {
    if let Some(mutex) = ORACLE_CLIENT.get() {
        if let Ok(guard) = mutex.lock() {
            return guard.is_some();
        }
    }
    false
}

/// Primes the client when a local installation is visible.
///
/// Used by the opener before building a pool. A missing installation is not
/// an error here; the system loader may still find a globally installed
/// client, and a genuine absence surfaces from the connector as DPI-1047.
pub fn prime_if_available() {
    if is_client_primed() {
        return;
    }
    if check_client_ready(None) {
        if let Err(e) = prime_client(None) {
            log::warn!("failed to prime oracle client: {}", e);
        }
    } else {
        log::debug!("no local instant client found, relying on system loader");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_client_path_custom() {
        let custom = "/opt/oracle/instantclient_21_9";
        let path = resolve_client_path(Some(custom));
        assert_eq!(path.to_string_lossy(), custom);
    }

    #[test]
    fn test_resolve_client_path_expands_tilde() {
        let path = resolve_client_path(Some("~/instantclient"));
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.to_string_lossy().ends_with("instantclient"));
    }

    #[test]
    fn test_check_client_ready_missing_dir() {
        assert!(!check_client_ready(Some("/nonexistent/instantclient")));
    }

    #[test]
    fn test_prime_client_missing_dir_errors() {
        let result = prime_client(Some("/nonexistent/instantclient"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("client library not found"));
    }
}
