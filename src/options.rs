//! Native driver option set
//!
//! Options are seeded with fixed defaults, optionally extended with a trace
//! file when debug is on, then overlaid with entries parsed from the
//! free-form extra string. Malformed extra entries are dropped, not
//! rejected; the merge reports how many were dropped so callers can log or
//! assert on the degradation.

use std::collections::HashMap;

/// Option key for the native connection timeout (seconds).
pub const OPT_CONNECTION_TIMEOUT: &str = "CONNECTION TIMEOUT";

/// Option key for the per-statement row prefetch count.
pub const OPT_PREFETCH_ROWS: &str = "PREFETCH_ROWS";

/// Option key for the driver trace file.
pub const OPT_TRACE_FILE: &str = "TRACE FILE";

/// Default connection timeout, overridable through the extra string.
pub const DEFAULT_CONNECTION_TIMEOUT: &str = "60";

/// Default prefetch row count, overridable through the extra string.
pub const DEFAULT_PREFETCH_ROWS: &str = "25";

/// Trace file name used when debug is enabled.
pub const DEFAULT_TRACE_FILE: &str = "oracle_trace.log";

/// Merged set of native driver options (key → value, keys unique)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    entries: HashMap<String, String>,
}

impl OptionSet {
    /// Creates an option set seeded with the two fixed defaults.
    pub fn with_defaults() -> Self {
        let mut set = Self::default();
        set.set(OPT_CONNECTION_TIMEOUT, DEFAULT_CONNECTION_TIMEOUT);
        set.set(OPT_PREFETCH_ROWS, DEFAULT_PREFETCH_ROWS);
        set
    }

    /// Inserts or overwrites a single option.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Adds the trace-file option with its fixed filename.
    pub fn enable_trace_file(&mut self) {
        self.set(OPT_TRACE_FILE, DEFAULT_TRACE_FILE);
    }

    /// Merges an ampersand-separated `key=value` string into the set.
    ///
    /// Pieces that do not split into exactly two parts on `=` are dropped.
    /// Later duplicate keys overwrite earlier ones. Returns the number of
    /// dropped pieces so the degradation is observable.
    pub fn merge_extra(&mut self, extra: &str) -> usize {
        if extra.is_empty() {
            return 0;
        }
        let mut dropped = 0;
        for piece in extra.split('&') {
            let kv: Vec<&str> = piece.split('=').collect();
            if kv.len() == 2 {
                self.set(kv[0], kv[1]);
            } else {
                log::warn!("dropping malformed extra option entry: {:?}", piece);
                dropped += 1;
            }
        }
        dropped
    }

    /// Looks up an option value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if the option is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of options in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set holds no options.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
