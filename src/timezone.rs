//! Timezone resolution
//!
//! A supplied zone name resolves through the IANA database; an unresolvable
//! name degrades to the injected default zone without surfacing an error.
//! The default is passed in by the caller rather than read from ambient
//! process state, so resolution stays pure and testable.

use chrono_tz::Tz;

/// Resolves a timezone name against the IANA database.
///
/// Returns the resolved zone plus a flag telling whether the default was
/// used because the name did not resolve. An empty name selects the default
/// directly and is not reported as a fallback.
pub fn resolve_timezone(name: &str, default: Tz) -> (Tz, bool) {
    if name.is_empty() {
        return (default, false);
    }
    match name.parse::<Tz>() {
        Ok(tz) => (tz, false),
        Err(_) => {
            log::warn!(
                "timezone {:?} is not resolvable, falling back to {}",
                name,
                default
            );
            (default, true)
        }
    }
}

/// Returns the process-local timezone, or UTC when it cannot be determined.
pub fn local_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse().unwrap_or(Tz::UTC),
        Err(e) => {
            log::warn!("failed to determine local timezone, using UTC: {}", e);
            Tz::UTC
        }
    }
}
