// SPDX-License-Identifier: MIT

//! Time utilities for filesystem timestamps.
//!
//! - In `std` mode, uses the system clock.
//! - In `no_std`, returns the UNIX epoch as a fixed timestamp.

use time::OffsetDateTime;

/// Returns the current UTC time.
pub fn now_utc() -> OffsetDateTime {
    #[cfg(feature = "std")]
    {
        OffsetDateTime::now_utc()
    }

    #[cfg(not(feature = "std"))]
    {
        OffsetDateTime::UNIX_EPOCH
    }
}

/// Current time as seconds since the UNIX epoch.
///
/// Clocks set before 1970 yield 0.
pub fn now_epoch() -> u64 {
    u64::try_from(now_utc().unix_timestamp()).unwrap_or(0)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_now_epoch_tracks_system_clock() {
        let sys = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let ours = now_epoch();
        assert!(ours.abs_diff(sys) <= 2, "epoch drift: {ours} vs {sys}");
    }
}
