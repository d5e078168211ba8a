// SPDX-License-Identifier: MIT

/// Human-readable size: `512 B`, `4.0 KiB`, `1.5 MiB`.
pub fn pretty_bytes(n: u64) -> String {
    const UNITS: [&str; 3] = ["B", "KiB", "MiB"];
    if n < 1024 {
        return format!("{n} {}", UNITS[0]);
    }
    let mut val = n as f64 / 1024.0;
    let mut idx = 1usize;
    while val >= 1024.0 && idx + 1 < UNITS.len() {
        val /= 1024.0;
        idx += 1;
    }
    format!("{val:.1} {}", UNITS[idx])
}

/// `mtime` as `YYYY-MM-DD HH:MM:SS UTC`, or the raw number when out of range.
pub fn pretty_epoch(secs: u64) -> String {
    let Ok(secs) = i64::try_from(secs) else {
        return secs.to_string();
    };
    match time::OffsetDateTime::from_unix_timestamp(secs) {
        Ok(t) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
            t.year(),
            u8::from(t.month()),
            t.day(),
            t.hour(),
            t.minute(),
            t.second()
        ),
        Err(_) => secs.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_bytes() {
        assert_eq!(pretty_bytes(0), "0 B");
        assert_eq!(pretty_bytes(1023), "1023 B");
        assert_eq!(pretty_bytes(4096), "4.0 KiB");
        assert_eq!(pretty_bytes(180 * 1024), "180.0 KiB");
        assert_eq!(pretty_bytes(4 * 1024 * 1024), "4.0 MiB");
    }

    #[test]
    fn test_pretty_epoch() {
        assert_eq!(pretty_epoch(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(pretty_epoch(1_700_000_000), "2023-11-14 22:13:20 UTC");
        assert_eq!(pretty_epoch(u64::MAX), u64::MAX.to_string());
    }
}
