//! Human-readable byte and duration formatting for the progress line.

use std::time::Duration;

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Formats a byte count with binary (1024-based) units and two decimals.
///
/// Counts up to and including 1024 stay in bytes.
///
/// # Examples
///
/// ```
/// use fsearch_walker::format_size;
///
/// assert_eq!(format_size(512), "512.00 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)] // Display only
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b <= KB {
        format!("{b:.2} B")
    } else if b < MB {
        format!("{:.2} KB", b / KB)
    } else if b < GB {
        format!("{:.2} MB", b / MB)
    } else if b < TB {
        format!("{:.2} GB", b / GB)
    } else {
        format!("{:.2} TB", b / TB)
    }
}

/// Formats a duration with decimal (1000-based) units.
///
/// Sub-microsecond durations are printed as whole nanoseconds, everything
/// else with two decimals.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fsearch_walker::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_nanos(999)), "999 ns");
/// assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.50 s");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)] // Display only
pub fn format_elapsed(elapsed: Duration) -> String {
    let nanos = elapsed.as_nanos();
    if nanos < NANOS_PER_MICRO {
        format!("{nanos} ns")
    } else if nanos < NANOS_PER_MILLI {
        format!("{:.2} µs", nanos as f64 / NANOS_PER_MICRO as f64)
    } else if nanos < NANOS_PER_SEC {
        format!("{:.2} ms", nanos as f64 / NANOS_PER_MILLI as f64)
    } else {
        format!("{:.2} s", nanos as f64 / NANOS_PER_SEC as f64)
    }
}
