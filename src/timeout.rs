//! Connection-timeout policy.
//!
//! FFmpeg's RTMP protocol handler does not honour the generic `timeout`
//! option, so RTMP locators always run without one. Everything else keeps
//! the caller's value.
//!
//! # Example
//!
//! ```
//! use ffshot::timeout::{DEFAULT_TIMEOUT_MS, effective_timeout};
//!
//! assert_eq!(effective_timeout("rtmp://example.com/live/stream", 9999), 0);
//! assert_eq!(effective_timeout("https://example.com/video.mp4", DEFAULT_TIMEOUT_MS), 5000);
//! ```

/// Default connection timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 5000;

/// Locator prefix that disables the timeout. Matched case-sensitively.
const RTMP_PREFIX: &str = "rtmp";

/// Returns `true` if the locator uses an RTMP-family scheme
/// (`rtmp`, `rtmps`, `rtmpt`, ...).
pub fn is_rtmp(locator: &str) -> bool {
    locator.starts_with(RTMP_PREFIX)
}

/// Resolve the timeout actually handed to FFmpeg.
///
/// Returns `0` ("no timeout") for RTMP locators and `requested_ms`
/// unchanged for every other locator.
pub fn effective_timeout(locator: &str, requested_ms: u32) -> u32 {
    if is_rtmp(locator) { 0 } else { requested_ms }
}

/// Convert a millisecond timeout into the microsecond value FFmpeg's
/// `timeout` option expects. `None` means the option must not be set.
pub(crate) fn timeout_option_micros(timeout_ms: u32) -> Option<u64> {
    if timeout_ms == 0 {
        None
    } else {
        Some(u64::from(timeout_ms) * 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::timeout_option_micros;

    #[test]
    fn zero_timeout_sets_no_option() {
        assert_eq!(timeout_option_micros(0), None);
    }

    #[test]
    fn milliseconds_become_microseconds() {
        assert_eq!(timeout_option_micros(5000), Some(5_000_000));
        assert_eq!(timeout_option_micros(u32::MAX), Some(u64::from(u32::MAX) * 1000));
    }
}
