//! Connection-timeout policy tests.

use ffshot::{DEFAULT_TIMEOUT_MS, ShotRequest, effective_timeout, is_rtmp};

const RTMP_LOCATORS: &[&str] = &[
    "rtmp://example.com/live/stream",
    "rtmps://example.com/live/stream",
    "rtmpt://example.com:80/app/key",
    "rtmp",
];

const OTHER_LOCATORS: &[&str] = &[
    "https://example.com/video.mp4",
    "http://example.com/live.m3u8",
    "/local/path/video.mp4",
    "video.mp4",
    "RTMP://example.com/live/stream",
    "srt://example.com:9000",
    "file:rtmp.mp4",
    "",
];

#[test]
fn default_timeout_is_five_seconds() {
    assert_eq!(DEFAULT_TIMEOUT_MS, 5000);
}

#[test]
fn rtmp_locators_never_get_a_timeout() {
    for locator in RTMP_LOCATORS {
        for requested in [0, 1, 5000, 9999, u32::MAX] {
            assert_eq!(
                effective_timeout(locator, requested),
                0,
                "{locator} with {requested} ms"
            );
        }
    }
}

#[test]
fn other_locators_keep_the_requested_timeout() {
    for locator in OTHER_LOCATORS {
        for requested in [0, 1, 5000, 9999, u32::MAX] {
            assert_eq!(
                effective_timeout(locator, requested),
                requested,
                "{locator} with {requested} ms"
            );
        }
    }
}

#[test]
fn prefix_match_is_case_sensitive() {
    assert!(is_rtmp("rtmp://host/app"));
    assert!(!is_rtmp("RTMP://host/app"));
    assert!(!is_rtmp("Rtmp://host/app"));
    assert!(!is_rtmp(" rtmp://host/app"));
}

#[test]
fn policy_is_idempotent() {
    for locator in RTMP_LOCATORS.iter().chain(OTHER_LOCATORS) {
        let first = effective_timeout(locator, 1234);
        let second = effective_timeout(locator, 1234);
        assert_eq!(first, second);
        assert_eq!(effective_timeout(locator, first), first);
    }
}

#[test]
fn request_defaults() {
    let request = ShotRequest::new("https://example.com/video.mp4", "/tmp/out.jpg");
    assert_eq!(request.codec(), "mjpeg");
    assert_eq!(request.timeout_ms(), 5000);
    assert_eq!(request.effective_timeout_ms(), 5000);
}

#[test]
fn request_keeps_requested_timeout_for_rtmp() {
    let request = ShotRequest::new("rtmp://example.com/live/stream", "/tmp/out.jpg")
        .with_timeout_ms(9999);
    assert_eq!(request.timeout_ms(), 9999);
    assert_eq!(request.effective_timeout_ms(), 0);
}
