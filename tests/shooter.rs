//! Shooter pass-through tests against a recording backend.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ffshot::{STATUS_FAILED, STATUS_OK, ShotBackend, ShotRequest, Shooter};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Call {
    locator: String,
    codec: String,
    output: PathBuf,
    timeout_ms: u32,
}

/// Records every call and answers with a fixed status.
struct RecordingBackend {
    status: i32,
    calls: Mutex<Vec<Call>>,
}

impl RecordingBackend {
    fn returning(status: i32) -> Self {
        Self {
            status,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl ShotBackend for RecordingBackend {
    fn shot(&self, locator: &str, codec: &str, output: &Path, timeout_ms: u32) -> i32 {
        self.calls.lock().unwrap().push(Call {
            locator: locator.to_string(),
            codec: codec.to_string(),
            output: output.to_path_buf(),
            timeout_ms,
        });
        self.status
    }
}

#[test]
fn rtmp_timeout_is_forced_to_zero() {
    let backend = RecordingBackend::returning(STATUS_OK);
    let shooter = Shooter::with_backend(&backend);

    let request = ShotRequest::new("rtmp://example.com/live/stream", "/tmp/out.jpg")
        .with_timeout_ms(9999);
    shooter.shoot(&request);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].timeout_ms, 0);
}

#[test]
fn http_uses_default_timeout() {
    let backend = RecordingBackend::returning(STATUS_OK);
    let shooter = Shooter::with_backend(&backend);

    shooter.shoot(&ShotRequest::new(
        "https://example.com/video.mp4",
        "/tmp/out.jpg",
    ));

    assert_eq!(backend.calls()[0].timeout_ms, 5000);
}

#[test]
fn local_file_forwards_all_arguments() {
    let backend = RecordingBackend::returning(STATUS_OK);
    let shooter = Shooter::with_backend(&backend);

    shooter.shoot(&ShotRequest::new("/local/path/video.mp4", "/tmp/out.jpg"));

    assert_eq!(
        backend.calls(),
        vec![Call {
            locator: "/local/path/video.mp4".to_string(),
            codec: "mjpeg".to_string(),
            output: PathBuf::from("/tmp/out.jpg"),
            timeout_ms: 5000,
        }]
    );
}

#[test]
fn custom_codec_and_timeout_are_forwarded() {
    let backend = RecordingBackend::returning(STATUS_OK);
    let shooter = Shooter::with_backend(&backend);

    let request = ShotRequest::new("http://example.com/live.m3u8", "cover.png")
        .with_codec("png")
        .with_timeout_ms(250);
    shooter.shoot(&request);

    let call = &backend.calls()[0];
    assert_eq!(call.codec, "png");
    assert_eq!(call.timeout_ms, 250);
}

#[test]
fn backend_status_is_returned_unchanged() {
    for status in [STATUS_OK, STATUS_FAILED, 1, -22, i32::MIN, i32::MAX] {
        let shooter = Shooter::with_backend(RecordingBackend::returning(status));
        let request = ShotRequest::new("/local/path/video.mp4", "/tmp/out.jpg");
        assert_eq!(shooter.shoot(&request), status);
    }
}

#[test]
fn each_shot_is_a_single_call() {
    let backend = RecordingBackend::returning(STATUS_FAILED);
    let shooter = Shooter::with_backend(&backend);

    let request = ShotRequest::new("rtmp://example.com/live/stream", "/tmp/out.jpg");
    assert_eq!(shooter.shoot(&request), STATUS_FAILED);
    assert_eq!(shooter.shoot(&request), STATUS_FAILED);

    // No retries: one backend call per shot.
    assert_eq!(backend.calls().len(), 2);
}

#[test]
fn boxed_backends_work() {
    let backend: Box<dyn ShotBackend> = Box::new(RecordingBackend::returning(7));
    let shooter = Shooter::with_backend(backend);
    let request = ShotRequest::new("video.mp4", "out.jpg");
    assert_eq!(shooter.shoot(&request), 7);
}

#[test]
fn owned_backend_is_reachable_through_the_shooter() {
    let shooter = Shooter::with_backend(RecordingBackend::returning(STATUS_OK));

    let request = ShotRequest::new("rtmps://example.com/live/stream", "/tmp/out.jpg")
        .with_timeout_ms(1500);
    assert_eq!(shooter.shoot(&request), STATUS_OK);

    let calls = shooter.backend().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].locator, "rtmps://example.com/live/stream");
    assert_eq!(calls[0].timeout_ms, 0);
}
