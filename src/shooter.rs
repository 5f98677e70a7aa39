//! Core [`Shooter`] implementation and the top-level extraction functions.
//!
//! A `Shooter` applies the connection-timeout policy to a [`ShotRequest`]
//! and forwards the result to its [`ShotBackend`]. The free functions in
//! this module are shorthands over a `Shooter` with the FFmpeg backend.
//!
//! # Example
//!
//! ```no_run
//! use ffshot::{STATUS_OK, ShotRequest, Shooter};
//!
//! let request = ShotRequest::new("https://example.com/video.mp4", "/tmp/cover.jpg");
//! let status = Shooter::new().shoot(&request);
//! assert_eq!(status, STATUS_OK);
//! ```

use std::path::Path;

use image::DynamicImage;

use crate::backend::{FfmpegBackend, ShotBackend};
use crate::conversion::frame_to_image;
use crate::error::ShotError;
use crate::request::ShotRequest;
use crate::source::KeyframeSource;
use crate::timeout::effective_timeout;

/// Applies the timeout policy and delegates extraction to a backend.
///
/// The backend's status is returned exactly as produced; the shooter never
/// retries, interprets or translates it.
#[derive(Debug, Clone, Default)]
pub struct Shooter<B = FfmpegBackend> {
    backend: B,
}

impl Shooter {
    /// Create a shooter backed by FFmpeg.
    pub fn new() -> Self {
        Self::with_backend(FfmpegBackend)
    }
}

impl<B: ShotBackend> Shooter<B> {
    /// Create a shooter that forwards to `backend`.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Borrow the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Extract the first key frame described by `request`.
    ///
    /// RTMP locators are always forwarded with a timeout of `0`.
    pub fn shoot(&self, request: &ShotRequest) -> i32 {
        let timeout_ms = request.effective_timeout_ms();
        if timeout_ms != request.timeout_ms() {
            log::debug!(
                "Ignoring {} ms timeout for RTMP locator {}",
                request.timeout_ms(),
                request.locator()
            );
        }

        self.backend.shot(
            request.locator(),
            request.codec(),
            request.output(),
            timeout_ms,
        )
    }
}

/// Extract the first key frame of `locator` into `output` as a JPEG
/// (`mjpeg` encoder) with the default 5000 ms connection timeout.
///
/// Returns [`STATUS_OK`](crate::STATUS_OK) on success and
/// [`STATUS_FAILED`](crate::STATUS_FAILED) otherwise.
pub fn extract_keyframe<P: AsRef<Path>>(locator: &str, output: P) -> i32 {
    Shooter::new().shoot(&ShotRequest::new(locator, output))
}

/// Extract the first key frame of `locator` into `output` with an explicit
/// encoder name and connection timeout.
///
/// `timeout_ms` is ignored (treated as `0`) for RTMP locators.
pub fn extract_keyframe_with<P: AsRef<Path>>(
    locator: &str,
    output: P,
    codec: &str,
    timeout_ms: u32,
) -> i32 {
    let request = ShotRequest::new(locator, output)
        .with_codec(codec)
        .with_timeout_ms(timeout_ms);
    Shooter::new().shoot(&request)
}

/// Like [`extract_keyframe_with`] but returns the structured error instead of
/// a status code.
///
/// # Errors
///
/// See [`FfmpegBackend::capture`].
///
/// # Example
///
/// ```no_run
/// use ffshot::{ShotError, ShotRequest};
///
/// let request = ShotRequest::new("input.mp4", "cover.png").with_codec("png");
/// ffshot::try_extract_keyframe(&request)?;
/// # Ok::<(), ShotError>(())
/// ```
pub fn try_extract_keyframe(request: &ShotRequest) -> Result<(), ShotError> {
    FfmpegBackend.capture(
        request.locator(),
        request.codec(),
        request.output(),
        request.effective_timeout_ms(),
    )
}

/// Decode the first key frame of `locator` and return it as an RGB image
/// instead of writing it to disk.
///
/// The same timeout policy applies: `timeout_ms` is ignored for RTMP.
///
/// # Errors
///
/// [`ShotError::InputOpen`], [`ShotError::NoVideoStream`],
/// [`ShotError::NoKeyFrame`] or [`ShotError::Scaling`].
pub fn first_keyframe_image(locator: &str, timeout_ms: u32) -> Result<DynamicImage, ShotError> {
    let mut source = KeyframeSource::open(locator, effective_timeout(locator, timeout_ms))?;
    let keyframe = source.first_keyframe()?;
    frame_to_image(&keyframe)
}
