//! The extraction boundary.
//!
//! [`ShotBackend`] is the narrow call the [`Shooter`](crate::Shooter)
//! forwards to once the timeout policy has been applied. It takes the
//! already-effective timeout and returns a raw integer status that is handed
//! back to the caller untouched.
//!
//! [`FfmpegBackend`] is the production implementation: it decodes the first
//! key frame with FFmpeg and encodes it with the requested image encoder.

use std::path::Path;

use crate::error::ShotError;
use crate::source::KeyframeSource;
use crate::writer::ImageWriter;

/// Status returned when the key frame was written.
pub const STATUS_OK: i32 = 0;

/// Status returned for every extraction failure.
pub const STATUS_FAILED: i32 = -1;

/// Something that can extract a key frame into an image file.
///
/// `timeout_ms` is the effective timeout: the RTMP rule has already been
/// applied and `0` means "no timeout". Implementations report the outcome
/// only through the returned status.
pub trait ShotBackend {
    /// Extract the first key frame of `locator`, encode it with `codec` and
    /// write it to `output`.
    fn shot(&self, locator: &str, codec: &str, output: &Path, timeout_ms: u32) -> i32;
}

impl<B: ShotBackend + ?Sized> ShotBackend for &B {
    fn shot(&self, locator: &str, codec: &str, output: &Path, timeout_ms: u32) -> i32 {
        (**self).shot(locator, codec, output, timeout_ms)
    }
}

impl<B: ShotBackend + ?Sized> ShotBackend for Box<B> {
    fn shot(&self, locator: &str, codec: &str, output: &Path, timeout_ms: u32) -> i32 {
        (**self).shot(locator, codec, output, timeout_ms)
    }
}

/// FFmpeg-backed key-frame extraction.
///
/// Stateless; every call opens its own input, decoder, encoder and output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegBackend;

impl FfmpegBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }

    /// Run the extraction and return the structured outcome.
    ///
    /// The encoder and output are set up before the first packet is read,
    /// so an unknown codec or unwritable path fails without pulling data
    /// from the input.
    ///
    /// # Errors
    ///
    /// - [`ShotError::InputOpen`] if the locator cannot be opened.
    /// - [`ShotError::NoVideoStream`] if it carries no video.
    /// - [`ShotError::EncoderNotFound`] if `codec` names no FFmpeg encoder.
    /// - [`ShotError::OutputOpen`] if `output` cannot be created.
    /// - [`ShotError::NoKeyFrame`] if the input ends before a key frame decodes.
    pub fn capture(
        &self,
        locator: &str,
        codec: &str,
        output: &Path,
        timeout_ms: u32,
    ) -> Result<(), ShotError> {
        log::info!(
            "Capturing first key frame of {locator} -> {} (codec={codec}, timeout={timeout_ms} ms)",
            output.display()
        );

        let mut source = KeyframeSource::open(locator, timeout_ms)?;
        let writer = ImageWriter::open(codec, output, &source.format())?;
        let keyframe = source.first_keyframe()?;
        writer.write(&keyframe)
    }
}

impl ShotBackend for FfmpegBackend {
    fn shot(&self, locator: &str, codec: &str, output: &Path, timeout_ms: u32) -> i32 {
        match self.capture(locator, codec, output, timeout_ms) {
            Ok(()) => STATUS_OK,
            Err(error) => {
                log::warn!("Key-frame extraction from {locator} failed: {error}");
                error.status()
            }
        }
    }
}
