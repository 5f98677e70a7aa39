//! Error types for the `ffshot` crate.
//!
//! [`ShotError`] is the structured error produced by the key-frame pipeline.
//! It never crosses the integer status boundary of
//! [`ShotBackend`](crate::ShotBackend); callers that want the detail use
//! [`try_extract_keyframe`](crate::try_extract_keyframe) or
//! [`FfmpegBackend::capture`](crate::FfmpegBackend::capture).

use std::path::PathBuf;

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

use crate::backend::STATUS_FAILED;

/// The unified error type for key-frame extraction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShotError {
    /// FFmpeg could not be initialised for this process.
    #[error("FFmpeg initialisation failed: {0}")]
    Initialization(String),

    /// The media locator could not be opened or probed.
    #[error("Failed to open input {locator}: {reason}")]
    InputOpen {
        /// Path or URL that was passed in.
        locator: String,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The input does not contain a video stream.
    #[error("No video stream found in input")]
    NoVideoStream,

    /// A decoder for the video stream could not be created.
    #[error("Failed to open video decoder: {0}")]
    DecoderOpen(String),

    /// No encoder with the requested name exists in the linked FFmpeg build.
    #[error("Image encoder not found: {0}")]
    EncoderNotFound(String),

    /// The image encoder was found but could not be configured or opened.
    #[error("Failed to open image encoder: {0}")]
    EncoderOpen(String),

    /// The output container could not be created.
    #[error("Failed to open output {path}: {reason}")]
    OutputOpen {
        /// Output path that was passed in.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// Pixel-format conversion of the key frame failed.
    #[error("Failed to convert key frame: {0}")]
    Scaling(String),

    /// The key frame could not be encoded.
    #[error("Failed to encode key frame: {0}")]
    Encode(String),

    /// The encoded image could not be written to the output container.
    #[error("Failed to write output: {0}")]
    Mux(String),

    /// The stream ended without yielding a decodable key frame.
    #[error("No key frame could be decoded from the input")]
    NoKeyFrame,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),
}

impl ShotError {
    /// The integer status reported for this error at the backend boundary.
    ///
    /// Every failure collapses to [`STATUS_FAILED`]; the variant itself is
    /// only visible through logging and the `Result`-returning APIs.
    pub fn status(&self) -> i32 {
        STATUS_FAILED
    }
}

impl From<FfmpegError> for ShotError {
    fn from(error: FfmpegError) -> Self {
        ShotError::FfmpegError(error.to_string())
    }
}
