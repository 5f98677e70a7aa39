//! Shot configuration.
//!
//! [`ShotRequest`] bundles everything a single key-frame extraction needs:
//! the media locator, the output path, the image encoder name and the
//! connection timeout. Unset values fall back to [`DEFAULT_IMAGE_CODEC`] and
//! [`DEFAULT_TIMEOUT_MS`].
//!
//! # Example
//!
//! ```
//! use ffshot::ShotRequest;
//!
//! let request = ShotRequest::new("rtmp://example.com/live/stream", "/tmp/out.png")
//!     .with_codec("png")
//!     .with_timeout_ms(2000);
//!
//! assert_eq!(request.codec(), "png");
//! assert_eq!(request.timeout_ms(), 2000);
//! assert_eq!(request.effective_timeout_ms(), 0);
//! ```

use std::path::{Path, PathBuf};

use crate::timeout::{DEFAULT_TIMEOUT_MS, effective_timeout};

/// FFmpeg encoder used for the output image unless another is requested.
pub const DEFAULT_IMAGE_CODEC: &str = "mjpeg";

/// A single key-frame extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ShotRequest {
    locator: String,
    output: PathBuf,
    codec: String,
    timeout_ms: u32,
}

impl ShotRequest {
    /// Create a request with the default codec and timeout.
    pub fn new<L: Into<String>, P: AsRef<Path>>(locator: L, output: P) -> Self {
        Self {
            locator: locator.into(),
            output: output.as_ref().to_path_buf(),
            codec: DEFAULT_IMAGE_CODEC.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the FFmpeg encoder name for the output image (e.g. `"png"`).
    pub fn with_codec<C: Into<String>>(mut self, codec: C) -> Self {
        self.codec = codec.into();
        self
    }

    /// Set the requested connection timeout in milliseconds.
    ///
    /// `0` disables the timeout. The value is ignored for RTMP locators.
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The media locator (file path or URL).
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// The output image path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// The output image encoder name.
    pub fn codec(&self) -> &str {
        &self.codec
    }

    /// The timeout as requested by the caller.
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// The timeout that will actually be used for this locator.
    pub fn effective_timeout_ms(&self) -> u32 {
        effective_timeout(&self.locator, self.timeout_ms)
    }
}
