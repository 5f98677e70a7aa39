//! # ffshot
//!
//! Grab the first key frame of a video file or stream and save it as an
//! image.
//!
//! `ffshot` opens a local path or a network URL (HTTP, HLS, RTMP, ...),
//! decodes until the first key frame, and encodes that frame with any FFmpeg
//! image encoder (`mjpeg` by default), powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ffshot::STATUS_OK;
//!
//! let status = ffshot::extract_keyframe("input.mp4", "cover.jpg");
//! assert_eq!(status, STATUS_OK);
//! ```
//!
//! ### Choose the encoder and timeout
//!
//! ```no_run
//! // PNG output, 2 second connection timeout.
//! let status = ffshot::extract_keyframe_with(
//!     "https://example.com/video.mp4",
//!     "cover.png",
//!     "png",
//!     2000,
//! );
//! ```
//!
//! ### Get the error instead of a status
//!
//! ```no_run
//! use ffshot::{ShotError, ShotRequest};
//!
//! let request = ShotRequest::new("rtmp://example.com/live/stream", "live.jpg");
//! ffshot::try_extract_keyframe(&request)?;
//! # Ok::<(), ShotError>(())
//! ```
//!
//! ## Timeouts
//!
//! The connection timeout (default 5000 ms) is passed to FFmpeg's `timeout`
//! option. FFmpeg's RTMP handler does not support it, so any locator that
//! starts with `rtmp` is opened without a timeout whatever the caller asks
//! for. See [`timeout::effective_timeout`].
//!
//! ## Status codes
//!
//! The extraction functions return [`STATUS_OK`] (`0`) or [`STATUS_FAILED`]
//! (`-1`). Failure details are logged through the
//! [`log`](https://crates.io/crates/log) facade and are available as a
//! [`ShotError`] from [`try_extract_keyframe`].
//!
//! ## Requirements
//!
//! FFmpeg development libraries (avutil, swresample, swscale, avcodec,
//! avformat, avfilter, avdevice) must be installed on your system.

pub mod backend;
mod conversion;
pub mod error;
pub mod ffmpeg;
pub mod request;
pub mod shooter;
mod source;
pub mod timeout;
mod writer;

pub use backend::{FfmpegBackend, STATUS_FAILED, STATUS_OK, ShotBackend};
pub use error::ShotError;
pub use ffmpeg::{
    FfmpegLogLevel, LinkedLibrary, get_ffmpeg_log_level, initialize, linked_libraries,
    set_ffmpeg_log_level,
};
pub use request::{DEFAULT_IMAGE_CODEC, ShotRequest};
pub use shooter::{
    Shooter, extract_keyframe, extract_keyframe_with, first_keyframe_image, try_extract_keyframe,
};
pub use timeout::{DEFAULT_TIMEOUT_MS, effective_timeout, is_rtmp};
