//! FFmpeg runtime setup.
//!
//! Every extraction needs the FFmpeg libraries to be loaded and registered
//! before the first call. [`initialize`] performs that step exactly once per
//! process and caches the outcome; the extraction paths call it for you, but
//! applications can call it up front to fail fast at startup.
//!
//! The module also wraps FFmpeg's own log-level API so callers can silence
//! or tune what FFmpeg prints to stderr without importing `ffmpeg-next`.
//!
//! # Example
//!
//! ```no_run
//! use ffshot::FfmpegLogLevel;
//!
//! ffshot::initialize()?;
//! ffshot::set_ffmpeg_log_level(FfmpegLogLevel::Error);
//!
//! for library in ffshot::linked_libraries() {
//!     println!("{library}");
//! }
//! # Ok::<(), ffshot::ShotError>(())
//! ```
//!
//! # Note
//!
//! The log level controls **FFmpeg's own console output**, not the
//! Rust-side messages emitted via the `log` crate.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::OnceLock;

use ffmpeg_next::util::log::Level;

use crate::error::ShotError;

static INITIALIZATION: OnceLock<Result<(), String>> = OnceLock::new();

/// Initialise FFmpeg for this process.
///
/// The first call runs `ffmpeg_next::init()`; later calls return the cached
/// outcome without touching FFmpeg again.
///
/// # Errors
///
/// Returns [`ShotError::Initialization`] if FFmpeg failed to initialise.
pub fn initialize() -> Result<(), ShotError> {
    INITIALIZATION
        .get_or_init(|| {
            log::debug!("Initialising FFmpeg");
            ffmpeg_next::init().map_err(|error| error.to_string())
        })
        .clone()
        .map_err(ShotError::Initialization)
}

/// One FFmpeg library linked into the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedLibrary {
    /// Library name, e.g. `"avcodec"`.
    pub name: &'static str,
    /// Packed `AV_VERSION_INT` value reported by the library.
    pub version: u32,
}

impl LinkedLibrary {
    /// Major version number.
    pub fn major(&self) -> u32 {
        self.version >> 16
    }

    /// Minor version number.
    pub fn minor(&self) -> u32 {
        (self.version >> 8) & 0xff
    }

    /// Micro version number.
    pub fn micro(&self) -> u32 {
        self.version & 0xff
    }
}

impl Display for LinkedLibrary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "lib{} {}.{}.{}",
            self.name,
            self.major(),
            self.minor(),
            self.micro()
        )
    }
}

/// List the FFmpeg libraries the crate depends on, in load order.
///
/// Each library only depends on the ones before it: avutil first, then
/// swresample and swscale, then avcodec, avformat, avfilter and avdevice.
pub fn linked_libraries() -> Vec<LinkedLibrary> {
    vec![
        LinkedLibrary {
            name: "avutil",
            version: ffmpeg_next::util::version(),
        },
        LinkedLibrary {
            name: "swresample",
            version: ffmpeg_next::software::resampling::version(),
        },
        LinkedLibrary {
            name: "swscale",
            version: ffmpeg_next::software::scaling::version(),
        },
        LinkedLibrary {
            name: "avcodec",
            version: ffmpeg_next::codec::version(),
        },
        LinkedLibrary {
            name: "avformat",
            version: ffmpeg_next::format::version(),
        },
        LinkedLibrary {
            name: "avfilter",
            version: ffmpeg_next::filter::version(),
        },
        LinkedLibrary {
            name: "avdevice",
            version: ffmpeg_next::device::version(),
        },
    ]
}

/// FFmpeg internal log verbosity level.
///
/// Maps directly to FFmpeg's `AV_LOG_*` constants.
///
/// # Ordering (most verbose → most quiet)
///
/// `Trace` > `Debug` > `Verbose` > `Info` > `Warning` > `Error` > `Fatal` > `Panic` > `Quiet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// Print no output at all.
    Quiet,
    /// Only log conditions the process cannot survive.
    Panic,
    /// Only log unrecoverable errors.
    Fatal,
    /// Log recoverable errors.
    Error,
    /// Log warnings (default FFmpeg level).
    Warning,
    /// Log informational messages.
    Info,
    /// Log verbose informational messages.
    Verbose,
    /// Log debugging messages.
    Debug,
    /// Extremely verbose tracing output.
    Trace,
}

impl FfmpegLogLevel {
    /// Parse a level name as accepted on the command line.
    ///
    /// Case-insensitive; `warn` is accepted for `warning`.
    pub fn from_name(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "quiet" => Some(FfmpegLogLevel::Quiet),
            "panic" => Some(FfmpegLogLevel::Panic),
            "fatal" => Some(FfmpegLogLevel::Fatal),
            "error" => Some(FfmpegLogLevel::Error),
            "warning" | "warn" => Some(FfmpegLogLevel::Warning),
            "info" => Some(FfmpegLogLevel::Info),
            "verbose" => Some(FfmpegLogLevel::Verbose),
            "debug" => Some(FfmpegLogLevel::Debug),
            "trace" => Some(FfmpegLogLevel::Trace),
            _ => None,
        }
    }

    fn to_ffmpeg_level(self) -> Level {
        match self {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }

    fn from_ffmpeg_level(level: Level) -> Self {
        match level {
            Level::Quiet => FfmpegLogLevel::Quiet,
            Level::Panic => FfmpegLogLevel::Panic,
            Level::Fatal => FfmpegLogLevel::Fatal,
            Level::Error => FfmpegLogLevel::Error,
            Level::Warning => FfmpegLogLevel::Warning,
            Level::Info => FfmpegLogLevel::Info,
            Level::Verbose => FfmpegLogLevel::Verbose,
            Level::Debug => FfmpegLogLevel::Debug,
            Level::Trace => FfmpegLogLevel::Trace,
        }
    }
}

/// Set the FFmpeg internal log verbosity level.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg_level());
}

/// Get the current FFmpeg internal log verbosity level.
///
/// Returns `None` if the current level does not map to a known variant.
pub fn get_ffmpeg_log_level() -> Option<FfmpegLogLevel> {
    ffmpeg_next::util::log::get_level()
        .ok()
        .map(FfmpegLogLevel::from_ffmpeg_level)
}
