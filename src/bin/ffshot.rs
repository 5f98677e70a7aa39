use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use colored::Colorize;
use ffshot::{
    DEFAULT_IMAGE_CODEC, DEFAULT_TIMEOUT_MS, FfmpegLogLevel, STATUS_OK, ShotError, ShotRequest,
};
use serde_json::json;

const USAGE: &str = "Usage:\n\tffshot LOCATOR IMAGE_PATH";

/// Exit code for a command line without both positional arguments.
const USAGE_EXIT_CODE: i32 = 2;

const CLI_AFTER_HELP: &str = "Examples:\n  ffshot input.mp4 cover.jpg\n  ffshot https://example.com/video.mp4 cover.png --codec png --timeout 2000\n  ffshot rtmp://example.com/live/stream live.jpg --json\n  ffshot --versions";

#[derive(Debug, Parser)]
#[command(
    name = "ffshot",
    version,
    about = "Save the first key frame of a video file or stream as an image",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input media path or URL.
    #[arg(required_unless_present = "versions")]
    locator: Option<String>,

    /// Output image path. The container is inferred from the extension.
    #[arg(required_unless_present = "versions")]
    output: Option<PathBuf>,

    /// Extra positional arguments are accepted and ignored.
    #[arg(hide = true)]
    _ignored: Vec<String>,

    /// FFmpeg encoder used for the image (mjpeg, png, bmp, ...).
    #[arg(long, default_value = DEFAULT_IMAGE_CODEC)]
    codec: String,

    /// Connection timeout in milliseconds. Ignored for rtmp locators.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout: u32,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    /// Print a machine-readable JSON report.
    #[arg(long)]
    json: bool,

    /// Print the linked FFmpeg library versions in load order and exit.
    #[arg(long)]
    versions: bool,
}

/// Parse the command line. `None` means the positional arguments are
/// missing and the short usage should be printed.
fn parse_cli<I, T>(args: I) -> Result<Option<Cli>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(error) if error.kind() == ErrorKind::MissingRequiredArgument => Ok(None),
        Err(error) => Err(error),
    }
}

fn report(request: &ShotRequest, status: i32, error: Option<&ShotError>) -> serde_json::Value {
    json!({
        "locator": request.locator(),
        "output": request.output().display().to_string(),
        "codec": request.codec(),
        "timeout_ms": request.effective_timeout_ms(),
        "status": status,
        "error": error.map(|error| error.to_string()),
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(level) = &cli.log_level {
        let parsed =
            FfmpegLogLevel::from_name(level).ok_or(format!("unsupported --log-level: {level}"))?;
        ffshot::set_ffmpeg_log_level(parsed);
    }

    ffshot::initialize()?;

    if cli.versions {
        for library in ffshot::linked_libraries() {
            println!("{library}");
        }
        return Ok(());
    }

    let (Some(locator), Some(output)) = (cli.locator, cli.output) else {
        return Err("LOCATOR and IMAGE_PATH are required".into());
    };

    let request = ShotRequest::new(locator, &output)
        .with_codec(cli.codec)
        .with_timeout_ms(cli.timeout);

    let outcome = ffshot::try_extract_keyframe(&request);
    let status = match &outcome {
        Ok(()) => STATUS_OK,
        Err(error) => error.status(),
    };

    if cli.json {
        let payload = report(&request, status, outcome.as_ref().err());
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if outcome.is_ok() {
        println!("{} {}", "saved".green().bold(), output.display());
    }

    outcome.map_err(Into::into)
}

fn main() {
    let cli = match parse_cli(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{USAGE}");
            std::process::exit(USAGE_EXIT_CODE);
        }
        Err(error) => error.exit(),
    };

    if let Err(error) = run(cli) {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
