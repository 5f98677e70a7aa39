//! Process-wide FFmpeg setup: initialisation, linked libraries, log level.

use ffshot::FfmpegLogLevel;

#[test]
fn initialization_is_repeatable() {
    ffshot::initialize().expect("first init");
    ffshot::initialize().expect("cached init");
}

#[test]
fn libraries_are_listed_in_load_order() {
    let names: Vec<&str> = ffshot::linked_libraries()
        .iter()
        .map(|library| library.name)
        .collect();
    assert_eq!(
        names,
        [
            "avutil",
            "swresample",
            "swscale",
            "avcodec",
            "avformat",
            "avfilter",
            "avdevice"
        ]
    );

    for library in ffshot::linked_libraries() {
        assert!(library.major() > 0, "{library} reports no major version");
        assert!(library.to_string().starts_with("lib"));
    }
}

// The only test in this binary that touches the global level.
#[test]
fn log_level_reads_back_what_was_set() {
    ffshot::initialize().expect("init");

    for level in [
        FfmpegLogLevel::Error,
        FfmpegLogLevel::Quiet,
        FfmpegLogLevel::Debug,
        FfmpegLogLevel::Warning,
    ] {
        ffshot::set_ffmpeg_log_level(level);
        assert_eq!(ffshot::get_ffmpeg_log_level(), Some(level));
    }
}
