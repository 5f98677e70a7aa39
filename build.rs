use std::env;
use std::path::{Path, PathBuf};

/// FFmpeg libraries linked by `ffmpeg-sys-next`, in dependency order.
const FFMPEG_LIBRARIES: &[&str] = &[
    "avutil",
    "swresample",
    "swscale",
    "avcodec",
    "avformat",
    "avfilter",
    "avdevice",
];

fn main() {
    println!("cargo:rerun-if-env-changed=FFMPEG_DIR");
    println!("cargo:rerun-if-env-changed=VCPKG_ROOT");
    println!("cargo:rerun-if-env-changed=VCPKGRS_TRIPLET");

    if let Some(ffmpeg_dir) = env::var_os("FFMPEG_DIR") {
        check_ffmpeg_dir(Path::new(&ffmpeg_dir));
        return;
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        suggest_vcpkg_install();
    }
}

/// Warn about libraries missing from an explicit `FFMPEG_DIR`, so a broken
/// install shows up at build time rather than as a loader error at startup.
fn check_ffmpeg_dir(ffmpeg_dir: &Path) {
    let lib_dir = ffmpeg_dir.join("lib");
    if !lib_dir.is_dir() {
        println!(
            "cargo:warning=FFMPEG_DIR={} has no lib/ directory.",
            ffmpeg_dir.display()
        );
        return;
    }

    let entries: Vec<String> = match lib_dir.read_dir() {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => return,
    };

    for library in FFMPEG_LIBRARIES {
        let found = entries.iter().any(|name| {
            name.starts_with(&format!("lib{library}.")) || name.starts_with(&format!("{library}."))
        });
        if !found {
            println!(
                "cargo:warning=lib{library} was not found in {}.",
                lib_dir.display()
            );
        }
    }
}

fn suggest_vcpkg_install() {
    let vcpkg_root = match env::var("VCPKG_ROOT") {
        Ok(value) => value,
        Err(_) => {
            println!(
                "cargo:warning=FFMPEG_DIR is not set. On Windows, install FFmpeg via vcpkg and set VCPKG_ROOT + FFMPEG_DIR."
            );
            return;
        }
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let ffmpeg_dir: PathBuf = Path::new(&vcpkg_root).join("installed").join(&triplet);

    if ffmpeg_dir.exists() {
        println!(
            "cargo:warning=Detected vcpkg FFmpeg at {}. Set FFMPEG_DIR={} to make discovery explicit.",
            ffmpeg_dir.display(),
            ffmpeg_dir.display(),
        );
    } else {
        println!(
            "cargo:warning=VCPKG_ROOT is set but no FFmpeg install was found at {}.",
            ffmpeg_dir.display(),
        );
    }
}
