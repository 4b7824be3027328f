//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `flappy --version`.
pub fn version_line() -> String {
    format!("flappy {} ({} {})", VERSION, BUILD_DATE, BUILD_COMMIT)
}
