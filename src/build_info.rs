//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `delve 0.1.0 (abc1234, 2026-01-01)`
pub fn version_line() -> String {
    format!(
        "delve {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}
