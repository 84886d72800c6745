//! Environment configuration loading from .env files
//!
//! Front ends read these defaults and may override them with flags.

use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;

/// Default location of the trained model artifact
pub const DEFAULT_MODEL_PATH: &str = "assets/wine_quality.json";

// Load .env the first time any setting is read
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Model artifact path from `WINE_MODEL_PATH`
/// Default: assets/wine_quality.json
pub fn model_path() -> PathBuf {
    ensure_loaded();
    env::var("WINE_MODEL_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}

/// Whether a missing model should stop the process at startup, from
/// `WINE_REQUIRE_MODEL`
/// Default: false (serve validation and catalog requests without a model)
pub fn require_model() -> bool {
    ensure_loaded();
    env::var("WINE_REQUIRE_MODEL")
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
