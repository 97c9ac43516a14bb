//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the allerscan crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use crate::report::ScanReport;

/// Sample menu containing nuts, dairy and gluten on separate lines.
pub const CAFE_MENU: &str = "CAFE MENU\n\nDrinks:\n• Peanut Butter Coffee (nuts)\n• Soy Latte (soy)\n• Hot Chocolate (dairy)\n\nFood:\n• Almond Cake (nuts, gluten)\n• Cheese Sandwich (dairy, gluten)\n• Fruit Bowl (safe)";

/// Creates a temp directory with a minimal allerscan.toml.
pub fn temp_project() -> TempDir {
    temp_project_with_config("version = 1\n")
}

/// Creates a temp directory with custom config content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("allerscan.toml"), config).unwrap();
    dir
}

/// Writes `content` to `name` under `root`, creating parent directories.
pub fn write_file(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A stored-shape report with fixed counts, for history arithmetic.
pub fn report_with(id: i64, warning_count: usize, seconds: f64) -> ScanReport {
    let allergens_found: Vec<&str> = if warning_count > 0 {
        vec!["nuts"]
    } else {
        Vec::new()
    };
    serde_json::from_value(json!({
        "id": id,
        "source_text": "Peanut Butter Coffee (nuts)",
        "highlighted_text": "Peanut Butter Coffee (<span class=\"highlight\">nuts</span>)",
        "allergens_found": allergens_found,
        "warning_count": warning_count,
        "confidence": 90,
        "confidence_source": "estimated",
        "processing_time_seconds": seconds,
        "created_at": "2026-10-17T12:00:00+00:00",
    }))
    .unwrap()
}
