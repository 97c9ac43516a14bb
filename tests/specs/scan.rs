// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scan command specs.

use crate::prelude::*;

const ALL_CLEAR_MENU: &str = "Fruit Salad (safe)\nGreen Detox (celery)\n";

/// > Allergens found → exit 1, matches marked, lines listed
#[test]
fn demo_menu_reports_warnings() {
    let project = Project::empty();
    project
        .run(&["scan", "--demo", "1"])
        .exits(1)
        .stdout_has("14 warnings: nuts, dairy, gluten")
        .stdout_has("Almond Croissant ([nuts], [dairy], [gluten])")
        .stdout_has("  4: nuts: • Peanut Butter Latte (contains nuts)")
        .stdout_has("(estimated)");
}

#[test]
fn demo_menu_json() {
    let project = Project::empty();
    let json = project.run(&["scan", "--demo", "1", "-o", "json"]).exits(1).json();

    assert_eq!(json["warning_count"], 14);
    assert_eq!(
        json["allergens_found"],
        serde_json::json!(["nuts", "dairy", "gluten"])
    );
    assert_eq!(json["all_clear"], false);
    assert_eq!(json["confidence_source"], "estimated");
    let confidence = json["confidence"].as_u64().unwrap();
    assert!((80..=100).contains(&confidence), "{confidence}");
    assert!(
        json["highlighted_text"]
            .as_str()
            .unwrap()
            .contains(r#"(<span class="highlight">nuts</span>, "#)
    );
}

/// > Zero matches is a valid "all clear" report (exit 0)
#[test]
fn all_clear_file() {
    let project = Project::empty();
    project.file("menu.txt", ALL_CLEAR_MENU);
    project
        .run(&["scan", "menu.txt"])
        .passes()
        .stdout_has("All clear: no allergens found in 2 menu items");
}

#[test]
fn scan_from_stdin() {
    let project = Project::empty();
    let json = project
        .run(&["scan", "-", "-o", "json"])
        .stdin("Tiramisu (dairy, eggs, gluten, alcohol)\n")
        .exits(1)
        .json();
    assert_eq!(json["warning_count"], 2);
}

#[test]
fn simulated_ocr_produces_report() {
    let project = Project::empty();
    let json = project
        .run(&["scan", "--simulate", "-o", "json"])
        .exits(1)
        .json();
    assert!(json["source_text"].as_str().unwrap().contains("MENU"));
    assert!(json["warning_count"].as_u64().unwrap() > 0);
}

#[test]
fn reported_confidence_is_measured() {
    let project = Project::empty();
    project.file("menu.txt", ALL_CLEAR_MENU);
    let json = project
        .run(&["scan", "menu.txt", "--confidence", "87", "-o", "json"])
        .passes()
        .json();
    assert_eq!(json["confidence"], 87);
    assert_eq!(json["confidence_source"], "measured");
}

#[test]
fn confidence_out_of_range_is_argument_error() {
    let project = Project::empty();
    project.file("menu.txt", ALL_CLEAR_MENU);
    project
        .run(&["scan", "menu.txt", "--confidence", "150"])
        .exits(2)
        .stderr_has("--confidence must be between 0 and 100");
}

#[test]
fn confidence_rejected_for_demo_and_simulate() {
    let project = Project::empty();
    project
        .run(&["scan", "--demo", "1", "--confidence", "90", "-o", "json"])
        .exits(2)
        .stderr_has("--confidence");
    project
        .run(&["scan", "--simulate", "--confidence", "90"])
        .exits(2);
    project
        .run(&["history", "-o", "json"])
        .passes()
        .stdout_has("\"total\": 0");
}

/// > Empty text → no report, exit 4, history unchanged
#[test]
fn empty_file_is_no_text_detected() {
    let project = Project::empty();
    project.file("blank.txt", "   \n\n");
    project
        .run(&["scan", "blank.txt"])
        .exits(4)
        .stderr_has("no text detected");

    let json = project.run(&["history", "-o", "json"]).passes().json();
    assert_eq!(json["total"], 0);
}

#[test]
fn missing_file_is_acquisition_failure() {
    let project = Project::empty();
    project
        .run(&["scan", "nope.txt"])
        .exits(4)
        .stderr_has("is unavailable");
}

#[test]
fn binary_file_is_rejected() {
    let project = Project::empty();
    project.file("photo.jpg", [0xFF_u8, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
    project
        .run(&["scan", "photo.jpg"])
        .exits(4)
        .stderr_has("not UTF-8 text");
}

#[test]
fn oversized_file_is_rejected() {
    let project = Project::with_config("version = 1\n[scan]\nmax_file_bytes = 16\n");
    project.file("menu.txt", "Cheese Danish (dairy, gluten)\n");
    project
        .run(&["scan", "menu.txt"])
        .exits(4)
        .stderr_has("too large");
}

#[test]
fn nothing_to_scan_is_argument_error() {
    let project = Project::empty();
    project
        .run(&["scan"])
        .exits(2)
        .stderr_has("nothing to scan");
}

#[test]
fn unknown_demo_is_argument_error() {
    let project = Project::empty();
    project
        .run(&["scan", "--demo", "9"])
        .exits(2)
        .stderr_has("unknown demo menu 9");
}

/// > Terms with regex metacharacters match literally
#[test]
fn metacharacter_terms_match_literally() {
    let project = Project::empty();
    project.run(&["allergens", "add", "c++"]).passes();
    project.file("menu.txt", "Special c++ dish\nPlain ccc dish here\n");
    let json = project
        .run(&["scan", "menu.txt", "-o", "json"])
        .exits(1)
        .json();
    assert_eq!(json["allergens_found"], serde_json::json!(["c++"]));
    assert_eq!(json["warning_count"], 1);
}

/// > Every completed scan is appended to history
#[test]
fn scan_is_recorded() {
    let project = Project::empty();
    project.run(&["scan", "--demo", "2"]).exits(1);
    project.run(&["scan", "--demo", "3"]).exits(1);

    let json = project.run(&["history", "-o", "json"]).passes().json();
    assert_eq!(json["total"], 2);
    assert!(
        json["entries"][0]["source_text"]
            .as_str()
            .unwrap()
            .starts_with("HEALTH CAFE")
    );
    assert!(project.data_dir().join("allerscan_history.json").exists());
}
