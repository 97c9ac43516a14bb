// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file specs.

use crate::prelude::*;

#[test]
fn defaults_without_config() {
    let project = Project::empty();
    let json = project
        .run(&["scan", "--demo", "1", "-o", "json"])
        .exits(1)
        .json();
    let highlighted = json["highlighted_text"].as_str().unwrap();
    assert!(
        highlighted.contains(r#"(<span class="highlight">nuts</span>, "#),
        "{highlighted}"
    );
}

#[test]
fn unknown_key_warns() {
    let project = Project::with_config("version = 1\ncolour = true\n[scan]\nfast = 1\n");
    project
        .run(&["allergens"])
        .passes()
        .stderr_has("unrecognized field `colour` (ignored)")
        .stderr_has("unrecognized field `scan.fast` (ignored)");
}

#[test]
fn missing_version_rejected() {
    let project = Project::with_config("[history]\nmax_entries = 5\n");
    project
        .run(&["allergens"])
        .exits(2)
        .stderr_has("missing required field: version");
}

#[test]
fn unsupported_version_rejected() {
    let project = Project::with_config("version = 2\n");
    project
        .run(&["allergens"])
        .exits(2)
        .stderr_has("unsupported config version 2");
}

#[test]
fn invalid_values_rejected() {
    let project = Project::with_config("version = 1\n[history]\nmax_entries = 0\n");
    project
        .run(&["history"])
        .exits(2)
        .stderr_has("history.max_entries must be at least 1");
}

#[test]
fn explicit_config_must_exist() {
    let project = Project::empty();
    project
        .run(&["-C", "nope.toml", "allergens"])
        .exits(2)
        .stderr_has("config file not found");
}

#[test]
fn explicit_config_from_env() {
    let project = Project::empty();
    let path = project.file("elsewhere/custom.toml", "version = 1\n[allergens]\ndefaults = [\"Sesame\"]\n");
    project
        .run(&["allergens"])
        .env("ALLERSCAN_CONFIG", path.to_str().unwrap())
        .passes()
        .stdout_eq("sesame\n");
}

#[test]
fn configured_default_allergens() {
    let project = Project::with_config("version = 1\n[allergens]\ndefaults = [\"shellfish\", \"eggs\"]\n");
    project
        .run(&["allergens"])
        .passes()
        .stdout_eq("shellfish\neggs\n");

    project.run(&["allergens", "add", "soy"]).passes();
    project
        .run(&["allergens", "reset"])
        .passes()
        .stdout_eq("shellfish\neggs\n");
}

#[test]
fn configured_highlight_markers() {
    let project = Project::with_config(
        "version = 1\n[highlight]\nopen = \"<<\"\nclose = \">>\"\nescape_html = false\n",
    );
    let json = project
        .run(&["scan", "--demo", "1", "-o", "json"])
        .exits(1)
        .json();
    let highlighted = json["highlighted_text"].as_str().unwrap();
    assert!(
        highlighted.contains("Almond Croissant (<<nuts>>, <<dairy>>, <<gluten>>)"),
        "{highlighted}"
    );
}

#[test]
fn configured_min_text_chars() {
    let project = Project::with_config("version = 1\n[scan]\nmin_text_chars = 100\n");
    project.file("short.txt", "Almond cake with nuts and honey\n");
    project.run(&["scan", "short.txt"]).exits(4);
}

#[test]
fn configured_max_file_bytes() {
    let project = Project::with_config("version = 1\n[scan]\nmax_file_bytes = 16\n");
    project.file("menu.txt", "Almond cake with nuts and honey\n");
    project
        .run(&["scan", "menu.txt"])
        .exits(4)
        .stderr_has("too large");
}

#[test]
fn storage_dir_relative_to_config() {
    let project = Project::with_config("version = 1\n[storage]\ndir = \"state\"\n");
    let sub = project.path().join("nested");
    std::fs::create_dir_all(&sub).unwrap();

    project
        .run(&["allergens", "add", "soy"])
        .current_dir(&sub)
        .passes();
    assert!(project.path().join("state/allerscan_allergens.json").is_file());
    assert!(!sub.join("state").exists());
}

#[test]
fn config_discovered_in_parent() {
    let project = Project::with_config("version = 1\n[allergens]\ndefaults = [\"fish\"]\n");
    let sub = project.path().join("a/b");
    std::fs::create_dir_all(&sub).unwrap();
    project
        .run(&["allergens"])
        .current_dir(&sub)
        .passes()
        .stdout_eq("fish\n");
}

#[test]
fn discovery_stops_at_git_root() {
    let project = Project::with_config("version = 1\n[allergens]\ndefaults = [\"fish\"]\n");
    let repo = project.path().join("repo");
    std::fs::create_dir_all(repo.join(".git")).unwrap();
    project
        .run(&["allergens"])
        .current_dir(&repo)
        .passes()
        .stdout_eq("nuts\ndairy\ngluten\n");
}

#[test]
fn data_dir_flag_overrides() {
    let project = Project::empty();
    let data = project.path().join("custom-data");
    project
        .run(&["--data-dir", data.to_str().unwrap(), "allergens", "add", "soy"])
        .passes();
    assert!(data.join("allerscan_allergens.json").is_file());
    assert!(!project.data_dir().exists());

    project
        .run(&["allergens"])
        .env("ALLERSCAN_DATA_DIR", data.to_str().unwrap())
        .passes()
        .stdout_has("soy");
}
