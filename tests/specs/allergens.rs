// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Allergens command specs.

use crate::prelude::*;

#[test]
fn lists_defaults() {
    let project = Project::empty();
    project
        .run(&["allergens"])
        .passes()
        .stdout_eq("nuts\ndairy\ngluten\n");
}

#[test]
fn add_normalizes_and_persists() {
    let project = Project::empty();
    project
        .run(&["allergens", "add", "  Shellfish ", "Tree   Nuts"])
        .passes()
        .stdout_eq("nuts\ndairy\ngluten\nshellfish\ntree nuts\n");

    let json = Project::json_file(&project.data_dir().join("allerscan_allergens.json"));
    assert_eq!(
        json,
        serde_json::json!(["nuts", "dairy", "gluten", "shellfish", "tree nuts"])
    );
}

#[test]
fn json_listing() {
    let project = Project::empty();
    let json = project.run(&["allergens", "-o", "json"]).passes().json();
    assert_eq!(
        json,
        serde_json::json!({ "allergens": ["nuts", "dairy", "gluten"] })
    );
}

/// > Duplicate input is rejected and the set is unchanged
#[test]
fn duplicate_is_rejected() {
    let project = Project::empty();
    project
        .run(&["allergens", "add", "NUTS"])
        .exits(2)
        .stderr_has("allergen already added: nuts");
    project
        .run(&["allergens"])
        .passes()
        .stdout_eq("nuts\ndairy\ngluten\n");
}

#[test]
fn empty_is_rejected() {
    let project = Project::empty();
    project
        .run(&["allergens", "add", "   "])
        .exits(2)
        .stderr_has("please enter an allergen");
}

#[test]
fn remove_and_reset() {
    let project = Project::empty();
    project
        .run(&["allergens", "remove", "Dairy"])
        .passes()
        .stdout_eq("nuts\ngluten\n");
    project
        .run(&["allergens", "remove", "celery"])
        .passes()
        .stderr_has("not in your allergens: celery");
    project
        .run(&["allergens", "reset"])
        .passes()
        .stdout_eq("nuts\ndairy\ngluten\n");
}

#[test]
fn remove_all_lists_none() {
    let project = Project::empty();
    project
        .run(&["allergens", "remove", "nuts", "dairy", "gluten"])
        .passes()
        .stdout_eq("No allergens added\n");
}

/// > Corrupt stored allergens load as defaults
#[test]
fn corrupt_store_falls_back_to_defaults() {
    let project = Project::empty();
    project.file(".allerscan/allerscan_allergens.json", "{\"oops\":");
    project
        .run(&["allergens"])
        .passes()
        .stdout_eq("nuts\ndairy\ngluten\n");
}
