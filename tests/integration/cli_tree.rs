//! Integration tests for the `splicetree tree` command.

use predicates::prelude::*;
use splicetree::test_utils::{CatalogFixture, TestEnvironment};

use super::splicetree;

#[test]
fn test_tree_basic() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["tree", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rainbow Tree Seed"))
        .stdout(predicate::str::contains("├── "))
        .stdout(predicate::str::contains("└── "))
        .stdout(predicate::str::contains("4@r.0.0"))
        .stdout(predicate::str::contains("Rainbow Essence (missing)"))
        .stdout(predicate::str::contains("missing@r.2"))
        .stdout(predicate::str::contains("0% overall"));
}

#[test]
fn test_tree_by_name() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["tree", "Lava Seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6@r"))
        .stdout(predicate::str::contains("Fire Seed (missing)"));
}

#[test]
fn test_tree_marks_cycles() {
    let env = TestEnvironment::with_catalog(&CatalogFixture::two_cycle()).unwrap();

    splicetree(&env)
        .args(["tree", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A (*)"))
        .stdout(predicate::str::contains("dup:a@r.0.0"))
        .stdout(predicate::str::contains("already being expanded"));
}

#[test]
fn test_tree_with_depth() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["tree", "1", "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2@r.0"))
        .stdout(predicate::str::contains("4@r.0.0").not());
}

#[test]
fn test_tree_zero_depth() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["tree", "1", "--depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be at least 1"));
}

#[test]
fn test_tree_text_format() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["tree", "1", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    [ ] Carbon Seed [4@r.0.0]"))
        .stdout(predicate::str::contains("[·] Rainbow Tree Seed 0% [1@r]"));
}

#[test]
fn test_tree_json_format() {
    let env = TestEnvironment::rainbow().unwrap();

    let output = splicetree(&env).args(["tree", "1", "--format", "json", "--search", "magic"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["root_item"], "1");
    assert_eq!(json["nodes"], 6);
    assert_eq!(json["overall_progress"], 0.0);

    let root = &json["tree"];
    assert_eq!(root["id"], "1@r");
    assert_eq!(root["kind"], "item");
    assert_eq!(root["image"], "rainbow.png");
    assert_eq!(root["can_complete"], false);

    let children = root["children"].as_array().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[1]["name"], "Magic Seed");
    assert_eq!(children[1]["highlighted"], true);
    assert_eq!(children[2]["kind"], "missing");
    assert_eq!(children[2]["item_id"], serde_json::Value::Null);
}

#[test]
fn test_tree_invalid_format() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["tree", "1", "--format", "invalid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_tree_unknown_item_suggests() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["tree", "Lava Sead"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lava Sead"))
        .stderr(predicate::str::contains("Did you mean 'Lava Seed'"));
}
