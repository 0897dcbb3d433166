//! Integration tests for `toggle`, `status` and `reset`.

use predicates::prelude::*;
use splicetree::test_utils::TestEnvironment;

use super::splicetree;

#[test]
fn test_toggle_is_gated() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["toggle", "1", "2@r.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot complete 2@r.0"))
        .stderr(predicate::str::contains("4@r.0.0, 5@r.0.1"))
        .stderr(predicate::str::contains("--force"));

    assert!(env.read_state("progress%3A1.json").is_none());
}

#[test]
fn test_toggle_bottom_up_and_status() {
    let env = TestEnvironment::rainbow().unwrap();

    for node in ["4@r.0.0", "5@r.0.1", "2@r.0"] {
        splicetree(&env)
            .args(["toggle", "1", node])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("{node} completed")));
    }

    let state = env.read_state("progress%3A1.json").unwrap();
    assert_eq!(state, r#"["2@r.0","4@r.0.0","5@r.0.1"]"#);

    splicetree(&env)
        .args(["status", "Rainbow Tree Seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50% complete (3/6 steps)"))
        .stdout(predicate::str::contains("Ready to complete:"))
        .stdout(predicate::str::contains("Magic Seed"))
        .stdout(predicate::str::contains("missing@r.2"));

    splicetree(&env)
        .args(["tree", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[✓] Diamond Seed 100%"))
        .stdout(predicate::str::contains("50% overall"));
}

#[test]
fn test_toggle_off_is_never_gated() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env).args(["toggle", "1", "1@r", "--force"]).assert().success();
    splicetree(&env)
        .args(["toggle", "1", "1@r"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1@r marked incomplete"));
}

#[test]
fn test_toggle_unknown_node() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env)
        .args(["toggle", "1", "9@r.7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No node '9@r.7'"))
        .stderr(predicate::str::contains("splicetree tree 1"));
}

#[test]
fn test_progress_is_per_root() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env).args(["toggle", "6", "3@r.0"]).assert().success();
    assert!(env.read_state("progress%3A6.json").is_some());

    splicetree(&env)
        .args(["status", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0% complete (0/6 steps)"));
}

#[test]
fn test_reset() {
    let env = TestEnvironment::rainbow().unwrap();

    splicetree(&env).args(["toggle", "1", "3@r.1"]).assert().success();
    splicetree(&env)
        .args(["reset", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress on 'Rainbow Tree Seed' cleared"));

    assert_eq!(env.read_state("progress%3A1.json").unwrap(), "[]");
}

#[test]
fn test_corrupt_progress_is_tolerated() {
    let env = TestEnvironment::rainbow().unwrap();
    std::fs::create_dir_all(&env.state_dir).unwrap();
    std::fs::write(env.state_dir.join("progress%3A1.json"), "garbage").unwrap();

    splicetree(&env)
        .args(["status", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0% complete"));
}
