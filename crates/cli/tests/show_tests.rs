//! Integration tests for `show`, `validate` and `fragments`.

mod common;

use common::{FOUNDATION, Workspace};
use predicates::prelude::*;

fn stdout_json(output: std::process::Output) -> serde_json::Value {
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_show_merged_profile_json() {
    let workspace = Workspace::standard();
    let profile = stdout_json(
        workspace
            .cmd()
            .args(["show", "dev", "-o", "json"])
            .output()
            .unwrap(),
    );

    assert_eq!(profile["profile"]["name"], "dev");
    assert_eq!(profile["profile"]["version"], "1.0.0");
    assert_eq!(profile["session"]["orchestrator"]["module"], "loop-basic");
    assert_eq!(
        profile["tools"],
        serde_json::json!([{"module": "tool-filesystem"}, {"module": "tool-bash"}])
    );
    assert_eq!(profile["system"]["instruction"], "You are Amplifier.");
}

#[test]
fn test_show_yaml() {
    let workspace = Workspace::standard();
    workspace
        .cmd()
        .args(["show", "foundation", "--output", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: foundation"));
}

#[test]
fn test_show_raw_layers() {
    let workspace = Workspace::standard();
    let layers = stdout_json(
        workspace
            .cmd()
            .args(["show", "dev", "--raw", "-o", "json"])
            .output()
            .unwrap(),
    );

    let names: Vec<_> = layers
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["foundation", "dev"]);
    assert_eq!(layers[0]["body"], "You are Amplifier.");
}

#[test]
fn test_show_merged_skips_validation() {
    let workspace = Workspace::standard();
    workspace.write("home/profiles/partial.md", "---\nprofile:\n  name: partial\n---\n");

    workspace
        .cmd()
        .args(["show", "partial"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("profile.version"));

    workspace
        .cmd()
        .args(["show", "partial", "--merged"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: partial"));
}

#[test]
fn test_validate_reports_every_document() {
    let workspace = Workspace::standard();
    workspace.write(
        "home/profiles/broken.md",
        "---\nprofile:\n  name: broken\n  extends: foundation\n  model: nonsense\n---\n",
    );

    workspace
        .cmd()
        .arg("validate")
        .assert()
        .code(4)
        .stdout(predicate::str::contains("FAIL\tbroken"))
        .stdout(predicate::str::contains("profile.model"))
        .stdout(predicate::str::contains("OK\tdev"))
        .stdout(predicate::str::contains("3 valid, 1 invalid"));
}

#[test]
fn test_validate_named_documents_succeeds() {
    let workspace = Workspace::standard();
    workspace
        .cmd()
        .args(["validate", "dev", "design:designer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 valid, 0 invalid"));
}

#[test]
fn test_fragments_for_all_agents() {
    let workspace = Workspace::standard();
    let fragments = stdout_json(
        workspace
            .cmd()
            .args(["fragments", "-o", "json"])
            .output()
            .unwrap(),
    );

    assert_eq!(
        fragments,
        serde_json::json!({
            "helper": {"description": "Helps"},
            "reviewer": {
                "description": "Reviews code",
                "tools": [{"module": "tool-grep"}],
                "system": {"instruction": "Review carefully."},
            },
        })
    );
}

#[test]
fn test_output_file() {
    let workspace = Workspace::standard();
    let out = workspace.path("out/dev.json");
    workspace
        .cmd()
        .args(["show", "dev", "-o", "json", "--output-file"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Results written to"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["profile"]["name"], "dev");
}

#[test]
fn test_dotenv_disabled_ignores_env_file() {
    let workspace = Workspace::new();
    workspace.write("elsewhere/profiles/foundation.md", FOUNDATION);
    workspace.write(
        ".env",
        &format!(
            "AMPLIFIER_BUNDLED_DIR={}\n",
            workspace.path("elsewhere").display()
        ),
    );

    workspace
        .cmd()
        .env_remove("AMPLIFIER_BUNDLED_DIR")
        .arg("list")
        .assert()
        .success()
        .stdout("No documents found.\n");
}

#[test]
fn test_dotenv_enabled_loads_env_file() {
    let workspace = Workspace::new();
    workspace.write("elsewhere/profiles/foundation.md", FOUNDATION);
    workspace.write(
        ".env",
        &format!(
            "AMPLIFIER_BUNDLED_DIR={}\n",
            workspace.path("elsewhere").display()
        ),
    );

    workspace
        .cmd()
        .env_remove("AMPLIFIER_BUNDLED_DIR")
        .env_remove("DOTENV_DISABLED")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("foundation\tbundled"));
}
