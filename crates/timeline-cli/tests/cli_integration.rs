use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn timeline() -> Command {
    let mut cmd = Command::cargo_bin("timeline").unwrap();
    cmd.env_remove("TIMELINE_DEBUG_LOG").env_remove("RUST_LOG");
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}

fn ids(window: &Value) -> Vec<String> {
    window
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["id"].as_str().unwrap().to_string())
        .collect()
}

struct Workspace {
    _dir: TempDir,
    config: PathBuf,
    fixture: PathBuf,
}

/// Home holds posts 100, 90, ..., 10; window of 3, pages of 4.
fn workspace() -> Workspace {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "window_size = 3\npage_size = 4\nhome_cooldown_secs = 0\n",
    )
    .unwrap();

    let home: Vec<Value> = (1..=10)
        .rev()
        .map(|n| json!({ "id": n * 10, "author": "ana", "text": format!("post {}", n) }))
        .collect();
    let fixture = dir.path().join("fixture.json");
    fs::write(
        &fixture,
        serde_json::to_vec(&json!({
            "home": home,
            "mentions": [{ "id": "7", "author": "bo" }, { "id": "3", "author": "cy" }],
        }))
        .unwrap(),
    )
    .unwrap();

    Workspace {
        _dir: dir,
        config,
        fixture,
    }
}

fn replay(ws: &Workspace, steps: &[&str]) -> Value {
    let output = timeline()
        .arg("--config")
        .arg(&ws.config)
        .arg("replay")
        .arg("--fixture")
        .arg(&ws.fixture)
        .args(steps)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    parse_json_output(&output)
}

mod replay_tests {
    use super::*;

    #[test]
    fn test_initial_load() {
        let ws = workspace();
        let json = replay(&ws, &[]);

        assert!(json["success"].as_bool().unwrap());
        let data = &json["data"];
        assert_eq!(data["window_size"], 3);
        assert_eq!(data["steps"][0]["step"], "view:home");
        assert_eq!(
            data["steps"][0]["outcome"],
            json!({ "switch": "loaded", "fetch": { "outcome": "loaded", "count": 4 } })
        );
        assert_eq!(ids(&data["snapshot"]["window"]), vec!["100", "90", "80"]);
        assert_eq!(data["snapshot"]["position"], json!({ "cursor": 0, "focus": 0 }));
        assert_eq!(data["snapshot"]["loaded"], 4);
        assert_eq!(data["status"]["message"], "Home: Loaded 4 posts");
    }

    #[test]
    fn test_stepping_past_the_tail_fetches_older() {
        let ws = workspace();
        let json = replay(&ws, &["next", "next", "next", "next"]);
        let data = &json["data"];

        assert_eq!(data["steps"][3]["outcome"], json!({ "result": "moved" }));
        assert_eq!(
            data["steps"][4]["outcome"],
            json!({
                "result": "fetched",
                "fetch": { "outcome": "merged", "direction": "older", "count": 4 }
            })
        );
        let snapshot = &data["snapshot"];
        assert_eq!(snapshot["loaded"], 8);
        assert_eq!(snapshot["position"], json!({ "cursor": 1, "focus": 2 }));
        assert_eq!(ids(&snapshot["window"]), vec!["90", "80", "70"]);
        assert_eq!(snapshot["focused"]["id"], "70");
        assert_eq!(snapshot["tokens"]["older_bound"], "29");
    }

    #[test]
    fn test_switching_views_restores_position() {
        let ws = workspace();
        let json = replay(&ws, &["next", "view:mentions", "view:home"]);
        let steps = &json["data"]["steps"];

        assert_eq!(
            steps[2]["outcome"],
            json!({ "switch": "loaded", "fetch": { "outcome": "loaded", "count": 2 } })
        );
        assert_eq!(
            steps[3]["outcome"],
            json!({ "switch": "restored", "position": { "cursor": 0, "focus": 1 } })
        );
        assert_eq!(json["data"]["snapshot"]["view"], json!({ "kind": "home" }));
    }

    #[test]
    fn test_shrink_clamps_focus() {
        let ws = workspace();
        let json = replay(&ws, &["next", "next", "shrink"]);
        let data = &json["data"];

        assert_eq!(data["steps"][3]["outcome"], json!({ "window_size": 2 }));
        assert_eq!(data["snapshot"]["position"], json!({ "cursor": 0, "focus": 1 }));
    }

    #[test]
    fn test_window_override() {
        let ws = workspace();
        let json = replay(&ws, &["--window", "1", "page-down"]);
        let data = &json["data"];

        assert_eq!(data["window_size"], 1);
        assert_eq!(ids(&data["snapshot"]["window"]), vec!["90"]);
    }

    #[test]
    fn test_unknown_step() {
        let ws = workspace();
        timeline()
            .arg("--config")
            .arg(&ws.config)
            .arg("replay")
            .arg("--fixture")
            .arg(&ws.fixture)
            .arg("sideways")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Unknown navigation step 'sideways'"));
    }

    #[test]
    fn test_missing_fixture() {
        let ws = workspace();
        timeline()
            .arg("--config")
            .arg(&ws.config)
            .args(["replay", "--fixture", "/nonexistent/fixture.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"));
    }
}

mod tokens_tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let output = timeline()
            .args(["tokens", "30", "20", "10"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["count"], 3);
        assert_eq!(json["data"]["newer_bound"], "31");
        assert_eq!(json["data"]["older_bound"], "9");
        assert_eq!(json["data"]["newer_request"], json!({ "newer_than": "31" }));
        assert_eq!(json["data"]["older_request"], json!({ "older_than": "9" }));
    }

    #[test]
    fn test_tokens_beyond_u64() {
        let output = timeline()
            .args(["tokens", "18446744073709551616"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["newer_bound"], "18446744073709551617");
        assert_eq!(json["data"]["older_bound"], "18446744073709551615");
    }

    #[test]
    fn test_tokens_reject_ascending_ids() {
        timeline()
            .args(["tokens", "10", "20"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Invariant violation"));
    }

    #[test]
    fn test_tokens_reject_non_numeric() {
        timeline()
            .args(["tokens", "abc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Validation error"));
    }
}

mod views_tests {
    use super::*;

    fn views(catalog: &Path, args: &[&str]) -> Value {
        let output = timeline()
            .arg("views")
            .arg("--catalog")
            .arg(catalog)
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        parse_json_output(&output)
    }

    #[test]
    fn test_empty_catalog_lists_fixed_views() {
        let dir = tempdir().unwrap();
        let json = views(&dir.path().join("catalog.json"), &["list"]);

        assert_eq!(json["data"]["count"], 2);
        assert_eq!(json["data"]["items"][0]["view"], "home");
        assert_eq!(json["data"]["items"][1]["view"], "mentions");
    }

    #[test]
    fn test_add_set_last_and_remove() {
        let dir = tempdir().unwrap();
        let catalog = dir.path().join("catalog.json");

        let added = views(&catalog, &["add-list", "--id", "42", "--name", "Friends"]);
        assert_eq!(added["data"]["view"], "list:42");
        assert_eq!(added["data"]["added"], true);
        views(&catalog, &["add-search", "--query", "rust"]);
        views(&catalog, &["set-last", "--view", "list:42"]);

        let listed = views(&catalog, &["list"]);
        let items = &listed["data"]["items"];
        assert_eq!(listed["data"]["count"], 4);
        assert_eq!(items[2], json!({ "view": "list:42", "name": "Friends", "last": true }));
        assert_eq!(items[3]["view"], "search:rust");

        let removed = views(&catalog, &["remove-list", "--id", "42"]);
        assert_eq!(removed["data"]["name"], "Friends");

        let listed = views(&catalog, &["list"]);
        assert_eq!(listed["data"]["count"], 3);
        assert!(listed["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .all(|item| item["last"] == false));
    }

    #[test]
    fn test_remove_unknown_search() {
        let dir = tempdir().unwrap();
        timeline()
            .arg("views")
            .arg("--catalog")
            .arg(dir.path().join("catalog.json"))
            .args(["remove-search", "--query", "nothing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found"));
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_required_args() {
        timeline().arg("replay").assert().failure();
    }

    #[test]
    fn test_completions() {
        timeline()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("timeline"));
    }
}
