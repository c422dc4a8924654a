mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestHome;

fn json_stdout(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("json output")
}

fn add_task(home: &TestHome, text: &str, extra: &[&str]) -> Value {
    let output = home
        .cmd()
        .args(["add", text, "--json"])
        .args(extra)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    json_stdout(&output)
}

#[test]
fn add_toggle_delete_walks_the_full_lifecycle() {
    let home = TestHome::new();

    let added = add_task(&home, "Buy milk", &["--priority", "high", "--category", "life"]);
    assert_eq!(added["command"].as_str(), Some("add"));
    assert_eq!(added["data"]["text"].as_str(), Some("Buy milk"));
    assert_eq!(added["data"]["priority"].as_str(), Some("high"));
    assert_eq!(added["data"]["category"].as_str(), Some("life"));
    assert_eq!(added["data"]["completed"].as_bool(), Some(false));
    let id = added["data"]["id"].as_u64().expect("task id").to_string();

    let toggled = home
        .cmd()
        .args(["toggle", &id, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(json_stdout(&toggled)["data"]["completed"].as_bool(), Some(true));

    let stats = home
        .cmd()
        .args(["stats", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stats = json_stdout(&stats);
    assert_eq!(stats["data"]["completed"].as_u64(), Some(1));
    assert_eq!(stats["data"]["pending"].as_u64(), Some(0));

    let deleted = home
        .cmd()
        .args(["delete", &id, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let deleted = json_stdout(&deleted);
    assert_eq!(deleted["data"]["text"].as_str(), Some("Buy milk"));
    assert!(deleted["data"]["deleted_at"].is_string());

    let listed = home
        .cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed = json_stdout(&listed);
    assert_eq!(listed["data"]["pending"].as_array().map(Vec::len), Some(0));
    assert_eq!(listed["data"]["completed"].as_array().map(Vec::len), Some(0));

    let trash = home
        .cmd()
        .args(["trash", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let trash = json_stdout(&trash);
    assert_eq!(trash["data"]["deleted_count"].as_u64(), Some(1));
    let entries = trash["data"]["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["text"].as_str(), Some("Buy milk"));
}

#[test]
fn edit_replaces_text_and_keeps_identity() {
    let home = TestHome::new();

    let added = add_task(&home, "tidy desk", &[]);
    let id = added["data"]["id"].as_u64().expect("task id");
    let created_at = added["data"]["created_at"].as_str().expect("created_at").to_string();

    let edited = home
        .cmd()
        .args(["edit", &id.to_string(), "tidy the whole desk", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let edited = json_stdout(&edited);
    assert_eq!(edited["data"]["text"].as_str(), Some("tidy the whole desk"));
    assert_eq!(edited["data"]["id"].as_u64(), Some(id));
    assert_eq!(edited["data"]["created_at"].as_str(), Some(created_at.as_str()));
}

#[test]
fn empty_add_is_rejected_without_creating_a_task() {
    let home = TestHome::new();

    home.cmd()
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("task text cannot be empty"));

    let listed = home
        .cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed = json_stdout(&listed);
    assert_eq!(listed["data"]["pending"].as_array().map(Vec::len), Some(0));
}

#[test]
fn unknown_id_is_a_user_error() {
    let home = TestHome::new();
    add_task(&home, "only task", &[]);

    home.cmd()
        .args(["edit", "999", "new text"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("task not found: 999"));

    let err = home
        .cmd()
        .args(["delete", "999", "--json"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let err = json_stdout(&err);
    assert_eq!(err["status"].as_str(), Some("error"));
    assert_eq!(err["error"]["kind"].as_str(), Some("user_error"));
    assert_eq!(err["error"]["code"].as_i64(), Some(2));
}

#[test]
fn blank_edit_keeps_the_original_text() {
    let home = TestHome::new();
    let added = add_task(&home, "keep me", &[]);
    let id = added["data"]["id"].as_u64().expect("task id").to_string();

    home.cmd()
        .args(["edit", &id, "   "])
        .assert()
        .failure()
        .code(2);

    let listed = home
        .cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed = json_stdout(&listed);
    assert_eq!(
        listed["data"]["pending"][0]["text"].as_str(),
        Some("keep me")
    );
}

#[test]
fn list_orders_newest_first_and_filters_by_category() {
    let home = TestHome::new();
    add_task(&home, "oldest", &["--category", "work"]);
    add_task(&home, "middle", &[]);
    add_task(&home, "newest", &["--category", "work"]);

    let listed = home
        .cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed = json_stdout(&listed);
    let texts: Vec<&str> = listed["data"]["pending"]
        .as_array()
        .expect("pending")
        .iter()
        .map(|task| task["text"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, vec!["newest", "middle", "oldest"]);

    let filtered = home
        .cmd()
        .args(["list", "--category", "work", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let filtered = json_stdout(&filtered);
    let texts: Vec<&str> = filtered["data"]["pending"]
        .as_array()
        .expect("pending")
        .iter()
        .map(|task| task["text"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, vec!["newest", "oldest"]);
}

#[test]
fn list_sections_can_be_restricted() {
    let home = TestHome::new();
    let added = add_task(&home, "done already", &[]);
    let id = added["data"]["id"].as_u64().expect("task id").to_string();
    add_task(&home, "still open", &[]);
    home.cmd().args(["toggle", &id]).assert().success();

    let pending_only = home
        .cmd()
        .args(["list", "--pending", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let pending_only = json_stdout(&pending_only);
    assert!(pending_only["data"]["completed"].is_null());
    assert_eq!(
        pending_only["data"]["pending"][0]["text"].as_str(),
        Some("still open")
    );

    let completed_only = home
        .cmd()
        .args(["list", "--completed", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let completed_only = json_stdout(&completed_only);
    assert!(completed_only["data"]["pending"].is_null());
    assert_eq!(
        completed_only["data"]["completed"][0]["text"].as_str(),
        Some("done already")
    );
}
