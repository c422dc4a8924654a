mod support;

use serde_json::Value;

use support::TestHome;

fn json_stdout(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("json output")
}

fn add_task(home: &TestHome, text: &str) -> String {
    let output = home
        .cmd()
        .args(["add", text, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    json_stdout(&output)["data"]["id"]
        .as_u64()
        .expect("task id")
        .to_string()
}

fn run_clear(home: &TestHome, scope: &str) -> Value {
    let output = home
        .cmd()
        .args(["clear", scope, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    json_stdout(&output)
}

#[test]
fn clear_completed_moves_exactly_the_completed_subset() {
    let home = TestHome::new();
    let done_id = add_task(&home, "finished");
    add_task(&home, "still open");
    home.cmd().args(["toggle", &done_id]).assert().success();

    let cleared = run_clear(&home, "completed");
    assert_eq!(cleared["command"].as_str(), Some("clear completed"));
    assert_eq!(cleared["data"]["moved"].as_u64(), Some(1));

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
        Some("still open")
    );
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
    assert_eq!(
        trash["data"]["entries"][0]["text"].as_str(),
        Some("finished")
    );
}

#[test]
fn clear_completed_with_nothing_completed_is_a_noop() {
    let home = TestHome::new();
    add_task(&home, "open");

    let trash_before = home.read_key("trash");
    let count_before = home.read_key("trash_count");

    let cleared = run_clear(&home, "completed");
    assert_eq!(cleared["data"]["moved"].as_u64(), Some(0));

    // No writes happened: raw records are byte-identical.
    assert_eq!(home.read_key("trash"), trash_before);
    assert_eq!(home.read_key("trash_count"), count_before);
}

#[test]
fn clear_all_empties_the_list_in_one_batch() {
    let home = TestHome::new();
    for text in ["a", "b", "c"] {
        add_task(&home, text);
    }

    let cleared = run_clear(&home, "all");
    assert_eq!(cleared["command"].as_str(), Some("clear all"));
    assert_eq!(cleared["data"]["moved"].as_u64(), Some(3));

    let stats = home
        .cmd()
        .args(["stats", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stats = json_stdout(&stats);
    assert_eq!(stats["data"]["pending"].as_u64(), Some(0));
    assert_eq!(stats["data"]["completed"].as_u64(), Some(0));
    assert_eq!(stats["data"]["deleted"].as_u64(), Some(3));
}

#[test]
fn deleted_counter_accumulates_across_clears() {
    let home = TestHome::new();

    let first = add_task(&home, "first");
    home.cmd().args(["delete", &first]).assert().success();

    let second = add_task(&home, "second");
    home.cmd().args(["toggle", &second]).assert().success();
    run_clear(&home, "completed");

    add_task(&home, "third");
    run_clear(&home, "all");

    let trash = home
        .cmd()
        .args(["trash", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let trash = json_stdout(&trash);
    assert_eq!(trash["data"]["deleted_count"].as_u64(), Some(3));
    assert_eq!(trash["data"]["entries"].as_array().map(Vec::len), Some(3));
}
