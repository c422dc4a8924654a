use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn tsk_help_works() {
    Command::cargo_bin("tsk")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("soft-delete trash"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "add", "edit", "toggle", "delete", "list", "clear", "stats", "trash", "prefs",
    ];

    for cmd in subcommands {
        Command::cargo_bin("tsk")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}
