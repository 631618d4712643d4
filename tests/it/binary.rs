//! Runs the compiled binary end to end, with every path pointed into a temp dir.

use std::process::{Command, Output};

use crate::helper::Fixture;

fn run(fixture: &Fixture, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_github-switch"))
        .arg("--accounts-file")
        .arg(fixture.ctx.accounts_file())
        .arg("--ssh-dir")
        .arg(fixture.ctx.ssh_dir())
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("must run binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn init_add_list_remove() {
    let fixture = Fixture::new();

    let init = run(&fixture, &["init"]);
    assert!(init.status.success(), "stderr: {}", stderr(&init));
    assert!(stdout(&init).contains("Config initialized at:"));

    let add = run(&fixture, &["add", "work", "-n", "Jane Doe", "-e", "jane@work.com", "-k", "id_work"]);
    assert!(add.status.success(), "stderr: {}", stderr(&add));

    let list = run(&fixture, &["ls"]);
    assert!(list.status.success(), "stderr: {}", stderr(&list));
    assert!(stdout(&list).contains("  work\n    Email:   jane@work.com\n"));

    let remove = run(&fixture, &["rm", "work", "--force"]);
    assert!(remove.status.success(), "stderr: {}", stderr(&remove));
    assert!(fixture.store().is_empty());
}

#[test]
fn unknown_account_fails() {
    let fixture = Fixture::new().with_accounts(&[("work", "Jane Doe", "jane@work.com", "id_work")]);
    let switch = run(&fixture, &["switch", "nope", "--force", "--no-agent"]);

    assert!(!switch.status.success());
    let shown = stderr(&switch);
    assert!(shown.contains("unknown account: nope"), "stderr: {shown}");
    assert!(shown.contains("github-switch list"), "stderr: {shown}");
}

#[test]
fn rejects_blank_host() {
    let fixture = Fixture::new();
    let list = run(&fixture, &["--host", " ", "list"]);

    assert!(!list.status.success());
    assert!(stderr(&list).contains("determine effective configuration"));
}

#[test]
fn prints_version() {
    let fixture = Fixture::new();
    let version = run(&fixture, &["--version"]);
    assert!(version.status.success());
    assert!(stdout(&version).starts_with("github-switch "));
}
