use github_switch::{
    account::Profile,
    git_wrapper::Git,
    subcommand::{add, current, init, list, remove, switch},
};

use crate::helper::{output, read, require_git, set_vars, terminal, Fixture};

const ACCOUNTS: &[(&str, &str, &str, &str)] = &[
    ("personal", "Jane", "jane@home.org", "id_personal"),
    ("work", "Jane Doe", "jane@work.com", "id_work"),
];

#[test]
fn init_creates_empty_store() {
    let fixture = Fixture::new();
    let mut term = terminal("");
    init::main(&fixture.ctx, &mut term).expect("must init");

    assert!(fixture.store().is_empty());
    assert_eq!(read(fixture.ctx.accounts_file()).trim(), "accounts: {}");
    assert!(output(term).starts_with("Config initialized at: "));
}

#[test]
fn init_keeps_existing_accounts() {
    let fixture = Fixture::new().with_accounts(ACCOUNTS);
    let mut term = terminal("");
    init::main(&fixture.ctx, &mut term).expect("must init");

    assert_eq!(fixture.store().len(), 2);
    insta::assert_snapshot!(output(term).trim_end(), @r###"
    Config already exists with accounts:
      - personal
      - work

    Use 'github-switch add' to add more accounts.
    "###);
}

#[test]
fn add_with_flags() {
    let fixture = Fixture::new();
    let args = add::Args::new(
        String::from("work"),
        Some(String::from("Jane Doe")),
        Some(String::from("jane@work.com")),
        Some(String::from("id_work")),
    );
    let mut term = terminal("");
    add::main(&fixture.ctx, &mut term, args).expect("must add");

    let store = fixture.store();
    let expected = Profile::new("Jane Doe".into(), "jane@work.com".into(), "id_work".into());
    assert_eq!(store.get("work"), Some(&expected));
    assert!(output(term).contains("Account 'work' added successfully."));
}

#[test]
fn add_prompts_for_missing_fields() {
    let fixture = Fixture::new()
        .with_ssh_file("id_work", "private")
        .with_ssh_file("id_work.pub", "public")
        .with_ssh_file("known_hosts", "");
    let args = add::Args::new(String::from("work"), None, None, None);
    let mut term = terminal("Jane Doe\njane@work.com\nid_work\n");
    add::main(&fixture.ctx, &mut term, args).expect("must add");

    let store = fixture.store();
    let profile = store.get("work").expect("must store work");
    assert_eq!(profile.email(), "jane@work.com");
    assert_eq!(profile.key(), "id_work");

    let shown = output(term);
    assert!(shown.contains("Available SSH keys:\n  1. id_work\n"), "output: {shown}");
    assert!(!shown.contains("known_hosts"));
}

#[test]
fn add_rejects_blank_fields() {
    let fixture = Fixture::new();
    let args = add::Args::new(String::from("work"), Some(String::from("Jane")), None, None);
    let mut term = terminal("");
    let err = add::main(&fixture.ctx, &mut term, args).expect_err("must fail");

    assert!(matches!(err.current_context(), add::Error::MissingField));
    assert!(!fixture.ctx.accounts_file().exists());
}

#[test]
fn add_rejects_key_outside_ssh_dir() {
    let fixture = Fixture::new();
    let args = add::Args::new(
        String::from("work"),
        Some(String::from("Jane Doe")),
        Some(String::from("jane@work.com")),
        Some(String::from("keys/id_work")),
    );
    let mut term = terminal("");
    let err = add::main(&fixture.ctx, &mut term, args).expect_err("must fail");

    assert!(matches!(err.current_context(), add::Error::InvalidKey));
    assert!(!fixture.ctx.accounts_file().exists());
}

#[test]
fn add_accepts_key_with_spaces() {
    let fixture = Fixture::new();
    let args = add::Args::new(
        String::from("work"),
        Some(String::from("Jane Doe")),
        Some(String::from("jane@work.com")),
        Some(String::from("work key")),
    );
    let mut term = terminal("");
    add::main(&fixture.ctx, &mut term, args).expect("must add");

    assert_eq!(fixture.store().get("work").map(|p| p.key().as_str()), Some("work key"));
}

#[test]
fn add_refuses_duplicate() {
    let fixture = Fixture::new().with_accounts(ACCOUNTS);
    let args = add::Args::new(
        String::from("work"),
        Some(String::from("Other")),
        Some(String::from("other@work.com")),
        Some(String::from("id_other")),
    );
    let mut term = terminal("");
    let err = add::main(&fixture.ctx, &mut term, args).expect_err("must fail");

    assert!(matches!(err.current_context(), add::Error::AccountExists(name) if name == "work"));
    assert_eq!(fixture.store().get("work").map(|p| p.name().as_str()), Some("Jane Doe"));
}

#[test]
fn remove_with_force() {
    let fixture = Fixture::new().with_accounts(ACCOUNTS);
    let mut term = terminal("");
    remove::main(&fixture.ctx, &mut term, remove::Args::new(String::from("work"), true)).expect("must remove");

    assert_eq!(fixture.store().names(), vec![String::from("personal")]);
    assert!(output(term).contains("Account 'work' removed."));
}

#[test]
fn remove_defaults_to_cancel() {
    let fixture = Fixture::new().with_accounts(ACCOUNTS);
    let mut term = terminal("\n");
    remove::main(&fixture.ctx, &mut term, remove::Args::new(String::from("work"), false)).expect("must run");

    assert_eq!(fixture.store().len(), 2);
    assert!(output(term).ends_with("Cancelled.\n"));
}

#[test]
fn remove_unknown_account() {
    let fixture = Fixture::new().with_accounts(ACCOUNTS);
    let mut term = terminal("");
    let err = remove::main(&fixture.ctx, &mut term, remove::Args::new(String::from("nope"), true))
        .expect_err("must fail");
    assert!(matches!(err.current_context(), remove::Error::UnknownAccount(name) if name == "nope"));
}

#[test]
fn list_marks_active_account() {
    set_vars!();
    let fixture = Fixture::new()
        .with_accounts(ACCOUNTS)
        .with_ssh_file("config", "Host github.com\n  IdentityFile ~/.ssh/id_work\n");
    let mut term = terminal("");
    list::main(&fixture.ctx, &mut term).expect("must list");

    insta::assert_snapshot!(output(term).trim_end(), @r###"
    Configured accounts:
      personal
        Email:   jane@home.org
        Name:    Jane
        SSH Key: id_personal
    * work
        Email:   jane@work.com
        Name:    Jane Doe
        SSH Key: id_work
    "###);
}

#[test]
fn list_without_accounts() {
    let fixture = Fixture::new();
    let mut term = terminal("");
    list::main(&fixture.ctx, &mut term).expect("must list");
    assert!(output(term).starts_with("No accounts configured."));
}

#[test]
fn switch_without_accounts() {
    let fixture = Fixture::new();
    let mut term = terminal("");
    let err = switch::main(&fixture.ctx, &mut term, switch::Args::new(None, true, true)).expect_err("must fail");
    assert!(matches!(err.current_context(), switch::Error::NoAccounts));
}

#[test]
fn switch_unknown_account() {
    let fixture = Fixture::new().with_accounts(ACCOUNTS);
    let mut term = terminal("");
    let args = switch::Args::new(Some(String::from("nope")), true, true);
    let err = switch::main(&fixture.ctx, &mut term, args).expect_err("must fail");

    assert!(matches!(err.current_context(), switch::Error::UnknownAccount(name) if name == "nope"));
    assert!(!fixture.ssh_config_path().exists());
}

#[test]
fn switch_declined_changes_nothing() {
    let fixture = Fixture::new().with_accounts(ACCOUNTS);
    let mut term = terminal("n\n");
    let args = switch::Args::new(Some(String::from("work")), false, true);
    switch::main(&fixture.ctx, &mut term, args).expect("must run");

    assert!(output(term).ends_with("Cancelled.\n"));
    assert!(!fixture.ssh_config_path().exists());
}

#[test]
fn switch_applies_profile() {
    require_git!();
    let existing = "Host *\n  ServerAliveInterval 60\n\nHost github.com\n  IdentityFile ~/.ssh/id_personal\n";
    let fixture = Fixture::new()
        .with_accounts(ACCOUNTS)
        .with_ssh_file("config", existing);
    let mut term = terminal("");
    let args = switch::Args::new(Some(String::from("work")), true, true);
    switch::main(&fixture.ctx, &mut term, args).expect("must switch");

    assert_eq!(
        read(&fixture.ssh_config_path()),
        "Host *\n  ServerAliveInterval 60\n\nHost github.com\n  IdentityFile ~/.ssh/id_work\n"
    );
    let identity = Git::locate(fixture.ctx.git_config().clone())
        .and_then(|git| git.global_identity())
        .expect("must read identity");
    assert_eq!(identity.name, "Jane Doe");
    assert_eq!(identity.email, "jane@work.com");
    assert!(output(term).ends_with("Switched to GitHub account: work\n"));
}

#[test]
fn switch_from_menu_then_current() {
    require_git!();
    let fixture = Fixture::new().with_accounts(ACCOUNTS);

    // Pick the first entry, then accept the default confirmation.
    let mut term = terminal("1\n\n");
    switch::main(&fixture.ctx, &mut term, switch::Args::new(None, false, true)).expect("must switch");
    let shown = output(term);
    assert!(shown.contains("  1. personal (jane@home.org)"), "output: {shown}");
    assert!(shown.ends_with("Switched to GitHub account: personal\n"));

    let mut term = terminal("");
    current::main(&fixture.ctx, &mut term).expect("must show current");
    insta::assert_snapshot!(output(term).trim_end(), @r###"
    Current configuration:
      Name:    Jane
      Email:   jane@home.org
      SSH Key: id_personal

    Matched account: personal
    "###);
}

#[test]
fn current_without_match() {
    require_git!();
    let fixture = Fixture::new().with_accounts(ACCOUNTS);
    let mut term = terminal("");
    current::main(&fixture.ctx, &mut term).expect("must show current");

    let shown = output(term);
    assert!(shown.contains("  SSH Key: \n"), "output: {shown}");
    assert!(shown.ends_with("No matching account found in configuration.\n"));
}
