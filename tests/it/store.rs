use std::fs;

use github_switch::account::{Error, Profile, Store};
use indoc::indoc;

use crate::helper::{read, Fixture};

#[test]
fn missing_file_is_empty_store() {
    let fixture = Fixture::new();
    let store = Store::load(fixture.ctx.accounts_file()).expect("must load");
    assert!(store.is_empty());
}

#[test]
fn saved_store_is_sorted_yaml() {
    let fixture = Fixture::new();
    let mut store = Store::default();
    store.put("work", Profile::new("Jane Doe".into(), "jane@work.com".into(), "id_work".into()));
    store.put("personal", Profile::new("Jane".into(), "jane@home.org".into(), "id_personal".into()));
    store.save(fixture.ctx.accounts_file()).expect("must save");

    insta::assert_snapshot!(read(fixture.ctx.accounts_file()), @r###"
    accounts:
      personal:
        ssh_key: id_personal
        name: Jane
        email: jane@home.org
      work:
        ssh_key: id_work
        name: Jane Doe
        email: jane@work.com
    "###);
    assert_eq!(Store::load(fixture.ctx.accounts_file()).expect("must load"), store);
}

#[cfg(unix)]
#[test]
fn saved_store_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = Fixture::new();
    Store::default().save(fixture.ctx.accounts_file()).expect("must save");
    let meta = fs::metadata(fixture.ctx.accounts_file()).expect("must stat");
    assert_eq!(meta.permissions().mode() & 0o777, 0o600);
}

#[test]
fn reads_hand_written_file() {
    let fixture = Fixture::new();
    let content = indoc! {r#"
        # managed by hand
        accounts:
          "work":
            name: "Jane Doe"
            email: jane@work.com
            ssh_key: id_ed25519_work
    "#};
    fs::write(fixture.ctx.accounts_file(), content).expect("must write");

    let store = Store::load(fixture.ctx.accounts_file()).expect("must load");
    let profile = store.get("work").expect("must have work");
    assert_eq!(profile.name(), "Jane Doe");
    assert_eq!(profile.key(), "id_ed25519_work");
}

#[test]
fn malformed_file_is_parse_error() {
    let fixture = Fixture::new();
    fs::write(fixture.ctx.accounts_file(), "accounts: [not, a, mapping").expect("must write");

    let err = Store::load(fixture.ctx.accounts_file()).expect_err("must fail");
    assert!(matches!(err.current_context(), Error::ParseFile));
}

#[test]
fn profile_missing_field_is_parse_error() {
    let fixture = Fixture::new();
    fs::write(fixture.ctx.accounts_file(), "accounts:\n  work:\n    name: Jane\n").expect("must write");

    let err = Store::load(fixture.ctx.accounts_file()).expect_err("must fail");
    assert!(matches!(err.current_context(), Error::ParseFile));
}
