use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use github_switch::{
    account::{Profile, Store},
    ssh_config::ManagedHost,
    term::Terminal,
    AppContext,
};
use tempfile::TempDir;

/// Tests are run independently by cargo nextest, so this macro configures settings used in most tests.
macro_rules! set_vars {
    () => {
        // Colors make snapshots unreadable; structure is what these tests care about.
        error_stack::Report::set_color_mode(error_stack::fmt::ColorMode::None);
        colored::control::set_override(false);
    };
}

pub(crate) use set_vars;

/// Skip the rest of the test if git is not installed.
macro_rules! require_git {
    () => {
        if which::which("git").is_err() {
            eprintln!("skipping: git is not installed");
            return;
        }
    };
}

pub(crate) use require_git;

pub type TestTerminal = Terminal<Cursor<Vec<u8>>, Vec<u8>>;

/// A home directory in a temp dir, with every path the program touches inside it.
pub struct Fixture {
    // Held so the directory lives as long as the fixture.
    _root: TempDir,
    pub ctx: AppContext,
}

impl Fixture {
    pub fn new() -> Self {
        let root = TempDir::new().expect("must create temp dir");
        let ctx = AppContext::new(
            root.path().join(".github-switch.yaml"),
            root.path().join(".ssh"),
            ManagedHost::default(),
            Some(root.path().join(".gitconfig")),
        );
        Self { _root: root, ctx }
    }

    /// Populate the account store.
    pub fn with_accounts(self, accounts: &[(&str, &str, &str, &str)]) -> Self {
        let mut store = Store::default();
        for (account, name, email, key) in accounts {
            store.put(account.to_string(), Profile::new(name.to_string(), email.to_string(), key.to_string()));
        }
        store.save(self.ctx.accounts_file()).expect("must save store");
        self
    }

    /// Write a file into the SSH directory.
    pub fn with_ssh_file(self, name: &str, content: &str) -> Self {
        fs::create_dir_all(self.ctx.ssh_dir()).expect("must create ssh dir");
        fs::write(self.ctx.ssh_dir().join(name), content).expect("must write ssh file");
        self
    }

    pub fn ssh_config_path(&self) -> PathBuf {
        self.ctx.ssh_dir().join("config")
    }

    pub fn store(&self) -> Store {
        Store::load(self.ctx.accounts_file()).expect("must load store")
    }
}

pub fn terminal(input: &str) -> TestTerminal {
    Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub fn output(term: TestTerminal) -> String {
    String::from_utf8(term.into_output()).expect("output must be utf8")
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("must read file")
}
