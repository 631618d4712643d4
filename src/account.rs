//! The account store: named identity profiles persisted as YAML.
//!
//! # File format
//!
//! ```yaml
//! accounts:
//!   work:
//!     ssh_key: id_ed25519_work
//!     name: Jane Doe
//!     email: jane@work.example
//! ```
//!
//! # Parsing vs application types
//!
//! [`RawStore`] and [`RawProfile`] mirror the file exactly and only live for the duration of
//! a load or save; the rest of the program works with [`Store`] and [`Profile`].
//! This keeps file-format quirks (such as `accounts:` being present but empty) out of the
//! application types.

use std::{collections::BTreeMap, path::Path};

use derive_new::new;
use error_stack::{Report, ResultExt};
use getset::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ext::{
    error_stack::{DescribeContext, ErrorHelper, IntoContext},
    io,
    result::WrapOk,
};

/// Errors that are possibly surfaced when loading or saving the account store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store file exists but could not be read.
    #[error("read account store")]
    ReadFile,

    /// The store file is not valid YAML in the expected shape.
    #[error("parse account store")]
    ParseFile,

    /// The store could not be rendered to YAML.
    #[error("serialize account store")]
    Serialize,

    /// The store file could not be written.
    #[error("write account store")]
    WriteFile,
}

/// One identity: the values applied when switching to it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
#[getset(get = "pub")]
pub struct Profile {
    /// Display name used for git commits.
    name: String,

    /// Email used for git commits.
    email: String,

    /// Filename of the private key inside the SSH directory.
    key: String,
}

/// All profiles, keyed by account name.
///
/// Iteration is always in lexicographic order of account name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    accounts: BTreeMap<String, Profile>,
}

impl Store {
    /// Load the store from disk.
    ///
    /// A missing or empty file is an empty store, not an error.
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Report<Error>> {
        let Some(content) = io::read_optional(path).change_context(Error::ReadFile)? else {
            return Self::default().wrap_ok();
        };
        if content.trim().is_empty() {
            return Self::default().wrap_ok();
        }

        let raw: RawStore = serde_yaml::from_str(&content)
            .context(Error::ParseFile)
            .describe_lazy(|| format!("parsing '{}'", path.display()))
            .help("the file must contain a top level 'accounts' mapping; fix or remove it and try again")?;

        let store = Self::from(raw);
        debug!("loaded {} accounts", store.len());
        store.wrap_ok()
    }

    /// Write the store to disk, readable only by the current user.
    #[tracing::instrument(skip(self))]
    pub fn save(&self, path: &Path) -> Result<(), Report<Error>> {
        let content = serde_yaml::to_string(&RawStore::from(self)).context(Error::Serialize)?;
        io::write_private(path, &content)
            .change_context(Error::WriteFile)
            .describe_lazy(|| format!("saving {} accounts", self.len()))
    }

    /// Look up a profile by account name.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.accounts.get(name)
    }

    /// Insert or fully replace the profile for the account name.
    pub fn put<S: Into<String>>(&mut self, name: S, profile: Profile) {
        self.accounts.insert(name.into(), profile);
    }

    /// Remove the account, reporting whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.accounts.remove(name).is_some()
    }

    /// Account names in lexicographic order.
    pub fn names(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    /// Accounts and their profiles in lexicographic order of account name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.accounts.iter().map(|(name, profile)| (name.as_str(), profile))
    }

    /// The number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether there are no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// The first account (by name) whose key or email matches the live configuration.
    ///
    /// Empty live values never match.
    pub fn find_active(&self, key: &str, email: &str) -> Option<&str> {
        self.iter()
            .find(|(_, profile)| {
                (!key.is_empty() && profile.key == key) || (!email.is_empty() && profile.email == email)
            })
            .map(|(name, _)| name)
    }
}

/// The store as it appears in the file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawStore {
    #[serde(default)]
    accounts: Option<BTreeMap<String, RawProfile>>,
}

/// A profile as it appears in the file.
#[derive(Debug, Serialize, Deserialize)]
struct RawProfile {
    ssh_key: String,
    name: String,
    email: String,
}

impl From<RawStore> for Store {
    fn from(raw: RawStore) -> Self {
        let accounts = raw
            .accounts
            .unwrap_or_default()
            .into_iter()
            .map(|(account, RawProfile { ssh_key, name, email })| (account, Profile::new(name, email, ssh_key)))
            .collect();
        Self { accounts }
    }
}

impl From<&Store> for RawStore {
    fn from(store: &Store) -> Self {
        let accounts = store
            .iter()
            .map(|(account, profile)| {
                let raw = RawProfile {
                    ssh_key: profile.key.clone(),
                    name: profile.name.clone(),
                    email: profile.email.clone(),
                };
                (account.to_string(), raw)
            })
            .collect();
        Self {
            accounts: Some(accounts),
        }
    }
}
