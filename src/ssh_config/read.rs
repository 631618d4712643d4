//! Reading the key the managed host currently selects.

use super::{
    line::{Document, IDENTITY_FILE},
    ManagedHost,
};

impl ManagedHost {
    /// The key filename selected by the first managed block, or an empty string.
    ///
    /// Only the final path segment of the directive's argument is returned,
    /// so `~/.ssh/work` reads back as `work`.
    /// The first directive with an argument wins; later ones in the same block are ignored,
    /// as are any managed blocks after the first.
    pub fn current_key(&self, text: &str) -> String {
        let doc = Document::parse(text);
        let lines = doc.lines();
        let Some(block) = doc
            .blocks()
            .into_iter()
            .find(|block| block.header().map(|header| self.is_header(&lines[header])).unwrap_or(false))
        else {
            return String::new();
        };

        block
            .body()
            .map(|index| &lines[index])
            .filter(|line| line.has_keyword(IDENTITY_FILE))
            .find_map(|line| line.argument())
            .map(key_filename)
            .unwrap_or_default()
    }
}

/// Extract the filename from a directive argument.
///
/// Only `/` separates path segments; a backslash is part of the filename.
fn key_filename(argument: &str) -> String {
    let path = match argument.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or_default(),
        None => argument.split_whitespace().next().unwrap_or_default(),
    };
    path.rsplit('/').next().unwrap_or_default().to_string()
}
