//! Rewriting the managed host's block.

use std::borrow::Cow;

use tracing::debug;

use super::{
    line::{Document, IDENTITY_FILE},
    ManagedHost,
};

/// Directives written into a brand new managed block, ahead of the key.
pub const CAPABILITIES: [&str; 2] = ["AddKeysToAgent yes", "UseKeychain yes"];

/// Indent used for directives this module writes from scratch.
const INDENT: &str = "  ";

/// Render the key-selection directive for the key filename.
///
/// A filename containing whitespace is quoted so that it stays a single argument.
pub fn identity_directive(indent: &str, key: &str) -> String {
    if key.contains(char::is_whitespace) {
        format!("{indent}{IDENTITY_FILE} \"~/.ssh/{key}\"")
    } else {
        format!("{indent}{IDENTITY_FILE} ~/.ssh/{key}")
    }
}

impl ManagedHost {
    /// Produce new file text in which the managed block selects `key`.
    ///
    /// - Every key-selection directive inside a managed block is rewritten in place,
    ///   keeping its leading whitespace.
    /// - If the first managed block has no such directive, one is inserted right after its header.
    /// - Text with no managed block gets a new one appended after a blank line.
    ///
    /// All other lines come back unchanged and in order, so applying the same key twice
    /// gives the same text as applying it once.
    pub fn apply(&self, text: &str, key: &str) -> String {
        let doc = Document::parse(text);
        let lines = doc.lines();
        let mut out = lines.iter().map(|line| Cow::Borrowed(line.raw())).collect::<Vec<_>>();

        // The first managed block is the one SSH reads, so only its directive decides
        // whether a new one must be inserted.
        let mut first_header = None;
        let mut rewritten = false;
        for block in doc.blocks() {
            let Some(header) = block.header() else { continue };
            if !self.is_header(&lines[header]) {
                continue;
            }
            let is_first = first_header.is_none();
            first_header.get_or_insert(header);

            for index in block.body() {
                let line = &lines[index];
                if line.has_keyword(IDENTITY_FILE) {
                    let replacement = identity_directive(line.indent(), key) + line.carriage_return();
                    out[index] = Cow::Owned(replacement);
                    rewritten |= is_first;
                }
            }
        }

        match (first_header, rewritten) {
            (None, _) => {
                debug!(host = %self, "no managed block, appending one");
                out.push(Cow::Borrowed(""));
                out.extend(self.block(key).into_iter().map(Cow::Owned));
            }
            (Some(header), false) => {
                debug!(host = %self, "managed block has no key directive, inserting one");
                out.insert(header + 1, Cow::Owned(identity_directive(INDENT, key)));
            }
            (Some(_), true) => {
                debug!(host = %self, "rewrote key directive in place");
            }
        }

        doc.render(&out)
    }

    /// The content of a directive file that holds nothing but the managed block.
    pub fn fresh(&self, key: &str) -> String {
        let mut text = self.block(key).join("\n");
        text.push('\n');
        text
    }

    /// The lines of a fully formed managed block.
    fn block(&self, key: &str) -> Vec<String> {
        let mut lines = vec![self.header()];
        lines.extend(CAPABILITIES.iter().map(|directive| format!("{INDENT}{directive}")));
        lines.push(identity_directive(INDENT, key));
        lines
    }
}
