//! A line-oriented model of the SSH client config grammar.
//!
//! The file is kept as the exact sequence of raw lines it was read from.
//! Each line is classified lazily (blank, block header, `Keyword value` directive),
//! and lines are grouped into blocks that start at a header and run until the next one.
//! Nothing is normalized: rendering an unmodified [`Document`] reproduces its input byte for byte.

use std::ops::Range;

/// The directive naming which private key to offer for a host.
pub const IDENTITY_FILE: &str = "IdentityFile";

/// Keywords that open a new block.
const HEADER_KEYWORDS: [&str; 2] = ["Host", "Match"];

/// A single raw line of the directive file, without its `\n` delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    raw: &'a str,
}

impl<'a> Line<'a> {
    /// Wrap a raw line.
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The line exactly as read.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The leading run of spaces and tabs.
    pub fn indent(&self) -> &'a str {
        let body = self.raw.trim_start_matches(|c: char| c == ' ' || c == '\t');
        &self.raw[..self.raw.len() - body.len()]
    }

    /// The `\r` left behind by a CRLF delimiter, if any.
    pub fn carriage_return(&self) -> &'static str {
        if self.raw.ends_with('\r') {
            "\r"
        } else {
            ""
        }
    }

    /// The line with surrounding whitespace removed.
    pub fn content(&self) -> &'a str {
        self.raw.trim()
    }

    /// The first token of the line.
    ///
    /// Keywords end at whitespace or at `=`, since `Keyword=value` is also valid.
    pub fn keyword(&self) -> Option<&'a str> {
        let content = self.content();
        let end = content
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(content.len());
        match &content[..end] {
            "" => None,
            keyword => Some(keyword),
        }
    }

    /// Everything after the keyword and its separator.
    pub fn argument(&self) -> Option<&'a str> {
        let content = self.content();
        let keyword = self.keyword()?;
        let rest = content[keyword.len()..].trim_start();
        let rest = rest.strip_prefix('=').unwrap_or(rest).trim_start();
        match rest {
            "" => None,
            rest => Some(rest),
        }
    }

    /// Whether the line opens a new block (`Host ...` or `Match ...`).
    pub fn is_header(&self) -> bool {
        HEADER_KEYWORDS.iter().any(|keyword| self.has_keyword(keyword))
    }

    /// Whether the first token of the line is the given keyword, ignoring case.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keyword()
            .map(|found| found.eq_ignore_ascii_case(keyword))
            .unwrap_or(false)
    }
}

/// A contiguous run of lines.
///
/// Every block except possibly the first starts with a header line;
/// the first block holds whatever precedes the first header (and may be empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    lines: Range<usize>,
    has_header: bool,
}

impl Block {
    /// Indexes into [`Document::lines`] covered by this block.
    pub fn lines(&self) -> Range<usize> {
        self.lines.clone()
    }

    /// Index of the header line, if the block has one.
    pub fn header(&self) -> Option<usize> {
        self.has_header.then_some(self.lines.start)
    }

    /// Indexes of the lines after the header.
    pub fn body(&self) -> Range<usize> {
        if self.has_header {
            self.lines.start + 1..self.lines.end
        } else {
            self.lines()
        }
    }
}

/// An entire directive file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    lines: Vec<Line<'a>>,
    trailing_newline: bool,
}

impl<'a> Document<'a> {
    /// Split the text into lines on `\n`.
    ///
    /// A final `\n` does not start an extra empty line; it is remembered instead
    /// so that [`Document::render`] can put it back.
    pub fn parse(text: &'a str) -> Self {
        Self {
            lines: text.split_terminator('\n').map(Line::new).collect(),
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// The lines in file order.
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// Group the lines into blocks, in file order.
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut start = 0;
        let mut has_header = false;
        for (index, line) in self.lines.iter().enumerate() {
            if !line.is_header() {
                continue;
            }
            if index > 0 {
                blocks.push(Block {
                    lines: start..index,
                    has_header,
                });
            }
            start = index;
            has_header = true;
        }
        if start < self.lines.len() || blocks.is_empty() {
            blocks.push(Block {
                lines: start..self.lines.len(),
                has_header,
            });
        }
        blocks
    }

    /// Join the provided lines back into text using this document's newline convention.
    pub fn render<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let mut out = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}
