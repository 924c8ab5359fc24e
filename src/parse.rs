//! Reading INI text into a [`Node`] tree.
//!
//! Lines are trimmed, then classified:
//!
//! ```text
//! # full-line comment
//! ; full-line comment
//! root_key = value        ; inline comments start at the first ';' or '#'
//!
//! [section]
//! key = a, b, c
//! ```
//!
//! - Empty lines and comment lines are skipped.
//! - `[name]` opens a root-level section; sections never nest. Declaring the same
//!   section again starts it over.
//! - Every other line is split on its first `=`. A repeated key overwrites the
//!   previous value in the same section.
//!
//! A header without its closing `]` and a line without `=` abort the whole read.

use crate::{Error, Node, Result};
use std::io::BufRead;

/// Reads INI text from a buffered reader.
///
/// # Examples
///
/// ```rust
/// use serde_ini::parse::read;
///
/// let root = read("a = 1\n[s]\nb = 2 # two".as_bytes()).unwrap();
/// assert_eq!(root["a"].data(), "1");
/// assert_eq!(root["s"]["b"].data(), "2");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnclosedSection`] or [`Error::MissingDelimiter`] with the
/// offending line, or [`Error::Io`] if reading fails.
pub fn read<R: BufRead>(reader: R) -> Result<Node> {
    let mut root = Node::section();
    let mut current: Option<String> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            let name = line
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .ok_or_else(|| Error::unclosed_section(number, line))?
                .trim();
            if root.insert(name, Node::section()).is_some() {
                tracing::debug!(section = name, line = number, "section declared again, earlier keys dropped");
            } else {
                tracing::trace!(section = name, line = number, "section opened");
            }
            current = Some(name.to_string());
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| Error::missing_delimiter(number, line))?;
        let key = key.trim();
        let value = match value.find(|c| c == ';' || c == '#') {
            Some(end) => &value[..end],
            None => value,
        }
        .trim();

        let receiver = match current.as_deref() {
            Some(section) => root.section_mut(section),
            None => &mut root,
        };
        if receiver.insert(key, Node::leaf(value)).is_some() {
            tracing::debug!(key, line = number, "key declared again, value overwritten");
        }
    }

    Ok(root)
}
