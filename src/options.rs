//! Configuration options for INI dumping.
//!
//! - [`IniOptions`]: main configuration struct
//! - [`split_comments`]: the comment list grammar used by [`IniOptions::with_comments`]
//!
//! Field names and exclusion come from serde attributes (`#[serde(rename = "...")]`,
//! `#[serde(skip)]`). Comments have no serde attribute, so they are registered here
//! once, keyed by the record's type name and the serialized field name.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{to_string_with_options, IniOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { port: u16 }
//!
//! let options = IniOptions::new().with_comments("Server", "port", "listening port; 0 picks one");
//! let ini = to_string_with_options(&Server { port: 8080 }, options).unwrap();
//! assert_eq!(ini, "; listening port\n; 0 picks one\nport = 8080\n");
//! ```

use indexmap::IndexMap;

/// Default separator between sequence elements.
pub const DEFAULT_LIST_SEPARATOR: &str = ", ";

/// Splits a comment list on `;`, trimming surrounding whitespace and dropping empty entries.
///
/// # Examples
///
/// ```rust
/// use serde_ini::options::split_comments;
///
/// assert_eq!(split_comments("comment1; comment2"), vec!["comment1", "comment2"]);
/// assert!(split_comments("  ").is_empty());
/// ```
#[must_use]
pub fn split_comments(comments: &str) -> Vec<String> {
    comments
        .split(';')
        .map(str::trim)
        .filter(|comment| !comment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration options for INI dumping.
///
/// # Examples
///
/// ```rust
/// use serde_ini::IniOptions;
///
/// let options = IniOptions::new()
///     .with_comments("Config", "timeout", "seconds before giving up")
///     .with_list_separator(",");
/// assert_eq!(options.comments_for("Config", "timeout"), ["seconds before giving up"]);
/// ```
#[derive(Clone, Debug)]
pub struct IniOptions {
    pub list_separator: String,
    comments: IndexMap<(String, String), Vec<String>>,
}

impl Default for IniOptions {
    fn default() -> Self {
        IniOptions {
            list_separator: DEFAULT_LIST_SEPARATOR.to_string(),
            comments: IndexMap::new(),
        }
    }
}

impl IniOptions {
    /// Creates default options (`, ` list separator, no comments).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the comment lines written above `field` of the record type `type_name`.
    ///
    /// `type_name` is the name serde reports for the record, which is the Rust type
    /// name unless the container is renamed. `field` is the serialized field name.
    /// `comments` is split with [`split_comments`]; registering the same field twice
    /// appends.
    #[must_use]
    pub fn with_comments(mut self, type_name: &str, field: &str, comments: &str) -> Self {
        self.comments
            .entry((type_name.to_string(), field.to_string()))
            .or_default()
            .extend(split_comments(comments));
        self
    }

    /// Sets the separator written between sequence elements.
    ///
    /// The reader splits lists on commas, so the separator must contain exactly one
    /// comma for dumped lists to load back.
    #[must_use]
    pub fn with_list_separator(mut self, separator: &str) -> Self {
        self.list_separator = separator.to_string();
        self
    }

    /// Returns the comments registered for a record field, or an empty slice.
    #[must_use]
    pub fn comments_for(&self, type_name: &str, field: &str) -> &[String] {
        self.comments
            .get(&(type_name.to_string(), field.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_comments_trims() {
        assert_eq!(split_comments("a ;  b;c  "), vec!["a", "b", "c"]);
        assert_eq!(split_comments("root item 1"), vec!["root item 1"]);
        assert!(split_comments(";;").is_empty());
    }

    #[test]
    fn test_comments_append_per_field() {
        let options = IniOptions::new()
            .with_comments("I", "b", "comment1")
            .with_comments("I", "b", "comment2")
            .with_comments("J", "b", "other");
        assert_eq!(options.comments_for("I", "b"), ["comment1", "comment2"]);
        assert_eq!(options.comments_for("J", "b"), ["other"]);
        assert!(options.comments_for("I", "a").is_empty());
    }

    #[test]
    fn test_default_separator() {
        assert_eq!(IniOptions::default().list_separator, ", ");
    }
}
