//! The Node tree: the uniform representation of loaded INI text.
//!
//! A [`Node`] is either a *leaf* holding raw scalar text or a *section* holding
//! named children. [`load`](crate::load) produces a root section whose children are
//! root-level leaves and `[section]` containers of leaves.
//!
//! ## Navigation
//!
//! Lookups never fail: a missing key yields the empty node, and only the terminal
//! accessor reports an error.
//!
//! ```rust
//! use serde_ini::load;
//!
//! let root = load("port = 8080\n[db]\nhosts = a, b").unwrap();
//!
//! assert_eq!(root.get("port").int().unwrap(), 8080);
//! assert_eq!(root["db"]["hosts"].values().unwrap(), vec!["a", "b"]);
//! assert!(root.get_path(["db", "missing"]).is_empty());
//! assert!(root.get_path(["db", "missing"]).int().is_err());
//! assert_eq!(root["db"]["timeout"].must_int(30), 30);
//! ```
//!
//! ## Typed Accessors
//!
//! | Accessor | Grammar |
//! |----------|---------|
//! | [`Node::value`] | raw text |
//! | [`Node::int`] | decimal integer |
//! | [`Node::float`] | float literal |
//! | [`Node::bool`] | `1 t T TRUE true True` / `0 f F FALSE false False` |
//! | [`Node::duration`] | [duration grammar](crate::duration) |
//! | [`Node::values`], [`Node::ints`], [`Node::floats`] | comma-separated list |
//!
//! Each has a `must_*` twin returning a caller-supplied default on any failure.

use crate::content::Content;
use crate::{duration, Error, Result};
use indexmap::IndexMap;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::IntErrorKind;
use std::ops::Index;
use std::time::Duration;

static EMPTY: Node = Node {
    data: String::new(),
    children: None,
};

/// A leaf of raw scalar text or a section of named children.
///
/// # Examples
///
/// ```rust
/// use serde_ini::Node;
///
/// let mut root = Node::section();
/// root.insert("name", Node::leaf("demo"));
///
/// assert!(root.is_section());
/// assert_eq!(root.get("name").value().unwrap(), "demo");
/// assert!(root.get("other").is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Node {
    data: String,
    children: Option<IndexMap<String, Node>>,
}

impl Node {
    /// Creates a leaf holding `data`.
    #[must_use]
    pub fn leaf(data: impl Into<String>) -> Self {
        Node {
            data: data.into(),
            children: None,
        }
    }

    /// Creates an empty section.
    #[must_use]
    pub fn section() -> Self {
        Node {
            data: String::new(),
            children: Some(IndexMap::new()),
        }
    }

    /// Returns `true` if this node has no children map.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Returns `true` if this node is a section (possibly without children).
    #[inline]
    #[must_use]
    pub const fn is_section(&self) -> bool {
        self.children.is_some()
    }

    /// Returns `true` only for a leaf with empty text.
    ///
    /// This is what a lookup of a missing key returns; an empty section or a present
    /// section is not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.children.is_none()
    }

    /// Returns the raw text of the node without checking its kind.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Returns the children of a section, in the order they were first inserted.
    #[must_use]
    pub fn children(&self) -> Option<&IndexMap<String, Node>> {
        self.children.as_ref()
    }

    /// Inserts a child, turning a leaf into a section. Returns the replaced child.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.children
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), node)
    }

    /// Returns the child section named `key`, creating it when absent.
    pub(crate) fn section_mut(&mut self, key: &str) -> &mut Node {
        self.children
            .get_or_insert_with(IndexMap::new)
            .entry(key.to_string())
            .or_insert_with(Node::section)
    }

    /// Returns the child named `key`, or the empty node.
    #[must_use]
    pub fn get(&self, key: &str) -> &Node {
        self.children
            .as_ref()
            .and_then(|children| children.get(key))
            .unwrap_or(&EMPTY)
    }

    /// Follows a path of keys; any missing step yields the empty node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::load;
    ///
    /// let root = load("[section1]\nSec2 = 1,2,3,4").unwrap();
    /// assert_eq!(root.get_path(["section1", "Sec2"]).ints().unwrap(), vec![1, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn get_path<'k, I>(&self, path: I) -> &Node
    where
        I: IntoIterator<Item = &'k str>,
    {
        path.into_iter().fold(self, |node, key| node.get(key))
    }

    /// Returns the raw text of a leaf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the node is a section.
    pub fn value(&self) -> Result<&str> {
        if self.children.is_some() {
            return Err(Error::type_mismatch("scalar", "section"));
        }
        Ok(&self.data)
    }

    /// Parses the leaf as a decimal integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for non-numeric text, [`Error::Overflow`]
    /// outside the `i64` range and [`Error::TypeMismatch`] for a section.
    pub fn int(&self) -> Result<i64> {
        parse_i64(self.value()?)
    }

    /// Parses the leaf as a float.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for non-numeric text, [`Error::Overflow`]
    /// for a finite literal beyond the `f64` range and [`Error::TypeMismatch`]
    /// for a section.
    pub fn float(&self) -> Result<f64> {
        parse_f64(self.value()?)
    }

    /// Parses the leaf as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for text outside the boolean grammar.
    pub fn bool(&self) -> Result<bool> {
        parse_bool(self.value()?)
    }

    /// Parses the leaf as a duration such as `10s` or `1m0s`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for text outside the duration grammar.
    pub fn duration(&self) -> Result<Duration> {
        duration::parse(self.value()?)
    }

    /// Splits the leaf on commas, trimming whitespace around each element.
    ///
    /// An empty leaf yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the node is a section.
    pub fn values(&self) -> Result<Vec<String>> {
        if self.children.is_some() {
            return Err(Error::type_mismatch("list", "section"));
        }
        Ok(split_list(&self.data)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Parses every list element as an integer. Fails on the first bad element.
    pub fn ints(&self) -> Result<Vec<i64>> {
        self.values()?.iter().map(|item| parse_i64(item)).collect()
    }

    /// Parses every list element as a float. Fails on the first bad element.
    pub fn floats(&self) -> Result<Vec<f64>> {
        self.values()?.iter().map(|item| parse_f64(item)).collect()
    }

    /// Returns the raw text, or `default` for a section.
    #[must_use]
    pub fn must_value<'a>(&'a self, default: &'a str) -> &'a str {
        self.value().unwrap_or(default)
    }

    /// Like [`Node::int`], falling back to `default` on any error.
    #[must_use]
    pub fn must_int(&self, default: i64) -> i64 {
        self.int().unwrap_or(default)
    }

    /// Like [`Node::float`], falling back to `default` on any error.
    #[must_use]
    pub fn must_float(&self, default: f64) -> f64 {
        self.float().unwrap_or(default)
    }

    /// Like [`Node::bool`], falling back to `default` on any error.
    ///
    /// ```rust
    /// use serde_ini::Node;
    ///
    /// assert!(Node::leaf("T").must_bool(false));
    /// assert!(Node::leaf("maybe").must_bool(true));
    /// ```
    #[must_use]
    pub fn must_bool(&self, default: bool) -> bool {
        self.bool().unwrap_or(default)
    }

    /// Like [`Node::duration`], falling back to `default` on any error.
    #[must_use]
    pub fn must_duration(&self, default: Duration) -> Duration {
        self.duration().unwrap_or(default)
    }

    /// Decodes this node into an existing value.
    ///
    /// Keys missing from the node, and keys with empty values, keep the value the
    /// destination already holds. Keys present in the node replace it; sections are
    /// merged key by key and maps keep entries the node does not mention. Fields
    /// marked `#[serde(skip)]` are never touched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::{Deserialize, Serialize};
    /// use serde_ini::load;
    ///
    /// #[derive(Serialize, Deserialize)]
    /// struct Limits { max: u32, min: u32 }
    ///
    /// let mut limits = Limits { max: 10, min: 1 };
    /// load("max = 99\nmin =").unwrap().mapto(&mut limits).unwrap();
    /// assert_eq!((limits.max, limits.min), (99, 1));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any decode error; the destination is left unchanged on failure.
    pub fn mapto<T>(&self, destination: &mut T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.is_empty() {
            return Ok(());
        }
        let kept = Content::capture(&*destination)?;
        let deserializer = crate::de::Deserializer::with_kept(self, &kept);
        // A full decode first, so a failure cannot leave a half-written destination.
        T::deserialize(deserializer)?;
        T::deserialize_in_place(deserializer, destination)
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        self.get(key)
    }
}

impl From<&str> for Node {
    fn from(data: &str) -> Self {
        Node::leaf(data)
    }
}

impl From<String> for Node {
    fn from(data: String) -> Self {
        Node::leaf(data)
    }
}

impl FromIterator<(String, Node)> for Node {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        Node {
            data: String::new(),
            children: Some(iter.into_iter().collect()),
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.children {
            None => serializer.serialize_str(&self.data),
            Some(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, node) in children {
                    map.serialize_entry(key, node)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar or a section of key/value pairs")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Node, E> {
                Ok(Node::leaf(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Node, E> {
                Ok(Node::leaf(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Node, E> {
                Ok(Node::leaf(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Node, E> {
                Ok(Node::leaf(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Node, E> {
                Ok(Node::leaf(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Node, E> {
                Ok(Node::leaf(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Node, E> {
                Ok(Node::default())
            }

            fn visit_none<E>(self) -> std::result::Result<Node, E> {
                Ok(Node::default())
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Node, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Node, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut node = Node::section();
                while let Some((key, value)) = map.next_entry::<String, Node>()? {
                    node.insert(key, value);
                }
                Ok(node)
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

/// Splits list text on commas, trimming each element. Empty text has no elements.
pub(crate) fn split_list(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(str::trim).collect()
}

pub(crate) fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::invalid_value(text, "boolean")),
    }
}

pub(crate) fn parse_i64(text: &str) -> Result<i64> {
    text.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::overflow(text, "i64"),
        _ => Error::invalid_value(text, "integer"),
    })
}

pub(crate) fn parse_u64(text: &str) -> Result<u64> {
    text.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => Error::overflow(text, "u64"),
        _ => Error::invalid_value(text, "unsigned integer"),
    })
}

/// Parses a float. A finite literal too large for `f64` is an overflow; only an
/// explicit `inf` or `infinity` may decode to infinity.
pub(crate) fn parse_f64(text: &str) -> Result<f64> {
    let value: f64 = text
        .parse()
        .map_err(|_| Error::invalid_value(text, "float"))?;
    if value.is_infinite() && !is_infinity_literal(text) {
        return Err(Error::overflow(text, "f64"));
    }
    Ok(value)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
