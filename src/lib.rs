//! # serde_ini
//!
//! A Serde-compatible mapper between two-level INI configuration text and typed Rust values.
//!
//! ## The Format
//!
//! ```text
//! ; comments start with ';' or '#'
//! name = demo
//! hosts = alpha, beta        # lists are comma separated
//!
//! [server]
//! port = 8080
//! timeout = 1m30s
//! ```
//!
//! Root-level keys come first, then `[section]` blocks of keys. Sections never
//! nest, so a typed value can be at most a record of records.
//!
//! ## Key Features
//!
//! - **Node tree**: [`load`] parses text into a [`Node`] with lookups that never
//!   fail on missing keys and typed accessors (`int`, `bool`, `duration`, `values`)
//! - **Serde Compatible**: decode into and dump from any `#[derive(Serialize, Deserialize)]` type
//! - **In-place decoding**: [`load_into`] and [`Node::mapto`] update an existing
//!   value, keeping whatever the text does not mention
//! - **Durations**: `std::time::Duration` fields read and write text like `10s` or `1m0s`
//! - **Comments**: field comments registered on [`IniOptions`] are written above each key
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ini::{from_str, to_string};
//! use std::time::Duration;
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     port: u16,
//!     timeout: Duration,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     hosts: Vec<String>,
//!     server: Server,
//! }
//!
//! let config = Config {
//!     name: "demo".to_string(),
//!     hosts: vec!["alpha".to_string(), "beta".to_string()],
//!     server: Server { port: 8080, timeout: Duration::from_secs(90) },
//! };
//!
//! let text = to_string(&config).unwrap();
//! assert_eq!(
//!     text,
//!     "name = demo\nhosts = alpha, beta\n\n[server]\nport = 8080\ntimeout = 1m30s\n"
//! );
//!
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ### Working with Nodes
//!
//! ```rust
//! use serde_ini::load;
//!
//! let root = load("[section1]\nSec1 = 10.9\nSec2 = 1,2,3,4").unwrap();
//! assert_eq!(root["section1"]["Sec1"].float().unwrap(), 10.9);
//! assert_eq!(root.get_path(["section1", "Sec2"]).ints().unwrap(), vec![1, 2, 3, 4]);
//! assert_eq!(root["section1"]["missing"].must_int(5), 5);
//! ```
//!
//! ### Updating Existing Values
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Limits { max: u32, min: u32 }
//!
//! let mut limits = Limits { max: 10, min: 1 };
//! serde_ini::load_into("max = 64", &mut limits).unwrap();
//! assert_eq!((limits.max, limits.min), (64, 1));
//! ```
//!
//! ## Field Metadata
//!
//! - rename a key with `#[serde(rename = "...")]`
//! - exclude a field with `#[serde(skip)]`
//! - attach comments with [`IniOptions::with_comments`]
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` level (file loads,
//! redeclared sections and keys, sections written). Install any subscriber to see them.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - dump and load a typed configuration
//! - **`macro.rs`** - building node trees with the `ini!` macro
//! - **`dynamic_nodes.rs`** - navigating a loaded file without a schema
//! - **`custom_options.rs`** - comments and list separators
//!
//! Run any example with: `cargo run --example <name>`

mod content;
pub mod de;
pub mod duration;
pub mod error;
pub mod macros;
pub mod node;
pub mod options;
pub mod parse;
pub mod ser;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use node::Node;
pub use options::IniOptions;
pub use ser::{to_node, Serializer};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Parses INI text into a [`Node`] tree.
///
/// # Examples
///
/// ```rust
/// use serde_ini::load;
///
/// let root = load("root1 = 1\n[section1]\nSec1 = 10.9").unwrap();
/// assert_eq!(root["root1"].int().unwrap(), 1);
/// assert!(root["section1"].is_section());
/// ```
///
/// # Errors
///
/// Returns [`Error::UnclosedSection`] or [`Error::MissingDelimiter`] for malformed lines.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn load(text: &str) -> Result<Node> {
    parse::read(text.as_bytes())
}

/// Reads and parses an INI file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, or any error from [`load`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading ini file");
    let file = File::open(path)?;
    parse::read(BufReader::new(file))
}

/// Parses INI text and decodes it into an existing value.
///
/// Keys the text does not mention, or leaves empty, keep their current value.
///
/// # Errors
///
/// Returns any parse or decode error; `destination` is unchanged on failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn load_into<T>(text: &str, destination: &mut T) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    load(text)?.mapto(destination)
}

/// Reads an INI file and decodes it into an existing value.
///
/// # Examples
///
/// ```rust,no_run
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Default)]
/// struct Config { port: u16 }
///
/// let mut config = Config { port: 80 };
/// serde_ini::load_file_into("app.ini", &mut config).unwrap();
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any parse or decode error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn load_file_into<P, T>(path: P, destination: &mut T) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize + DeserializeOwned,
{
    load_file(path)?.mapto(destination)
}

/// Serialize a record or string-keyed map to INI text.
///
/// # Examples
///
/// ```rust
/// use serde_ini::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedRoot`] for values that are neither records nor maps,
/// [`Error::UnsupportedElement`] for lists of non-scalars and
/// [`Error::NestingTooDeep`] for records nested more than one level.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, IniOptions::default())
}

/// Serialize a record or map to INI text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{to_string_with_options, IniOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct I { a: i32, b: i32 }
///
/// let options = IniOptions::new()
///     .with_comments("I", "a", "comment")
///     .with_comments("I", "b", "comment1; comment2");
/// assert_eq!(
///     to_string_with_options(&I { a: 0, b: 0 }, options).unwrap(),
///     "; comment\na = 0\n; comment1\n; comment2\nb = 0\n"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: IniOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize a record or map to a writer as INI text.
///
/// Nothing is written if serialization fails.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, IniOptions::default())
}

/// Serialize a record or map to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: IniOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Decode a `T` from a [`Node`] tree, borrowing strings from it where possible.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{from_node, load};
/// use std::collections::HashMap;
///
/// let root = load("[s]\na = x\nb = y").unwrap();
/// let section: HashMap<&str, &str> = from_node(&root["s"]).unwrap();
/// assert_eq!(section["b"], "y");
/// ```
///
/// # Errors
///
/// Returns an error if the tree does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_node<'a, T>(node: &'a Node) -> Result<T>
where
    T: Deserialize<'a>,
{
    T::deserialize(Deserializer::new(node))
}

/// Deserialize an instance of type `T` from INI text.
///
/// Missing keys follow serde rules: use `Option` or `#[serde(default)]` for
/// optional fields, or [`load_into`] to keep existing values.
///
/// # Examples
///
/// ```rust
/// use serde_ini::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is malformed or cannot be decoded to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_node(&load(s)?)
}

/// Deserialize an instance of type `T` from an I/O stream of INI text.
///
/// # Examples
///
/// ```rust
/// use serde_ini::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the text is malformed, or it cannot be
/// decoded to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_node(&parse::read(BufReader::new(reader))?)
}

/// Deserialize an instance of type `T` from bytes of INI text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, the text is malformed, or
/// it cannot be decoded to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}
