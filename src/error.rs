//! Error types for INI loading, decoding and dumping.
//!
//! ## Error Categories
//!
//! - **Parse errors**: an unterminated `[section` header or a line without `=`.
//!   Both abort the whole load and carry the offending line.
//! - **Decode errors**: values that do not parse, values that parse but do not fit
//!   the destination, containers where a scalar is required, non-string map keys
//!   and destination shapes the format cannot express.
//! - **Encode errors**: roots that are not records or maps, sequences of
//!   non-scalar elements and nesting deeper than two levels.
//! - **I/O errors**: reading files or writers, passed through unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{load, Error};
//!
//! let err = load("[broken").unwrap_err();
//! assert!(matches!(err, Error::UnclosedSection { line: 1, .. }));
//! assert!(err.to_string().contains("[broken"));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while loading, decoding or dumping INI text.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A `[` header line without the closing `]`
    #[error("Syntax error at line {line}: '[' should match with ']', {context}")]
    UnclosedSection { line: usize, context: String },

    /// A non-comment, non-header line without `=`
    #[error("Syntax error at line {line}: only `key = value` is supported, {context}")]
    MissingDelimiter { line: usize, context: String },

    /// Scalar text that does not follow the destination's grammar
    #[error("Invalid value {value:?}: expected {expected}")]
    InvalidValue { value: String, expected: String },

    /// Value parsed correctly but does not fit the destination
    #[error("{value} overflows {target}")]
    Overflow { value: String, target: String },

    /// A container where a scalar or list is required (or the reverse)
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Map destination whose key type is not string-like
    #[error("Unsupported map key type {0}: keys must be strings")]
    UnsupportedMapKey(String),

    /// Destination or source shape the format cannot express
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Dump root that is neither a record nor a map
    #[error("Unsupported root kind {0}: only records and maps can be dumped")]
    UnsupportedRoot(String),

    /// Sequence element that is not a scalar
    #[error("Unsupported sequence element type {0}: only scalars can be listed")]
    UnsupportedElement(String),

    /// Nested records or maps below the section level
    #[error("Nesting too deep: level {depth} exceeds the two levels a section file can express")]
    NestingTooDeep { depth: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates the error for a header line that never closes its bracket.
    pub fn unclosed_section(line: usize, context: &str) -> Self {
        Error::UnclosedSection {
            line,
            context: context.to_string(),
        }
    }

    /// Creates the error for a key/value line without `=`.
    pub fn missing_delimiter(line: usize, context: &str) -> Self {
        Error::MissingDelimiter {
            line,
            context: context.to_string(),
        }
    }

    /// Creates an invalid value error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::invalid_value("abc", "integer");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn invalid_value(value: &str, expected: &str) -> Self {
        Error::InvalidValue {
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates an overflow error for a value rejected by the destination's range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::overflow("300", "u8");
    /// assert_eq!(err.to_string(), "300 overflows u8");
    /// ```
    pub fn overflow(value: &str, target: &str) -> Self {
        Error::Overflow {
            value: value.to_string(),
            target: target.to_string(),
        }
    }

    /// Creates the error for a node of the wrong shape, such as a section where a
    /// scalar is needed.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates the error for a map whose key type is not string-like.
    pub fn unsupported_map_key(key: &str) -> Self {
        Error::UnsupportedMapKey(key.to_string())
    }

    /// Creates the error for a destination or source type INI cannot carry.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates the error for a dump root that is neither a record nor a map.
    pub fn unsupported_root(kind: &str) -> Self {
        Error::UnsupportedRoot(kind.to_string())
    }

    /// Creates the error for a list element that is not a string or number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::unsupported_element("bool");
    /// assert!(matches!(err, Error::UnsupportedElement(ref kind) if kind == "bool"));
    /// ```
    pub fn unsupported_element(kind: &str) -> Self {
        Error::UnsupportedElement(kind.to_string())
    }

    /// Creates the error for records nested below a section.
    pub fn nesting_too_deep(depth: usize) -> Self {
        Error::NestingTooDeep { depth }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors raised while reading the text format itself.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::UnclosedSection { .. } | Error::MissingDelimiter { .. }
        )
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
