//! INI serialization.
//!
//! This module provides the [`Serializer`] that dumps Rust records and
//! string-keyed maps as INI text.
//!
//! ## Overview
//!
//! A value is first collected into an intermediate [`Item`] tree, then written
//! in two passes per level:
//!
//! - **Scalars first**: strings, numbers, booleans, durations and sequences are
//!   written as `key = value` lines in declaration order.
//! - **Sections after**: nested records and maps open a `[name]` section, even
//!   when they were declared before the scalars.
//! - **Blank lines**: a section is preceded by a blank line only when something
//!   was already written at its level.
//! - **Depth**: the root is level 1 and sections are level 2. Anything deeper is
//!   [`Error::NestingTooDeep`].
//!
//! ## Usage
//!
//! ```rust
//! use serde::Serialize;
//! use serde_ini::to_string;
//!
//! #[derive(Serialize)]
//! struct Database { host: String, ports: Vec<u16> }
//!
//! #[derive(Serialize)]
//! struct Config { database: Database, debug: bool }
//!
//! let config = Config {
//!     database: Database { host: "localhost".into(), ports: vec![5432, 5433] },
//!     debug: true,
//! };
//! assert_eq!(
//!     to_string(&config).unwrap(),
//!     "debug = true\n\n[database]\nhost = localhost\nports = 5432, 5433\n"
//! );
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde::Serialize;
//! use serde_ini::{IniOptions, Serializer};
//! use std::collections::BTreeMap;
//!
//! let mut serializer = Serializer::new(IniOptions::new());
//! let map = BTreeMap::from([("a", 1), ("b", 2)]);
//! map.serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), "a = 1\nb = 2\n");
//! ```

use crate::{duration, Error, IniOptions, Node, Result};
use serde::ser::{Impossible, SerializeMap as _, Serializer as _};
use serde::{ser, Serialize};
use std::fmt::Write;
use std::time::Duration;

/// Deepest level the text format can express: root keys, then sections.
const MAX_DEPTH: usize = 2;

/// The INI serializer.
///
/// Only records and maps can be serialized at the root; everything else is
/// [`Error::UnsupportedRoot`].
pub struct Serializer {
    output: String,
    options: IniOptions,
}

impl Serializer {
    pub fn new(options: IniOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Collects a scalar root with the item serializer so the error names its kind.
    fn reject(&self, item: Result<Item>) -> Result<()> {
        Err(Error::unsupported_root(item?.kind()))
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = RootSerializer<'a>;
    type SerializeStruct = RootSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.reject(ItemSerializer::new(&self.options).serialize_bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.reject(ItemSerializer::new(&self.options).serialize_i64(v))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.reject(ItemSerializer::new(&self.options).serialize_u64(v))
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.reject(ItemSerializer::new(&self.options).serialize_f64(v))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.reject(ItemSerializer::new(&self.options).serialize_char(v))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.reject(ItemSerializer::new(&self.options).serialize_str(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Error::unsupported_root("sequence"))
    }

    fn serialize_none(self) -> Result<()> {
        Err(Error::unsupported_root("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Err(Error::unsupported_root("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(Error::unsupported_root("enum"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_root("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_root("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_root("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_root("tuple"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_root("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        let Serializer { output, options } = self;
        Ok(RootSerializer {
            output,
            section: SectionSerializer::new(options, None),
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        let Serializer { output, options } = self;
        Ok(RootSerializer {
            output,
            section: SectionSerializer::new(options, Some(name)),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_root("enum"))
    }
}

/// Collects the root record or map, then writes it on `end`.
pub struct RootSerializer<'a> {
    output: &'a mut String,
    section: SectionSerializer<'a>,
}

impl RootSerializer<'_> {
    fn finish(self) -> Result<()> {
        let options = self.section.options;
        match ser::SerializeMap::end(self.section)? {
            Item::Section(section) => write_section(self.output, &section, 1, options),
            other => Err(Error::unsupported_root(other.kind())),
        }
    }
}

impl ser::SerializeMap for RootSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.section.serialize_key(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.section.serialize_value(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStruct for RootSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.section, key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Shape of a serialized value before it is written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Item {
    /// `None` and unit values; never written.
    Absent,
    /// Strings, chars and unit variants. The only kind allowed as a map key.
    Text(String),
    /// Numbers and durations in their canonical text.
    Scalar(String),
    /// Booleans are scalars that cannot be listed.
    Bool(bool),
    List(Vec<String>),
    Section(Section),
}

impl Item {
    fn kind(&self) -> &'static str {
        match self {
            Item::Absent => "none",
            Item::Text(_) => "string",
            Item::Scalar(_) => "scalar",
            Item::Bool(_) => "bool",
            Item::List(_) => "sequence",
            Item::Section(_) => "section",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Section {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    key: String,
    comments: Vec<String>,
    item: Item,
}

/// Serializes any value into an [`Item`].
pub(crate) struct ItemSerializer<'a> {
    options: &'a IniOptions,
}

impl<'a> ItemSerializer<'a> {
    pub(crate) fn new(options: &'a IniOptions) -> Self {
        ItemSerializer { options }
    }
}

fn data_variant(name: &str, variant: &str) -> Error {
    Error::unsupported_type(&format!("enum variant {name}::{variant} carries data"))
}

impl<'a> ser::Serializer for ItemSerializer<'a> {
    type Ok = Item;
    type Error = Error;

    type SerializeSeq = ListSerializer;
    type SerializeTuple = ListSerializer;
    type SerializeTupleStruct = ListSerializer;
    type SerializeTupleVariant = Impossible<Item, Error>;
    type SerializeMap = SectionSerializer<'a>;
    type SerializeStruct = SectionSerializer<'a>;
    type SerializeStructVariant = Impossible<Item, Error>;

    fn serialize_bool(self, v: bool) -> Result<Item> {
        Ok(Item::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Item> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Item> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Item> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Item> {
        Ok(Item::Scalar(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Item> {
        Ok(Item::Scalar(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Item> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Item> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Item> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Item> {
        Ok(Item::Scalar(v.to_string()))
    }

    fn serialize_u128(self, v: u128) -> Result<Item> {
        Ok(Item::Scalar(v.to_string()))
    }

    // f32 keeps its own shortest representation; widening would print 0.1 as 0.10000000149011612.
    fn serialize_f32(self, v: f32) -> Result<Item> {
        Ok(Item::Scalar(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> Result<Item> {
        Ok(Item::Scalar(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Item> {
        Ok(Item::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Item> {
        Ok(Item::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Item> {
        Ok(Item::List(v.iter().map(u8::to_string).collect()))
    }

    fn serialize_none(self) -> Result<Item> {
        Ok(Item::Absent)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Item>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Item> {
        Ok(Item::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Item> {
        Ok(Item::Absent)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Item> {
        Ok(Item::Text(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Item>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Item>
    where
        T: ?Sized + Serialize,
    {
        Err(data_variant(name, variant))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ListSerializer> {
        Ok(ListSerializer::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<ListSerializer> {
        Ok(ListSerializer::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<ListSerializer> {
        Ok(ListSerializer::new(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(data_variant(name, variant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SectionSerializer<'a>> {
        Ok(SectionSerializer::new(self.options, None))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SectionSerializer<'a>> {
        Ok(SectionSerializer::new(self.options, Some(name)))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(data_variant(name, variant))
    }
}

/// Collects sequence elements. Only strings and numeric scalars can be listed.
pub(crate) struct ListSerializer {
    elements: Vec<String>,
}

impl ListSerializer {
    fn new(capacity: usize) -> Self {
        ListSerializer {
            elements: Vec::with_capacity(capacity),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        // Elements never reach the comment lookup, so default options are enough.
        let options = IniOptions::default();
        match value.serialize(ItemSerializer::new(&options))? {
            Item::Text(text) | Item::Scalar(text) => {
                self.elements.push(text);
                Ok(())
            }
            other => Err(Error::unsupported_element(other.kind())),
        }
    }
}

impl ser::SerializeSeq for ListSerializer {
    type Ok = Item;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Item> {
        Ok(Item::List(self.elements))
    }
}

impl ser::SerializeTuple for ListSerializer {
    type Ok = Item;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Item> {
        Ok(Item::List(self.elements))
    }
}

impl ser::SerializeTupleStruct for ListSerializer {
    type Ok = Item;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Item> {
        Ok(Item::List(self.elements))
    }
}

/// Collects the entries of a record or map.
///
/// Records carry their serde name so field comments can be looked up, and so
/// `std::time::Duration` (a record named `Duration` with `secs` and `nanos`)
/// collapses back into duration text.
pub(crate) struct SectionSerializer<'a> {
    options: &'a IniOptions,
    type_name: Option<&'static str>,
    entries: Vec<Entry>,
    pending_key: Option<String>,
}

impl<'a> SectionSerializer<'a> {
    fn new(options: &'a IniOptions, type_name: Option<&'static str>) -> Self {
        SectionSerializer {
            options,
            type_name,
            entries: Vec::new(),
            pending_key: None,
        }
    }

    fn push(&mut self, key: String, comments: Vec<String>, item: Item) {
        if item != Item::Absent {
            self.entries.push(Entry {
                key,
                comments,
                item,
            });
        }
    }

    fn as_duration(&self) -> Option<Duration> {
        let [secs, nanos] = self.entries.as_slice() else {
            return None;
        };
        match (secs, nanos) {
            (
                Entry {
                    key: secs_key,
                    item: Item::Scalar(secs),
                    ..
                },
                Entry {
                    key: nanos_key,
                    item: Item::Scalar(nanos),
                    ..
                },
            ) if secs_key == "secs" && nanos_key == "nanos" => {
                Some(Duration::new(secs.parse().ok()?, nanos.parse().ok()?))
            }
            _ => None,
        }
    }

    fn finish(self) -> Item {
        if self.type_name == Some("Duration") {
            if let Some(duration) = self.as_duration() {
                return Item::Scalar(duration::format(duration));
            }
        }
        Item::Section(Section {
            entries: self.entries,
        })
    }
}

impl ser::SerializeMap for SectionSerializer<'_> {
    type Ok = Item;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        let item = value.serialize(ItemSerializer::new(self.options))?;
        self.push(key, Vec::new(), item);
        Ok(())
    }

    fn end(self) -> Result<Item> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SectionSerializer<'_> {
    type Ok = Item;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let item = value.serialize(ItemSerializer::new(self.options))?;
        let comments = match self.type_name {
            Some(type_name) => self.options.comments_for(type_name, key).to_vec(),
            None => Vec::new(),
        };
        self.push(key.to_string(), comments, item);
        Ok(())
    }

    fn end(self) -> Result<Item> {
        Ok(self.finish())
    }
}

/// Accepts string-like map keys and names every other key type in its error.
struct KeySerializer;

macro_rules! reject_key {
    ($($method:ident($ty:ty) => $kind:literal),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<String> {
                Err(Error::unsupported_map_key($kind))
            }
        )*
    };
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    reject_key! {
        serialize_bool(bool) => "bool",
        serialize_i8(i8) => "i8",
        serialize_i16(i16) => "i16",
        serialize_i32(i32) => "i32",
        serialize_i64(i64) => "i64",
        serialize_i128(i128) => "i128",
        serialize_u8(u8) => "u8",
        serialize_u16(u16) => "u16",
        serialize_u32(u32) => "u32",
        serialize_u64(u64) => "u64",
        serialize_u128(u128) => "u128",
        serialize_f32(f32) => "f32",
        serialize_f64(f64) => "f64",
        serialize_bytes(&[u8]) => "bytes",
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_none(self) -> Result<String> {
        Err(Error::unsupported_map_key("option"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_map_key("option"))
    }

    fn serialize_unit(self) -> Result<String> {
        Err(Error::unsupported_map_key("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        Err(Error::unsupported_map_key(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_map_key(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_map_key("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_map_key("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_map_key(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_map_key(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_map_key("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::unsupported_map_key(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_map_key(name))
    }
}

fn write_comments(output: &mut String, comments: &[String]) {
    for comment in comments {
        let _ = writeln!(output, "; {}", comment);
    }
}

fn write_section(
    output: &mut String,
    section: &Section,
    depth: usize,
    options: &IniOptions,
) -> Result<()> {
    let mut written = false;

    for entry in &section.entries {
        let value = match &entry.item {
            Item::Text(text) | Item::Scalar(text) => text.clone(),
            Item::Bool(flag) => flag.to_string(),
            Item::List(elements) => elements.join(&options.list_separator),
            Item::Section(_) | Item::Absent => continue,
        };
        write_comments(output, &entry.comments);
        if value.is_empty() {
            let _ = writeln!(output, "{} =", entry.key);
        } else {
            let _ = writeln!(output, "{} = {}", entry.key, value);
        }
        written = true;
    }

    for entry in &section.entries {
        let Item::Section(nested) = &entry.item else {
            continue;
        };
        if depth + 1 > MAX_DEPTH {
            return Err(Error::nesting_too_deep(depth + 1));
        }
        tracing::trace!(section = %entry.key, depth = depth + 1, "writing section");
        if written {
            output.push('\n');
        }
        write_comments(output, &entry.comments);
        let _ = writeln!(output, "[{}]", entry.key);
        write_section(output, nested, depth + 1, options)?;
        written = true;
    }

    Ok(())
}

fn section_to_node(section: &Section, depth: usize) -> Result<Node> {
    let mut node = Node::section();
    for entry in &section.entries {
        node.insert(entry.key.clone(), item_to_node(&entry.item, depth + 1)?);
    }
    Ok(node)
}

fn item_to_node(item: &Item, depth: usize) -> Result<Node> {
    match item {
        Item::Absent => Ok(Node::default()),
        Item::Text(text) | Item::Scalar(text) => Ok(Node::leaf(text.as_str())),
        Item::Bool(flag) => Ok(Node::leaf(flag.to_string())),
        Item::List(elements) => Ok(Node::leaf(elements.join(","))),
        Item::Section(section) => {
            if depth > MAX_DEPTH {
                return Err(Error::nesting_too_deep(depth));
            }
            section_to_node(section, depth)
        }
    }
}

/// Encodes a record or map into a [`Node`] tree, with the same rules as the text dump.
///
/// # Errors
///
/// Returns [`Error::UnsupportedRoot`] for anything but a record or map, and any
/// error the text dump would report.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Limits { max: u32, tags: Vec<String> }
///
/// let node = serde_ini::to_node(&Limits { max: 5, tags: vec!["a".into(), "b".into()] }).unwrap();
/// assert_eq!(node["max"].int().unwrap(), 5);
/// assert_eq!(node["tags"].values().unwrap(), vec!["a", "b"]);
/// ```
pub fn to_node<T>(value: &T) -> Result<Node>
where
    T: ?Sized + Serialize,
{
    let options = IniOptions::default();
    match value.serialize(ItemSerializer::new(&options))? {
        Item::Section(section) => section_to_node(&section, 1),
        other => Err(Error::unsupported_root(other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_string;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Inner {
        a: i32,
    }

    #[test]
    fn test_serialize_struct_scalars() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: f64,
            label: String,
            on: bool,
        }

        let point = Point {
            x: 1,
            y: 2.5,
            label: "origin".to_string(),
            on: false,
        };
        assert_eq!(
            to_string(&point).unwrap(),
            "x = 1\ny = 2.5\nlabel = origin\non = false\n"
        );
    }

    #[test]
    fn test_sections_after_scalars() {
        #[derive(Serialize)]
        struct Mixed {
            first: Inner,
            name: &'static str,
            second: Inner,
        }

        let mixed = Mixed {
            first: Inner { a: 1 },
            name: "n",
            second: Inner { a: 2 },
        };
        assert_eq!(
            to_string(&mixed).unwrap(),
            "name = n\n\n[first]\na = 1\n\n[second]\na = 2\n"
        );
    }

    #[test]
    fn test_no_leading_blank_line() {
        #[derive(Serialize)]
        struct OnlySection {
            only: Inner,
        }

        assert_eq!(
            to_string(&OnlySection { only: Inner { a: 3 } }).unwrap(),
            "[only]\na = 3\n"
        );
    }

    #[test]
    fn test_none_and_empty() {
        #[derive(Serialize)]
        struct Sparse {
            missing: Option<i32>,
            present: Option<i32>,
            blank: String,
            empty: Vec<i32>,
        }

        let sparse = Sparse {
            missing: None,
            present: Some(4),
            blank: String::new(),
            empty: Vec::new(),
        };
        assert_eq!(
            to_string(&sparse).unwrap(),
            "present = 4\nblank =\nempty =\n"
        );
    }

    #[test]
    fn test_duration_field() {
        #[derive(Serialize)]
        struct Timeouts {
            read: Duration,
            backoff: Vec<Duration>,
        }

        let timeouts = Timeouts {
            read: Duration::from_secs(60),
            backoff: vec![Duration::from_millis(100), Duration::from_secs(2)],
        };
        assert_eq!(
            to_string(&timeouts).unwrap(),
            "read = 1m0s\nbackoff = 100ms, 2s\n"
        );
    }

    #[test]
    fn test_map_keys_must_be_strings() {
        let map = BTreeMap::from([(1, 2)]);
        match to_string(&map).unwrap_err() {
            Error::UnsupportedMapKey(kind) => assert_eq!(kind, "i32"),
            other => panic!("Expected unsupported map key, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_roots() {
        assert!(matches!(to_string(&5), Err(Error::UnsupportedRoot(_))));
        assert!(matches!(to_string(&vec![1, 2]), Err(Error::UnsupportedRoot(_))));
        assert!(matches!(to_string("text"), Err(Error::UnsupportedRoot(_))));
        assert!(matches!(
            to_string(&Duration::from_secs(1)),
            Err(Error::UnsupportedRoot(_))
        ));
    }

    #[test]
    fn test_list_elements_must_be_scalars() {
        #[derive(Serialize)]
        struct Grid {
            rows: Vec<Vec<i32>>,
        }

        match to_string(&Grid { rows: vec![vec![1]] }).unwrap_err() {
            Error::UnsupportedElement(kind) => assert_eq!(kind, "sequence"),
            other => panic!("Expected unsupported element, got {other:?}"),
        }
    }

    #[test]
    fn test_nesting_too_deep() {
        #[derive(Serialize)]
        struct Middle {
            inner: Inner,
        }
        #[derive(Serialize)]
        struct Outer {
            middle: Middle,
        }

        let outer = Outer {
            middle: Middle {
                inner: Inner { a: 1 },
            },
        };
        assert!(matches!(
            to_string(&outer),
            Err(Error::NestingTooDeep { depth: 3 })
        ));
        assert!(to_node(&outer).is_err());
    }

    #[test]
    fn test_data_enum_rejected() {
        #[derive(Serialize)]
        enum Shape {
            Circle(f64),
        }
        #[derive(Serialize)]
        struct Drawing {
            shape: Shape,
        }

        assert!(matches!(
            to_string(&Drawing {
                shape: Shape::Circle(1.0)
            }),
            Err(Error::UnsupportedType(_))
        ));
    }
}
