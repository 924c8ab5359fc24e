//! INI deserialization.
//!
//! This module provides the [`Deserializer`] that projects a loaded [`Node`]
//! tree onto Rust types implementing `Deserialize`.
//!
//! ## Overview
//!
//! | Destination | Source node |
//! |-------------|-------------|
//! | `bool`, integers, floats, `char`, `String` | leaf text, parsed with the leaf grammar |
//! | `std::time::Duration` | leaf text, parsed as a [duration](crate::duration) |
//! | `Vec<T>`, tuples, arrays | leaf text split on commas; each element decoded as a leaf |
//! | structs | section; missing and empty children are skipped |
//! | maps with string keys | section; every child becomes an entry |
//! | `Option<T>` | `None` for the empty node |
//! | unit enum variants | leaf text naming the variant |
//! | [`Node`], `serde_json::Value` | the raw tree: leaves as strings, sections as maps |
//!
//! Integers are parsed as 64-bit values and then narrowed, so `"300"` into a `u8`
//! is an [`Error::Overflow`] rather than a syntax error.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_ini::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Section { hosts: Vec<String>, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { name: String, server: Section }
//!
//! let config: Config = from_str("name = demo\n[server]\nhosts = a, b\nport = 80").unwrap();
//! assert_eq!(config.server.hosts, vec!["a", "b"]);
//! assert_eq!(config.server.port, 80);
//! ```

use crate::content::{entry, Content, ContentDeserializer};
use crate::node::{parse_bool, parse_f64, parse_i64, parse_u64, split_list};
use crate::{duration, Error, Node, Result};
use indexmap::IndexMap;
use serde::de::{self, Deserializer as _};
use std::num::IntErrorKind;

/// The INI deserializer.
///
/// Borrows a [`Node`] and hands out its text without copying. Created via
/// [`Deserializer::new`].
#[derive(Clone, Copy, Debug)]
pub struct Deserializer<'de> {
    data: &'de str,
    children: Option<&'de IndexMap<String, Node>>,
    kept: Option<&'de Content>,
}

impl<'de> Deserializer<'de> {
    pub fn new(node: &'de Node) -> Self {
        Deserializer {
            data: node.data(),
            children: node.children(),
            kept: None,
        }
    }

    /// Decodes on top of `kept`, the destination's current value.
    ///
    /// Sections then skip empty children, and record fields or map entries the
    /// node does not mention are replayed from `kept` unchanged.
    pub(crate) fn with_kept(node: &'de Node, kept: &'de Content) -> Self {
        Deserializer {
            kept: Some(kept),
            ..Deserializer::new(node)
        }
    }

    /// A leaf holding one element of a comma-separated list.
    fn token(data: &'de str) -> Self {
        Deserializer {
            data,
            children: None,
            kept: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty() && self.children.is_none()
    }

    fn scalar(&self) -> Result<&'de str> {
        match self.children {
            Some(_) => Err(Error::type_mismatch("scalar", "section")),
            None => Ok(self.data),
        }
    }

    fn parse_f64(&self) -> Result<f64> {
        parse_f64(self.scalar()?)
    }
}

macro_rules! deserialize_signed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let text = self.scalar()?;
                let value = <$ty>::try_from(parse_i64(text)?)
                    .map_err(|_| Error::overflow(text, stringify!($ty)))?;
                visitor.$visit(value)
            }
        )*
    };
}

macro_rules! deserialize_unsigned {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let text = self.scalar()?;
                let value = <$ty>::try_from(parse_u64(text)?)
                    .map_err(|_| Error::overflow(text, stringify!($ty)))?;
                visitor.$visit(value)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.children {
            Some(_) => visitor.visit_map(MapDeserializer::new(self, false)),
            None => visitor.visit_borrowed_str(self.data),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(parse_bool(self.scalar()?)?)
    }

    deserialize_signed! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
    }

    deserialize_unsigned! {
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.scalar()?;
        let value = text.parse::<i128>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::overflow(text, "i128"),
            _ => Error::invalid_value(text, "128-bit integer"),
        })?;
        visitor.visit_i128(value)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.scalar()?;
        let value = text.parse::<u128>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow => Error::overflow(text, "u128"),
            _ => Error::invalid_value(text, "unsigned 128-bit integer"),
        })?;
        visitor.visit_u128(value)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.scalar()?;
        let value = match parse_f64(text) {
            Err(Error::Overflow { .. }) => return Err(Error::overflow(text, "f32")),
            parsed => parsed?,
        };
        if value.is_finite() && value.abs() > f64::from(f32::MAX) {
            return Err(Error::overflow(text, "f32"));
        }
        visitor.visit_f32(value as f32)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(self.parse_f64()?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.scalar()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(Error::invalid_value(text, "single character")),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.scalar()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.scalar()?.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.children.is_some() {
            return Err(Error::type_mismatch("list", "section"));
        }
        visitor.visit_seq(SeqDeserializer::new(split_list(self.data)))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(MapDeserializer::new(self, false))
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if name == "Duration" && fields == ["secs", "nanos"] {
            let value = duration::parse(self.scalar()?)?;
            let parts = [
                ("secs", value.as_secs()),
                ("nanos", u64::from(value.subsec_nanos())),
            ];
            return visitor.visit_map(de::value::MapDeserializer::<_, Error>::new(
                parts.into_iter(),
            ));
        }
        visitor.visit_map(MapDeserializer::new(self, true))
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.children {
            Some(_) => Err(Error::unsupported_type(&format!(
                "enum {name} cannot be read from a section"
            ))),
            None => visitor.visit_enum(EnumDeserializer::new(self.data)),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer<'de> {
    iter: std::vec::IntoIter<&'de str>,
}

impl<'de> SeqDeserializer<'de> {
    fn new(tokens: Vec<&'de str>) -> Self {
        SeqDeserializer {
            iter: tokens.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(token) => seed.deserialize(Deserializer::token(token)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Walks the children of a section. Records skip empty children so the
/// destination's defaults apply; maps keep them.
///
/// When decoding on top of a kept value, entries the section does not mention
/// follow the section's own children.
struct MapDeserializer<'de> {
    iter: Option<indexmap::map::Iter<'de, String, Node>>,
    skip_empty: bool,
    kept: &'de [(Content, Content)],
    kept_iter: std::slice::Iter<'de, (Content, Content)>,
    seen: Vec<&'de str>,
    value: Option<Pending<'de>>,
}

enum Pending<'de> {
    Source(Deserializer<'de>),
    Kept(&'de Content),
}

impl<'de> MapDeserializer<'de> {
    fn new(parent: Deserializer<'de>, skip_empty: bool) -> Self {
        let kept = parent.kept.and_then(Content::entries).unwrap_or(&[]);
        MapDeserializer {
            iter: parent.children.map(IndexMap::iter),
            skip_empty: skip_empty || parent.kept.is_some(),
            kept,
            kept_iter: kept.iter(),
            seen: Vec::new(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if let Some(iter) = self.iter.as_mut() {
            for (key, node) in iter.by_ref() {
                if self.skip_empty && node.is_empty() {
                    continue;
                }
                let child = match entry(self.kept, key) {
                    Some(kept) => Deserializer::with_kept(node, kept),
                    None => Deserializer::new(node),
                };
                self.seen.push(key.as_str());
                self.value = Some(Pending::Source(child));
                return seed.deserialize(KeyDeserializer::new(key)).map(Some);
            }
        }
        for (key, kept) in self.kept_iter.by_ref() {
            if key.as_str().is_some_and(|name| self.seen.contains(&name)) {
                continue;
            }
            self.value = Some(Pending::Kept(kept));
            return seed.deserialize(ContentDeserializer::new(key)).map(Some);
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(Pending::Source(child)) => seed.deserialize(child),
            Some(Pending::Kept(kept)) => seed.deserialize(ContentDeserializer::new(kept)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }
}

/// Map keys are section and field names; only string-like destinations accept them.
struct KeyDeserializer<'de> {
    key: &'de str,
}

impl<'de> KeyDeserializer<'de> {
    fn new(key: &'de str) -> Self {
        KeyDeserializer { key }
    }
}

macro_rules! reject_key {
    ($($method:ident => $kind:literal),* $(,)?) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                Err(Error::unsupported_map_key($kind))
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.key)
    }

    reject_key! {
        deserialize_bool => "bool",
        deserialize_i8 => "i8",
        deserialize_i16 => "i16",
        deserialize_i32 => "i32",
        deserialize_i64 => "i64",
        deserialize_i128 => "i128",
        deserialize_u8 => "u8",
        deserialize_u16 => "u16",
        deserialize_u32 => "u32",
        deserialize_u64 => "u64",
        deserialize_u128 => "u128",
        deserialize_f32 => "f32",
        deserialize_f64 => "f64",
        deserialize_option => "option",
        deserialize_unit => "unit",
        deserialize_seq => "sequence",
        deserialize_map => "map",
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Deserializer::token(self.key).deserialize_char(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.key)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.key)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.key.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_map_key(name))
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_map_key("tuple"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_map_key(name))
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_map_key(name))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(EnumDeserializer::new(self.key))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.key)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Unit variants only: the leaf text names the variant.
struct EnumDeserializer<'de> {
    variant: &'de str,
}

impl<'de> EnumDeserializer<'de> {
    fn new(variant: &'de str) -> Self {
        EnumDeserializer { variant }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(de::value::BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((variant, VariantDeserializer))
    }
}

struct VariantDeserializer;

impl VariantDeserializer {
    fn data_variant() -> Error {
        Error::unsupported_type("enum variants with data cannot be read from INI text")
    }
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, _seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        Err(Self::data_variant())
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::data_variant())
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::data_variant())
    }
}
