//! A lossless in-memory copy of a serialized value.
//!
//! [`Node::mapto`](crate::Node::mapto) captures the destination's current value
//! as [`Content`] so that fields the source text does not mention can be handed
//! back unchanged. Nothing here goes through INI text: strings keep their commas
//! and padding, and `Some("")` stays distinct from `None`.

use crate::{Error, Result};
use serde::de::{self, Deserializer as _, IntoDeserializer};
use serde::ser::{self, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Content {
    Bool(bool),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    None,
    Some(Box<Content>),
    Unit,
    Newtype(Box<Content>),
    Seq(Vec<Content>),
    Map(Vec<(Content, Content)>),
    UnitVariant(&'static str),
    Variant(&'static str, Box<Content>),
}

impl Content {
    pub(crate) fn capture<T>(value: &T) -> Result<Content>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(ContentSerializer)
    }

    /// Entries of a record or map, looking through `Option` and newtype wrappers.
    pub(crate) fn entries(&self) -> Option<&[(Content, Content)]> {
        match self {
            Content::Map(entries) => Some(entries),
            Content::Some(inner) | Content::Newtype(inner) => inner.entries(),
            _ => None,
        }
    }

    pub(crate) fn as_str(&self) -> Option<&str> {
        match self {
            Content::String(text) => Some(text),
            _ => None,
        }
    }
}

/// Looks up the entry named `key`.
pub(crate) fn entry<'a>(entries: &'a [(Content, Content)], key: &str) -> Option<&'a Content> {
    entries
        .iter()
        .find(|(name, _)| name.as_str() == Some(key))
        .map(|(_, value)| value)
}

struct ContentSerializer;

impl ser::Serializer for ContentSerializer {
    type Ok = Content;
    type Error = Error;
    type SerializeSeq = SeqCollector;
    type SerializeTuple = SeqCollector;
    type SerializeTupleStruct = SeqCollector;
    type SerializeTupleVariant = SeqCollector;
    type SerializeMap = MapCollector;
    type SerializeStruct = MapCollector;
    type SerializeStructVariant = MapCollector;

    fn serialize_bool(self, v: bool) -> Result<Content> {
        Ok(Content::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Content> {
        Ok(Content::I64(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Content> {
        Ok(Content::I64(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Content> {
        Ok(Content::I64(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Content> {
        Ok(Content::I64(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Content> {
        Ok(Content::I128(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Content> {
        Ok(Content::U64(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Content> {
        Ok(Content::U64(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Content> {
        Ok(Content::U64(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Content> {
        Ok(Content::U64(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Content> {
        Ok(Content::U128(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Content> {
        Ok(Content::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Content> {
        Ok(Content::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<Content> {
        Ok(Content::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Content> {
        Ok(Content::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Content> {
        Ok(Content::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Content> {
        Ok(Content::None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Content>
    where
        T: ?Sized + Serialize,
    {
        Ok(Content::Some(Box::new(value.serialize(self)?)))
    }

    fn serialize_unit(self) -> Result<Content> {
        Ok(Content::Unit)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Content> {
        Ok(Content::Unit)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Content> {
        Ok(Content::UnitVariant(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Content>
    where
        T: ?Sized + Serialize,
    {
        Ok(Content::Newtype(Box::new(value.serialize(self)?)))
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Content>
    where
        T: ?Sized + Serialize,
    {
        Ok(Content::Variant(variant, Box::new(value.serialize(self)?)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCollector> {
        Ok(SeqCollector::new(None, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCollector> {
        Ok(SeqCollector::new(None, len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqCollector> {
        Ok(SeqCollector::new(None, len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqCollector> {
        Ok(SeqCollector::new(Some(variant), len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapCollector> {
        Ok(MapCollector::new(None, len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<MapCollector> {
        Ok(MapCollector::new(None, len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<MapCollector> {
        Ok(MapCollector::new(Some(variant), len))
    }
}

fn wrap(variant: Option<&'static str>, content: Content) -> Content {
    match variant {
        Some(name) => Content::Variant(name, Box::new(content)),
        None => content,
    }
}

struct SeqCollector {
    variant: Option<&'static str>,
    items: Vec<Content>,
}

impl SeqCollector {
    fn new(variant: Option<&'static str>, len: usize) -> Self {
        SeqCollector {
            variant,
            items: Vec::with_capacity(len),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ContentSerializer)?);
        Ok(())
    }

    fn finish(self) -> Content {
        wrap(self.variant, Content::Seq(self.items))
    }
}

impl ser::SerializeSeq for SeqCollector {
    type Ok = Content;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Content> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqCollector {
    type Ok = Content;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Content> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqCollector {
    type Ok = Content;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Content> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqCollector {
    type Ok = Content;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Content> {
        Ok(self.finish())
    }
}

struct MapCollector {
    variant: Option<&'static str>,
    entries: Vec<(Content, Content)>,
    pending_key: Option<Content>,
}

impl MapCollector {
    fn new(variant: Option<&'static str>, len: usize) -> Self {
        MapCollector {
            variant,
            entries: Vec::with_capacity(len),
            pending_key: None,
        }
    }

    fn field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(ContentSerializer)?;
        self.entries.push((Content::String(key.to_string()), value));
        Ok(())
    }

    fn finish(self) -> Content {
        wrap(self.variant, Content::Map(self.entries))
    }
}

impl ser::SerializeMap for MapCollector {
    type Ok = Content;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(key.serialize(ContentSerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.entries.push((key, value.serialize(ContentSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Content> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for MapCollector {
    type Ok = Content;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Content> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for MapCollector {
    type Ok = Content;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Content> {
        Ok(self.finish())
    }
}

/// Replays captured content into any `Deserialize` type.
#[derive(Clone, Copy)]
pub(crate) struct ContentDeserializer<'de> {
    content: &'de Content,
}

impl<'de> ContentDeserializer<'de> {
    pub(crate) fn new(content: &'de Content) -> Self {
        ContentDeserializer { content }
    }
}

impl<'de> IntoDeserializer<'de, Error> for ContentDeserializer<'de> {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de> de::Deserializer<'de> for ContentDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.content {
            Content::Bool(v) => visitor.visit_bool(*v),
            Content::I64(v) => visitor.visit_i64(*v),
            Content::U64(v) => visitor.visit_u64(*v),
            Content::I128(v) => visitor.visit_i128(*v),
            Content::U128(v) => visitor.visit_u128(*v),
            Content::F32(v) => visitor.visit_f32(*v),
            Content::F64(v) => visitor.visit_f64(*v),
            Content::Char(v) => visitor.visit_char(*v),
            Content::String(v) => visitor.visit_borrowed_str(v),
            Content::Bytes(v) => visitor.visit_borrowed_bytes(v),
            Content::None => visitor.visit_none(),
            Content::Some(inner) => visitor.visit_some(ContentDeserializer::new(inner)),
            Content::Unit => visitor.visit_unit(),
            Content::Newtype(inner) => visitor.visit_newtype_struct(ContentDeserializer::new(inner)),
            Content::Seq(items) => visitor.visit_seq(de::value::SeqDeserializer::<_, Error>::new(
                items.iter().map(ContentDeserializer::new),
            )),
            Content::Map(entries) => visitor.visit_map(de::value::MapDeserializer::<_, Error>::new(
                entries
                    .iter()
                    .map(|(k, v)| (ContentDeserializer::new(k), ContentDeserializer::new(v))),
            )),
            Content::UnitVariant(_) | Content::Variant(..) => visitor.visit_enum(self),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.content {
            Content::None | Content::Unit => visitor.visit_none(),
            Content::Some(inner) => visitor.visit_some(ContentDeserializer::new(inner)),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.content {
            Content::Newtype(inner) => visitor.visit_newtype_struct(ContentDeserializer::new(inner)),
            _ => visitor.visit_newtype_struct(self),
        }
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
        match self.content {
            Content::String(variant) => visitor.visit_enum(
                de::value::BorrowedStrDeserializer::<Error>::new(variant),
            ),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier
    }
}

impl<'de> de::EnumAccess<'de> for ContentDeserializer<'de> {
    type Error = Error;
    type Variant = VariantContent<'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let (name, inner) = match self.content {
            Content::UnitVariant(name) => (*name, None),
            Content::Variant(name, inner) => (*name, Some(&**inner)),
            other => {
                return Err(Error::custom(format!("expected an enum variant, found {other:?}")))
            }
        };
        let variant = seed.deserialize(de::value::BorrowedStrDeserializer::<Error>::new(name))?;
        Ok((variant, VariantContent { inner }))
    }
}

/// The payload of a captured variant; `None` for unit variants.
pub(crate) struct VariantContent<'de> {
    inner: Option<&'de Content>,
}

impl<'de> de::VariantAccess<'de> for VariantContent<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.inner {
            Some(inner) => seed.deserialize(ContentDeserializer::new(inner)),
            None => Err(Error::custom("expected a newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.inner {
            Some(inner) => ContentDeserializer::new(inner).deserialize_any(visitor),
            None => Err(Error::custom("expected a tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.inner {
            Some(inner) => ContentDeserializer::new(inner).deserialize_any(visitor),
            None => Err(Error::custom("expected a struct variant")),
        }
    }
}
