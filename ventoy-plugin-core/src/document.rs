// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The document model that configuration files are parsed into.
//!
//! Tokenizing is left to [`serde_json`]. This module only defines the tree that the tokens are collected into. Unlike
//! [`serde_json::Value`], a [`Node`] keeps every member of an object in declaration order, including duplicate keys,
//! so that sections are seen exactly as they were written.
//!
//! For example, `{"theme": {"gfxmode": "1024x768"}}` becomes an unnamed object node with a single child named
//! `theme`, which is itself an object holding one string child named `gfxmode`.

use core::fmt;

use alloc::{string::String, vec::Vec};
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Number;
use thiserror::Error;

/// An error that may result from parsing a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document is not well formed.
    #[error("Malformed document at line {line}, column {column}")]
    Syntax {
        /// The line at which parsing stopped, starting from 1.
        line: usize,

        /// The column at which parsing stopped, starting from 1.
        column: usize,
    },
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        Self::Syntax {
            line: e.line(),
            column: e.column(),
        }
    }
}

/// The type of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A map of named members.
    Object,

    /// An ordered list of unnamed elements.
    Array,

    /// A string.
    String,

    /// A number.
    Number,

    /// A boolean.
    Bool,

    /// `null`.
    Null,
}

impl NodeKind {
    /// Convert a [`NodeKind`] into an [`&str`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value held by a [`Node`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Members of an object, each of them named.
    Object(Vec<Node>),

    /// Elements of an array, none of them named.
    Array(Vec<Node>),

    /// A string.
    String(String),

    /// A number.
    Number(Number),

    /// A boolean.
    Bool(bool),

    /// `null`.
    Null,
}

impl Value {
    /// Returns the [`NodeKind`] of the value.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::String(_) => NodeKind::String,
            Self::Number(_) => NodeKind::Number,
            Self::Bool(_) => NodeKind::Bool,
            Self::Null => NodeKind::Null,
        }
    }
}

/// A single node of a [`Document`].
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// The key of the node, if it is a member of an object.
    name: Option<String>,

    /// The value of the node.
    value: Value,
}

impl Node {
    /// Constructs a new [`Node`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(name: Option<String>, value: Value) -> Self {
        Self { name, value }
    }

    /// The key of the node, if it is a member of an object.
    #[must_use = "Has no effect if the result is unused"]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The value of the node.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// The [`NodeKind`] of the node.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn kind(&self) -> NodeKind {
        self.value.kind()
    }

    /// The children of the node in document order.
    ///
    /// Scalars have no children, so this will be empty for anything but objects and arrays.
    #[must_use = "Has no effect if the result is unused"]
    pub fn children(&self) -> &[Self] {
        match &self.value {
            Value::Object(children) | Value::Array(children) => children,
            _ => &[],
        }
    }

    /// The string held by the node, if it is a string.
    #[must_use = "Has no effect if the result is unused"]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(str) => Some(str),
            _ => None,
        }
    }

    /// Finds the value of the first string child with the given key.
    ///
    /// Children with a matching key but a different type are passed over, so `{"a": 1, "a": "b"}` will
    /// yield `"b"` for `a`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.children()
            .iter()
            .filter(|x| x.name() == Some(key))
            .find_map(Self::as_str)
    }
}

/// A fully parsed configuration document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// The top level node of the document.
    root: Node,
}

impl Document {
    /// Parses a [`Document`] from a byte slice containing JSON.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the content is not valid UTF-8, is not well formed, is nested too deeply, or
    /// contains trailing characters after the top level value.
    pub fn parse(content: &[u8]) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_slice(content)?;
        Ok(Self {
            root: Node::new(None, value),
        })
    }

    /// The top level node of the document.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn root(&self) -> &Node {
        &self.root
    }
}

/// Collects [`serde`] tokens into a [`Value`].
struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.into()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut children = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            children.push(Node::new(None, value));
        }
        Ok(Value::Array(children))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut children = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(name) = map.next_key::<String>()? {
            let value = map.next_value::<Value>()?;
            children.push(Node::new(Some(name), value));
        }
        Ok(Value::Object(children))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}
