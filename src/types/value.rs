use indexmap::IndexMap;
use serde_json::Number;
use std::ops::{Deref, DerefMut};

use crate::Upload;

/// A variable value, for example `1`, `"Hello World!"` or a file.
///
/// Files are explicit variants, so finding them never requires probing the shape of an object.
/// A list where every element is a file should be built as [`Value::UploadList`], which is what
/// `From<Vec<Upload>>` produces; a [`Value::List`] may mix files with any other values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// `null`.
    Null,
    /// A number.
    Number(Number),
    /// A string.
    String(String),
    /// A boolean.
    Boolean(bool),
    /// A list of values of any kind.
    List(Vec<Value>),
    /// An object. Keys keep their insertion order.
    Object(IndexMap<String, Value>),
    /// A single file.
    Upload(Upload),
    /// A list of files.
    UploadList(Vec<Upload>),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl Value {
    /// Returns `true` if this value is a file or contains one at any depth.
    pub fn contains_upload(&self) -> bool {
        match self {
            Value::Upload(_) => true,
            Value::UploadList(files) => !files.is_empty(),
            Value::List(items) => items.iter().any(Value::contains_upload),
            Value::Object(map) => map.values().any(Value::contains_upload),
            Value::Null | Value::Number(_) | Value::String(_) | Value::Boolean(_) => false,
        }
    }
}

macro_rules! from_numbers {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n.into())
                }
            }
        )*
    };
}

from_numbers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite numbers become `null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<Upload> for Value {
    fn from(upload: Upload) -> Self {
        Value::Upload(upload)
    }
}

impl From<Vec<Upload>> for Value {
    fn from(uploads: Vec<Upload>) -> Self {
        Value::UploadList(uploads)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

/// Variables of an operation.
///
/// GraphQL variables are always an object at the top level. Entries keep their insertion order,
/// which is also the order in which files are numbered in a multipart request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variables(IndexMap<String, Value>);

impl Variables {
    /// Get the variables from a JSON value. Anything but an object yields empty variables.
    pub fn from_json(value: serde_json::Value) -> Self {
        match Value::from(value) {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Insert a variable, replacing any previous value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns `true` if any variable is or contains a file.
    pub fn contains_upload(&self) -> bool {
        self.0.values().any(Value::contains_upload)
    }

    /// Get the inner map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }
}

impl Deref for Variables {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Variables {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<IndexMap<String, Value>> for Variables {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
