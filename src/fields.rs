//! Ordered field bags and the typed views layered on top of them.
//!
//! Every model and every request bag in this crate is a [`Fields`] map from
//! JSON key to raw [`serde_json::Value`]. Typed accessors decode on read and
//! encode on write; nothing is cached, so keys the client does not know about
//! are carried through untouched.

use crate::errors::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Insertion-ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ApiError::Deserialization(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Decodes `key`. Absent keys and explicit `null` read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ApiError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some).map_err(|e| {
                ApiError::Deserialization(format!("field `{}`: {}", key, e))
            }),
        }
    }

    /// Decodes `key`, failing with [`ApiError::MissingArgument`] when unset.
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, ApiError> {
        self.get(key)?
            .ok_or_else(|| ApiError::MissingArgument(key.to_string()))
    }

    /// Encodes `value` under `key`, replacing any previous value in place.
    ///
    /// A value that cannot be represented as JSON removes the key instead.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> &mut Self {
        match serde_json::to_value(value) {
            Ok(encoded) => {
                self.0.insert(key.to_string(), encoded);
            }
            Err(e) => {
                tracing::warn!(field = key, error = %e, "Dropping field that failed to encode");
                self.0.remove(key);
            }
        }
        self
    }

    pub fn set_raw(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        // shift_remove keeps the order of the remaining keys
        self.0.shift_remove(key)
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// True when `key` holds a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        !matches!(self.0.get(key), None | Some(Value::Null))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        fields.into_value()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Schema-conformance check: decode everything that is declared.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

macro_rules! leaf_validate {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate(&self) -> Result<(), ApiError> {
                    Ok(())
                }
            }
        )+
    };
}

leaf_validate!(
    String,
    bool,
    f64,
    i64,
    u32,
    u64,
    Value,
    Map<String, Value>,
    DateTime<Utc>,
    NaiveDate,
);

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ApiError> {
        for (idx, item) in self.iter().enumerate() {
            item.validate().map_err(|e| ApiError::WithContext {
                source: Box::new(e),
                context: format!("item {}", idx),
            })?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ApiError> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

/// Declares a record backed by a [`Fields`] bag.
///
/// Each entry `"key" => getter, setter: Type;` produces a decoding getter
/// returning `Result<Option<Type>, ApiError>` and a chaining setter. The
/// generated `validate` decodes every declared key and recurses into nested
/// records.
macro_rules! model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $key:literal => $get:ident, $set:ident: $ty:ty;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            fields: $crate::fields::Fields,
        }

        impl $name {
            /// JSON keys with a typed accessor.
            pub const KNOWN_FIELDS: &'static [&'static str] = &[$($key),*];

            pub fn new() -> Self {
                Self::default()
            }

            pub fn from_fields(fields: $crate::fields::Fields) -> Self {
                Self { fields }
            }

            pub fn from_value(value: serde_json::Value) -> Result<Self, $crate::errors::ApiError> {
                $crate::fields::Fields::from_value(value).map(Self::from_fields)
            }

            pub fn fields(&self) -> &$crate::fields::Fields {
                &self.fields
            }

            pub fn fields_mut(&mut self) -> &mut $crate::fields::Fields {
                &mut self.fields
            }

            pub fn into_fields(self) -> $crate::fields::Fields {
                self.fields
            }

            /// Keys present in the record that have no typed accessor.
            pub fn unknown_fields(&self) -> Vec<&str> {
                self.fields
                    .keys()
                    .filter(|key| !Self::KNOWN_FIELDS.contains(key))
                    .collect()
            }

            $(
                $(#[$fmeta])*
                pub fn $get(&self) -> Result<Option<$ty>, $crate::errors::ApiError> {
                    self.fields.get($key)
                }

                pub fn $set(&mut self, value: impl Into<$ty>) -> &mut Self {
                    let value: $ty = value.into();
                    self.fields.set($key, value);
                    self
                }
            )*

            pub fn validate(&self) -> Result<(), $crate::errors::ApiError> {
                use $crate::errors::ResultExt;
                use $crate::fields::Validate;
                $(
                    let value: Option<$ty> = self
                        .fields
                        .get($key)
                        .context(stringify!($name))?;
                    value
                        .validate()
                        .context(concat!(stringify!($name), ".", $key))?;
                )*
                Ok(())
            }
        }

        impl $crate::fields::Validate for $name {
            fn validate(&self) -> Result<(), $crate::errors::ApiError> {
                $name::validate(self)
            }
        }

        impl From<$crate::fields::Fields> for $name {
            fn from(fields: $crate::fields::Fields) -> Self {
                Self::from_fields(fields)
            }
        }
    };
}

/// Declares an enum that keeps unrecognized wire values as `Other(String)`.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A value this client does not recognize, kept verbatim.
            Other(String),
        }

        impl $name {
            /// The exact wire literal.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => $name::$variant, )+
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match $name::from(value.as_str()) {
                    $name::Other(_) => $name::Other(value),
                    known => known,
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::from(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <String as serde::Deserialize>::deserialize(deserializer).map($name::from)
            }
        }

        impl $crate::fields::Validate for $name {
            fn validate(&self) -> Result<(), $crate::errors::ApiError> {
                Ok(())
            }
        }
    };
}

pub(crate) use model;
pub(crate) use open_enum;
