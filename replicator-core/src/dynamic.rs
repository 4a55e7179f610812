//! A loosely typed object representation for payloads whose kind is only
//! known at runtime.
//!
//! Watch streams can carry things other than the watched resource: error
//! statuses, or objects of a foreign kind entirely. [`DynamicObject`] keeps
//! those payloads representable so consumers can classify by `kind` before
//! committing to a concrete type.

use crate::metadata::{ObjectMeta, TypeMeta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failed to parse a `DynamicObject` into a concrete type.
#[derive(Debug, Error)]
#[error("failed to parse this DynamicObject into the requested type: {source}")]
pub struct ParseDynamicObjectError {
    #[from]
    source: serde_json::Error,
}

/// A dynamic representation of an api object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DynamicObject {
    /// The type fields, not always present
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// All other keys
    #[serde(flatten)]
    pub data: serde_json::Value,
}

impl DynamicObject {
    /// The object's kind, when the payload carried one.
    pub fn kind(&self) -> Option<&str> {
        self.types.as_ref().map(|t| t.kind.as_str())
    }

    /// Attempt to convert this `DynamicObject` into a concrete type.
    pub fn try_parse<K: for<'de> Deserialize<'de>>(self) -> Result<K, ParseDynamicObjectError> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    /// Wrap a typed object for transport, stamping the given kind.
    pub fn from_object<K: Serialize>(kind: &str, obj: &K) -> Result<Self, ParseDynamicObjectError> {
        let mut wrapped: DynamicObject = serde_json::from_value(serde_json::to_value(obj)?)?;
        wrapped.types = Some(TypeMeta {
            api_version: "v1".to_string(),
            kind: kind.to_string(),
        });
        Ok(wrapped)
    }
}
