use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

/// Error taxonomy surfaced by request validation and by API clients
/// mapping HTTP failures back into typed errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ApiErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            kind: ApiErrorKind::BadRequest,
            message: message.to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn conflict(message: &str) -> Self {
        Self {
            kind: ApiErrorKind::Conflict,
            message: message.to_string(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            kind: ApiErrorKind::Internal,
            message: message.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON envelope used by every API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Sync instruction for a child collection in an update request.
///
/// `Unchanged` (wire `null` or omitted) = leave the collection alone.
/// `ReplaceWith(items)` (wire array) = create/update/delete server-side until
/// the collection matches `items` exactly; an empty array deletes everything.
///
/// `null` and `[]` mean different things, so this is a dedicated type rather
/// than `Option<Vec<T>>` leaking through the codebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildSync<T> {
    Unchanged,
    ReplaceWith(Vec<T>),
}

// Manual impl: the derive would bound T: Default, which the entity types
// don't all provide and Unchanged doesn't need.
impl<T> Default for ChildSync<T> {
    fn default() -> Self {
        ChildSync::Unchanged
    }
}

impl<T> ChildSync<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, ChildSync::Unchanged)
    }

    /// The replacement set, if one was supplied.
    pub fn as_replacement(&self) -> Option<&[T]> {
        match self {
            ChildSync::Unchanged => None,
            ChildSync::ReplaceWith(items) => Some(items),
        }
    }

    pub fn into_replacement(self) -> Option<Vec<T>> {
        match self {
            ChildSync::Unchanged => None,
            ChildSync::ReplaceWith(items) => Some(items),
        }
    }
}

impl<T> From<Option<Vec<T>>> for ChildSync<T> {
    fn from(value: Option<Vec<T>>) -> Self {
        match value {
            None => ChildSync::Unchanged,
            Some(items) => ChildSync::ReplaceWith(items),
        }
    }
}

impl<T: Serialize> Serialize for ChildSync<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChildSync::Unchanged => serializer.serialize_none(),
            ChildSync::ReplaceWith(items) => serializer.serialize_some(items),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ChildSync<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.into())
    }
}

/// Treats `""` (and whitespace-only strings) from clients as absent.
pub fn deserialize_empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
