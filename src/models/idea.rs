use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use serde::Deserializer;
use schemars::JsonSchema;
use validator::{Validate, ValidationError};

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Idea {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub date_created: DateTime<Utc>,
}

impl Idea {
    pub fn new(name: impl Into<String>, description: impl Into<String>, date_created: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            date_created,
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeaResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub date_created: DateTime<Utc>,
}

impl From<&Idea> for IdeaResponse {
    fn from(idea: &Idea) -> Self {
        Self {
            id: idea.id,
            name: idea.name.clone(),
            description: idea.description.clone(),
            date_created: idea.date_created,
        }
    }
}

/// The projection returned when listing the ideas of a session.
#[derive(Serialize, Debug, JsonSchema)]
pub struct IdeaSummaryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<&Idea> for IdeaSummaryResponse {
    fn from(idea: &Idea) -> Self {
        Self {
            id: idea.id,
            name: idea.name.clone(),
            description: idea.description.clone(),
        }
    }
}

/// Payload for adding an idea to a session. Missing or `null` fields
/// deserialize to empty values so that they are reported as validation
/// failures rather than parse errors.
#[derive(Serialize, Deserialize, Debug, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewIdeaRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    /// Application-level guard on identifiers, not a store limit. Wider than
    /// the id type so that any out-of-range integer reaches the range check.
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(range(min = 1, max = 1_000_000))]
    pub session_id: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
