use crate::models::idea::{Idea, IdeaResponse, not_blank};
use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use validator::Validate;

/// A brainstorm session owning an ordered list of ideas.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub id: i32,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub ideas: Vec<Idea>,
}

impl Session {
    pub fn new(name: impl Into<String>, date_created: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            date_created,
            ideas: Vec::new(),
        }
    }

    /// Appends to the working copy only; persist with `SessionRepository::update_session`.
    pub fn add_idea(&mut self, idea: Idea) {
        self.ideas.push(idea);
    }
}

#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: i32,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub ideas: Vec<IdeaResponse>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            date_created: session.date_created,
            ideas: session.ideas.iter().map(IdeaResponse::from).collect(),
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryResponse {
    pub id: i32,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub idea_count: usize,
}

impl From<&Session> for SessionSummaryResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            date_created: session.date_created,
            idea_count: session.ideas.len(),
        }
    }
}

#[derive(Deserialize, Debug, Validate, JsonSchema)]
pub struct NewSessionRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}
