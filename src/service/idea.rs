use crate::database::session::SessionRepository;
use crate::error::app_error::AppError;
use crate::models::idea::{Idea, IdeaSummaryResponse, NewIdeaRequest};
use crate::models::session::Session;
use chrono::Utc;
use tracing::info;
use validator::Validate;

/// Request fields in the order their violations are reported, paired with
/// their wire names.
const VALIDATION_ORDER: [(&str, &str); 3] = [("name", "name"), ("description", "description"), ("session_id", "sessionId")];

pub struct IdeaService<'a, R: SessionRepository + ?Sized> {
    repository: &'a R,
}

impl<'a, R: SessionRepository + ?Sized> IdeaService<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        IdeaService { repository }
    }

    /// Appends a new idea to an existing session and persists it.
    ///
    /// Input is checked before the store is consulted; the first failing
    /// field is reported. An unknown session is `SessionNotFound`. Nothing is
    /// written unless every check passes.
    pub async fn create_idea(&self, request: &NewIdeaRequest) -> Result<Session, AppError> {
        validate_in_order(request)?;
        let session_id = i32::try_from(request.session_id).map_err(|_| AppError::BadRequest("sessionId: range".to_string()))?;

        let mut session = self
            .repository
            .get_session_by_id(session_id)
            .await?
            .ok_or(AppError::SessionNotFound(session_id))?;

        session.add_idea(Idea::new(request.name.as_str(), request.description.as_str(), Utc::now()));
        let session = self.repository.update_session(&session).await?;

        info!(session_id = session.id, ideas = session.ideas.len(), "idea added to session");
        Ok(session)
    }

    pub async fn ideas_for_session(&self, session_id: i32) -> Result<SessionIdeas, AppError> {
        self.repository
            .get_session_by_id(session_id)
            .await?
            .map(SessionIdeas)
            .ok_or(AppError::SessionNotFound(session_id))
    }
}

/// Snapshot of a session's ideas. Every call to [`SessionIdeas::iter`] walks
/// them again from the start, in insertion order.
#[derive(Debug)]
pub struct SessionIdeas(Session);

impl SessionIdeas {
    pub fn iter(&self) -> impl Iterator<Item = IdeaSummaryResponse> + '_ {
        self.0.ideas.iter().map(IdeaSummaryResponse::from)
    }
}

fn validate_in_order(request: &NewIdeaRequest) -> Result<(), AppError> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };

    let field_errors = errors.field_errors();
    let message = VALIDATION_ORDER
        .iter()
        .find_map(|(field, wire_name)| {
            field_errors
                .get(*field)
                .and_then(|errors| errors.first())
                .map(|error| format!("{}: {}", wire_name, error.code))
        })
        .unwrap_or_else(|| errors.to_string());

    Err(AppError::BadRequest(message))
}
