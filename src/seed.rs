use crate::database::session::SessionRepository;
use crate::error::app_error::AppError;
use crate::models::idea::Idea;
use crate::models::session::Session;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

pub const SAMPLE_SESSION_NAME: &str = "Test Session 1";
pub const SAMPLE_IDEA_NAME: &str = "Awesome idea";
pub const SAMPLE_IDEA_DESCRIPTION: &str = "Totally awesome idea";

/// 2016-08-01 00:00:00 UTC
pub fn sample_date() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2016, 8, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

pub fn sample_session() -> Session {
    let mut session = Session::new(SAMPLE_SESSION_NAME, sample_date());
    session.add_idea(Idea::new(SAMPLE_IDEA_NAME, SAMPLE_IDEA_DESCRIPTION, sample_date()));
    session
}

/// Adds the sample session when the store holds no sessions at all.
/// Returns whether anything was written.
pub async fn initialize_store<R: SessionRepository + ?Sized>(repository: &R) -> Result<bool, AppError> {
    if !repository.list_sessions().await?.is_empty() {
        debug!("session store already populated, skipping seed");
        return Ok(false);
    }

    let session = repository.add_session(&sample_session()).await?;
    info!(session_id = session.id, ideas = session.ideas.len(), "seeded sample session");
    Ok(true)
}
