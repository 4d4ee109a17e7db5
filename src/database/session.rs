use crate::database::store_repository::StoreRepository;
use crate::error::app_error::AppError;
use crate::models::session::Session;

/// The only gateway through which sessions (and the ideas they own) are read
/// or persisted.
///
/// Sessions handed out by this trait are working copies. Mutating one has no
/// effect on the store until it is submitted through [`update_session`].
///
/// [`update_session`]: SessionRepository::update_session
#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    /// All sessions, ordered by id. An empty store yields an empty list.
    async fn list_sessions(&self) -> Result<Vec<Session>, AppError>;

    /// `Ok(None)` when no session has this id.
    async fn get_session_by_id(&self, id: i32) -> Result<Option<Session>, AppError>;

    /// Persists a new session. Identity is assigned to the session and to each
    /// of its ideas whose id is still `0`.
    async fn add_session(&self, session: &Session) -> Result<Session, AppError>;

    /// Persists a previously fetched session, replacing the stored state and
    /// assigning identity to ideas appended since the fetch.
    ///
    /// Post-condition: on `Ok`, later reads observe exactly the returned
    /// session. On `Err`, the stored session is unchanged.
    async fn update_session(&self, session: &Session) -> Result<Session, AppError>;
}

impl StoreRepository {
    fn assign_idea_ids(&self, session: &mut Session) {
        for idea in session.ideas.iter_mut().filter(|idea| idea.id == 0) {
            idea.id = self.store.idea_ids.next();
        }
    }
}

#[async_trait::async_trait]
impl SessionRepository for StoreRepository {
    async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        Ok(self.store.sessions.all().await)
    }

    async fn get_session_by_id(&self, id: i32) -> Result<Option<Session>, AppError> {
        Ok(self.store.sessions.get(id).await)
    }

    async fn add_session(&self, session: &Session) -> Result<Session, AppError> {
        let mut session = session.clone();
        if session.id == 0 {
            session.id = self.store.sessions.next_id();
        }
        self.assign_idea_ids(&mut session);

        self.store
            .sessions
            .insert(session.id, session.clone())
            .await
            .map_err(|e| AppError::store("Failed to add session", e))?;
        Ok(session)
    }

    async fn update_session(&self, session: &Session) -> Result<Session, AppError> {
        let mut session = session.clone();
        self.assign_idea_ids(&mut session);

        self.store
            .sessions
            .replace(session.id, session.clone())
            .await
            .map_err(|e| AppError::store("Failed to update session", e))?;
        Ok(session)
    }
}
