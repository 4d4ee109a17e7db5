use crate::database::session::SessionRepository;
use crate::error::app_error::AppError;
use crate::models::session::{NewSessionRequest, Session};
use chrono::Utc;
use tracing::info;
use validator::Validate;

pub struct SessionService<'a, R: SessionRepository + ?Sized> {
    repository: &'a R,
}

impl<'a, R: SessionRepository + ?Sized> SessionService<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        SessionService { repository }
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        self.repository.list_sessions().await
    }

    pub async fn get_session(&self, id: i32) -> Result<Session, AppError> {
        self.repository.get_session_by_id(id).await?.ok_or(AppError::SessionNotFound(id))
    }

    pub async fn create_session(&self, request: &NewSessionRequest) -> Result<Session, AppError> {
        request.validate()?;

        let session = self.repository.add_session(&Session::new(request.name.as_str(), Utc::now())).await?;
        info!(session_id = session.id, "session created");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockRepository;

    #[tokio::test]
    async fn test_create_session_starts_without_ideas() {
        let repo = MockRepository::default();
        let service = SessionService::new(&repo);

        let session = service
            .create_session(&NewSessionRequest {
                name: "Planning".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.id, 1);
        assert!(session.ideas.is_empty());
        assert_eq!(service.list_sessions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_session_rejects_blank_name() {
        let repo = MockRepository::default();
        let service = SessionService::new(&repo);

        let result = service.create_session(&NewSessionRequest { name: " ".to_string() }).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(service.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_session() {
        let repo = MockRepository::default();
        let result = SessionService::new(&repo).get_session(9).await;
        assert!(matches!(result, Err(AppError::SessionNotFound(9))));
    }
}
