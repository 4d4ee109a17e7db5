use crate::database::session::SessionRepository;
use crate::error::app_error::AppError;
use crate::models::session::Session;
use crate::store::StoreError;
use crate::{Config, build_rocket};
use rocket::local::asynchronous::{Client, LocalResponse};
use rocket::local::blocking;
use serde::Serialize;
use std::sync::{Mutex as StdMutex, MutexGuard, OnceLock, PoisonError};
use tokio::sync::Mutex;

/// In-memory stand-in for the store-backed repository.
#[derive(Default)]
pub struct MockRepository {
    sessions: Mutex<Vec<Session>>,
    next_id: Mutex<i32>,
    fail_updates: bool,
}

impl MockRepository {
    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        let sessions: Vec<Session> = sessions
            .into_iter()
            .enumerate()
            .map(|(index, session)| Session {
                id: index as i32 + 1,
                ..session
            })
            .collect();
        Self {
            next_id: Mutex::new(sessions.len() as i32),
            sessions: Mutex::new(sessions),
            fail_updates: false,
        }
    }

    /// Every `update_session` call fails as if the store rejected the write.
    pub fn failing_updates(self) -> Self {
        Self { fail_updates: true, ..self }
    }

    async fn assign_ids(&self, session: &mut Session) {
        let mut next_id = self.next_id.lock().await;
        if session.id == 0 {
            *next_id += 1;
            session.id = *next_id;
        }
        for idea in session.ideas.iter_mut().filter(|idea| idea.id == 0) {
            *next_id += 1;
            idea.id = *next_id;
        }
    }
}

#[async_trait::async_trait]
impl SessionRepository for MockRepository {
    async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        Ok(self.sessions.lock().await.clone())
    }

    async fn get_session_by_id(&self, id: i32) -> Result<Option<Session>, AppError> {
        Ok(self.sessions.lock().await.iter().find(|session| session.id == id).cloned())
    }

    async fn add_session(&self, session: &Session) -> Result<Session, AppError> {
        let mut session = session.clone();
        self.assign_ids(&mut session).await;
        self.sessions.lock().await.push(session.clone());
        Ok(session)
    }

    async fn update_session(&self, session: &Session) -> Result<Session, AppError> {
        if self.fail_updates {
            return Err(AppError::store("Failed to update session", StoreError::MissingRow(session.id)));
        }

        let mut session = session.clone();
        self.assign_ids(&mut session).await;
        let mut sessions = self.sessions.lock().await;
        let Some(existing) = sessions.iter_mut().find(|existing| existing.id == session.id) else {
            return Err(AppError::store("Failed to update session", StoreError::MissingRow(session.id)));
        };
        *existing = session.clone();
        Ok(session)
    }
}

/// A fully bootstrapped server driven through Rocket's local client.
///
/// Build one per test group and issue every request of the group through it:
/// the store is seeded once, when the fixture starts, and state carries over
/// between requests exactly as it would against a running server.
pub struct TestFixture {
    pub client: Client,
}

impl TestFixture {
    pub async fn start() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let client = Client::tracked(build_rocket(config)).await.expect("valid rocket instance");
        TestFixture { client }
    }

    pub async fn get(&self, uri: &str) -> LocalResponse<'_> {
        self.client.get(uri.to_string()).dispatch().await
    }

    pub async fn post_json<T: Serialize>(&self, uri: &str, body: &T) -> LocalResponse<'_> {
        self.client.post(uri.to_string()).json(body).dispatch().await
    }

    pub async fn get_json(&self, uri: &str) -> serde_json::Value {
        let response = self.get(uri).await;
        assert!(response.status().class().is_success(), "GET {} returned {}", uri, response.status());
        response.into_json().await.expect("JSON response body")
    }
}

/// One warm server shared by every test of a group.
///
/// Declare it as a module-local `static`: the server is built and seeded on
/// first use, and later tests of the module see whatever earlier ones wrote.
/// Holding the returned guard serializes the group's tests, so a test's own
/// requests are never interleaved with another's. Groups in other modules get
/// their own instance.
pub struct SharedFixture {
    client: OnceLock<StdMutex<blocking::Client>>,
}

impl SharedFixture {
    pub const fn new() -> Self {
        SharedFixture { client: OnceLock::new() }
    }

    pub fn client(&self) -> MutexGuard<'_, blocking::Client> {
        self.client
            .get_or_init(|| StdMutex::new(blocking::Client::tracked(build_rocket(Config::default())).expect("valid rocket instance")))
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
