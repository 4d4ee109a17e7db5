use crate::database::store_repository::StoreRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::session::{NewSessionRequest, SessionResponse, SessionSummaryResponse};
use crate::service::session::SessionService;
use crate::store::SessionStore;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;

/// List all sessions with their idea counts
#[openapi(tag = "Sessions")]
#[get("/")]
pub async fn list_sessions(store: &State<SessionStore>) -> Result<Json<Vec<SessionSummaryResponse>>, AppError> {
    let repo = StoreRepository { store: store.inner().clone() };
    let sessions = SessionService::new(&repo).list_sessions().await?;
    Ok(Json(sessions.iter().map(SessionSummaryResponse::from).collect()))
}

/// Create an empty session
#[openapi(tag = "Sessions")]
#[post("/", data = "<payload>")]
pub async fn create_session(store: &State<SessionStore>, payload: JsonBody<NewSessionRequest>) -> Result<(Status, Json<SessionResponse>), AppError> {
    let repo = StoreRepository { store: store.inner().clone() };
    let session = SessionService::new(&repo).create_session(&payload).await?;
    Ok((Status::Created, Json(SessionResponse::from(&session))))
}

/// Get a session with all of its ideas
#[openapi(tag = "Sessions")]
#[get("/<id>")]
pub async fn get_session(store: &State<SessionStore>, id: i32) -> Result<Json<SessionResponse>, AppError> {
    let repo = StoreRepository { store: store.inner().clone() };
    let session = SessionService::new(&repo).get_session(id).await?;
    Ok(Json(SessionResponse::from(&session)))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![list_sessions, create_session, get_session]
}
