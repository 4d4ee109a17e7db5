use crate::database::store_repository::StoreRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::idea::{IdeaSummaryResponse, NewIdeaRequest};
use crate::models::session::SessionResponse;
use crate::service::idea::IdeaService;
use crate::store::SessionStore;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;

/// Add an idea to an existing session and return the updated session
#[openapi(tag = "Ideas")]
#[post("/create", data = "<payload>")]
pub async fn create_idea(store: &State<SessionStore>, payload: JsonBody<NewIdeaRequest>) -> Result<Json<SessionResponse>, AppError> {
    let repo = StoreRepository { store: store.inner().clone() };
    let session = IdeaService::new(&repo).create_idea(&payload).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// List the ideas of a session in the order they were added
#[openapi(tag = "Ideas")]
#[get("/forsession/<session_id>")]
pub async fn ideas_for_session(store: &State<SessionStore>, session_id: i32) -> Result<Json<Vec<IdeaSummaryResponse>>, AppError> {
    let repo = StoreRepository { store: store.inner().clone() };
    let ideas = IdeaService::new(&repo).ideas_for_session(session_id).await?;
    Ok(Json(ideas.iter().collect()))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![create_idea, ideas_for_session]
}
