use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::request::Request;
use rocket::{Data, Response};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Correlates the log lines of one request. A caller may supply its own id in
/// `X-Request-Id` as long as it is a UUID; otherwise a fresh one is issued.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new() -> Self {
        RequestId(Uuid::new_v4().to_string())
    }

    fn from_header(value: Option<&str>) -> Self {
        value
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(|id| RequestId(id.to_string()))
            .unwrap_or_default()
    }

    /// The id assigned by [`RequestTracing`], or `"unknown"` if the fairing
    /// did not run for this request.
    pub fn of(request: &Request<'_>) -> String {
        request
            .local_cache(|| None::<RequestId>)
            .as_ref()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
struct RequestStart(Instant);

/// Tags every request with a [`RequestId`] and logs its outcome and latency.
pub struct RequestTracing;

#[rocket::async_trait]
impl Fairing for RequestTracing {
    fn info(&self) -> Info {
        Info {
            name: "Request Tracing",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        let request_id = RequestId::from_header(request.headers().get_one(REQUEST_ID_HEADER));
        request.local_cache(|| Some(request_id.clone()));
        request.local_cache(|| Some(RequestStart(Instant::now())));

        info!(request_id = %request_id.0, method = %request.method(), uri = %request.uri(), "request received");
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let request_id = RequestId::of(request);
        let elapsed_ms = request
            .local_cache(|| None::<RequestStart>)
            .map(|start| start.0.elapsed().as_millis())
            .unwrap_or_default();

        response.set_header(Header::new(REQUEST_ID_HEADER, request_id.clone()));
        response.set_header(Header::new("X-Content-Type-Options", "nosniff"));

        let status = response.status();
        let method = request.method();
        let uri = request.uri();

        if status.class().is_server_error() {
            error!(request_id = %request_id, %method, %uri, status = status.code, elapsed_ms, "request failed on the server");
        } else if status.class().is_client_error() {
            warn!(request_id = %request_id, %method, %uri, status = status.code, elapsed_ms, "request rejected");
        } else {
            info!(request_id = %request_id, %method, %uri, status = status.code, elapsed_ms, "request handled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestFixture;
    use rocket::http::Status;

    #[test]
    fn test_request_ids_are_unique_uuids() {
        let first = RequestId::new();
        let second = RequestId::new();
        assert!(Uuid::parse_str(&first.0).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn test_caller_supplied_uuid_is_kept() {
        let supplied = Uuid::new_v4().to_string();
        assert_eq!(RequestId::from_header(Some(supplied.as_str())).0, supplied);
    }

    #[test]
    fn test_non_uuid_header_is_replaced() {
        let id = RequestId::from_header(Some("<script>"));
        assert_ne!(id.0, "<script>");
        assert!(Uuid::parse_str(&id.0).is_ok());
    }

    #[rocket::async_test]
    async fn test_responses_carry_request_id() {
        let fixture = TestFixture::start().await;
        let first = fixture.get("/api/health").await;
        let first_id = first.headers().get_one(REQUEST_ID_HEADER).map(str::to_string);
        assert!(first_id.as_deref().is_some_and(|id| Uuid::parse_str(id).is_ok()));
        assert_eq!(first.headers().get_one("X-Content-Type-Options"), Some("nosniff"));

        let second = fixture.get("/api/ideas/forsession/500").await;
        assert_eq!(second.status(), Status::NotFound);
        assert_ne!(second.headers().get_one(REQUEST_ID_HEADER).map(str::to_string), first_id);
    }

    #[rocket::async_test]
    async fn test_supplied_request_id_is_echoed_on_errors() {
        let fixture = TestFixture::start().await;
        let supplied = Uuid::new_v4().to_string();

        let response = fixture
            .client
            .get("/api/ideas/forsession/500")
            .header(Header::new(REQUEST_ID_HEADER, supplied.clone()))
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(response.headers().get_one(REQUEST_ID_HEADER), Some(supplied.as_str()));
    }
}
