use rocket::{get, http::Status};
use rocket_okapi::openapi;

/// Liveness probe
#[openapi(tag = "Health")]
#[get("/")]
pub async fn healthcheck() -> Status {
    Status::Ok
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![healthcheck]
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::test_utils::TestFixture;
    use rocket::http::Status;

    #[rocket::async_test]
    async fn health_check_works() {
        let fixture = TestFixture::start().await;
        let response = fixture.get("/api/health").await;
        assert_eq!(response.status(), Status::Ok);
    }

    #[rocket::async_test]
    async fn health_check_is_served_under_additional_base_paths() {
        let mut config = Config::default();
        config.api.additional_base_paths = vec!["v1/".to_string()];
        let fixture = TestFixture::with_config(config).await;

        assert_eq!(fixture.get("/api/health").await.status(), Status::Ok);
        assert_eq!(fixture.get("/v1/health").await.status(), Status::Ok);
    }
}
