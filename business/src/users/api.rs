//! Remote user API helpers.
//!
//! Performs the network IO for commands; callers map the results into
//! state and compute updates.

use log::warn;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::http::{Client, HttpError};
use crate::users::model::{ApiErrorBody, ListUsersResponse, User, UserDraft};

const APP_ID_HEADER: &str = "app-id";

#[derive(Debug, Error)]
pub enum UsersApiError {
    #[error(transparent)]
    Transport(#[from] HttpError),
    /// The API answered with a non-2xx status; `message` is its `error` field.
    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, UsersApiError>;

/// `GET /user?page=..&limit=..`
///
/// The body is decoded whatever the status: an error body without `data`
/// yields an empty list.
pub async fn list_users(config: &ApiConfig) -> ApiResult<Vec<User>> {
    let response = Client::get(config.list_users_url())
        .header(APP_ID_HEADER, &config.app_id)
        .send()
        .await?;

    if !response.is_success() {
        warn!("list_users: API returned status {}", response.status);
    }

    let body: ListUsersResponse = response.json()?;
    Ok(body.data)
}

/// `POST /user/create` with the draft as body.
///
/// A non-2xx answer must still carry a JSON error body; anything else is a
/// parse error.
pub async fn create_user(config: &ApiConfig, draft: &UserDraft) -> ApiResult<User> {
    let response = Client::post(config.create_user_url())
        .header(APP_ID_HEADER, &config.app_id)
        .json(draft)?
        .send()
        .await?;

    if !response.is_success() {
        let body: ApiErrorBody = response.json()?;
        return Err(UsersApiError::Status {
            status: response.status,
            message: body.error,
        });
    }

    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_users_sends_page_and_app_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "10"))
            .and(header("app-id", "63473330c1927d386ca6a3a5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "id": "1", "title": "ms", "firstName": "Ana", "lastName": "Diaz" },
                    { "id": "2", "title": "mr", "firstName": "Ben", "lastName": "Stone" }
                ],
                "total": 2, "page": 0, "limit": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let users = list_users(&ApiConfig::new(server.uri()))
            .await
            .expect("list should succeed");

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].first_name, "Ana");
        assert_eq!(users[1].id, "2");
    }

    #[tokio::test]
    async fn list_users_error_body_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({ "error": "APP_ID_NOT_EXIST" })),
            )
            .mount(&server)
            .await;

        let users = list_users(&ApiConfig::new(server.uri()))
            .await
            .expect("json error body still parses");
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn list_users_invalid_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let result = list_users(&ApiConfig::new(server.uri())).await;
        assert!(matches!(result, Err(UsersApiError::Parse(_))));
    }

    #[tokio::test]
    async fn create_user_posts_draft() {
        let server = MockServer::start().await;
        let draft = UserDraft {
            first_name: "Cleo".to_owned(),
            last_name: "Ruiz".to_owned(),
            email: "cleo@example.com".to_owned(),
            ..UserDraft::default()
        };

        Mock::given(method("POST"))
            .and(path("/user/create"))
            .and(header("app-id", "63473330c1927d386ca6a3a5"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "title": "mr",
                "firstName": "Cleo",
                "lastName": "Ruiz",
                "email": "cleo@example.com",
                "picture": ""
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "new-id",
                "title": "mr",
                "firstName": "Cleo",
                "lastName": "Ruiz",
                "email": "cleo@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = create_user(&ApiConfig::new(server.uri()), &draft)
            .await
            .expect("create should succeed");
        assert_eq!(user.id, "new-id");
        assert_eq!(user.email.as_deref(), Some("cleo@example.com"));
    }

    #[tokio::test]
    async fn create_user_surfaces_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/create"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "BODY_NOT_VALID" })),
            )
            .mount(&server)
            .await;

        let err = create_user(&ApiConfig::new(server.uri()), &UserDraft::default())
            .await
            .unwrap_err();

        match err {
            UsersApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "BODY_NOT_VALID");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_user_non_json_error_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/create"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let result = create_user(&ApiConfig::new(server.uri()), &UserDraft::default()).await;
        assert!(matches!(result, Err(UsersApiError::Parse(_))));
    }
}
