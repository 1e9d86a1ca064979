use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod login;
pub mod register;
pub mod update_user;
pub mod validate_token;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    InvalidUserData(String),
    AlreadyExists(String),
    NotFound(String),
    Unauthorized(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidUserData(_) | ApiError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Problem type slug and title.
    fn problem(&self) -> (&'static str, &'static str) {
        match self {
            ApiError::InternalServerError(_) => ("internal-error", "Internal Server Error"),
            ApiError::InvalidUserData(_) => ("invalid-user-data", "Invalid User Data"),
            ApiError::AlreadyExists(_) => ("user-already-exists", "User Already Exists"),
            ApiError::NotFound(_) => ("user-not-found", "User Not Found"),
            ApiError::Unauthorized(_) => ("authentication-failed", "Authentication Failed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (slug, title) = self.problem();

        let detail = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                "Internal server error".to_string()
            }
            ApiError::InvalidUserData(msg)
            | ApiError::AlreadyExists(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg) => msg,
        };

        let problem = ProblemDetails::new(status, slug, title, detail);
        (status, Json(problem)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::AlreadyExists(_) => ApiError::AlreadyExists(err.to_string()),
            UserError::EmptyData(_)
            | UserError::InvalidUserId(_)
            | UserError::InvalidLogin(_)
            | UserError::InvalidName(_) => ApiError::InvalidUserData(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthFailed | AuthError::TokenInvalid(_) => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::User(e) => ApiError::from(e),
            AuthError::Internal(msg) => ApiError::InternalServerError(msg),
        }
    }
}

/// Prefix of every problem `type` this service emits.
pub const PROBLEM_TYPE_BASE: &str = "/problems/";

/// Error body in the shape of an RFC 7807 problem object.
///
/// `type` identifies the error kind, so clients can branch on it without
/// parsing `detail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, slug: &str, title: &str, detail: String) -> Self {
        Self {
            problem_type: format!("{}{}", PROBLEM_TYPE_BASE, slug),
            title: title.to_string(),
            status: status.as_u16(),
            detail,
        }
    }
}

/// Public view of a user; the credential is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub login: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            login: user.login.as_str().to_string(),
        }
    }
}

/// Reject a blank request field before it reaches the domain.
pub(crate) fn required(field: &'static str, value: String) -> Result<String, UserError> {
    if value.trim().is_empty() {
        Err(UserError::EmptyData(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::LoginError;

    async fn problem_body(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_user_errors_map_to_kind() {
        assert!(matches!(
            ApiError::from(UserError::NotFound("1".into())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::AlreadyExists("alice".into())),
            ApiError::AlreadyExists(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::from(LoginError::Blank)),
            ApiError::InvalidUserData(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::EmptyData("Password")),
            ApiError::InvalidUserData(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::DatabaseError("down".into())),
            ApiError::InternalServerError(_)
        ));
    }

    #[tokio::test]
    async fn test_bad_requests_carry_distinct_problem_types() {
        let (status, duplicate) =
            problem_body(ApiError::from(UserError::AlreadyExists("alice".into()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(duplicate["type"], "/problems/user-already-exists");
        assert_eq!(duplicate["title"], "User Already Exists");

        let (status, invalid) = problem_body(ApiError::from(UserError::EmptyData("Name"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid["type"], "/problems/invalid-user-data");
        assert_eq!(invalid["title"], "Invalid User Data");
        assert_eq!(invalid["detail"], "Name cannot be empty");

        assert_ne!(duplicate["type"], invalid["type"]);
    }

    #[tokio::test]
    async fn test_internal_error_detail_is_generic() {
        let (status, body) =
            problem_body(ApiError::from(UserError::DatabaseError("pool timed out".into()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["type"], "/problems/internal-error");
        assert_eq!(body["detail"], "Internal server error");
    }

    #[test]
    fn test_auth_errors_are_opaque() {
        let invalid = ApiError::from(AuthError::TokenInvalid(auth::TokenError::Invalid(
            "InvalidSignature".into(),
        )));
        assert_eq!(invalid, ApiError::Unauthorized("Invalid credentials".into()));
        assert_eq!(
            ApiError::from(AuthError::AuthFailed),
            ApiError::Unauthorized("Invalid credentials".into())
        );
    }

    #[test]
    fn test_problem_details_shape() {
        let body = serde_json::to_value(ProblemDetails::new(
            StatusCode::NOT_FOUND,
            "user-not-found",
            "User Not Found",
            "User not found: 1".into(),
        ))
        .unwrap();

        assert_eq!(body["type"], "/problems/user-not-found");
        assert_eq!(body["title"], "User Not Found");
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "User not found: 1");
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(matches!(
            required("Name", "  ".into()),
            Err(UserError::EmptyData("Name"))
        ));
        assert_eq!(required("Name", "Bob".into()).unwrap(), "Bob");
    }
}
