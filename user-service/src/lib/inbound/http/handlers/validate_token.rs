use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserResponse;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Report who a token belongs to, or 401 when it is not acceptable.
pub async fn validate_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequestBody>,
) -> Result<ApiSuccess<UserResponse>, ApiError> {
    state
        .auth_service
        .validate_token(&body.token)
        .await
        .map_err(ApiError::from)
        .map(|owner| {
            ApiSuccess::new(
                StatusCode::OK,
                UserResponse {
                    id: owner.id.to_string(),
                    name: owner.name.as_str().to_string(),
                    login: owner.login.as_str().to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestBody {
    #[serde(default)]
    token: String,
}
