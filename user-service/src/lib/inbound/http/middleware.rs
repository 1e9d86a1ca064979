use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedIdentity;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extractor for handlers that require an authenticated caller.
///
/// Succeeds only when [`authenticate`] established an identity for the
/// request; otherwise the handler is never reached and the client gets 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthenticatedIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Middleware that resolves a bearer token into an identity in the request
/// extensions.
///
/// Never rejects a request itself: routes decide whether they need an
/// identity through [`AuthenticatedUser`].
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if state
        .public_prefixes
        .iter()
        .any(|prefix| is_under_prefix(path, prefix))
    {
        return next.run(req).await;
    }

    if req.extensions().get::<AuthenticatedIdentity>().is_some() {
        return next.run(req).await;
    }

    let Some(token) = extract_token_from_header(&req).map(str::to_owned) else {
        return next.run(req).await;
    };

    match state.auth_service.resolve_identity(&token).await {
        Ok(identity) => {
            tracing::debug!(user_id = %identity.id, "Request authenticated");
            req.extensions_mut().insert(identity);
        }
        Err(AuthError::TokenInvalid(e)) => {
            tracing::warn!(error = %e, "Bearer token rejected");
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token not accepted");
        }
    }

    next.run(req).await
}

/// Whether `path` is `prefix` itself or lies below it.
///
/// Matches whole path segments only: `/docs` covers `/docs/x` but not
/// `/docsx`.
fn is_under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }

    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn extract_token_from_header(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
