use auth::Authenticator;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Identity resolved from a valid session token.
///
/// Inserted into request extensions by [`authenticate`]; handlers take it as
/// `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Why a request to a protected route was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingCredentials,
    InvalidToken,
    ExpiredToken,
}

impl AuthRejection {
    pub fn message(&self) -> &'static str {
        match self {
            AuthRejection::MissingCredentials => "Authorization header missing",
            AuthRejection::InvalidToken => "Invalid token",
            AuthRejection::ExpiredToken => "Token has expired",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": self.message()
            })),
        )
            .into_response()
    }
}

/// Middleware that validates the bearer token and adds the user identity to
/// request extensions. Rejections never reach the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let user = authenticate_headers(req.headers(), &state.authenticator).map_err(|rejection| {
        tracing::warn!(
            reason = rejection.message(),
            uri = %req.uri(),
            "Request rejected"
        );
        rejection
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Resolve the caller's identity from the `Authorization` header.
pub fn authenticate_headers(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<AuthenticatedUser, AuthRejection> {
    let token = extract_bearer_token(headers)?;

    let user_id = authenticator.validate_token(token).map_err(|e| match e {
        TokenError::TokenExpired => AuthRejection::ExpiredToken,
        TokenError::InvalidToken(_) | TokenError::SigningFailed(_) => {
            tracing::debug!(error = %e, "Token validation failed");
            AuthRejection::InvalidToken
        }
    })?;

    let user_id = UserId::from_string(&user_id).map_err(|e| {
        tracing::debug!(error = %e, "Token carries a malformed user id");
        AuthRejection::InvalidToken
    })?;

    Ok(AuthenticatedUser { user_id })
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthRejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingCredentials)?;

    let value = header
        .to_str()
        .map_err(|_| AuthRejection::InvalidToken)?
        .trim();

    if value.is_empty() {
        return Err(AuthRejection::MissingCredentials);
    }

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                Err(AuthRejection::InvalidToken)
            } else {
                Ok(token)
            }
        }
        _ => Err(AuthRejection::InvalidToken),
    }
}
