use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors produced by the authentication flow.
///
/// Only [`AuthError::Unauthorized`] and [`AuthError::Forbidden`] carry a
/// message meant for the caller. Token and database failures are logged and
/// surface as a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AuthError {
    pub(crate) fn unauthorized() -> Self {
        AuthError::Unauthorized("Unauthorized".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::Token(_) | AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AuthError::Unauthorized(message) | AuthError::Forbidden(message) => message,
            other => {
                tracing::error!(error = %other, "request failed");
                "Internal server error".to_string()
            }
        };

        (
            status,
            Json(json!({ "statusCode": status.as_u16(), "message": message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(AuthError::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Forbidden("User is not logged in".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::Database(sea_orm::DbErr::Custom("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let response = AuthError::Database(sea_orm::DbErr::Custom("secret".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["message"], "Internal server error");
        assert!(!String::from_utf8_lossy(&bytes).contains("secret"));
    }

    #[tokio::test]
    async fn caller_facing_errors_keep_their_message() {
        let response = AuthError::Forbidden("User is not logged in".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["statusCode"], 403);
        assert_eq!(body["message"], "User is not logged in");
    }
}
