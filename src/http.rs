//! HTTP surface: `POST /auth/login`, `GET /auth/profile`, `POST /auth/logout`.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::auth_service::{AuthService, LoginResponse};
use crate::error::AuthError;
use crate::token::{Claims, TokenUserPayload};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Shares `auth` across handlers.
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth: Arc::new(auth),
        }
    }
}

/// Builds the `/auth` routes with request tracing.
///
/// # Examples
///
/// ```no_run
/// use mediamine_auth::{http, AuthService};
///
/// # async fn example(auth: AuthService) -> Result<(), Box<dyn std::error::Error>> {
/// let app = http::router(http::AppState::new(auth));
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
        .route("/auth/logout", post(logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Missing fields behave like empty strings, which never authenticate.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Claims of a verified `Authorization: Bearer <token>` header.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .ok_or_else(AuthError::unauthorized)?;

        let claims = state.auth.tokens().verify(token.trim()).map_err(|err| {
            debug!(error = %err, "rejected bearer token");
            AuthError::unauthorized()
        })?;

        Ok(AuthenticatedUser(claims))
    }
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let response = state.auth.login(&body.username, &body.password).await?;
    Ok(Json(response))
}

async fn profile(AuthenticatedUser(claims): AuthenticatedUser) -> Json<TokenUserPayload> {
    Json(claims.payload())
}

async fn logout(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<impl IntoResponse, AuthError> {
    let response = state.auth.logout(&claims.username).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
