//! # mediamine-auth
//!
//! Authentication and session tracking for the Mediamine web API, built on
//! [Axum](https://crates.io/crates/axum) and [Sea-ORM](https://crates.io/crates/sea-orm).
//!
//! Users sign in with a username and a password stored in one of three legacy
//! SHA-256 encodings, receive an HS256 JWT, and have exactly one session row
//! that records whether they are currently logged in.
//!
//! ## Features
//!
//! - Legacy `{SHA-256}{salt}digest`, `{SHA-256}digest` and raw hex passwords
//! - JWT issuance and bearer-token verification
//! - One `user_session` row per user, kept consistent with conditional updates
//! - Optional single-active-session enforcement
//! - Periodic logout of sessions whose token has expired
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use sea_orm::Database;
//! use mediamine_auth::{
//!     http, AuthPolicy, AuthService, Config, SeaOrmUserStore, TokenService, UserSessionService,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let conn = Database::connect(config.database.connect_options()).await?;
//!
//! let auth = AuthService::new(
//!     Arc::new(SeaOrmUserStore::new(conn.clone())),
//!     UserSessionService::new(conn),
//!     TokenService::new(&config.jwt),
//!     AuthPolicy::default(),
//! );
//!
//! let app = http::router(http::AppState::new(auth));
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth_service;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
#[cfg(feature = "migration")]
pub mod migration;
pub mod password;
pub mod session_store;
pub mod token;
pub mod user_store;

pub use auth_service::{AuthPolicy, AuthService, LoginResponse, LogoutResponse, SessionCheck};
pub use config::{Config, ConfigError, DatabaseConfig, JwtConfig};
pub use error::AuthError;
pub use session_store::{Session, UserSessionService};
pub use token::{Claims, TokenService, TokenUserPayload};
pub use user_store::{SeaOrmUserStore, User, UserStore};
