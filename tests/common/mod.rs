#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use mediamine_auth::{
    entity::user, migration::Migrator, password::digest_hex, AuthPolicy, AuthService, JwtConfig,
    SeaOrmUserStore, TokenService, UserSessionService,
};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

pub const SECRET: &str = "integration-test-secret";

pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // A single connection keeps every query on the same in-memory database
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn seed_user(
    db: &DatabaseConnection,
    username: &str,
    password: Option<&str>,
    editor: bool,
) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password.map(str::to_string)),
        editor: Set(editor),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
}

/// `{SHA-256}{salt}digest` for `password`.
pub fn salted(password: &str, salt: &str) -> String {
    let salt = format!("{{{salt}}}");
    format!("{{SHA-256}}{salt}{}", digest_hex(password, &salt))
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: SECRET.to_string(),
        expires_in: Duration::from_secs(3600),
    }
}

pub fn auth_service(db: &DatabaseConnection, policy: AuthPolicy) -> AuthService {
    AuthService::new(
        Arc::new(SeaOrmUserStore::new(db.clone())),
        UserSessionService::new(db.clone()),
        TokenService::new(&jwt_config()),
        policy,
    )
}
