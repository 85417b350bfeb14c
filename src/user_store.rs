use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use tracing::instrument;

use crate::entity::user::{self, Entity as UserEntity};

/// A user as seen by the authentication flow.
pub type User = user::Model;

/// Lookup of users by login name.
///
/// The user table belongs to the wider application, so the auth service only
/// depends on this seam. [`SeaOrmUserStore`] is the database-backed
/// implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns the user with this exact login name, if any.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbErr>;
}

/// Reads users from the `user` table through Sea-ORM.
#[derive(Debug, Clone)]
pub struct SeaOrmUserStore {
    conn: DatabaseConnection,
}

impl SeaOrmUserStore {
    /// Creates a store over an existing Sea-ORM connection.
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserStore for SeaOrmUserStore {
    #[instrument(name = "UserService::find_one", skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.conn)
            .await
    }
}
