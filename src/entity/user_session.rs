//! Session entity model.
//!
//! One row per user (not per device). The row is created on the user's first
//! login and then flipped between logged-in and logged-out.

use sea_orm::entity::prelude::*;

/// Sea-ORM entity model representing a user's current session.
///
/// # Database Schema
///
/// | Column       | Type                   | Description                             |
/// |--------------|------------------------|-----------------------------------------|
/// | id           | BIGINT (Primary Key)   | Row ID                                  |
/// | user_id      | BIGINT (Unique, FK)    | Owning user, at most one row per user   |
/// | uuid         | TEXT                   | Random v4 UUID assigned at creation     |
/// | is_logged_in | BOOLEAN                | Whether the session is active           |
/// | expires_at   | TIMESTAMPTZ            | Expiry copied from the last issued JWT  |
/// | jwt_token_id | TEXT                   | `jti` of the last issued JWT            |
///
/// The unique index on `user_id` is what keeps concurrent logins from
/// creating a second row for the same user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique)]
    pub user_id: i64,

    #[sea_orm(column_type = "Text")]
    pub uuid: String,

    pub is_logged_in: bool,

    /// Expiry of the most recently issued token. Nothing transitions the row
    /// on its own when this passes; see
    /// [`UserSessionService::expire_stale`](crate::UserSessionService::expire_stale).
    pub expires_at: DateTimeWithTimeZone,

    #[sea_orm(column_type = "Text")]
    pub jwt_token_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
