//! User entity model.
//!
//! Maps the application's `user` table. Only the columns the authentication
//! flow needs are modelled.

use sea_orm::entity::prelude::*;

/// Sea-ORM entity model representing an application user.
///
/// # Database Schema
///
/// | Column   | Type               | Description                                |
/// |----------|--------------------|--------------------------------------------|
/// | id       | BIGINT (Primary)   | User ID, used as the token subject         |
/// | username | TEXT (Unique)      | Login name                                 |
/// | password | TEXT (Nullable)    | Stored credential in a legacy SHA-256 form |
/// | editor   | BOOLEAN            | Whether the user may edit records          |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique, column_type = "Text")]
    pub username: String,

    /// Encoded password. See [`crate::password::LegacyPassword`] for the
    /// accepted encodings.
    #[sea_orm(column_type = "Text", nullable)]
    pub password: Option<String>,

    pub editor: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_session::Entity")]
    Session,
}

impl Related<super::user_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
