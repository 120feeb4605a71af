use serde::Serialize;
use sqlx::FromRow;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::clock::wall_clock;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub university: String,
    pub qualification: String,
    pub experience: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt, never exposed in JSON
    pub active: bool,
    #[serde(with = "wall_clock::option")]
    pub last_login: Option<PrimitiveDateTime>,
    #[serde(with = "wall_clock")]
    pub created_at: PrimitiveDateTime,
}

/// Fields written on registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub university: String,
    pub qualification: String,
    pub experience: String,
    pub password_hash: String,
    pub created_at: PrimitiveDateTime,
}
