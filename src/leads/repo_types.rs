use serde::Serialize;
use sqlx::FromRow;
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

use crate::clock::wall_clock;

/// Marketing copy of the profile captured at registration.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub university: String,
    pub qualification: String,
    pub experience: String,
    #[serde(with = "wall_clock")]
    pub created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub university: String,
    pub qualification: String,
    pub experience: String,
    pub created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GeneralLead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewGeneralLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Demo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub course: String,
    #[serde(rename = "type")]
    pub kind: String, // "video" | "home", enforced by the table
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewDemo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub course: String,
    pub kind: String,
}

pub const ENQUIRY_PENDING: &str = "pending";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: Option<String>,
    pub university: Option<String>,
    pub message: Option<String>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: Option<String>,
    pub university: Option<String>,
    pub message: Option<String>,
    pub status: &'static str,
}
