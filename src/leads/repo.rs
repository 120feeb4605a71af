use axum::async_trait;
use sqlx::PgPool;

use crate::{
    db::StoreError,
    leads::repo_types::{
        Demo, Enquiry, GeneralLead, Lead, NewDemo, NewEnquiry, NewGeneralLead, NewLead,
    },
};

/// One independent collection per form; nothing here is transactional.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn create_lead(&self, new: &NewLead) -> Result<Lead, StoreError>;
    async fn create_general_lead(&self, new: &NewGeneralLead) -> Result<GeneralLead, StoreError>;
    /// Fails with [`StoreError::Constraint`] for a kind other than video/home.
    async fn create_demo(&self, new: &NewDemo) -> Result<Demo, StoreError>;
    async fn create_enquiry(&self, new: &NewEnquiry) -> Result<Enquiry, StoreError>;
}

#[derive(Clone)]
pub struct PgLeadStore {
    db: PgPool,
}

impl PgLeadStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn create_lead(&self, new: &NewLead) -> Result<Lead, StoreError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (name, email, phone, course, university, qualification,
                               experience, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, course, university, qualification,
                      experience, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.course)
        .bind(&new.university)
        .bind(&new.qualification)
        .bind(&new.experience)
        .bind(new.created_at)
        .fetch_one(&self.db)
        .await?;
        Ok(lead)
    }

    async fn create_general_lead(&self, new: &NewGeneralLead) -> Result<GeneralLead, StoreError> {
        let lead = sqlx::query_as::<_, GeneralLead>(
            r#"
            INSERT INTO general_leads (name, email, phone, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, message, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.message)
        .fetch_one(&self.db)
        .await?;
        Ok(lead)
    }

    async fn create_demo(&self, new: &NewDemo) -> Result<Demo, StoreError> {
        let demo = sqlx::query_as::<_, Demo>(
            r#"
            INSERT INTO demos (name, email, phone, city, course, kind)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, phone, city, course, kind, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.city)
        .bind(&new.course)
        .bind(&new.kind)
        .fetch_one(&self.db)
        .await?;
        Ok(demo)
    }

    async fn create_enquiry(&self, new: &NewEnquiry) -> Result<Enquiry, StoreError> {
        let enquiry = sqlx::query_as::<_, Enquiry>(
            r#"
            INSERT INTO enquiries (name, email, phone, course, university, message, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, phone, course, university, message, status, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.course)
        .bind(&new.university)
        .bind(&new.message)
        .bind(new.status)
        .fetch_one(&self.db)
        .await?;
        Ok(enquiry)
    }
}
