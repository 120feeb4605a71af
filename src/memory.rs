//! In-memory stores mirroring the Postgres constraints, for handler tests.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

use axum::async_trait;
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

use crate::{
    auth::{
        repo::UserStore,
        repo_types::{NewUser, User},
    },
    db::StoreError,
    leads::{
        repo::LeadStore,
        repo_types::{
            Demo, Enquiry, GeneralLead, Lead, NewDemo, NewEnquiry, NewGeneralLead, NewLead,
        },
    },
};

/// Values accepted by `demos_kind_check`.
const DEMO_KINDS: [&str; 2] = ["video", "home"];

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn check(offline: &AtomicBool) -> Result<(), StoreError> {
    if offline.load(Ordering::SeqCst) {
        return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
    }
    Ok(())
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    offline: AtomicBool,
    stale_lookups: AtomicBool,
}

impl MemoryUserStore {
    pub fn users(&self) -> Vec<User> {
        lock(&self.users).clone()
    }

    pub fn set_active(&self, email: &str, active: bool) {
        for user in lock(&self.users).iter_mut().filter(|u| u.email == email) {
            user.active = active;
        }
    }

    /// Every call fails as if the pool timed out.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    /// `find_by_email` misses rows that `create` still sees, the way a
    /// concurrent insert lands between the lookup and the write.
    pub fn miss_lookups(&self) {
        self.stale_lookups.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        check(&self.offline)?;
        if self.stale_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        check(&self.offline)?;
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new: &NewUser) -> Result<User, StoreError> {
        check(&self.offline)?;
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::Conflict("users_email_key".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            course: new.course.clone(),
            university: new.university.clone(),
            qualification: new.qualification.clone(),
            experience: new.experience.clone(),
            password_hash: new.password_hash.clone(),
            active: true,
            last_login: None,
            created_at: new.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn record_login(&self, id: Uuid, at: PrimitiveDateTime) -> Result<(), StoreError> {
        check(&self.offline)?;
        if let Some(user) = lock(&self.users).iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
    general: Mutex<Vec<GeneralLead>>,
    demos: Mutex<Vec<Demo>>,
    enquiries: Mutex<Vec<Enquiry>>,
    offline: AtomicBool,
}

impl MemoryLeadStore {
    pub fn leads(&self) -> Vec<Lead> {
        lock(&self.leads).clone()
    }

    pub fn general_leads(&self) -> Vec<GeneralLead> {
        lock(&self.general).clone()
    }

    pub fn demos(&self) -> Vec<Demo> {
        lock(&self.demos).clone()
    }

    pub fn enquiries(&self) -> Vec<Enquiry> {
        lock(&self.enquiries).clone()
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn create_lead(&self, new: &NewLead) -> Result<Lead, StoreError> {
        check(&self.offline)?;
        let lead = Lead {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            course: new.course.clone(),
            university: new.university.clone(),
            qualification: new.qualification.clone(),
            experience: new.experience.clone(),
            created_at: new.created_at,
        };
        lock(&self.leads).push(lead.clone());
        Ok(lead)
    }

    async fn create_general_lead(&self, new: &NewGeneralLead) -> Result<GeneralLead, StoreError> {
        check(&self.offline)?;
        let lead = GeneralLead {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            message: new.message.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        lock(&self.general).push(lead.clone());
        Ok(lead)
    }

    async fn create_demo(&self, new: &NewDemo) -> Result<Demo, StoreError> {
        check(&self.offline)?;
        if !DEMO_KINDS.contains(&new.kind.as_str()) {
            return Err(StoreError::Constraint("demos_kind_check".into()));
        }
        let demo = Demo {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            city: new.city.clone(),
            course: new.course.clone(),
            kind: new.kind.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        lock(&self.demos).push(demo.clone());
        Ok(demo)
    }

    async fn create_enquiry(&self, new: &NewEnquiry) -> Result<Enquiry, StoreError> {
        check(&self.offline)?;
        let enquiry = Enquiry {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            course: new.course.clone(),
            university: new.university.clone(),
            message: new.message.clone(),
            status: new.status.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        lock(&self.enquiries).push(enquiry.clone());
        Ok(enquiry)
    }
}
