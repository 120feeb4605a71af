use crate::{
    auth::dto::normalize_email,
    error::AppError,
    leads::{
        dto::{DemoRequest, EnquiryRequest, GeneralLeadRequest},
        repo_types::{NewDemo, NewEnquiry, NewGeneralLead, ENQUIRY_PENDING},
    },
};

/// Trimmed value, or `None` when absent or blank.
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Collects every required field up front so the error can name all of them.
struct Required<'a> {
    message: &'a str,
    missing: Vec<&'static str>,
}

impl<'a> Required<'a> {
    fn new(message: &'a str) -> Self {
        Self {
            message,
            missing: Vec::new(),
        }
    }

    fn take(&mut self, field: &'static str, value: &Option<String>) -> String {
        present(value).unwrap_or_else(|| {
            self.missing.push(field);
            String::new()
        })
    }

    fn finish(self) -> Result<(), AppError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::missing_fields(self.message, &self.missing))
        }
    }
}

pub fn general_lead_from(req: &GeneralLeadRequest) -> Result<NewGeneralLead, AppError> {
    let mut required = Required::new("All fields are required");
    let lead = NewGeneralLead {
        name: required.take("name", &req.name),
        email: required.take("email", &req.email),
        phone: required.take("phone", &req.phone),
        message: required.take("message", &req.message),
    };
    required.finish()?;
    Ok(lead)
}

pub fn demo_from(req: &DemoRequest) -> Result<NewDemo, AppError> {
    let mut required = Required::new("All fields are required");
    let demo = NewDemo {
        name: required.take("name", &req.name),
        email: normalize_email(&required.take("email", &req.email)),
        phone: required.take("phone", &req.phone),
        city: required.take("city", &req.city),
        course: required.take("course", &req.course),
        // left for the demos table to accept or reject
        kind: required.take("type", &req.kind),
    };
    required.finish()?;
    Ok(demo)
}

pub fn enquiry_from(req: &EnquiryRequest) -> Result<NewEnquiry, AppError> {
    let mut required = Required::new("Name, email, and phone are required");
    let enquiry = NewEnquiry {
        name: required.take("name", &req.name),
        email: required.take("email", &req.email),
        phone: required.take("phone", &req.phone),
        course: present(&req.course),
        university: present(&req.university),
        message: present(&req.message),
        status: ENQUIRY_PENDING,
    };
    required.finish()?;
    Ok(enquiry)
}
