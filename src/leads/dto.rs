use serde::{Deserialize, Serialize};

use crate::leads::repo_types::{Demo, Enquiry};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneralLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub course: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnquiryRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub university: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DemoView {
    #[serde(flatten)]
    pub demo: Demo,
    #[serde(rename = "createdAtIST")]
    pub created_at_ist: String,
}

#[derive(Debug, Serialize)]
pub struct DemoResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: DemoView,
}

#[derive(Debug, Serialize)]
pub struct EnquiryResponse {
    pub success: bool,
    pub message: &'static str,
    pub enquiry: Enquiry,
}
