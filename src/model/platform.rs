//! Records behind the platform queues: support access, exports,
//! announcements, audit logs and metrics.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupportAccessStatus {
    Pending,
    Approved,
    Active,
    Expired,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportAccessRequest {
    pub id: String,
    pub business_id: String,
    pub reason: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub status: SupportAccessStatus,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    pub requested_at: String,
    #[serde(default)]
    pub activated_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportJobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Delivered,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub id: String,
    pub business_id: String,
    #[serde(default)]
    pub kind: Option<String>,
    pub status: ExportJobStatus,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub last_error: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub delivered_at: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementSeverity {
    Info,
    Warning,
    Security,
}

impl AnnouncementSeverity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFO" => Some(AnnouncementSeverity::Info),
            "WARNING" => Some(AnnouncementSeverity::Warning),
            "SECURITY" => Some(AnnouncementSeverity::Security),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: AnnouncementSeverity,
    pub starts_at: String,
    #[serde(default)]
    pub ends_at: Option<String>,
    #[serde(default)]
    pub target_business_ids: Vec<String>,
}

impl Announcement {
    pub fn is_active(&self) -> bool {
        self.ends_at.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default)]
    pub actor: Option<String>,
    pub action: String,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMetrics {
    #[serde(default)]
    pub total_businesses: u64,
    #[serde(default)]
    pub active_businesses: u64,
    #[serde(default)]
    pub under_review: u64,
    #[serde(default)]
    pub suspended: u64,
    #[serde(default)]
    pub exports_pending: u64,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
