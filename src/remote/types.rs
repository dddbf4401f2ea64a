//! Request payloads for the platform API.

use serde::Serialize;

use crate::model::{
    AnnouncementSeverity, BusinessStatus, ReviewSeverity, SubscriptionStatus, SubscriptionTier,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateStatusRequest<'a> {
    pub(super) status: BusinessStatus,
    pub(super) reason: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateReadOnlyRequest<'a> {
    pub(super) enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) reason: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateReviewRequest<'a> {
    pub(super) under_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) severity: Option<ReviewSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) reason: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateRateLimitsRequest<'a> {
    pub(super) limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) ttl_seconds: Option<u64>,
    pub(super) reason: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReasonRequest<'a> {
    pub(super) reason: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PurgeRequest<'a> {
    pub(super) reason: &'a str,
    pub(super) confirm_business_id: &'a str,
    pub(super) confirm_text: &'a str,
}

/// Fields of a subscription update; unset fields are left alone server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<SubscriptionTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_ends_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_ends_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateSubscriptionRequest<'a> {
    pub(super) business_id: &'a str,
    pub(super) tier: SubscriptionTier,
    pub(super) reason: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateSupportAccessRequest<'a> {
    pub(super) business_id: &'a str,
    pub(super) reason: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) duration_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) scope: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateExportJobRequest<'a> {
    pub(super) business_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) reason: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub severity: AnnouncementSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_business_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeleteBusinessRequest<'a> {
    pub(super) business_id: &'a str,
    pub(super) password: &'a str,
    pub(super) confirm_text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateUnitRequest<'a> {
    pub(super) code: &'a str,
    pub(super) label: &'a str,
}

/// Filters for the platform business list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusinessQuery {
    pub search: String,
    pub status: Option<BusinessStatus>,
    pub under_review: Option<bool>,
}

/// Filters for both audit log lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditQuery {
    pub business_id: Option<String>,
    pub action: Option<String>,
    pub actor: Option<String>,
}
