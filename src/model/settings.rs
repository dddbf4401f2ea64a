//! Tenant-side settings page documents.

use serde::{Deserialize, Serialize};

use super::business::BusinessStatus;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDefaults {
    #[serde(default)]
    pub stock_adjust_threshold: Option<f64>,
    #[serde(default)]
    pub refund_threshold: Option<f64>,
    #[serde(default)]
    pub purchase_threshold: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPolicy {
    #[serde(default)]
    pub negative_stock_allowed: bool,
    #[serde(default)]
    pub low_stock_threshold: Option<u64>,
    #[serde(default)]
    pub fifo_mode: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosPolicy {
    #[serde(default)]
    pub receipt_template: Option<String>,
    #[serde(default)]
    pub credit_enabled: bool,
    #[serde(default)]
    pub shift_tracking_enabled: bool,
    #[serde(default)]
    pub discount_threshold_percent: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSettings {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub date_format: Option<String>,
}

/// The business configuration document behind `GET/PUT /settings`.
///
/// Keys this client does not know about (the notification routing tree,
/// new policy blocks) are carried in `extra` so a save never drops them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSettings {
    #[serde(default)]
    pub approval_defaults: ApprovalDefaults,
    #[serde(default)]
    pub stock_policy: StockPolicy,
    #[serde(default)]
    pub pos_policy: PosPolicy,
    #[serde(default)]
    pub locale_settings: LocaleSettings,
    #[serde(default)]
    pub notification_defaults: Option<serde_json::Value>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantBusiness {
    pub id: String,
    pub name: String,
    pub status: BusinessStatus,
    #[serde(default)]
    pub default_language: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub code: String,
    pub label: String,
}
