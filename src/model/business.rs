use serde::{Deserialize, Serialize};

use super::subscription::SubscriptionSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Active,
    Grace,
    Expired,
    Suspended,
    Archived,
    Deleted,
}

impl BusinessStatus {
    pub const ALL: [BusinessStatus; 6] = [
        BusinessStatus::Active,
        BusinessStatus::Grace,
        BusinessStatus::Expired,
        BusinessStatus::Suspended,
        BusinessStatus::Archived,
        BusinessStatus::Deleted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BusinessStatus::Active => "ACTIVE",
            BusinessStatus::Grace => "GRACE",
            BusinessStatus::Expired => "EXPIRED",
            BusinessStatus::Suspended => "SUSPENDED",
            BusinessStatus::Archived => "ARCHIVED",
            BusinessStatus::Deleted => "DELETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewSeverity {
    Low,
    Medium,
    High,
}

impl ReviewSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewSeverity::Low => "LOW",
            ReviewSeverity::Medium => "MEDIUM",
            ReviewSeverity::High => "HIGH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(ReviewSeverity::Low),
            "MEDIUM" => Some(ReviewSeverity::Medium),
            "HIGH" => Some(ReviewSeverity::High),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitOverride {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub read_only_enabled: bool,
    #[serde(default)]
    pub read_only_reason: Option<String>,
    #[serde(default)]
    pub rate_limit_override: Option<RateLimitOverride>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounts {
    #[serde(default)]
    pub users: Option<u64>,
    #[serde(default)]
    pub branches: Option<u64>,
    #[serde(default)]
    pub products: Option<u64>,
    #[serde(default)]
    pub devices: Option<u64>,
}

/// Client-side copy of a tenant business as returned by the platform list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: String,
    pub name: String,
    pub status: BusinessStatus,

    #[serde(default)]
    pub under_review: bool,
    #[serde(default)]
    pub review_reason: Option<String>,
    #[serde(default)]
    pub review_severity: Option<ReviewSeverity>,

    #[serde(default)]
    pub subscription: Option<SubscriptionSnapshot>,
    #[serde(default)]
    pub settings: Option<SettingsSnapshot>,
    #[serde(default)]
    pub counts: Option<UsageCounts>,

    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_activity_at: Option<String>,
}

impl Business {
    pub fn read_only_enabled(&self) -> bool {
        self.settings
            .as_ref()
            .map(|s| s.read_only_enabled)
            .unwrap_or(false)
    }

    pub fn rate_limit_override(&self) -> Option<&RateLimitOverride> {
        self.settings
            .as_ref()
            .and_then(|s| s.rate_limit_override.as_ref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub score: u32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_seen_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAction {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub actor: Option<String>,
    pub created_at: String,
}

/// The combined read model behind the business detail view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessWorkspace {
    pub business: Business,
    #[serde(default)]
    pub subscription: Option<SubscriptionSnapshot>,
    #[serde(default)]
    pub settings: Option<SettingsSnapshot>,
    #[serde(default)]
    pub counts: Option<UsageCounts>,
    #[serde(default)]
    pub health: Option<HealthScore>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub recent_actions: Vec<AdminAction>,
}

impl BusinessWorkspace {
    /// The business record with the aggregate's fresher snapshots folded in.
    pub fn merged_business(&self) -> Business {
        let mut b = self.business.clone();
        if let Some(sub) = &self.subscription {
            b.subscription = Some(sub.clone());
        }
        if let Some(settings) = &self.settings {
            b.settings = Some(settings.clone());
        }
        if let Some(counts) = &self.counts {
            b.counts = Some(counts.clone());
        }
        b
    }
}
