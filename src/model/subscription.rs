use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    Starter,
    Business,
    Enterprise,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 3] = [
        SubscriptionTier::Starter,
        SubscriptionTier::Business,
        SubscriptionTier::Enterprise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Starter => "STARTER",
            SubscriptionTier::Business => "BUSINESS",
            SubscriptionTier::Enterprise => "ENTERPRISE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Grace,
    Expired,
    Suspended,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 5] = [
        SubscriptionStatus::Trial,
        SubscriptionStatus::Active,
        SubscriptionStatus::Grace,
        SubscriptionStatus::Expired,
        SubscriptionStatus::Suspended,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "TRIAL",
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Grace => "GRACE",
            SubscriptionStatus::Expired => "EXPIRED",
            SubscriptionStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionLimits {
    #[serde(default)]
    pub max_users: Option<u64>,
    #[serde(default)]
    pub max_branches: Option<u64>,
    #[serde(default)]
    pub max_devices: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSnapshot {
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub trial_ends_at: Option<String>,
    #[serde(default)]
    pub grace_ends_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub limits: Option<SubscriptionLimits>,
}

impl SubscriptionSnapshot {
    /// The deadline that matters for the current status, if any.
    pub fn next_deadline(&self) -> Option<&str> {
        match self.status {
            SubscriptionStatus::Trial => self.trial_ends_at.as_deref(),
            SubscriptionStatus::Grace => self.grace_ends_at.as_deref(),
            _ => self.expires_at.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionHistoryEntry {
    pub id: String,
    #[serde(default)]
    pub previous_tier: Option<SubscriptionTier>,
    #[serde(default)]
    pub next_tier: Option<SubscriptionTier>,
    #[serde(default)]
    pub previous_status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub next_status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub changed_by: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub id: String,
    pub business_id: String,
    #[serde(default)]
    pub business_name: Option<String>,
    pub requested_tier: SubscriptionTier,
    pub status: RequestStatus,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: String,
}
