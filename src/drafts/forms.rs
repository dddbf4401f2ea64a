use crate::model::{
    Business, BusinessStatus, ReviewSeverity, SubscriptionStatus, SubscriptionTier,
};

use super::DraftStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionDraft {
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    pub reason: String,
}

impl SubscriptionDraft {
    pub fn from_business(b: &Business) -> Self {
        let (tier, status) = b
            .subscription
            .as_ref()
            .map(|s| (s.tier, s.status))
            .unwrap_or((SubscriptionTier::Starter, SubscriptionStatus::Trial));
        Self {
            tier,
            status,
            reason: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusDraft {
    pub status: BusinessStatus,
    pub reason: String,
}

impl StatusDraft {
    pub fn from_business(b: &Business) -> Self {
        Self {
            status: b.status,
            reason: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOnlyDraft {
    pub enabled: bool,
    pub reason: String,
}

impl ReadOnlyDraft {
    pub fn from_business(b: &Business) -> Self {
        Self {
            enabled: b.read_only_enabled(),
            reason: b
                .settings
                .as_ref()
                .and_then(|s| s.read_only_reason.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewDraft {
    pub under_review: bool,
    pub severity: ReviewSeverity,
    pub reason: String,
}

impl ReviewDraft {
    pub fn from_business(b: &Business) -> Self {
        Self {
            under_review: b.under_review,
            severity: b.review_severity.unwrap_or(ReviewSeverity::Medium),
            reason: b.review_reason.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitDraft {
    pub limit: Option<u32>,
    pub ttl_seconds: Option<u64>,
    pub reason: String,
}

impl RateLimitDraft {
    pub fn from_business(b: &Business) -> Self {
        let o = b.rate_limit_override();
        Self {
            limit: o.and_then(|o| o.limit),
            ttl_seconds: o.and_then(|o| o.ttl_seconds),
            reason: String::new(),
        }
    }
}

/// One draft store per editable form of a business row.
#[derive(Clone, Debug, Default)]
pub struct BusinessDrafts {
    pub subscription: DraftStore<SubscriptionDraft>,
    pub status: DraftStore<StatusDraft>,
    pub read_only: DraftStore<ReadOnlyDraft>,
    pub review: DraftStore<ReviewDraft>,
    pub rate_limits: DraftStore<RateLimitDraft>,
}

fn business_id(b: &Business) -> &str {
    &b.id
}

impl BusinessDrafts {
    /// Full-list sync: drops drafts of vanished businesses and seeds new ones.
    pub fn sync(&mut self, items: &[Business]) {
        self.subscription
            .sync(items, business_id, SubscriptionDraft::from_business);
        self.status.sync(items, business_id, StatusDraft::from_business);
        self.read_only
            .sync(items, business_id, ReadOnlyDraft::from_business);
        self.review.sync(items, business_id, ReviewDraft::from_business);
        self.rate_limits
            .sync(items, business_id, RateLimitDraft::from_business);
    }

    /// Seeds drafts for an appended page without touching anything else.
    pub fn seed(&mut self, items: &[Business]) {
        self.subscription
            .seed(items, business_id, SubscriptionDraft::from_business);
        self.status.seed(items, business_id, StatusDraft::from_business);
        self.read_only
            .seed(items, business_id, ReadOnlyDraft::from_business);
        self.review.seed(items, business_id, ReviewDraft::from_business);
        self.rate_limits
            .seed(items, business_id, RateLimitDraft::from_business);
    }

    /// Re-seeds every form of one business from fresh server values.
    pub fn reset(&mut self, b: &Business) {
        self.subscription
            .reset(&b.id, b, SubscriptionDraft::from_business);
        self.status.reset(&b.id, b, StatusDraft::from_business);
        self.read_only.reset(&b.id, b, ReadOnlyDraft::from_business);
        self.review.reset(&b.id, b, ReviewDraft::from_business);
        self.rate_limits
            .reset(&b.id, b, RateLimitDraft::from_business);
    }

    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }
}
