//! Editable fields of the workspace tabs and how keys change them.

use crate::console::{WorkspaceDrafts, WorkspaceForm, WorkspaceTab};
use crate::model::{BusinessStatus, ReviewSeverity, SubscriptionStatus, SubscriptionTier};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Field {
    Tier,
    SubscriptionStatus,
    SubscriptionReason,
    Status,
    StatusReason,
    UnderReview,
    Severity,
    ReviewReason,
    ReadOnly,
    ReadOnlyReason,
    Limit,
    TtlSeconds,
    RateLimitReason,
    RevokeReason,
}

/// How `Enter` edits a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum EditKind {
    Cycle,
    Toggle,
    Text,
}

pub(super) fn fields_for(tab: WorkspaceTab) -> &'static [Field] {
    match tab {
        WorkspaceTab::Subscription => &[
            Field::Tier,
            Field::SubscriptionStatus,
            Field::SubscriptionReason,
        ],
        WorkspaceTab::RiskStatus => &[
            Field::Status,
            Field::StatusReason,
            Field::UnderReview,
            Field::Severity,
            Field::ReviewReason,
        ],
        WorkspaceTab::Access => &[
            Field::ReadOnly,
            Field::ReadOnlyReason,
            Field::Limit,
            Field::TtlSeconds,
            Field::RateLimitReason,
            Field::RevokeReason,
        ],
        _ => &[],
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let i = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(i + 1) % all.len()]
}

const SEVERITIES: [ReviewSeverity; 3] = [
    ReviewSeverity::Low,
    ReviewSeverity::Medium,
    ReviewSeverity::High,
];

fn yes_no(v: bool, yes: &str, no: &str) -> String {
    if v { yes } else { no }.to_string()
}

fn opt_num<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl Field {
    pub(super) fn label(self) -> &'static str {
        match self {
            Field::Tier => "Tier",
            Field::SubscriptionStatus => "Subscription status",
            Field::SubscriptionReason => "Reason",
            Field::Status => "Business status",
            Field::StatusReason => "Status reason",
            Field::UnderReview => "Under review",
            Field::Severity => "Severity",
            Field::ReviewReason => "Review reason",
            Field::ReadOnly => "Read-only",
            Field::ReadOnlyReason => "Read-only reason",
            Field::Limit => "Rate limit",
            Field::TtlSeconds => "Override TTL (s)",
            Field::RateLimitReason => "Rate limit reason",
            Field::RevokeReason => "Revoke sessions reason",
        }
    }

    pub(super) fn form(self) -> WorkspaceForm {
        match self {
            Field::Tier | Field::SubscriptionStatus | Field::SubscriptionReason => {
                WorkspaceForm::Subscription
            }
            Field::Status | Field::StatusReason => WorkspaceForm::Status,
            Field::UnderReview | Field::Severity | Field::ReviewReason => WorkspaceForm::Review,
            Field::ReadOnly | Field::ReadOnlyReason => WorkspaceForm::ReadOnly,
            Field::Limit | Field::TtlSeconds | Field::RateLimitReason => WorkspaceForm::RateLimits,
            Field::RevokeReason => WorkspaceForm::RevokeSessions,
        }
    }

    pub(super) fn edit_kind(self) -> EditKind {
        match self {
            Field::Tier | Field::SubscriptionStatus | Field::Status | Field::Severity => {
                EditKind::Cycle
            }
            Field::UnderReview | Field::ReadOnly => EditKind::Toggle,
            _ => EditKind::Text,
        }
    }

    pub(super) fn value(self, d: &WorkspaceDrafts) -> String {
        match self {
            Field::Tier => d.subscription.tier.as_str().to_string(),
            Field::SubscriptionStatus => d.subscription.status.as_str().to_string(),
            Field::SubscriptionReason => d.subscription.reason.clone(),
            Field::Status => d.status.status.as_str().to_string(),
            Field::StatusReason => d.status.reason.clone(),
            Field::UnderReview => yes_no(d.review.under_review, "yes", "no"),
            Field::Severity => d.review.severity.as_str().to_string(),
            Field::ReviewReason => d.review.reason.clone(),
            Field::ReadOnly => yes_no(d.read_only.enabled, "on", "off"),
            Field::ReadOnlyReason => d.read_only.reason.clone(),
            Field::Limit => opt_num(d.rate_limits.limit),
            Field::TtlSeconds => opt_num(d.rate_limits.ttl_seconds),
            Field::RateLimitReason => d.rate_limits.reason.clone(),
            Field::RevokeReason => d.revoke_reason.clone(),
        }
    }

    /// Cycles an enum field or flips a toggle. Text fields are untouched.
    pub(super) fn step(self, d: &mut WorkspaceDrafts) {
        match self {
            Field::Tier => d.subscription.tier = cycle(&SubscriptionTier::ALL, d.subscription.tier),
            Field::SubscriptionStatus => {
                d.subscription.status = cycle(&SubscriptionStatus::ALL, d.subscription.status)
            }
            Field::Status => d.status.status = cycle(&BusinessStatus::ALL, d.status.status),
            Field::Severity => d.review.severity = cycle(&SEVERITIES, d.review.severity),
            Field::UnderReview => d.review.under_review = !d.review.under_review,
            Field::ReadOnly => d.read_only.enabled = !d.read_only.enabled,
            _ => {}
        }
    }

    /// Stores text typed into the input modal. Numeric fields accept an
    /// empty string (unset) or a number.
    pub(super) fn set_text(self, d: &mut WorkspaceDrafts, text: &str) -> Result<(), String> {
        let text = text.trim();
        match self {
            Field::SubscriptionReason => d.subscription.reason = text.to_string(),
            Field::StatusReason => d.status.reason = text.to_string(),
            Field::ReviewReason => d.review.reason = text.to_string(),
            Field::ReadOnlyReason => d.read_only.reason = text.to_string(),
            Field::RateLimitReason => d.rate_limits.reason = text.to_string(),
            Field::RevokeReason => d.revoke_reason = text.to_string(),
            Field::Limit => {
                d.rate_limits.limit = parse_opt(text).map_err(|_| "limit must be a number")?
            }
            Field::TtlSeconds => {
                d.rate_limits.ttl_seconds = parse_opt(text).map_err(|_| "TTL must be a number")?
            }
            _ => return Err(format!("{} is not a text field", self.label())),
        }
        Ok(())
    }
}

fn parse_opt<T: std::str::FromStr>(text: &str) -> Result<Option<T>, T::Err> {
    if text.is_empty() {
        Ok(None)
    } else {
        text.parse().map(Some)
    }
}

#[cfg(test)]
#[path = "../tests/tui/fields_tests.rs"]
mod tests;
