mod business;
mod queues;
mod settings;

pub(crate) use self::business::{BusinessCommands, BusinessesCommands};
pub(crate) use self::queues::{
    AnnouncementsCommands, ExportsCommands, RequestsCommands, SupportCommands,
};
pub(crate) use self::settings::SettingsCommands;

use nvi_console::model::{
    AnnouncementSeverity, BusinessStatus, ReviewSeverity, SubscriptionStatus, SubscriptionTier,
};

fn parse_with<T>(
    raw: &str,
    what: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &str,
) -> Result<T, String> {
    parse(raw).ok_or_else(|| format!("unknown {} `{}` (expected one of: {})", what, raw, allowed))
}

pub(crate) fn parse_business_status(raw: &str) -> Result<BusinessStatus, String> {
    parse_with(
        raw,
        "status",
        BusinessStatus::parse,
        "ACTIVE, GRACE, EXPIRED, SUSPENDED, ARCHIVED, DELETED",
    )
}

pub(crate) fn parse_tier(raw: &str) -> Result<SubscriptionTier, String> {
    parse_with(raw, "tier", SubscriptionTier::parse, "STARTER, BUSINESS, ENTERPRISE")
}

pub(crate) fn parse_subscription_status(raw: &str) -> Result<SubscriptionStatus, String> {
    parse_with(
        raw,
        "subscription status",
        SubscriptionStatus::parse,
        "TRIAL, ACTIVE, GRACE, EXPIRED, SUSPENDED",
    )
}

pub(crate) fn parse_review_severity(raw: &str) -> Result<ReviewSeverity, String> {
    parse_with(raw, "severity", ReviewSeverity::parse, "LOW, MEDIUM, HIGH")
}

pub(crate) fn parse_announcement_severity(raw: &str) -> Result<AnnouncementSeverity, String> {
    parse_with(
        raw,
        "severity",
        AnnouncementSeverity::parse,
        "INFO, WARNING, SECURITY",
    )
}
