use clap::Subcommand;

use nvi_console::model::{BusinessStatus, ReviewSeverity, SubscriptionStatus, SubscriptionTier};

use super::{parse_business_status, parse_review_severity, parse_subscription_status, parse_tier};

#[derive(Subcommand)]
pub(crate) enum BusinessesCommands {
    /// List businesses, one page at a time (or all with --all)
    List {
        /// Name or id fragment
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_business_status)]
        status: Option<BusinessStatus>,
        /// Only businesses flagged for review
        #[arg(long)]
        review: bool,
        /// Page size
        #[arg(long)]
        limit: Option<u32>,
        /// Follow cursors to the end
        #[arg(long)]
        all: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum BusinessCommands {
    /// Show the full detail aggregate of a business
    Show {
        business_id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the lifecycle status
    Status {
        business_id: String,
        #[arg(long, value_parser = parse_business_status)]
        status: BusinessStatus,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Change tier and/or subscription status
    Subscription {
        business_id: String,
        #[arg(long, value_parser = parse_tier)]
        tier: Option<SubscriptionTier>,
        #[arg(long = "sub-status", value_parser = parse_subscription_status)]
        sub_status: Option<SubscriptionStatus>,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Start a trial subscription for a business without one
    StartTrial {
        business_id: String,
        #[arg(long, value_parser = parse_tier)]
        tier: SubscriptionTier,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Turn read-only mode on or off
    ReadOnly {
        business_id: String,
        #[arg(long, conflicts_with = "disable", required_unless_present = "disable")]
        enable: bool,
        #[arg(long)]
        disable: bool,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Flag for review or clear the flag
    Review {
        business_id: String,
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        flag: bool,
        #[arg(long)]
        clear: bool,
        #[arg(long, value_parser = parse_review_severity)]
        severity: Option<ReviewSeverity>,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Override the API rate limit
    RateLimits {
        business_id: String,
        #[arg(long)]
        limit: u32,
        #[arg(long)]
        ttl_seconds: Option<u64>,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Log out every user and device of the business
    RevokeSessions {
        business_id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Permanently delete all business data
    Purge {
        business_id: String,
        #[arg(long, default_value = "")]
        reason: String,
        /// Must repeat the business id exactly
        #[arg(long = "confirm-id", default_value = "")]
        confirm_id: String,
        /// Must be DELETE
        #[arg(long = "confirm-text", default_value = "")]
        confirm_text: String,
    },

    /// Registered devices
    Devices {
        business_id: String,
        #[arg(long)]
        json: bool,
    },

    /// Health score and its reasons
    Health {
        business_id: String,
        #[arg(long)]
        json: bool,
    },

    /// Subscription history
    History {
        business_id: String,
        #[arg(long)]
        json: bool,
    },
}
