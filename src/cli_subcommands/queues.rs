use clap::Subcommand;

use nvi_console::model::AnnouncementSeverity;

use super::parse_announcement_severity;

#[derive(Subcommand)]
pub(crate) enum RequestsCommands {
    /// List subscription change requests
    List {
        #[arg(long)]
        json: bool,
    },
    /// Approve a request
    Approve {
        request_id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Reject a request
    Reject {
        request_id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum SupportCommands {
    /// List support access requests
    List {
        #[arg(long)]
        json: bool,
    },
    /// Ask for temporary access to a business
    Request {
        business_id: String,
        #[arg(long, default_value = "")]
        reason: String,
        #[arg(long)]
        hours: Option<u32>,
        #[arg(long)]
        scope: Option<String>,
    },
    /// Start an approved access window
    Activate { request_id: String },
}

#[derive(Subcommand)]
pub(crate) enum ExportsCommands {
    /// List export jobs
    List {
        #[arg(long)]
        json: bool,
    },
    /// Queue an export job
    Create {
        business_id: String,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Queue the exit export of a departing business
    OnExit {
        business_id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Record that an export reached the customer
    Delivered {
        job_id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum AnnouncementsCommands {
    /// List announcements
    List {
        #[arg(long)]
        json: bool,
    },
    /// Publish an announcement
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        #[arg(long, default_value = "INFO", value_parser = parse_announcement_severity)]
        severity: AnnouncementSeverity,
        #[arg(long)]
        starts_at: Option<String>,
        #[arg(long)]
        ends_at: Option<String>,
        /// Limit to these businesses (repeatable)
        #[arg(long = "target")]
        targets: Vec<String>,
    },
    /// End an announcement now
    End { announcement_id: String },
}
