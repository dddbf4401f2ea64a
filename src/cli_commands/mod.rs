use clap::Subcommand;

use crate::{
    AnnouncementsCommands, BusinessCommands, BusinessesCommands, ExportsCommands,
    RequestsCommands, SettingsCommands, SupportCommands,
};

pub(crate) mod identity;
pub(crate) mod listing;
pub(crate) mod local;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in to a platform (store base URL and token)
    Login(identity::LoginArgs),

    /// Log out (clear the stored token)
    Logout,

    /// Show the current operator identity
    Whoami(identity::WhoamiArgs),

    /// List and filter businesses
    Businesses {
        #[command(subcommand)]
        command: BusinessesCommands,
    },

    /// Inspect or change one business
    Business {
        #[command(subcommand)]
        command: BusinessCommands,
    },

    /// Subscription change requests
    Requests {
        #[command(subcommand)]
        command: RequestsCommands,
    },

    /// Support access requests
    Support {
        #[command(subcommand)]
        command: SupportCommands,
    },

    /// Data export jobs
    Exports {
        #[command(subcommand)]
        command: ExportsCommands,
    },

    /// Platform announcements
    Announcements {
        #[command(subcommand)]
        command: AnnouncementsCommands,
    },

    /// Audit logs (tenant or platform)
    Audit(listing::AuditArgs),

    /// Platform-wide counters
    Metrics(listing::MetricsArgs),

    /// Pin a business to the top of the list
    Pin(local::PinArgs),

    /// Unpin a business
    Unpin(local::PinArgs),

    /// List pinned businesses
    Pins(local::PinsArgs),

    /// Show, set or clear the support note of a business
    Note(local::NoteArgs),

    /// Tenant settings page (as the signed-in business)
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}
