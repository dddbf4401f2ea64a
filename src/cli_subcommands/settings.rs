use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum SettingsCommands {
    /// Show the settings document
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Replace the settings document with a JSON file
    Set { file: PathBuf },
    /// List units, or add one
    Units {
        /// CODE LABEL
        #[arg(long, num_args = 2, value_names = ["CODE", "LABEL"])]
        add: Option<Vec<String>>,
        #[arg(long)]
        json: bool,
    },
    /// Delete the signed-in business
    DeleteBusiness {
        /// Must repeat the business id exactly
        #[arg(long = "business-id", default_value = "")]
        business_id: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Must be DELETE
        #[arg(long = "confirm-text", default_value = "")]
        confirm_text: String,
    },
}
