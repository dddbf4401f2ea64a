use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Platform API base URL
    #[arg(long)]
    pub(crate) url: String,
    /// Bearer token for the platform API
    #[arg(long)]
    pub(crate) token: String,
    /// Page size for lists
    #[arg(long)]
    pub(crate) page_limit: Option<u32>,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
