use clap::Args;

#[derive(Args)]
pub(crate) struct AuditArgs {
    /// Operator actions instead of tenant activity
    #[arg(long)]
    pub(crate) platform: bool,
    /// Only entries for this business
    #[arg(long = "business")]
    pub(crate) business_id: Option<String>,
    #[arg(long)]
    pub(crate) action: Option<String>,
    #[arg(long)]
    pub(crate) actor: Option<String>,
    /// Page size
    #[arg(long)]
    pub(crate) limit: Option<u32>,
    /// Follow cursors to the end
    #[arg(long)]
    pub(crate) all: bool,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct MetricsArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
