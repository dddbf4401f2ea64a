use clap::Args;

#[derive(Args)]
pub(crate) struct PinArgs {
    pub(crate) business_id: String,
}

#[derive(Args)]
pub(crate) struct PinsArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct NoteArgs {
    pub(crate) business_id: String,
    /// New note text (omit to show the current note)
    pub(crate) text: Option<String>,
    /// Remove the note
    #[arg(long, conflicts_with = "text")]
    pub(crate) clear: bool,
}
