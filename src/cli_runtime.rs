use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use nvi_console::console::Console;
use nvi_console::remote::RemoteClient;
use nvi_console::session;
use nvi_console::store::ConsoleStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "nvi-console")]
#[command(about = "Platform operations console", long_about = None)]
pub(crate) struct Cli {
    /// Where config, tokens and pinned businesses live
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = ConsoleStore::resolve_root(cli.data_dir.as_deref())?;
    let store = ConsoleStore::open(&root)?;

    match cli.command {
        None => {
            nvi_console::logging::init_file(&store.log_path(), cli.verbose)?;
            tracing::info!(data_dir = %store.root().display(), "starting console");
            let console = open_console(&store, None)?;
            nvi_console::tui::run(console)?;
        }
        Some(command) => {
            nvi_console::logging::init_stderr(cli.verbose);
            crate::cli_exec::handle_command(&store, command)?
        }
    }

    Ok(())
}

/// Base URL and token of the current session.
pub(crate) fn require_session(store: &ConsoleStore) -> Result<(String, String)> {
    let cfg = store.read_config()?;
    let base_url = cfg
        .base_url
        .context("not logged in (run `nvi-console login --url ... --token ...`)")?;
    let token = store.get_token(&base_url)?.context(
        "no token stored for this platform (run `nvi-console login --url ... --token ...`)",
    )?;
    session::check_token(&token, time::OffsetDateTime::now_utc())?;
    Ok((base_url, token))
}

/// Builds a console bound to the stored session. `limit` overrides the
/// configured page size.
pub(crate) fn open_console(store: &ConsoleStore, limit: Option<u32>) -> Result<Console> {
    let (base_url, token) = require_session(store)?;
    let cfg = store.read_config()?;
    let client = RemoteClient::new(&base_url, token)?;
    Ok(Console::new(
        client,
        Box::new(store.kv()),
        limit.unwrap_or(cfg.page_limit),
    ))
}
