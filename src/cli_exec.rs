use anyhow::{Context, Result};
use serde::Serialize;

use nvi_console::console::Console;
use nvi_console::error::BannerKind;
use nvi_console::store::ConsoleStore;

use crate::{Commands, open_console};

mod business;
mod identity;
mod queues;
mod settings;

pub(crate) fn handle_command(store: &ConsoleStore, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => identity::handle_login(store, args),
        Commands::Logout => identity::handle_logout(store),
        Commands::Whoami(args) => identity::handle_whoami(store, args),
        Commands::Pin(args) => identity::handle_pin(store, &args.business_id, true),
        Commands::Unpin(args) => identity::handle_pin(store, &args.business_id, false),
        Commands::Pins(args) => identity::handle_pins(store, args),
        Commands::Note(args) => identity::handle_note(store, args),

        Commands::Businesses { command } => business::handle_businesses_command(store, command),
        Commands::Business { command } => {
            let mut console = open_console(store, None)?;
            business::handle_business_command(&mut console, command)
        }

        Commands::Requests { command } => {
            let mut console = open_console(store, None)?;
            queues::handle_requests_command(&mut console, command)
        }
        Commands::Support { command } => {
            let mut console = open_console(store, None)?;
            queues::handle_support_command(&mut console, command)
        }
        Commands::Exports { command } => {
            let mut console = open_console(store, None)?;
            queues::handle_exports_command(&mut console, command)
        }
        Commands::Announcements { command } => {
            let mut console = open_console(store, None)?;
            queues::handle_announcements_command(&mut console, command)
        }
        Commands::Audit(args) => {
            let mut console = open_console(store, args.limit)?;
            queues::handle_audit(&mut console, args)
        }
        Commands::Metrics(args) => {
            let mut console = open_console(store, None)?;
            queues::handle_metrics(&mut console, args)
        }

        Commands::Settings { command } => {
            let mut console = open_console(store, None)?;
            settings::handle_settings_command(&mut console, command)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {}", what))?
    );
    Ok(())
}

/// Informational banners (degraded secondary data) go to stderr; errors
/// already travel up as the command's `Err`.
fn print_notice(console: &Console) {
    if let Some(b) = console.banner()
        && b.kind == BannerKind::Info
    {
        eprintln!("note: {}", b.text);
    }
}

fn or_dash(v: Option<&str>) -> &str {
    v.unwrap_or("-")
}
