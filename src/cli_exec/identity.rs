use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use nvi_console::remote::RemoteClient;
use nvi_console::session;
use nvi_console::store::{ConsoleStore, PinnedBusinesses, SupportNotes};

use crate::cli_commands::identity::{LoginArgs, WhoamiArgs};
use crate::cli_commands::local::{NoteArgs, PinsArgs};
use crate::require_session;

use super::print_json;

pub(super) fn handle_login(store: &ConsoleStore, args: LoginArgs) -> Result<()> {
    let token = args.token.trim();
    if token.is_empty() {
        anyhow::bail!("token must not be empty");
    }
    let claims = session::check_token(token, OffsetDateTime::now_utc())?;
    // Validates the URL before anything is written.
    let client = RemoteClient::new(&args.url, token.to_string())?;

    let mut cfg = store.read_config()?;
    cfg.base_url = Some(client.base_url().to_string());
    if let Some(limit) = args.page_limit {
        cfg.page_limit = limit.max(1);
    }
    store
        .set_token(client.base_url(), token)
        .context("store token in state.json")?;
    store.write_config(&cfg)?;

    match claims {
        Some(c) => {
            if !c.is_platform_admin() {
                eprintln!(
                    "warning: role {} is not a platform admin; platform endpoints will refuse it",
                    c.role.as_deref().unwrap_or("(none)")
                );
            }
            println!("Logged in to {} as {}", client.base_url(), c.label());
        }
        None => println!("Logged in to {}", client.base_url()),
    }
    Ok(())
}

pub(super) fn handle_logout(store: &ConsoleStore) -> Result<()> {
    let cfg = store.read_config()?;
    let Some(base_url) = cfg.base_url else {
        println!("Not logged in");
        return Ok(());
    };
    store.clear_token(&base_url)?;
    println!("Logged out of {}", base_url);
    Ok(())
}

pub(super) fn handle_whoami(store: &ConsoleStore, args: WhoamiArgs) -> Result<()> {
    let (base_url, token) = require_session(store)?;
    let claims = session::decode_claims(&token);
    if args.json {
        let v = serde_json::json!({
            "baseUrl": base_url,
            "sub": claims.as_ref().and_then(|c| c.sub.clone()),
            "email": claims.as_ref().and_then(|c| c.email.clone()),
            "role": claims.as_ref().and_then(|c| c.role.clone()),
            "businessId": claims.as_ref().and_then(|c| c.business_id.clone()),
            "exp": claims.as_ref().and_then(|c| c.exp),
        });
        return print_json(&v, "whoami json");
    }

    println!("url: {}", base_url);
    match claims {
        Some(c) => {
            println!("operator: {}", c.label());
            println!("role: {}", c.role.as_deref().unwrap_or("-"));
            if let Some(b) = &c.business_id {
                println!("business: {}", b);
            }
            if let Some(exp) = c.expires_at() {
                let ts = exp.format(&Rfc3339).unwrap_or_else(|_| exp.to_string());
                println!("expires: {}", ts);
            }
        }
        None => println!("operator: (opaque token)"),
    }
    Ok(())
}

pub(super) fn handle_pin(store: &ConsoleStore, business_id: &str, pin: bool) -> Result<()> {
    let mut kv = store.kv();
    let mut pins = PinnedBusinesses::hydrate(&kv);
    let changed = if pin {
        pins.pin(business_id, &mut kv)?
    } else {
        pins.unpin(business_id, &mut kv)?
    };
    match (pin, changed) {
        (true, true) => println!("Pinned {}", business_id),
        (true, false) => println!("{} is already pinned", business_id),
        (false, true) => println!("Unpinned {}", business_id),
        (false, false) => println!("{} was not pinned", business_id),
    }
    Ok(())
}

pub(super) fn handle_pins(store: &ConsoleStore, args: PinsArgs) -> Result<()> {
    let kv = store.kv();
    let pins = PinnedBusinesses::hydrate(&kv);
    let notes = SupportNotes::hydrate(&kv);
    if args.json {
        return print_json(pins.ids(), "pins json");
    }
    if pins.ids().is_empty() {
        println!("No pinned businesses");
    }
    for id in pins.ids() {
        match notes.get(id) {
            Some(note) => println!("{}  {}", id, note),
            None => println!("{}", id),
        }
    }
    Ok(())
}

pub(super) fn handle_note(store: &ConsoleStore, args: NoteArgs) -> Result<()> {
    let mut kv = store.kv();
    let mut notes = SupportNotes::hydrate(&kv);
    if args.clear {
        notes.set(&args.business_id, "", &mut kv)?;
        println!("Note cleared");
        return Ok(());
    }
    match args.text {
        Some(text) => {
            notes.set(&args.business_id, &text, &mut kv)?;
            println!("Note saved");
        }
        None => match notes.get(&args.business_id) {
            Some(note) => println!("{}", note),
            None => println!("(no note)"),
        },
    }
    Ok(())
}
