use anyhow::{Context, Result};

use nvi_console::console::{Console, DangerAction, DangerEvent, DangerFlow, WorkspaceView};
use nvi_console::model::{Business, BusinessWorkspace};
use nvi_console::remote::BusinessQuery;
use nvi_console::store::ConsoleStore;

use crate::{BusinessCommands, BusinessesCommands, open_console};

use super::{or_dash, print_json, print_notice};

pub(super) fn handle_businesses_command(
    store: &ConsoleStore,
    command: BusinessesCommands,
) -> Result<()> {
    match command {
        BusinessesCommands::List {
            search,
            status,
            review,
            limit,
            all,
            json,
        } => {
            let mut console = open_console(store, limit)?;
            console.businesses.query = BusinessQuery {
                search: search.unwrap_or_default(),
                status,
                under_review: review.then_some(true),
            };
            if all {
                console.load_all_businesses()?;
            } else {
                console.load_businesses()?;
            }

            let items = console.businesses.items();
            if json {
                return print_json(items, "businesses json");
            }
            if items.is_empty() {
                println!("No businesses");
            }
            for b in items {
                println!("{}", business_row(&console, b));
            }
            if !all && console.businesses.list.next_cursor().is_some() {
                eprintln!("(more results: pass --all)");
            }
            print_notice(&console);
        }
    }
    Ok(())
}

fn business_row(console: &Console, b: &Business) -> String {
    let pin = if console.pins().contains(&b.id) { "*" } else { " " };
    let tier = b
        .subscription
        .as_ref()
        .map(|s| s.tier.as_str())
        .unwrap_or("-");
    let mut flags = Vec::new();
    if b.under_review {
        flags.push("review");
    }
    if b.read_only_enabled() {
        flags.push("read-only");
    }
    format!(
        "{} {} {} {} {} {}",
        pin,
        b.id,
        b.status,
        tier,
        b.name,
        if flags.is_empty() {
            String::new()
        } else {
            format!("[{}]", flags.join(","))
        }
    )
    .trim_end()
    .to_string()
}

/// Row mutations validate against a draft; a one-off CLI call seeds the
/// draft from the current server record first.
fn stage(console: &mut Console, business_id: &str) -> Result<()> {
    let b = console.client().get_business(business_id)?;
    console.businesses.drafts.seed(&[b]);
    Ok(())
}

pub(super) fn handle_business_command(
    console: &mut Console,
    command: BusinessCommands,
) -> Result<()> {
    match command {
        BusinessCommands::Show { business_id, json } => {
            console.open_workspace(&business_id)?;
            let ws = console
                .workspace
                .as_ref()
                .and_then(|w| w.aggregate.as_ref())
                .context("business details not loaded")?;
            if json {
                return print_json(ws, "business json");
            }
            print_workspace(console, ws);
        }

        BusinessCommands::Status {
            business_id,
            status,
            reason,
        } => {
            stage(console, &business_id)?;
            console.businesses.drafts.status.update(&business_id, |d| {
                d.status = status;
                d.reason = reason;
            });
            console.update_status(&business_id)?;
            println!("Status of {} set to {}", business_id, status);
        }

        BusinessCommands::Subscription {
            business_id,
            tier,
            sub_status,
            reason,
        } => {
            stage(console, &business_id)?;
            console.businesses.drafts.subscription.update(&business_id, |d| {
                if let Some(t) = tier {
                    d.tier = t;
                }
                if let Some(s) = sub_status {
                    d.status = s;
                }
                d.reason = reason;
            });
            console.update_subscription(&business_id)?;
            println!("Subscription of {} updated", business_id);
        }

        BusinessCommands::StartTrial {
            business_id,
            tier,
            reason,
        } => {
            let sub = console.start_trial(&business_id, tier, &reason)?;
            println!(
                "Trial {} started for {} (ends {})",
                sub.tier.as_str(),
                business_id,
                or_dash(sub.trial_ends_at.as_deref())
            );
        }

        BusinessCommands::ReadOnly {
            business_id,
            enable,
            disable: _,
            reason,
        } => {
            stage(console, &business_id)?;
            console.businesses.drafts.read_only.update(&business_id, |d| {
                d.enabled = enable;
                d.reason = reason;
            });
            console.update_read_only(&business_id)?;
            println!(
                "Read-only mode {} for {}",
                if enable { "enabled" } else { "disabled" },
                business_id
            );
        }

        BusinessCommands::Review {
            business_id,
            flag,
            clear: _,
            severity,
            reason,
        } => {
            stage(console, &business_id)?;
            console.businesses.drafts.review.update(&business_id, |d| {
                d.under_review = flag;
                if let Some(s) = severity {
                    d.severity = s;
                }
                d.reason = reason;
            });
            console.update_review(&business_id)?;
            println!(
                "{} {}",
                business_id,
                if flag { "flagged for review" } else { "review cleared" }
            );
        }

        BusinessCommands::RateLimits {
            business_id,
            limit,
            ttl_seconds,
            reason,
        } => {
            stage(console, &business_id)?;
            console.businesses.drafts.rate_limits.update(&business_id, |d| {
                d.limit = Some(limit);
                d.ttl_seconds = ttl_seconds;
                d.reason = reason;
            });
            console.update_rate_limits(&business_id)?;
            println!("Rate limit of {} set to {}", business_id, limit);
        }

        BusinessCommands::RevokeSessions {
            business_id,
            reason,
        } => {
            console.revoke_sessions(&business_id, &reason)?;
            println!("Sessions of {} revoked", business_id);
        }

        BusinessCommands::Purge {
            business_id,
            reason,
            confirm_id,
            confirm_text,
        } => {
            // Same flow as the interactive dialog, driven step by step.
            let mut flow = DangerFlow::new(&business_id);
            flow.apply(DangerEvent::Open(DangerAction::Purge))?;
            flow.apply(DangerEvent::Next)?;
            flow.reason = reason;
            flow.apply(DangerEvent::Next)?;
            flow.confirm_business_id = confirm_id;
            flow.confirm_text = confirm_text;
            let cmd = flow
                .apply(DangerEvent::Submit)?
                .context("purge was not submitted")?;
            console.run_danger(&cmd)?;
            println!("Purged {}", business_id);
        }

        BusinessCommands::Devices { business_id, json } => {
            console.workspace = Some(WorkspaceView::new(&business_id));
            console.load_workspace_devices()?;
            let devices = console
                .workspace
                .as_ref()
                .map(|w| w.devices.items())
                .unwrap_or_default();
            if json {
                return print_json(devices, "devices json");
            }
            if devices.is_empty() {
                println!("No devices");
            }
            for d in devices {
                println!(
                    "{} {} {} {}",
                    d.id,
                    or_dash(d.name.as_deref()),
                    or_dash(d.status.as_deref()),
                    or_dash(d.last_seen_at.as_deref())
                );
            }
        }

        BusinessCommands::Health { business_id, json } => {
            let health = console.client().get_health(&business_id)?;
            if json {
                return print_json(&health, "health json");
            }
            println!("score: {}", health.score);
            println!("status: {}", or_dash(health.status.as_deref()));
            for r in &health.reasons {
                println!("- {}", r);
            }
        }

        BusinessCommands::History { business_id, json } => {
            console.workspace = Some(WorkspaceView::new(&business_id));
            console.load_subscription_history()?;
            let entries = console
                .workspace
                .as_ref()
                .map(|w| w.history.items())
                .unwrap_or_default();
            if json {
                return print_json(entries, "history json");
            }
            match console.client().get_subscription(&business_id) {
                Ok(sub) => println!("current: {}/{}", sub.tier.as_str(), sub.status.as_str()),
                Err(err) => tracing::debug!(error = %format!("{:#}", err), "no current subscription"),
            }
            if entries.is_empty() {
                println!("No subscription history");
            }
            for e in entries {
                let tier = |t: Option<nvi_console::model::SubscriptionTier>| {
                    t.map(|t| t.as_str()).unwrap_or("-")
                };
                let status = |s: Option<nvi_console::model::SubscriptionStatus>| {
                    s.map(|s| s.as_str()).unwrap_or("-")
                };
                println!(
                    "{} {}/{} -> {}/{} {}",
                    e.created_at,
                    tier(e.previous_tier),
                    status(e.previous_status),
                    tier(e.next_tier),
                    status(e.next_status),
                    or_dash(e.reason.as_deref())
                );
            }
        }
    }
    Ok(())
}

fn print_workspace(console: &Console, ws: &BusinessWorkspace) {
    let b = ws.merged_business();
    println!("id: {}", b.id);
    println!("name: {}", b.name);
    println!("status: {}", b.status);
    if b.under_review {
        let severity = b.review_severity.map(|s| s.as_str()).unwrap_or("-");
        println!(
            "review: {} ({})",
            severity,
            or_dash(b.review_reason.as_deref())
        );
    }
    if let Some(sub) = &b.subscription {
        println!("tier: {}", sub.tier.as_str());
        println!("subscription: {}", sub.status.as_str());
        if let Some(deadline) = sub.next_deadline() {
            println!("deadline: {}", deadline);
        }
    }
    if b.read_only_enabled() {
        let reason = b.settings.as_ref().and_then(|s| s.read_only_reason.as_deref());
        println!("read-only: yes ({})", or_dash(reason));
    }
    if let Some(rl) = b.rate_limit_override() {
        println!(
            "rate limit: {} (ttl {}s)",
            rl.limit.map(|l| l.to_string()).unwrap_or_else(|| "-".into()),
            rl.ttl_seconds.map(|t| t.to_string()).unwrap_or_else(|| "-".into())
        );
    }
    if let Some(h) = &ws.health {
        println!("health: {} {}", h.score, or_dash(h.status.as_deref()));
    }
    if let Some(c) = &b.counts {
        let n = |v: Option<u64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
        println!(
            "counts: users={} branches={} products={} devices={}",
            n(c.users),
            n(c.branches),
            n(c.products),
            n(c.devices)
        );
    }
    if let Some(note) = console.notes().get(&b.id) {
        println!("note: {}", note);
    }
    if !ws.recent_actions.is_empty() {
        println!("recent actions:");
        for a in &ws.recent_actions {
            println!(
                "  {} {} {} {}",
                a.created_at,
                a.action,
                or_dash(a.actor.as_deref()),
                or_dash(a.reason.as_deref())
            );
        }
    }
}
