use anyhow::{Context, Result};

use nvi_console::console::{Console, QueueKind};
use nvi_console::remote::{AuditQuery, NewAnnouncement};

use crate::cli_commands::listing::{AuditArgs, MetricsArgs};
use crate::{AnnouncementsCommands, ExportsCommands, RequestsCommands, SupportCommands};

use super::{or_dash, print_json, print_notice};

pub(super) fn handle_requests_command(
    console: &mut Console,
    command: RequestsCommands,
) -> Result<()> {
    match command {
        RequestsCommands::List { json } => {
            console.load_subscription_requests()?;
            let items = console.queues.subscription_requests.items();
            if json {
                return print_json(items, "subscription requests json");
            }
            if items.is_empty() {
                println!("No subscription requests");
            }
            for r in items {
                println!(
                    "{} {} {} {:?} {} {}",
                    r.id,
                    r.business_id,
                    r.requested_tier.as_str(),
                    r.status,
                    r.created_at,
                    or_dash(r.business_name.as_deref())
                );
            }
            print_notice(console);
        }
        RequestsCommands::Approve { request_id, reason } => {
            console.approve_subscription_request(&request_id, &reason)?;
            println!("Approved {}", request_id);
        }
        RequestsCommands::Reject { request_id, reason } => {
            console.reject_subscription_request(&request_id, &reason)?;
            println!("Rejected {}", request_id);
        }
    }
    Ok(())
}

pub(super) fn handle_support_command(
    console: &mut Console,
    command: SupportCommands,
) -> Result<()> {
    match command {
        SupportCommands::List { json } => {
            console.refresh_queue(QueueKind::Support)?;
            let items = console.queues.support.items();
            if json {
                return print_json(items, "support requests json");
            }
            if items.is_empty() {
                println!("No support access requests");
            }
            for r in items {
                println!(
                    "{} {} {:?} {} {}",
                    r.id,
                    r.business_id,
                    r.status,
                    or_dash(r.expires_at.as_deref()),
                    r.reason
                );
            }
        }
        SupportCommands::Request {
            business_id,
            reason,
            hours,
            scope,
        } => {
            let created =
                console.request_support_access(&business_id, &reason, hours, scope.as_deref())?;
            println!("Requested support access {}", created.id);
        }
        SupportCommands::Activate { request_id } => {
            console.activate_support_access(&request_id)?;
            println!("Activated {}", request_id);
        }
    }
    Ok(())
}

pub(super) fn handle_exports_command(
    console: &mut Console,
    command: ExportsCommands,
) -> Result<()> {
    match command {
        ExportsCommands::List { json } => {
            console.refresh_queue(QueueKind::Exports)?;
            let items = console.queues.exports.items();
            if json {
                return print_json(items, "export jobs json");
            }
            if items.is_empty() {
                println!("No export jobs");
            }
            for j in items {
                println!(
                    "{} {} {} {:?} attempts={} {}",
                    j.id,
                    j.business_id,
                    or_dash(j.kind.as_deref()),
                    j.status,
                    j.attempts,
                    or_dash(j.last_error.as_deref())
                );
            }
        }
        ExportsCommands::Create {
            business_id,
            kind,
            reason,
        } => {
            let job = console.create_export_job(&business_id, kind.as_deref(), &reason)?;
            println!("Queued export job {}", job.id);
        }
        ExportsCommands::OnExit {
            business_id,
            reason,
        } => {
            let job = console.create_exit_export(&business_id, &reason)?;
            println!("Queued exit export {}", job.id);
        }
        ExportsCommands::Delivered { job_id, reason } => {
            console.mark_export_delivered(&job_id, &reason)?;
            println!("Marked {} as delivered", job_id);
        }
    }
    Ok(())
}

pub(super) fn handle_announcements_command(
    console: &mut Console,
    command: AnnouncementsCommands,
) -> Result<()> {
    match command {
        AnnouncementsCommands::List { json } => {
            console.refresh_queue(QueueKind::Announcements)?;
            let items = console.queues.announcements.items();
            if json {
                return print_json(items, "announcements json");
            }
            if items.is_empty() {
                println!("No announcements");
            }
            for a in items {
                println!(
                    "{} {:?} {} {} {}",
                    a.id,
                    a.severity,
                    if a.is_active() { "active" } else { "ended" },
                    a.starts_at,
                    a.title
                );
            }
        }
        AnnouncementsCommands::Create {
            title,
            message,
            severity,
            starts_at,
            ends_at,
            targets,
        } => {
            let created = console.create_announcement(&NewAnnouncement {
                title,
                message,
                severity,
                starts_at,
                ends_at,
                target_business_ids: targets,
            })?;
            println!("Published announcement {}", created.id);
        }
        AnnouncementsCommands::End { announcement_id } => {
            console.end_announcement(&announcement_id)?;
            println!("Ended {}", announcement_id);
        }
    }
    Ok(())
}

pub(super) fn handle_audit(console: &mut Console, args: AuditArgs) -> Result<()> {
    let kind = if args.platform {
        QueueKind::PlatformAudit
    } else {
        QueueKind::Audit
    };
    console.queues.audit_query = AuditQuery {
        business_id: args.business_id,
        action: args.action,
        actor: args.actor,
    };
    console.refresh_queue(kind)?;
    if args.all {
        while console.load_more_queue(kind)? {}
    }

    let list = if args.platform {
        &console.queues.platform_audit
    } else {
        &console.queues.audit
    };
    if args.json {
        return print_json(list.items(), "audit logs json");
    }
    if list.items().is_empty() {
        println!("No audit entries");
    }
    for e in list.items() {
        println!(
            "{} {} {} {} {}",
            e.created_at,
            or_dash(e.business_id.as_deref()),
            or_dash(e.actor.as_deref()),
            e.action,
            or_dash(e.reason.as_deref())
        );
    }
    if !args.all && list.next_cursor().is_some() {
        eprintln!("(more results: pass --all)");
    }
    Ok(())
}

pub(super) fn handle_metrics(console: &mut Console, args: MetricsArgs) -> Result<()> {
    console.load_metrics()?;
    let m = console
        .queues
        .metrics
        .as_ref()
        .context("metrics not loaded")?;
    if args.json {
        return print_json(m, "metrics json");
    }
    println!("total businesses: {}", m.total_businesses);
    println!("active: {}", m.active_businesses);
    println!("under review: {}", m.under_review);
    println!("suspended: {}", m.suspended);
    println!("exports pending: {}", m.exports_pending);
    for (k, v) in &m.extra {
        println!("{}: {}", k, v);
    }
    Ok(())
}
