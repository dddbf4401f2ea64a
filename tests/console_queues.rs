mod common;

use anyhow::Result;

use nvi_console::console::{Console, QueueKind};
use nvi_console::error::{BannerKind, ValidationKind, validation_kind};
use nvi_console::model::{
    AnnouncementSeverity, ExportJobStatus, RequestStatus, SubscriptionTier, SupportAccessStatus,
};
use nvi_console::remote::{AuditQuery, NewAnnouncement, RemoteClient};
use nvi_console::store::MemoryKv;

#[test]
fn unavailable_subscription_requests_degrade_to_an_info_banner() -> Result<()> {
    let server = common::spawn_server()?;
    let client = RemoteClient::new(&server.base_url, "stale".to_string())?;
    let mut console = Console::new(client, Box::new(MemoryKv::default()), 20);

    console.load_subscription_requests()?;
    assert!(console.queues.subscription_requests.items().is_empty());
    assert_eq!(console.banner().unwrap().kind, BannerKind::Info);

    Ok(())
}

#[test]
fn approving_a_request_applies_the_tier() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);
    console.load_subscription_requests()?;
    assert_eq!(console.queues.subscription_requests.items().len(), 3);

    let req = console.queues.subscription_requests.items()[0].clone();
    console.approve_subscription_request(&req.id, "")?;

    let updated = console
        .queues
        .subscription_requests
        .find(|r| r.id == req.id)
        .unwrap();
    assert_eq!(updated.status, RequestStatus::Approved);
    let business = console.businesses.get(&req.business_id).unwrap();
    assert_eq!(
        business.subscription.as_ref().unwrap().tier,
        SubscriptionTier::Enterprise
    );

    // A decided request cannot be decided again.
    assert!(console.reject_subscription_request(&req.id, "late").is_err());
    let banner = console.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);

    Ok(())
}

#[test]
fn rejecting_without_a_reason_stays_local() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);
    console.load_subscription_requests()?;

    let before = server.hits()?;
    let err = console
        .reject_subscription_request("req-2", "  ")
        .unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::ReasonRequired));
    assert_eq!(server.hits()?, before);

    console.reject_subscription_request("req-2", "not eligible")?;
    let req = console
        .queues
        .subscription_requests
        .find(|r| r.id == "req-2")
        .unwrap();
    assert_eq!(req.status, RequestStatus::Rejected);

    Ok(())
}

#[test]
fn support_access_is_requested_then_activated() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);

    let before = server.hits()?;
    assert!(
        console
            .request_support_access("biz-003", "ticket 4411", Some(0), None)
            .is_err()
    );
    assert!(
        console
            .request_support_access("biz-003", "", Some(2), None)
            .is_err()
    );
    assert_eq!(server.hits()?, before);

    let req = console.request_support_access("biz-003", "ticket 4411", Some(2), Some("read"))?;
    assert_eq!(req.status, SupportAccessStatus::Pending);
    assert_eq!(req.duration_hours, Some(2));
    assert_eq!(console.queues.support.items().len(), 1);

    console.activate_support_access(&req.id)?;
    let active = console.queues.support.find(|r| r.id == req.id).unwrap();
    assert_eq!(active.status, SupportAccessStatus::Active);
    assert!(active.expires_at.is_some());

    Ok(())
}

#[test]
fn exports_queue_and_deliver() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);

    let job = console.create_export_job("biz-004", None, "")?;
    assert_eq!(job.kind.as_deref(), Some("FULL"));
    assert_eq!(job.status, ExportJobStatus::Pending);

    let exit = console.create_exit_export("biz-004", "closing account")?;
    assert_eq!(exit.kind.as_deref(), Some("EXIT"));
    assert_eq!(console.queues.exports.items().len(), 3);

    let before = server.hits()?;
    let err = console.mark_export_delivered(&exit.id, "").unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::ReasonRequired));
    assert_eq!(server.hits()?, before);

    console.mark_export_delivered(&exit.id, "sent to owner")?;
    let delivered = console.queues.exports.find(|j| j.id == exit.id).unwrap();
    assert_eq!(delivered.status, ExportJobStatus::Delivered);
    assert!(delivered.delivered_at.is_some());

    assert!(console.mark_export_delivered(&exit.id, "again").is_err());
    assert_eq!(console.banner().unwrap().text, "export job already delivered");

    Ok(())
}

#[test]
fn announcements_publish_and_end() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);

    let mut new = NewAnnouncement {
        title: "Price change".to_string(),
        message: String::new(),
        severity: AnnouncementSeverity::Warning,
        starts_at: None,
        ends_at: None,
        target_business_ids: Vec::new(),
    };
    let before = server.hits()?;
    let err = console.create_announcement(&new).unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::InvalidInput));
    assert_eq!(server.hits()?, before);

    new.message = "Business tier moves to the new plan in May.".to_string();
    let created = console.create_announcement(&new)?;
    assert_eq!(console.queues.announcements.items().len(), 2);
    // Newest first.
    assert_eq!(console.queues.announcements.items()[0].id, created.id);

    console.end_announcement(&created.id)?;
    let ended = console
        .queues
        .announcements
        .find(|a| a.id == created.id)
        .unwrap();
    assert!(ended.ends_at.is_some());

    Ok(())
}

#[test]
fn audit_filters_apply_to_both_trails() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);
    console.load_businesses()?;

    console.businesses.drafts.read_only.update("biz-006", |d| {
        d.enabled = true;
        d.reason = "migration".to_string();
    });
    console.update_read_only("biz-006")?;

    console.set_audit_filters(AuditQuery {
        business_id: Some("biz-006".to_string()),
        ..AuditQuery::default()
    })?;
    let tenant = console.queues.audit.items();
    assert_eq!(tenant.len(), 1);
    assert_eq!(tenant[0].action, "auth.login");
    let platform = console.queues.platform_audit.items();
    assert_eq!(platform.len(), 1);
    assert_eq!(platform[0].reason.as_deref(), Some("migration"));

    console.set_audit_filters(AuditQuery {
        action: Some("announcement".to_string()),
        ..AuditQuery::default()
    })?;
    assert!(console.queues.platform_audit.items().is_empty());

    Ok(())
}

#[test]
fn queues_page_like_the_business_list() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(10);

    console.refresh_queue(QueueKind::Audit)?;
    assert_eq!(console.queues.len(QueueKind::Audit), 10);
    while console.load_more_queue(QueueKind::Audit)? {}
    assert_eq!(console.queues.len(QueueKind::Audit), 25);
    assert_eq!(server.route_hits("GET /platform/audit-logs")?, 3);

    Ok(())
}

#[test]
fn metrics_summarise_the_platform() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);

    console.load_metrics()?;
    let m = console.queues.metrics.as_ref().unwrap();
    assert_eq!(m.total_businesses, 25);
    assert!(m.suspended > 0);
    assert!(m.active_businesses < m.total_businesses);
    assert_eq!(m.extra["pendingSubscriptionRequests"], 3);

    Ok(())
}
