use super::*;
use crate::error::{BannerKind, ValidationKind, validation_kind};
use crate::model::Business;
use crate::page::Page;
use crate::remote::NewAnnouncement;
use crate::store::{MemoryKv, PINNED_KEY};

fn offline_console_with(kv: MemoryKv) -> Console {
    // Nothing listens on the discard port; any request that slips past
    // validation fails with a transport error instead of a validation one.
    let client = RemoteClient::new("http://127.0.0.1:9", "token".to_string()).unwrap();
    Console::new(client, Box::new(kv), 10)
}

fn offline_console() -> Console {
    offline_console_with(MemoryKv::new())
}

fn business(id: &str) -> Business {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": "Mama Ntilie",
        "status": "ACTIVE",
        "settings": {"readOnlyEnabled": false}
    }))
    .unwrap()
}

fn with_loaded_business(console: &mut Console, id: &str) {
    console.businesses.drafts.seed(&[business(id)]);
}

fn assert_reason_required(console: &Console, err: &anyhow::Error) {
    assert_eq!(validation_kind(err), Some(ValidationKind::ReasonRequired));
    let banner = console.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert!(banner.text.contains("reason"), "{}", banner.text);
}

#[test]
fn enabling_read_only_without_reason_is_rejected_locally() {
    let mut console = offline_console();
    with_loaded_business(&mut console, "b1");
    console.businesses.drafts.read_only.update("b1", |d| {
        d.enabled = true;
        d.reason = "   ".to_string();
    });

    let err = console.update_read_only("b1").unwrap_err();
    assert_reason_required(&console, &err);
    assert!(console.actions.is_idle());
}

#[test]
fn reason_gated_row_mutations_are_rejected_locally() {
    let mut console = offline_console();
    with_loaded_business(&mut console, "b1");

    let err = console.update_status("b1").unwrap_err();
    assert_reason_required(&console, &err);
    let err = console.update_subscription("b1").unwrap_err();
    assert_reason_required(&console, &err);
    let err = console.update_rate_limits("b1").unwrap_err();
    assert_reason_required(&console, &err);
    let err = console.revoke_sessions("b1", "").unwrap_err();
    assert_reason_required(&console, &err);

    console.businesses.drafts.review.update("b1", |d| d.under_review = true);
    let err = console.update_review("b1").unwrap_err();
    assert_reason_required(&console, &err);
}

#[test]
fn zero_rate_limit_is_rejected() {
    let mut console = offline_console();
    with_loaded_business(&mut console, "b1");
    console.businesses.drafts.rate_limits.update("b1", |d| {
        d.limit = Some(0);
        d.reason = "abuse".to_string();
    });
    let err = console.update_rate_limits("b1").unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::InvalidInput));
}

#[test]
fn unknown_business_has_no_draft() {
    let mut console = offline_console();
    let err = console.update_status("missing").unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::InvalidInput));
}

#[test]
fn disabling_read_only_reaches_the_network() {
    let mut console = offline_console();
    with_loaded_business(&mut console, "b1");
    let err = console.update_read_only("b1").unwrap_err();
    assert_eq!(validation_kind(&err), None);
    assert_eq!(console.banner().unwrap().kind, BannerKind::Error);
    assert!(!console.actions.is_loading(&ActionKey::business("read-only", "b1")));
}

#[test]
fn queue_actions_requiring_a_reason() {
    let mut console = offline_console();

    let err = console.reject_subscription_request("r1", "").unwrap_err();
    assert_reason_required(&console, &err);
    let err = console
        .request_support_access("b1", " ", Some(4), None)
        .unwrap_err();
    assert_reason_required(&console, &err);
    let err = console.mark_export_delivered("job_1", "").unwrap_err();
    assert_reason_required(&console, &err);
}

#[test]
fn announcements_need_title_and_message() {
    let mut console = offline_console();
    let new = NewAnnouncement {
        title: "Maintenance".to_string(),
        message: "  ".to_string(),
        severity: crate::model::AnnouncementSeverity::Info,
        starts_at: None,
        ends_at: None,
        target_business_ids: Vec::new(),
    };
    let err = console.create_announcement(&new).unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::InvalidInput));
}

#[test]
fn first_request_queue_failure_degrades_to_info() {
    let mut console = offline_console();
    console.load_subscription_requests().unwrap();
    assert!(console.queues.subscription_requests.items().is_empty());
    assert_eq!(console.banner().unwrap().kind, BannerKind::Info);
}

#[test]
fn pins_survive_a_new_console() {
    let mut kv = MemoryKv::new();
    kv.set(PINNED_KEY, r#"["b3"]"#).unwrap();
    let mut console = offline_console_with(kv);
    assert!(console.pins().contains("b3"));

    assert!(console.toggle_pin("b1").unwrap());
    assert!(!console.toggle_pin("b3").unwrap());
    assert_eq!(console.pins().ids(), &["b1".to_string()]);

    console.set_note("b1", "prefers SMS").unwrap();
    assert_eq!(console.notes().get("b1"), Some("prefers SMS"));
}

#[test]
fn trimmed_treats_blank_as_absent() {
    assert_eq!(trimmed("  "), None);
    assert_eq!(trimmed(" x "), Some("x".to_string()));
}

#[test]
fn loaded_empty_request_queue_reports_later_failures() {
    let mut console = offline_console();

    console.load_subscription_requests().unwrap();
    assert_eq!(console.banner().unwrap().kind, BannerKind::Info);

    console
        .queues
        .subscription_requests
        .refresh(|_| {
            Ok(Page::Page {
                items: Vec::new(),
                next_cursor: None,
            })
        })
        .unwrap();
    assert!(console.queues.subscription_requests.items().is_empty());

    assert!(console.load_subscription_requests().is_err());
    assert_eq!(console.banner().unwrap().kind, BannerKind::Error);
}
