use super::*;
use crate::error::{ValidationKind, validation_kind};
use crate::model::{BusinessStatus, SubscriptionTier};
use crate::remote::RemoteClient;
use crate::store::MemoryKv;

fn aggregate(status: &str, tier: &str) -> BusinessWorkspace {
    serde_json::from_value(serde_json::json!({
        "business": {"id": "biz_1", "name": "Kiosk One", "status": status},
        "subscription": {"tier": tier, "status": "ACTIVE"},
        "settings": {"readOnlyEnabled": true, "readOnlyReason": "audit in progress"},
        "health": {"score": 72, "reasons": ["late payments"]}
    }))
    .unwrap()
}

fn offline_console() -> Console {
    let client = RemoteClient::new("http://127.0.0.1:9", "t".to_string()).unwrap();
    Console::new(client, Box::new(MemoryKv::new()), 10)
}

#[test]
fn tabs_cycle_in_both_directions() {
    assert_eq!(WorkspaceTab::Summary.next(), WorkspaceTab::Subscription);
    assert_eq!(WorkspaceTab::Danger.next(), WorkspaceTab::Summary);
    assert_eq!(WorkspaceTab::Summary.prev(), WorkspaceTab::Danger);
    for tab in WorkspaceTab::ALL {
        assert_eq!(tab.next().prev(), tab);
        assert!(!tab.title().is_empty());
    }
}

#[test]
fn stale_aggregate_is_dropped() {
    let mut view = WorkspaceView::new("biz_1");
    let first = view.begin_load();
    let second = view.begin_load();
    assert!(view.is_loading());

    assert!(!view.apply(first, aggregate("ACTIVE", "STARTER")));
    assert!(view.aggregate.is_none());
    assert!(view.is_loading());

    assert!(view.apply(second, aggregate("GRACE", "BUSINESS")));
    assert!(!view.is_loading());
    assert_eq!(view.business().unwrap().status, BusinessStatus::Grace);
}

#[test]
fn drafts_are_seeded_once_from_the_merged_record() {
    let mut view = WorkspaceView::new("biz_1");
    let seq = view.begin_load();
    view.apply(seq, aggregate("ACTIVE", "BUSINESS"));

    let drafts = view.drafts.as_mut().unwrap();
    assert_eq!(drafts.subscription.tier, SubscriptionTier::Business);
    assert!(drafts.read_only.enabled);
    assert_eq!(drafts.read_only.reason, "audit in progress");
    drafts.status.status = BusinessStatus::Suspended;

    // A reload must not clobber the edit in progress.
    let seq = view.begin_load();
    view.apply(seq, aggregate("ACTIVE", "ENTERPRISE"));
    let drafts = view.drafts.as_ref().unwrap();
    assert_eq!(drafts.status.status, BusinessStatus::Suspended);
    assert_eq!(drafts.subscription.tier, SubscriptionTier::Business);
}

#[test]
fn reseed_only_touches_the_saved_tab() {
    let mut view = WorkspaceView::new("biz_1");
    let seq = view.begin_load();
    view.apply(seq, aggregate("ACTIVE", "BUSINESS"));
    {
        let d = view.drafts.as_mut().unwrap();
        d.subscription.reason = "upgrade".to_string();
        d.status.reason = "fraud check".to_string();
    }
    let seq = view.begin_load();
    view.apply(seq, aggregate("ACTIVE", "ENTERPRISE"));
    view.reseed(WorkspaceTab::Subscription);

    let d = view.drafts.as_ref().unwrap();
    assert_eq!(d.subscription.tier, SubscriptionTier::Enterprise);
    assert_eq!(d.subscription.reason, "");
    assert_eq!(d.status.reason, "fraud check");
}

#[test]
fn failed_load_clears_only_the_current_request() {
    let mut view = WorkspaceView::new("biz_1");
    let old = view.begin_load();
    let _current = view.begin_load();
    view.fail(old);
    assert!(view.is_loading());
}

#[test]
fn saving_without_a_loaded_workspace_is_rejected() {
    let mut console = offline_console();
    let err = console
        .save_workspace_form(WorkspaceForm::Status)
        .unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::InvalidInput));
}

#[test]
fn saving_a_form_without_reason_never_leaves_the_client() {
    let mut console = offline_console();
    let mut view = WorkspaceView::new("biz_1");
    let seq = view.begin_load();
    view.apply(seq, aggregate("ACTIVE", "BUSINESS"));
    console.workspace = Some(view);

    for form in [
        WorkspaceForm::Subscription,
        WorkspaceForm::Status,
        WorkspaceForm::RateLimits,
        WorkspaceForm::RevokeSessions,
    ] {
        let err = console.save_workspace_form(form).unwrap_err();
        assert_eq!(validation_kind(&err), Some(ValidationKind::ReasonRequired));
    }
    // Read-only is enabled in the aggregate and its reason was seeded.
    console.workspace.as_mut().unwrap().drafts.as_mut().unwrap().read_only.reason = " ".into();
    let err = console
        .save_workspace_form(WorkspaceForm::ReadOnly)
        .unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::ReasonRequired));
    assert!(console.actions.is_idle());
}

#[test]
fn drafts_are_kept_when_the_reload_after_a_save_fails() {
    let mut view = WorkspaceView::new("biz_1");
    let seq = view.begin_load();
    view.apply(seq, aggregate("ACTIVE", "BUSINESS"));
    {
        let d = view.drafts.as_mut().unwrap();
        d.subscription.tier = SubscriptionTier::Enterprise;
        d.subscription.reason = "upgrade".to_string();
    }

    view.finish_save(WorkspaceTab::Subscription, false);
    let d = view.drafts.as_ref().unwrap();
    assert_eq!(d.subscription.tier, SubscriptionTier::Enterprise);
    assert_eq!(d.subscription.reason, "upgrade");

    let seq = view.begin_load();
    view.apply(seq, aggregate("ACTIVE", "ENTERPRISE"));
    view.finish_save(WorkspaceTab::Subscription, true);
    let d = view.drafts.as_ref().unwrap();
    assert_eq!(d.subscription.tier, SubscriptionTier::Enterprise);
    assert!(d.subscription.reason.is_empty());
}

#[test]
fn zero_rate_limit_is_rejected_in_the_workspace_too() {
    let mut console = offline_console();
    let mut view = WorkspaceView::new("biz_1");
    let seq = view.begin_load();
    view.apply(seq, aggregate("ACTIVE", "BUSINESS"));
    {
        let d = view.drafts.as_mut().unwrap();
        d.rate_limits.limit = Some(0);
        d.rate_limits.reason = "abuse".to_string();
    }
    console.workspace = Some(view);

    // Offline: reaching the network would surface a transport error instead.
    let err = console
        .save_workspace_form(WorkspaceForm::RateLimits)
        .unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::InvalidInput));
    assert!(console.actions.is_idle());
}
