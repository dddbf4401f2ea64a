use super::*;
use crate::model::{Business, BusinessStatus, SubscriptionTier};

fn business(id: &str, status: BusinessStatus) -> Business {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("Business {}", id),
        "status": status.as_str(),
        "subscription": {"tier": "BUSINESS", "status": "ACTIVE"},
        "settings": {"readOnlyEnabled": false}
    }))
    .unwrap()
}

#[test]
fn seeding_twice_keeps_modified_drafts() {
    let items = vec![
        business("b1", BusinessStatus::Active),
        business("b2", BusinessStatus::Grace),
    ];
    let mut drafts = BusinessDrafts::default();
    drafts.sync(&items);

    drafts.status.update("b1", |d| {
        d.status = BusinessStatus::Suspended;
        d.reason = "chargeback".to_string();
    });
    drafts
        .subscription
        .update("b2", |d| d.tier = SubscriptionTier::Enterprise);

    drafts.sync(&items);
    drafts.seed(&items);

    let s = drafts.status.get("b1").unwrap();
    assert_eq!(s.status, BusinessStatus::Suspended);
    assert_eq!(s.reason, "chargeback");
    assert_eq!(
        drafts.subscription.get("b2").unwrap().tier,
        SubscriptionTier::Enterprise
    );
}

#[test]
fn seed_uses_server_values() {
    let items = vec![business("b1", BusinessStatus::Grace)];
    let mut drafts = BusinessDrafts::default();
    drafts.seed(&items);

    assert_eq!(drafts.status.get("b1").unwrap().status, BusinessStatus::Grace);
    assert_eq!(drafts.status.get("b1").unwrap().reason, "");
    assert!(!drafts.read_only.get("b1").unwrap().enabled);
    assert_eq!(
        drafts.subscription.get("b1").unwrap().tier,
        SubscriptionTier::Business
    );
}

#[test]
fn vanished_entities_lose_their_drafts() {
    let mut drafts = BusinessDrafts::default();
    drafts.sync(&[
        business("b1", BusinessStatus::Active),
        business("b2", BusinessStatus::Active),
    ]);
    drafts.status.update("b2", |d| d.reason = "pending edit".to_string());

    drafts.sync(&[business("b1", BusinessStatus::Active)]);
    assert!(drafts.status.get("b2").is_none());
    assert!(drafts.review.get("b2").is_none());
    assert_eq!(drafts.len(), 1);

    // Reappearing starts from server values, not the discarded edit.
    drafts.sync(&[
        business("b1", BusinessStatus::Active),
        business("b2", BusinessStatus::Active),
    ]);
    assert_eq!(drafts.status.get("b2").unwrap().reason, "");
}

#[test]
fn seed_reports_created_count() {
    let mut store: DraftStore<String> = DraftStore::new();
    let ids = vec!["a".to_string(), "b".to_string()];
    assert_eq!(store.seed(&ids, |s| s.as_str(), |s| s.to_uppercase()), 2);
    assert_eq!(store.seed(&ids, |s| s.as_str(), |s| s.to_uppercase()), 0);
    assert_eq!(store.get("a").map(String::as_str), Some("A"));
}

#[test]
fn update_on_missing_draft_is_a_noop() {
    let mut store: DraftStore<u32> = DraftStore::new();
    assert!(!store.update("missing", |v| *v += 1));
    assert!(store.is_empty());
}

#[test]
fn reset_overwrites_with_server_values() {
    let b = business("b1", BusinessStatus::Active);
    let mut drafts = BusinessDrafts::default();
    drafts.sync(std::slice::from_ref(&b));
    drafts.status.update("b1", |d| d.status = BusinessStatus::Archived);
    drafts.reset(&b);
    assert_eq!(drafts.status.get("b1").unwrap().status, BusinessStatus::Active);
}

#[test]
fn require_reason_trims_and_rejects_blank() {
    assert_eq!(require_reason("  fraud  ").unwrap(), "fraud");
    let err = require_reason("   ").unwrap_err();
    assert_eq!(err.kind, crate::error::ValidationKind::ReasonRequired);
}
