use super::*;
use crate::model::Business;

fn drafts() -> WorkspaceDrafts {
    let b: Business = serde_json::from_value(serde_json::json!({
        "id": "biz_1",
        "name": "Duka",
        "status": "ACTIVE",
        "subscription": {"tier": "ENTERPRISE", "status": "ACTIVE"}
    }))
    .unwrap();
    WorkspaceDrafts {
        subscription: crate::drafts::SubscriptionDraft::from_business(&b),
        status: crate::drafts::StatusDraft::from_business(&b),
        review: crate::drafts::ReviewDraft::from_business(&b),
        read_only: crate::drafts::ReadOnlyDraft::from_business(&b),
        rate_limits: crate::drafts::RateLimitDraft::from_business(&b),
        revoke_reason: String::new(),
    }
}

#[test]
fn every_field_belongs_to_the_form_of_its_tab() {
    for tab in WorkspaceTab::ALL {
        for f in fields_for(tab) {
            let form_tab = match f.form() {
                WorkspaceForm::Subscription => WorkspaceTab::Subscription,
                WorkspaceForm::Status | WorkspaceForm::Review => WorkspaceTab::RiskStatus,
                _ => WorkspaceTab::Access,
            };
            assert_eq!(form_tab, tab, "{:?}", f);
        }
    }
    assert!(fields_for(WorkspaceTab::Summary).is_empty());
    assert!(fields_for(WorkspaceTab::Danger).is_empty());
}

#[test]
fn cycling_wraps_around() {
    let mut d = drafts();
    Field::Tier.step(&mut d);
    assert_eq!(d.subscription.tier, SubscriptionTier::Starter);
    Field::Severity.step(&mut d);
    assert_eq!(d.review.severity, ReviewSeverity::High);
    Field::Severity.step(&mut d);
    assert_eq!(d.review.severity, ReviewSeverity::Low);
    Field::ReadOnly.step(&mut d);
    assert_eq!(Field::ReadOnly.value(&d), "on");
}

#[test]
fn numeric_fields_accept_blank_or_numbers() {
    let mut d = drafts();
    Field::Limit.set_text(&mut d, " 120 ").unwrap();
    assert_eq!(d.rate_limits.limit, Some(120));
    Field::Limit.set_text(&mut d, "").unwrap();
    assert_eq!(d.rate_limits.limit, None);
    assert!(Field::TtlSeconds.set_text(&mut d, "soon").is_err());
    assert!(Field::Tier.set_text(&mut d, "BUSINESS").is_err());
}

#[test]
fn text_is_trimmed() {
    let mut d = drafts();
    Field::RevokeReason.set_text(&mut d, "  stolen tablet ").unwrap();
    assert_eq!(d.revoke_reason, "stolen tablet");
    assert_eq!(Field::RevokeReason.edit_kind(), EditKind::Text);
}
