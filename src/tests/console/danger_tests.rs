use super::*;
use crate::error::{ValidationKind, validation_kind};

fn open(action: DangerAction) -> DangerFlow {
    let mut flow = DangerFlow::new("biz_1");
    flow.apply(DangerEvent::Open(action)).unwrap();
    flow
}

fn purge_at_confirm() -> DangerFlow {
    let mut flow = open(DangerAction::Purge);
    flow.apply(DangerEvent::Next).unwrap();
    flow.reason = "customer requested erasure".to_string();
    flow.apply(DangerEvent::Next).unwrap();
    assert_eq!(flow.step(), DangerStep::Confirm);
    flow
}

fn is_invalid_transition(err: &anyhow::Error) -> bool {
    err.downcast_ref::<InvalidTransition>().is_some()
}

#[test]
fn steps_follow_the_fixed_order() {
    let mut flow = open(DangerAction::Purge);
    assert_eq!(flow.step(), DangerStep::Impact);
    assert!(flow.can_advance());

    flow.apply(DangerEvent::Next).unwrap();
    assert_eq!(flow.step(), DangerStep::Reason);
    assert!(!flow.can_advance());

    flow.reason = "erasure".to_string();
    assert!(flow.can_advance());
    flow.apply(DangerEvent::Next).unwrap();
    assert_eq!(flow.step(), DangerStep::Confirm);

    flow.apply(DangerEvent::Back).unwrap();
    assert_eq!(flow.step(), DangerStep::Reason);
    flow.apply(DangerEvent::Back).unwrap();
    assert_eq!(flow.step(), DangerStep::Impact);
    flow.apply(DangerEvent::Back).unwrap();
    assert_eq!(flow.step(), DangerStep::Closed);
}

#[test]
fn submit_is_unreachable_before_the_last_step() {
    let mut flow = open(DangerAction::Purge);
    let err = flow.apply(DangerEvent::Submit).unwrap_err();
    assert!(is_invalid_transition(&err));
    assert_eq!(flow.step(), DangerStep::Impact);

    flow.apply(DangerEvent::Next).unwrap();
    flow.reason = "erasure".to_string();
    let err = flow.apply(DangerEvent::Submit).unwrap_err();
    assert!(is_invalid_transition(&err));
    assert_eq!(flow.step(), DangerStep::Reason);
}

#[test]
fn closed_flow_rejects_everything_but_open() {
    let mut flow = DangerFlow::new("biz_1");
    for ev in [
        DangerEvent::Next,
        DangerEvent::Back,
        DangerEvent::Cancel,
        DangerEvent::Submit,
    ] {
        let err = flow.apply(ev).unwrap_err();
        assert!(is_invalid_transition(&err), "{:?}", ev);
    }
    assert!(!flow.is_open());
}

#[test]
fn open_while_open_is_rejected() {
    let mut flow = open(DangerAction::Suspend);
    let err = flow
        .apply(DangerEvent::Open(DangerAction::Purge))
        .unwrap_err();
    assert!(is_invalid_transition(&err));
    assert_eq!(flow.action(), Some(DangerAction::Suspend));
}

#[test]
fn reason_is_required_to_leave_the_reason_step() {
    let mut flow = open(DangerAction::Purge);
    flow.apply(DangerEvent::Next).unwrap();
    flow.reason = "   ".to_string();
    let err = flow.apply(DangerEvent::Next).unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::ReasonRequired));
    assert_eq!(flow.step(), DangerStep::Reason);
}

#[test]
fn purge_confirmation_must_match_exactly() {
    let mut flow = purge_at_confirm();

    flow.confirm_business_id = "biz_2".to_string();
    flow.confirm_text = "DELETE".to_string();
    let err = flow.apply(DangerEvent::Submit).unwrap_err();
    assert_eq!(
        validation_kind(&err),
        Some(ValidationKind::ConfirmationMismatch)
    );

    flow.confirm_business_id = "biz_1".to_string();
    flow.confirm_text = "delete".to_string();
    let err = flow.apply(DangerEvent::Submit).unwrap_err();
    assert_eq!(
        validation_kind(&err),
        Some(ValidationKind::ConfirmationMismatch)
    );
    assert!(!flow.can_submit());

    flow.confirm_text = "DELETE".to_string();
    assert!(flow.can_submit());
    let cmd = flow.apply(DangerEvent::Submit).unwrap().unwrap();
    assert_eq!(cmd.action, DangerAction::Purge);
    assert_eq!(cmd.business_id, "biz_1");
    assert_eq!(cmd.reason, "customer requested erasure");
    assert_eq!(cmd.confirm_text, "DELETE");
    // Submit leaves the flow where it is until the caller closes it.
    assert_eq!(flow.step(), DangerStep::Confirm);
}

#[test]
fn non_purge_actions_submit_from_reason() {
    let mut flow = open(DangerAction::Suspend);
    flow.apply(DangerEvent::Next).unwrap();
    let err = flow.apply(DangerEvent::Next).unwrap_err();
    assert!(is_invalid_transition(&err));

    let err = flow.apply(DangerEvent::Submit).unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::ReasonRequired));

    flow.reason = "unpaid invoices".to_string();
    let cmd = flow.apply(DangerEvent::Submit).unwrap().unwrap();
    assert_eq!(cmd.action, DangerAction::Suspend);
    assert_eq!(cmd.reason, "unpaid invoices");
}

#[test]
fn cancel_closes_and_clears_inputs() {
    let mut flow = purge_at_confirm();
    flow.confirm_text = "DEL".to_string();
    flow.apply(DangerEvent::Cancel).unwrap();
    assert_eq!(flow, DangerFlow::new("biz_1"));
}

#[test]
fn run_danger_rechecks_purge_confirmation() {
    // Nothing listens on the discard port; a request would fail as a
    // transport error, not as a validation error.
    let client = crate::remote::RemoteClient::new("http://127.0.0.1:9", "token".to_string()).unwrap();
    let mut console = Console::new(client, Box::new(crate::store::MemoryKv::default()), 10);

    let cmd = DangerCommand {
        action: DangerAction::Purge,
        business_id: "biz_1".to_string(),
        reason: "erasure".to_string(),
        confirm_business_id: "biz_2".to_string(),
        confirm_text: "delete".to_string(),
    };
    let err = console.run_danger(&cmd).unwrap_err();
    assert_eq!(
        validation_kind(&err),
        Some(ValidationKind::ConfirmationMismatch)
    );
    assert!(console.actions.is_idle());
}
