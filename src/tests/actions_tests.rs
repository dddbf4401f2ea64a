use super::*;

#[test]
fn key_renders_action_scope_id() {
    let k = ActionKey::business("status", "biz_1");
    assert_eq!(k.to_string(), "status:business:biz_1");
}

#[test]
fn flag_is_set_while_task_runs() {
    let tracker = ActionTracker::new();
    let key = ActionKey::business("status", "b1");
    let seen = tracker
        .with_action(&key, || Ok::<_, anyhow::Error>(tracker.is_loading(&key)))
        .unwrap();
    assert!(seen);
    assert!(!tracker.is_loading(&key));
    assert!(tracker.is_idle());
}

#[test]
fn flag_clears_when_task_fails() {
    let tracker = ActionTracker::new();
    let key = ActionKey::business("purge", "b1");
    let res: anyhow::Result<()> = tracker.with_action(&key, || anyhow::bail!("boom"));
    assert!(res.is_err());
    assert!(!tracker.is_loading(&key));
}

#[test]
fn flag_clears_when_task_panics() {
    let tracker = ActionTracker::new();
    let key = ActionKey::business("review", "b1");
    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _: Result<(), ()> = tracker.with_action(&key, || panic!("task panicked"));
    }));
    assert!(res.is_err());
    assert!(!tracker.is_loading(&key));
}

#[test]
fn different_keys_are_independent() {
    let tracker = ActionTracker::new();
    let a = ActionKey::business("status", "b1");
    let b = ActionKey::business("status", "b2");
    tracker
        .with_action(&a, || {
            tracker.with_action(&b, || {
                assert!(tracker.is_loading(&a));
                assert!(tracker.is_loading(&b));
                Ok::<_, ()>(())
            })?;
            assert!(tracker.is_loading(&a));
            assert!(!tracker.is_loading(&b));
            assert!(tracker.is_action_loading("status"));
            assert_eq!(tracker.in_flight(), vec!["status:business:b1".to_string()]);
            Ok::<_, ()>(())
        })
        .unwrap();
    assert!(tracker.is_idle());
}

#[test]
fn same_key_reentry_clears_the_shared_flag() {
    let tracker = ActionTracker::new();
    let key = ActionKey::business("status", "b1");
    tracker
        .with_action(&key, || {
            tracker.with_action(&key, || Ok::<_, ()>(()))?;
            // The inner call owns the same flag and has already cleared it.
            assert!(!tracker.is_loading(&key));
            Ok::<_, ()>(())
        })
        .unwrap();
    assert!(!tracker.is_loading(&key));
}
