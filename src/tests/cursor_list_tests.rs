use super::*;

fn page(items: &[u32], next: Option<&str>) -> Page<u32> {
    Page::Page {
        items: items.to_vec(),
        next_cursor: next.and_then(Cursor::new),
    }
}

#[test]
fn refresh_then_load_more_appends_every_page() {
    let mut list = ListController::new();
    assert_eq!(list.phase(), ListPhase::Idle);
    assert!(!list.can_load_more());

    list.refresh(|cursor| {
        assert!(cursor.is_none());
        Ok(page(&[1, 2], Some("c1")))
    })
    .unwrap();
    assert_eq!(list.phase(), ListPhase::Loaded);

    let more = list
        .load_more(|cursor| {
            assert_eq!(cursor.map(Cursor::as_str), Some("c1"));
            Ok(page(&[2, 3, 4], Some("c2")))
        })
        .unwrap();
    assert!(more);
    let more = list
        .load_more(|cursor| {
            assert_eq!(cursor.map(Cursor::as_str), Some("c2"));
            Ok(page(&[5], None))
        })
        .unwrap();
    assert!(more);

    // 2 + 3 + 1: no de-dupe unless asked for.
    assert_eq!(list.items(), &[1, 2, 2, 3, 4, 5]);
    assert!(!list.can_load_more());

    let called = std::cell::Cell::new(false);
    let more = list
        .load_more(|_| {
            called.set(true);
            Ok(page(&[9], None))
        })
        .unwrap();
    assert!(!more);
    assert!(!called.get());
}

#[test]
fn bare_list_response_is_terminal() {
    let mut list = ListController::new();
    list.refresh(|_| Ok(Page::List(vec![7, 8]))).unwrap();
    assert_eq!(list.items(), &[7, 8]);
    assert!(list.next_cursor().is_none());
    assert!(list.begin_load_more().is_none());
}

#[test]
fn refresh_replaces_items() {
    let mut list = ListController::new();
    list.refresh(|_| Ok(page(&[1, 2], Some("c")))).unwrap();
    list.load_more(|_| Ok(page(&[3], Some("d")))).unwrap();
    list.refresh(|_| Ok(page(&[10], None))).unwrap();
    assert_eq!(list.items(), &[10]);
}

#[test]
fn superseded_load_more_is_dropped() {
    let mut list = ListController::new();
    list.refresh(|_| Ok(page(&[1], Some("c1")))).unwrap();

    let first = list.begin_load_more().unwrap();
    let second = list.begin_load_more().unwrap();
    assert_eq!(first.cursor(), second.cursor());

    assert!(!list.complete(&first, normalize(page(&[2], Some("c2")))));
    assert!(list.complete(&second, normalize(page(&[2], Some("c2")))));
    assert_eq!(list.items(), &[1, 2]);
    assert_eq!(list.next_cursor().map(Cursor::as_str), Some("c2"));
}

#[test]
fn refresh_supersedes_in_flight_load_more() {
    let mut list = ListController::new();
    list.refresh(|_| Ok(page(&[1], Some("c1")))).unwrap();
    let more = list.begin_load_more().unwrap();
    let refresh = list.begin_refresh();
    assert!(list.begin_load_more().is_none());

    assert!(list.complete(&refresh, normalize(page(&[5, 6], None))));
    assert!(!list.complete(&more, normalize(page(&[2], Some("c2")))));
    assert_eq!(list.items(), &[5, 6]);
    assert!(!list.can_load_more());
}

#[test]
fn failed_load_more_keeps_items_and_cursor() {
    let mut list = ListController::new();
    list.refresh(|_| Ok(page(&[1, 2], Some("c1")))).unwrap();
    let err = list
        .load_more(|_| anyhow::bail!("gateway timeout"))
        .unwrap_err();
    assert!(err.to_string().contains("gateway timeout"));
    assert_eq!(list.items(), &[1, 2]);
    assert_eq!(list.phase(), ListPhase::Loaded);
    assert!(list.can_load_more());
    assert_eq!(list.last_error(), Some("gateway timeout"));
}

#[test]
fn failed_first_load_is_failed_phase() {
    let mut list: ListController<u32> = ListController::new();
    assert!(list.refresh(|_| anyhow::bail!("offline")).is_err());
    assert_eq!(list.phase(), ListPhase::Failed);
    assert!(list.items().is_empty());
}

#[test]
fn dedupe_drops_already_loaded_keys() {
    let mut list = ListController::new().with_dedupe(|v: &u32| v.to_string());
    list.refresh(|_| Ok(page(&[1, 2], Some("c")))).unwrap();
    list.load_more(|_| Ok(page(&[2, 3, 3], None))).unwrap();
    assert_eq!(list.items(), &[1, 2, 3]);
}
