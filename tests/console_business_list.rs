mod common;

use anyhow::Result;

use nvi_console::cursor_list::ListPhase;
use nvi_console::model::BusinessStatus;
use nvi_console::remote::BusinessQuery;

#[test]
fn business_list_follows_cursors_to_the_end() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(10);

    console.load_businesses()?;
    assert_eq!(console.businesses.items().len(), 10);
    assert!(console.businesses.list.next_cursor().is_some());
    assert_eq!(console.businesses.drafts.len(), 10);

    assert!(console.load_more_businesses()?);
    assert!(console.load_more_businesses()?);
    assert_eq!(console.businesses.items().len(), 25);
    assert!(console.businesses.list.next_cursor().is_none());
    assert_eq!(console.businesses.drafts.len(), 25);

    // Terminal: no request is made.
    let before = server.route_hits("GET /platform/businesses")?;
    assert!(!console.load_more_businesses()?);
    assert_eq!(server.route_hits("GET /platform/businesses")?, before);
    assert_eq!(before, 3);

    Ok(())
}

#[test]
fn filters_narrow_the_list_and_drop_vanished_drafts() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);

    console.load_businesses()?;
    assert_eq!(console.businesses.drafts.len(), 25);

    console.set_business_filters(BusinessQuery {
        search: String::new(),
        status: Some(BusinessStatus::Suspended),
        under_review: None,
    })?;
    let items = console.businesses.items();
    assert!(!items.is_empty());
    assert!(items.iter().all(|b| b.status == BusinessStatus::Suspended));
    assert_eq!(console.businesses.drafts.len(), items.len());

    console.set_business_filters(BusinessQuery {
        search: "business 012".to_string(),
        ..BusinessQuery::default()
    })?;
    let ids: Vec<&str> = console
        .businesses
        .items()
        .iter()
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(ids, vec!["biz-012"]);

    Ok(())
}

#[test]
fn drafts_survive_a_refresh() -> Result<()> {
    let server = common::spawn_server()?;
    let mut console = server.console(50);

    console.load_businesses()?;
    console
        .businesses
        .drafts
        .status
        .update("biz-002", |d| d.reason = "half typed".to_string());

    console.load_businesses()?;
    let draft = console.businesses.drafts.status.get("biz-002").unwrap();
    assert_eq!(draft.reason, "half typed");
    assert_eq!(console.businesses.list.phase(), ListPhase::Loaded);

    Ok(())
}

#[test]
fn wrong_token_surfaces_unauthorized_in_the_banner() -> Result<()> {
    let server = common::spawn_server()?;
    let client = nvi_console::remote::RemoteClient::new(&server.base_url, "nope".to_string())?;
    let mut console = nvi_console::console::Console::new(
        client,
        Box::new(nvi_console::store::MemoryKv::default()),
        10,
    );

    let err = console.load_businesses().unwrap_err();
    let api = err
        .chain()
        .find_map(|c| c.downcast_ref::<nvi_console::error::ApiError>())
        .unwrap();
    assert_eq!(api.status, 401);
    assert!(console.banner().unwrap().text.contains("unauthorized"));
    assert_eq!(console.businesses.list.phase(), ListPhase::Failed);

    Ok(())
}
