use super::*;
use crate::error::{ValidationKind, validation_kind};
use crate::model::BusinessStatus;
use crate::remote::RemoteClient;
use crate::store::MemoryKv;

fn console_with_business(id: &str) -> Console {
    let client = RemoteClient::new("http://127.0.0.1:9", "t".to_string()).unwrap();
    let mut console = Console::new(client, Box::new(MemoryKv::new()), 10);
    console.settings.business = Some(TenantBusiness {
        id: id.to_string(),
        name: "Corner Shop".to_string(),
        status: BusinessStatus::Active,
        default_language: None,
    });
    console
}

#[test]
fn delete_requires_exact_id_password_and_text() {
    let mut console = console_with_business("biz_7");

    let err = console.delete_business("biz_7", "", "DELETE").unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::PasswordRequired));

    for (id, text) in [("biz_8", "DELETE"), ("biz_7", "delete"), ("BIZ_7", "DELETE")] {
        let err = console.delete_business(id, "hunter2", text).unwrap_err();
        assert_eq!(
            validation_kind(&err),
            Some(ValidationKind::ConfirmationMismatch)
        );
    }
    assert!(console.actions.is_idle());
    assert!(console.settings.business.is_some());
}

#[test]
fn delete_without_loaded_business_is_rejected() {
    let client = RemoteClient::new("http://127.0.0.1:9", "t".to_string()).unwrap();
    let mut console = Console::new(client, Box::new(MemoryKv::new()), 10);
    let err = console.delete_business("biz_7", "pw", "DELETE").unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::InvalidInput));
}

#[test]
fn dirty_tracks_draft_against_saved_copy() {
    let mut page = SettingsPage::default();
    assert!(!page.is_dirty());
    page.settings = Some(BusinessSettings::default());
    page.draft = Some(BusinessSettings::default());
    assert!(!page.is_dirty());
    page.draft.as_mut().unwrap().stock_policy.negative_stock_allowed = true;
    assert!(page.is_dirty());
}

#[test]
fn units_need_code_and_label() {
    let mut console = console_with_business("biz_7");
    let err = console.add_unit(" ", "Kilogram").unwrap_err();
    assert_eq!(validation_kind(&err), Some(ValidationKind::InvalidInput));
    assert!(console.settings.units.is_empty());
}
