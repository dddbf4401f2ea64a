//! Tenant-side endpoints, served for the first seeded business.

use super::*;

type Reply<T> = Result<Json<T>, Response>;

fn tenant_id(db: &Db) -> Result<String, Response> {
    db.tenant_id.clone().ok_or_else(|| not_found("business"))
}

pub(super) async fn get_settings(State(state): State<Arc<AppState>>) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    tenant_id(&db)?;
    Ok(Json(db.settings.clone()))
}

pub(super) async fn put_settings(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Reply<serde_json::Value> {
    if !body.is_object() {
        return Err(bad_request("settings must be a JSON object"));
    }
    let mut db = state.db.write().await;
    tenant_id(&db)?;
    db.settings = body;
    Ok(Json(db.settings.clone()))
}

pub(super) async fn get_tenant_business(
    State(state): State<Arc<AppState>>,
) -> Reply<TenantBusiness> {
    let db = state.db.read().await;
    let b = db.business(&tenant_id(&db)?)?;
    Ok(Json(TenantBusiness {
        id: b.id.clone(),
        name: b.name.clone(),
        status: b.status,
        default_language: Some("en".to_string()),
    }))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeleteBody {
    #[serde(default)]
    business_id: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_text: String,
}

pub(super) async fn delete_tenant_business(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DeleteBody>,
) -> Reply<serde_json::Value> {
    let mut db = state.db.write().await;
    let id = tenant_id(&db)?;
    if body.password != state.tenant_password {
        return Err(bad_request("invalid password"));
    }
    if body.business_id != id || body.confirm_text != PURGE_CONFIRM_TEXT {
        return Err(bad_request("confirmation does not match"));
    }
    db.business_mut(&id)?.status = BusinessStatus::Deleted;
    db.tenant_id = None;
    tracing::info!(business = %id, "tenant business deleted");
    Ok(Json(serde_json::json!({"deleted": true})))
}

pub(super) async fn list_units(State(state): State<Arc<AppState>>) -> Reply<Vec<Unit>> {
    let db = state.db.read().await;
    tenant_id(&db)?;
    Ok(Json(db.units.clone()))
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct UnitBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    label: String,
}

pub(super) async fn create_unit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UnitBody>,
) -> Reply<Unit> {
    let code = body.code.trim();
    let label = body.label.trim();
    if code.is_empty() || label.is_empty() {
        return Err(bad_request("code and label are required"));
    }
    let mut db = state.db.write().await;
    tenant_id(&db)?;
    if db.units.iter().any(|u| u.code.eq_ignore_ascii_case(code)) {
        return Err(conflict("unit code already exists"));
    }
    let unit = Unit {
        id: db.next_id("unit"),
        code: code.to_string(),
        label: label.to_string(),
    };
    db.units.push(unit.clone());
    Ok(Json(unit))
}
