use super::*;

type Reply<T> = Result<Json<T>, Response>;

pub(super) async fn list_businesses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let status = match params.get("status") {
        Some(raw) => {
            Some(BusinessStatus::parse(raw).ok_or_else(|| bad_request("unknown status"))?)
        }
        None => None,
    };
    let under_review = params.get("underReview").map(|v| v == "true");
    let search = params
        .get("search")
        .map(|s| s.trim().to_ascii_lowercase())
        .unwrap_or_default();

    let db = state.db.read().await;
    let matching: Vec<&Business> = db
        .businesses
        .iter()
        .filter(|b| status.is_none_or(|s| b.status == s))
        .filter(|b| under_review.is_none_or(|r| b.under_review == r))
        .filter(|b| {
            search.is_empty()
                || b.name.to_ascii_lowercase().contains(&search)
                || b.id.to_ascii_lowercase().contains(&search)
        })
        .collect();
    paginate(&matching, &params)
}

pub(super) async fn get_business(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Reply<Business> {
    let db = state.db.read().await;
    Ok(Json(db.business(&id)?.clone()))
}

pub(super) async fn get_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Reply<BusinessWorkspace> {
    let db = state.db.read().await;
    let b = db.business(&id)?;
    Ok(Json(BusinessWorkspace {
        business: b.clone(),
        subscription: b.subscription.clone(),
        settings: b.settings.clone(),
        counts: b.counts.clone(),
        health: Some(db.health(b)),
        devices: db
            .devices
            .get(&id)
            .map(|d| d.iter().take(5).cloned().collect())
            .unwrap_or_default(),
        recent_actions: db.recent_actions(&id),
    }))
}

pub(super) async fn get_health(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Reply<HealthScore> {
    let db = state.db.read().await;
    let b = db.business(&id)?;
    Ok(Json(db.health(b)))
}

pub(super) async fn list_devices(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    db.business(&id)?;
    let devices = db.devices.get(&id).cloned().unwrap_or_default();
    paginate(&devices, &params)
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatusBody {
    status: BusinessStatus,
    #[serde(default)]
    reason: Option<String>,
}

pub(super) async fn update_status(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Reply<Business> {
    let reason = require_reason(body.reason.as_deref())?;
    if body.status == BusinessStatus::Deleted {
        return Err(bad_request("use purge to delete a business"));
    }
    let mut db = state.db.write().await;
    let b = db.business_mut(&id)?;
    b.status = body.status;
    let out = b.clone();
    db.record(
        &subject.actor,
        Some(&id),
        &format!("business.status.{}", body.status.as_str().to_ascii_lowercase()),
        Some(&reason),
    );
    Ok(Json(out))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReadOnlyBody {
    enabled: bool,
    #[serde(default)]
    reason: Option<String>,
}

pub(super) async fn update_read_only(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<String>,
    Json(body): Json<ReadOnlyBody>,
) -> Reply<Business> {
    let reason = if body.enabled {
        Some(require_reason(body.reason.as_deref())?)
    } else {
        body.reason.filter(|r| !r.trim().is_empty())
    };
    let mut db = state.db.write().await;
    let b = db.business_mut(&id)?;
    let settings = b.settings.get_or_insert_with(SettingsSnapshot::default);
    settings.read_only_enabled = body.enabled;
    settings.read_only_reason = if body.enabled { reason.clone() } else { None };
    let out = b.clone();
    let action = if body.enabled {
        "business.read_only.enable"
    } else {
        "business.read_only.disable"
    };
    db.record(&subject.actor, Some(&id), action, reason.as_deref());
    Ok(Json(out))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReviewBody {
    under_review: bool,
    #[serde(default)]
    severity: Option<ReviewSeverity>,
    #[serde(default)]
    reason: Option<String>,
}

pub(super) async fn update_review(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<String>,
    Json(body): Json<ReviewBody>,
) -> Reply<Business> {
    let reason = if body.under_review {
        Some(require_reason(body.reason.as_deref())?)
    } else {
        body.reason.filter(|r| !r.trim().is_empty())
    };
    let mut db = state.db.write().await;
    let b = db.business_mut(&id)?;
    b.under_review = body.under_review;
    if body.under_review {
        b.review_reason = reason.clone();
        b.review_severity = Some(body.severity.unwrap_or(ReviewSeverity::Medium));
    } else {
        b.review_reason = None;
        b.review_severity = None;
    }
    let out = b.clone();
    let action = if body.under_review {
        "business.review.flag"
    } else {
        "business.review.clear"
    };
    db.record(&subject.actor, Some(&id), action, reason.as_deref());
    Ok(Json(out))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RateLimitsBody {
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    ttl_seconds: Option<u64>,
    #[serde(default)]
    reason: Option<String>,
}

pub(super) async fn update_rate_limits(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<String>,
    Json(body): Json<RateLimitsBody>,
) -> Reply<Business> {
    let reason = require_reason(body.reason.as_deref())?;
    if body.limit == Some(0) {
        return Err(bad_request("limit must be positive"));
    }
    let mut db = state.db.write().await;
    let b = db.business_mut(&id)?;
    let settings = b.settings.get_or_insert_with(SettingsSnapshot::default);
    settings.rate_limit_override = body.limit.map(|limit| RateLimitOverride {
        limit: Some(limit),
        ttl_seconds: body.ttl_seconds,
        expires_at: None,
    });
    let out = b.clone();
    db.record(
        &subject.actor,
        Some(&id),
        "business.rate_limits.update",
        Some(&reason),
    );
    Ok(Json(out))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReasonBody {
    #[serde(default)]
    pub(super) reason: Option<String>,
}

pub(super) async fn revoke_sessions(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<String>,
    Json(body): Json<ReasonBody>,
) -> Reply<serde_json::Value> {
    let reason = require_reason(body.reason.as_deref())?;
    let mut db = state.db.write().await;
    db.business(&id)?;
    db.record(
        &subject.actor,
        Some(&id),
        "business.sessions.revoke",
        Some(&reason),
    );
    Ok(Json(serde_json::json!({"revoked": true})))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PurgeBody {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    confirm_business_id: String,
    #[serde(default)]
    confirm_text: String,
}

pub(super) async fn purge_business(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<String>,
    Json(body): Json<PurgeBody>,
) -> Reply<serde_json::Value> {
    let reason = require_reason(body.reason.as_deref())?;
    if body.confirm_business_id != id || body.confirm_text != PURGE_CONFIRM_TEXT {
        return Err(bad_request("confirmation does not match"));
    }
    let mut db = state.db.write().await;
    db.business(&id)?;
    db.businesses.retain(|b| b.id != id);
    db.devices.remove(&id);
    db.history.remove(&id);
    db.record(&subject.actor, Some(&id), "business.purge", Some(&reason));
    tracing::info!(business = %id, "purged");
    Ok(Json(serde_json::json!({"purged": true})))
}
