//! Support access, exports, announcements, audit logs and metrics.

use super::*;

type Reply<T> = Result<Json<T>, Response>;

pub(super) async fn list_support_requests(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    paginate(&db.support, &params)
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SupportBody {
    business_id: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    duration_hours: Option<u32>,
    #[serde(default)]
    scope: Option<String>,
}

pub(super) async fn request_support_access(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(body): Json<SupportBody>,
) -> Reply<SupportAccessRequest> {
    let reason = require_reason(body.reason.as_deref())?;
    if body.duration_hours == Some(0) {
        return Err(bad_request("durationHours must be positive"));
    }
    let mut db = state.db.write().await;
    db.business(&body.business_id)?;
    let req = SupportAccessRequest {
        id: db.next_id("support"),
        business_id: body.business_id.clone(),
        reason: reason.clone(),
        scope: body.scope,
        status: SupportAccessStatus::Pending,
        duration_hours: Some(body.duration_hours.unwrap_or(4)),
        requested_at: now_ts(),
        activated_at: None,
        expires_at: None,
    };
    db.support.push(req.clone());
    db.record(
        &subject.actor,
        Some(&body.business_id),
        "support_access.request",
        Some(&reason),
    );
    Ok(Json(req))
}

pub(super) async fn activate_support_access(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(request_id): Path<String>,
) -> Reply<SupportAccessRequest> {
    let mut db = state.db.write().await;
    let req = db
        .support
        .iter_mut()
        .find(|r| r.id == request_id)
        .ok_or_else(|| not_found("support access request"))?;
    if !matches!(
        req.status,
        SupportAccessStatus::Pending | SupportAccessStatus::Approved
    ) {
        return Err(conflict("support access request cannot be activated"));
    }
    let hours = req.duration_hours.unwrap_or(4);
    let expires = time::OffsetDateTime::now_utc() + time::Duration::hours(i64::from(hours));
    req.status = SupportAccessStatus::Active;
    req.activated_at = Some(now_ts());
    req.expires_at = expires
        .format(&time::format_description::well_known::Rfc3339)
        .ok();
    let out = req.clone();
    db.record(
        &subject.actor,
        Some(&out.business_id),
        "support_access.activate",
        None,
    );
    Ok(Json(out))
}

pub(super) async fn list_export_jobs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    paginate(&db.exports, &params)
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ExportBody {
    business_id: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

async fn queue_export(
    state: &AppState,
    actor: &str,
    body: ExportBody,
    kind: Option<String>,
    action: &str,
) -> Reply<ExportJob> {
    let mut db = state.db.write().await;
    db.business(&body.business_id)?;
    let job = ExportJob {
        id: db.next_id("export"),
        business_id: body.business_id.clone(),
        kind,
        status: ExportJobStatus::Pending,
        attempts: 0,
        last_error: None,
        created_at: now_ts(),
        delivered_at: None,
    };
    db.exports.push(job.clone());
    db.record(
        actor,
        Some(&body.business_id),
        action,
        body.reason.as_deref().filter(|r| !r.trim().is_empty()),
    );
    Ok(Json(job))
}

pub(super) async fn create_export_job(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(body): Json<ExportBody>,
) -> Reply<ExportJob> {
    let kind = Some(body.kind.clone().unwrap_or_else(|| "FULL".to_string()));
    queue_export(&state, &subject.actor, body, kind, "export.create").await
}

pub(super) async fn create_exit_export(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(body): Json<ExportBody>,
) -> Reply<ExportJob> {
    queue_export(
        &state,
        &subject.actor,
        body,
        Some("EXIT".to_string()),
        "export.on_exit",
    )
    .await
}

pub(super) async fn mark_export_delivered(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(job_id): Path<String>,
    Json(body): Json<ReasonBody>,
) -> Reply<ExportJob> {
    let reason = require_reason(body.reason.as_deref())?;
    let mut db = state.db.write().await;
    let job = db
        .exports
        .iter_mut()
        .find(|j| j.id == job_id)
        .ok_or_else(|| not_found("export job"))?;
    if job.status == ExportJobStatus::Delivered {
        return Err(conflict("export job already delivered"));
    }
    job.status = ExportJobStatus::Delivered;
    job.delivered_at = Some(now_ts());
    let out = job.clone();
    db.record(
        &subject.actor,
        Some(&out.business_id),
        "export.delivered",
        Some(&reason),
    );
    Ok(Json(out))
}

pub(super) async fn list_announcements(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    let mut items = db.announcements.clone();
    items.reverse();
    paginate(&items, &params)
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnnouncementBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    message: String,
    severity: AnnouncementSeverity,
    #[serde(default)]
    starts_at: Option<String>,
    #[serde(default)]
    ends_at: Option<String>,
    #[serde(default)]
    target_business_ids: Vec<String>,
}

pub(super) async fn create_announcement(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(body): Json<AnnouncementBody>,
) -> Reply<Announcement> {
    if body.title.trim().is_empty() || body.message.trim().is_empty() {
        return Err(bad_request("title and message are required"));
    }
    let mut db = state.db.write().await;
    let ann = Announcement {
        id: db.next_id("ann"),
        title: body.title,
        message: body.message,
        severity: body.severity,
        starts_at: body.starts_at.unwrap_or_else(now_ts),
        ends_at: body.ends_at,
        target_business_ids: body.target_business_ids,
    };
    db.announcements.push(ann.clone());
    db.record(&subject.actor, None, "announcement.create", None);
    Ok(Json(ann))
}

pub(super) async fn end_announcement(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<String>,
) -> Reply<Announcement> {
    let mut db = state.db.write().await;
    let ann = db
        .announcements
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| not_found("announcement"))?;
    if ann.ends_at.is_some() {
        return Err(conflict("announcement already ended"));
    }
    ann.ends_at = Some(now_ts());
    let out = ann.clone();
    db.record(&subject.actor, None, "announcement.end", None);
    Ok(Json(out))
}

fn filter_audit<'a>(
    entries: &'a [AuditLogEntry],
    params: &HashMap<String, String>,
) -> Vec<&'a AuditLogEntry> {
    let want = |key: &str, value: Option<&String>| match params.get(key) {
        Some(f) => value.is_some_and(|v| v == f),
        None => true,
    };
    entries
        .iter()
        .rev()
        .filter(|e| want("businessId", e.business_id.as_ref()))
        .filter(|e| want("actor", e.actor.as_ref()))
        .filter(|e| params.get("action").is_none_or(|a| e.action.contains(a.as_str())))
        .collect()
}

pub(super) async fn list_audit_logs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    paginate(&filter_audit(&db.audit, &params), &params)
}

pub(super) async fn list_platform_audit_logs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    paginate(&filter_audit(&db.platform_audit, &params), &params)
}

pub(super) async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<PlatformMetrics> {
    let db = state.db.read().await;
    let count = |f: &dyn Fn(&Business) -> bool| db.businesses.iter().filter(|b| f(b)).count() as u64;
    let mut extra = serde_json::Map::new();
    extra.insert(
        "pendingSubscriptionRequests".to_string(),
        serde_json::json!(
            db.subscription_requests
                .iter()
                .filter(|r| r.status == RequestStatus::Pending)
                .count()
        ),
    );
    Json(PlatformMetrics {
        total_businesses: db.businesses.len() as u64,
        active_businesses: count(&|b| b.status == BusinessStatus::Active),
        under_review: count(&|b| b.under_review),
        suspended: count(&|b| b.status == BusinessStatus::Suspended),
        exports_pending: db
            .exports
            .iter()
            .filter(|j| j.status == ExportJobStatus::Pending)
            .count() as u64,
        extra,
    })
}
