use super::*;

type Reply<T> = Result<Json<T>, Response>;

pub(super) async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Reply<SubscriptionSnapshot> {
    let db = state.db.read().await;
    db.business(&business_id)?
        .subscription
        .clone()
        .map(Json)
        .ok_or_else(|| not_found("subscription"))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SubscriptionBody {
    #[serde(default)]
    tier: Option<SubscriptionTier>,
    #[serde(default)]
    status: Option<SubscriptionStatus>,
    #[serde(default)]
    trial_ends_at: Option<String>,
    #[serde(default)]
    grace_ends_at: Option<String>,
    #[serde(default)]
    expires_at: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

pub(super) async fn update_subscription(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(business_id): Path<String>,
    Json(body): Json<SubscriptionBody>,
) -> Reply<SubscriptionSnapshot> {
    let reason = require_reason(body.reason.as_deref())?;
    let mut db = state.db.write().await;
    let b = db.business_mut(&business_id)?;
    let Some(sub) = b.subscription.as_mut() else {
        return Err(not_found("subscription"));
    };
    let before = sub.clone();
    if let Some(tier) = body.tier {
        sub.tier = tier;
    }
    if let Some(status) = body.status {
        sub.status = status;
    }
    if body.trial_ends_at.is_some() {
        sub.trial_ends_at = body.trial_ends_at;
    }
    if body.grace_ends_at.is_some() {
        sub.grace_ends_at = body.grace_ends_at;
    }
    if body.expires_at.is_some() {
        sub.expires_at = body.expires_at;
    }
    let after = sub.clone();
    push_history(&mut db, &business_id, Some(&before), &after, &reason, &subject.actor);
    db.record(
        &subject.actor,
        Some(&business_id),
        "subscription.update",
        Some(&reason),
    );
    Ok(Json(after))
}

fn push_history(
    db: &mut Db,
    business_id: &str,
    before: Option<&SubscriptionSnapshot>,
    after: &SubscriptionSnapshot,
    reason: &str,
    actor: &str,
) {
    let id = db.next_id("hist");
    db.history
        .entry(business_id.to_string())
        .or_default()
        .push(SubscriptionHistoryEntry {
            id,
            previous_tier: before.map(|b| b.tier),
            next_tier: Some(after.tier),
            previous_status: before.map(|b| b.status),
            next_status: Some(after.status),
            reason: Some(reason.to_string()),
            changed_by: Some(actor.to_string()),
            created_at: now_ts(),
        });
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateSubscriptionBody {
    business_id: String,
    tier: SubscriptionTier,
    #[serde(default)]
    reason: Option<String>,
}

pub(super) async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(body): Json<CreateSubscriptionBody>,
) -> Reply<SubscriptionSnapshot> {
    let reason = require_reason(body.reason.as_deref())?;
    let mut db = state.db.write().await;
    let b = db.business_mut(&body.business_id)?;
    if b.subscription.is_some() {
        return Err(conflict("subscription already exists"));
    }
    let sub = SubscriptionSnapshot {
        tier: body.tier,
        status: SubscriptionStatus::Trial,
        trial_ends_at: Some(ts_in_hours(24 * 14)),
        grace_ends_at: None,
        expires_at: None,
        limits: None,
    };
    b.subscription = Some(sub.clone());
    push_history(&mut db, &body.business_id, None, &sub, &reason, &subject.actor);
    db.record(
        &subject.actor,
        Some(&body.business_id),
        "subscription.create",
        Some(&reason),
    );
    Ok(Json(sub))
}

pub(super) async fn subscription_history(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    db.business(&business_id)?;
    let mut entries = db.history.get(&business_id).cloned().unwrap_or_default();
    entries.reverse();
    paginate(&entries, &params)
}

pub(super) async fn list_subscription_requests(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<serde_json::Value> {
    let db = state.db.read().await;
    paginate(&db.subscription_requests, &params)
}

fn pending_request<'a>(
    db: &'a mut Db,
    request_id: &str,
) -> Result<&'a mut SubscriptionRequest, Response> {
    let req = db
        .subscription_requests
        .iter_mut()
        .find(|r| r.id == request_id)
        .ok_or_else(|| not_found("subscription request"))?;
    if req.status != RequestStatus::Pending {
        return Err(conflict("subscription request is not pending"));
    }
    Ok(req)
}

pub(super) async fn approve_subscription_request(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(request_id): Path<String>,
    Json(body): Json<ReasonBody>,
) -> Reply<SubscriptionRequest> {
    let reason = body.reason.filter(|r| !r.trim().is_empty());
    let mut db = state.db.write().await;
    let req = pending_request(&mut db, &request_id)?;
    req.status = RequestStatus::Approved;
    let out = req.clone();

    let before = db.business(&out.business_id)?.subscription.clone();
    let b = db.business_mut(&out.business_id)?;
    let after = match b.subscription.as_mut() {
        Some(sub) => {
            sub.tier = out.requested_tier;
            sub.clone()
        }
        None => {
            let sub = SubscriptionSnapshot {
                tier: out.requested_tier,
                status: SubscriptionStatus::Active,
                trial_ends_at: None,
                grace_ends_at: None,
                expires_at: None,
                limits: None,
            };
            b.subscription = Some(sub.clone());
            sub
        }
    };
    let note = reason.as_deref().unwrap_or("subscription request approved");
    push_history(
        &mut db,
        &out.business_id,
        before.as_ref(),
        &after,
        note,
        &subject.actor,
    );
    db.record(
        &subject.actor,
        Some(&out.business_id),
        "subscription_request.approve",
        reason.as_deref(),
    );
    Ok(Json(out))
}

pub(super) async fn reject_subscription_request(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(request_id): Path<String>,
    Json(body): Json<ReasonBody>,
) -> Reply<SubscriptionRequest> {
    let reason = require_reason(body.reason.as_deref())?;
    let mut db = state.db.write().await;
    let req = pending_request(&mut db, &request_id)?;
    req.status = RequestStatus::Rejected;
    let out = req.clone();
    db.record(
        &subject.actor,
        Some(&out.business_id),
        "subscription_request.reject",
        Some(&reason),
    );
    Ok(Json(out))
}
