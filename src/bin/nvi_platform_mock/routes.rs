//! Authenticated route table. Everything here is bearer-checked and counted.

use super::*;

pub(super) fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/platform/businesses", get(list_businesses))
        .route("/platform/businesses/:id", get(get_business))
        .route("/platform/businesses/:id/workspace", get(get_workspace))
        .route("/platform/businesses/:id/health", get(get_health))
        .route("/platform/businesses/:id/devices", get(list_devices))
        .route("/platform/businesses/:id/status", patch(update_status))
        .route("/platform/businesses/:id/read-only", patch(update_read_only))
        .route("/platform/businesses/:id/review", patch(update_review))
        .route(
            "/platform/businesses/:id/rate-limits",
            patch(update_rate_limits),
        )
        .route(
            "/platform/businesses/:id/revoke-sessions",
            post(revoke_sessions),
        )
        .route("/platform/businesses/:id/purge", post(purge_business))
        .route("/platform/subscriptions", post(create_subscription))
        .route(
            "/platform/subscriptions/:business_id",
            get(get_subscription).patch(update_subscription),
        )
        .route(
            "/platform/subscriptions/:business_id/history",
            get(subscription_history),
        )
        .route(
            "/platform/subscription-requests",
            get(list_subscription_requests),
        )
        .route(
            "/platform/subscription-requests/:id/approve",
            post(approve_subscription_request),
        )
        .route(
            "/platform/subscription-requests/:id/reject",
            post(reject_subscription_request),
        )
        .route(
            "/platform/support-access/requests",
            get(list_support_requests).post(request_support_access),
        )
        .route(
            "/platform/support-access/requests/:id/activate",
            post(activate_support_access),
        )
        .route(
            "/platform/exports/jobs",
            get(list_export_jobs).post(create_export_job),
        )
        .route("/platform/exports/on-exit", post(create_exit_export))
        .route(
            "/platform/exports/jobs/:id/delivered",
            patch(mark_export_delivered),
        )
        .route(
            "/platform/announcements",
            get(list_announcements).post(create_announcement),
        )
        .route("/platform/announcements/:id/end", patch(end_announcement))
        .route("/platform/audit-logs", get(list_audit_logs))
        .route("/platform/platform-audit-logs", get(list_platform_audit_logs))
        .route("/platform/metrics", get(get_metrics))
        .route("/settings", get(get_settings).put(put_settings))
        .route("/business", get(get_tenant_business))
        .route("/business/delete", post(delete_tenant_business))
        .route("/units", get(list_units).post(create_unit))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .route_layer(middleware::from_fn_with_state(state, count_hits))
}
