use super::*;

fn audit_query(filters: &AuditQuery, page: &PageQuery) -> PageQuery {
    let mut q = page.clone();
    if let Some(b) = &filters.business_id {
        q = q.filter("businessId", b.as_str());
    }
    if let Some(a) = &filters.action {
        q = q.filter("action", a.as_str());
    }
    if let Some(a) = &filters.actor {
        q = q.filter("actor", a.as_str());
    }
    q
}

impl RemoteClient {
    /// Tenant-side audit trail, across businesses.
    pub fn list_audit_logs(
        &self,
        filters: &AuditQuery,
        page: &PageQuery,
    ) -> Result<Page<AuditLogEntry>> {
        self.get_page(
            "/platform/audit-logs",
            &audit_query(filters, page),
            "list audit logs",
        )
    }

    /// What platform operators themselves did.
    pub fn list_platform_audit_logs(
        &self,
        filters: &AuditQuery,
        page: &PageQuery,
    ) -> Result<Page<AuditLogEntry>> {
        self.get_page(
            "/platform/platform-audit-logs",
            &audit_query(filters, page),
            "list platform audit logs",
        )
    }

    pub fn get_metrics(&self) -> Result<PlatformMetrics> {
        self.get_json("/platform/metrics", &[], "get platform metrics")
    }
}
