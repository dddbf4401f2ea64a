//! `/platform/businesses` endpoints.

use reqwest::Method;

use super::*;

fn business_path(id: &str, suffix: &str) -> String {
    format!("/platform/businesses/{}{}", id, suffix)
}

impl RemoteClient {
    pub fn list_businesses(
        &self,
        filters: &BusinessQuery,
        page: &PageQuery,
    ) -> Result<Page<Business>> {
        let mut q = page.clone().filter("search", filters.search.as_str());
        if let Some(status) = filters.status {
            q = q.filter("status", status.as_str());
        }
        if let Some(review) = filters.under_review {
            q = q.filter("underReview", review.to_string());
        }
        self.get_page("/platform/businesses", &q, "list businesses")
    }

    pub fn get_business(&self, id: &str) -> Result<Business> {
        self.get_json(&business_path(id, ""), &[], "get business")
    }

    pub fn get_workspace(&self, id: &str) -> Result<BusinessWorkspace> {
        self.get_json(&business_path(id, "/workspace"), &[], "get business workspace")
    }

    pub fn get_health(&self, id: &str) -> Result<HealthScore> {
        self.get_json(&business_path(id, "/health"), &[], "get business health")
    }

    pub fn list_devices(&self, id: &str, page: &PageQuery) -> Result<Page<Device>> {
        self.get_page(&business_path(id, "/devices"), page, "list devices")
    }

    pub fn update_status(&self, id: &str, status: BusinessStatus, reason: &str) -> Result<()> {
        self.send_unit(
            Method::PATCH,
            &business_path(id, "/status"),
            Some(&UpdateStatusRequest { status, reason }),
            "update business status",
        )
    }

    pub fn update_read_only(&self, id: &str, enabled: bool, reason: Option<&str>) -> Result<()> {
        self.send_unit(
            Method::PATCH,
            &business_path(id, "/read-only"),
            Some(&UpdateReadOnlyRequest { enabled, reason }),
            "update read-only",
        )
    }

    pub fn update_review(
        &self,
        id: &str,
        under_review: bool,
        severity: Option<ReviewSeverity>,
        reason: Option<&str>,
    ) -> Result<()> {
        self.send_unit(
            Method::PATCH,
            &business_path(id, "/review"),
            Some(&UpdateReviewRequest {
                under_review,
                severity,
                reason,
            }),
            "update review",
        )
    }

    pub fn update_rate_limits(
        &self,
        id: &str,
        limit: Option<u32>,
        ttl_seconds: Option<u64>,
        reason: &str,
    ) -> Result<()> {
        self.send_unit(
            Method::PATCH,
            &business_path(id, "/rate-limits"),
            Some(&UpdateRateLimitsRequest {
                limit,
                ttl_seconds,
                reason,
            }),
            "update rate limits",
        )
    }

    pub fn revoke_sessions(&self, id: &str, reason: &str) -> Result<()> {
        self.send_unit(
            Method::POST,
            &business_path(id, "/revoke-sessions"),
            Some(&ReasonRequest { reason }),
            "revoke sessions",
        )
    }

    pub fn purge_business(
        &self,
        id: &str,
        reason: &str,
        confirm_business_id: &str,
        confirm_text: &str,
    ) -> Result<()> {
        self.send_unit(
            Method::POST,
            &business_path(id, "/purge"),
            Some(&PurgeRequest {
                reason,
                confirm_business_id,
                confirm_text,
            }),
            "purge business",
        )
    }
}
