//! Support access, export jobs and announcements.

use reqwest::Method;

use super::*;

impl RemoteClient {
    pub fn list_support_requests(&self, page: &PageQuery) -> Result<Page<SupportAccessRequest>> {
        self.get_page(
            "/platform/support-access/requests",
            page,
            "list support access requests",
        )
    }

    pub fn request_support_access(
        &self,
        business_id: &str,
        reason: &str,
        duration_hours: Option<u32>,
        scope: Option<&str>,
    ) -> Result<SupportAccessRequest> {
        self.send_json(
            Method::POST,
            "/platform/support-access/requests",
            Some(&CreateSupportAccessRequest {
                business_id,
                reason,
                duration_hours,
                scope,
            }),
            "request support access",
        )
    }

    pub fn activate_support_access(&self, request_id: &str) -> Result<SupportAccessRequest> {
        self.send_json(
            Method::POST,
            &format!("/platform/support-access/requests/{}/activate", request_id),
            None::<&serde_json::Value>,
            "activate support access",
        )
    }

    pub fn list_export_jobs(&self, page: &PageQuery) -> Result<Page<ExportJob>> {
        self.get_page("/platform/exports/jobs", page, "list export jobs")
    }

    pub fn create_export_job(
        &self,
        business_id: &str,
        kind: Option<&str>,
        reason: Option<&str>,
    ) -> Result<ExportJob> {
        self.send_json(
            Method::POST,
            "/platform/exports/jobs",
            Some(&CreateExportJobRequest {
                business_id,
                kind,
                reason,
            }),
            "create export job",
        )
    }

    /// Queues the export a business gets when it leaves the platform.
    pub fn create_exit_export(&self, business_id: &str, reason: Option<&str>) -> Result<ExportJob> {
        self.send_json(
            Method::POST,
            "/platform/exports/on-exit",
            Some(&CreateExportJobRequest {
                business_id,
                kind: None,
                reason,
            }),
            "create exit export",
        )
    }

    pub fn mark_export_delivered(&self, job_id: &str, reason: &str) -> Result<ExportJob> {
        self.send_json(
            Method::PATCH,
            &format!("/platform/exports/jobs/{}/delivered", job_id),
            Some(&ReasonRequest { reason }),
            "mark export delivered",
        )
    }

    pub fn list_announcements(&self, page: &PageQuery) -> Result<Page<Announcement>> {
        self.get_page("/platform/announcements", page, "list announcements")
    }

    pub fn create_announcement(&self, new: &NewAnnouncement) -> Result<Announcement> {
        self.send_json(
            Method::POST,
            "/platform/announcements",
            Some(new),
            "create announcement",
        )
    }

    pub fn end_announcement(&self, id: &str) -> Result<Announcement> {
        self.send_json(
            Method::PATCH,
            &format!("/platform/announcements/{}/end", id),
            None::<&serde_json::Value>,
            "end announcement",
        )
    }
}
