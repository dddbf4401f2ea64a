//! Platform-wide queues: subscription requests, support access, exports,
//! announcements, both audit trails, and the metrics summary.

use crate::cursor_list::{ListController, ListPhase};
use crate::drafts::require_reason;
use crate::error::Banner;
use crate::model::{
    Announcement, AuditLogEntry, ExportJob, PlatformMetrics, SubscriptionRequest,
    SupportAccessRequest,
};
use crate::page::{Page, PageQuery};
use crate::remote::{AuditQuery, NewAnnouncement};

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueKind {
    SubscriptionRequests,
    Support,
    Exports,
    Announcements,
    Audit,
    PlatformAudit,
}

impl QueueKind {
    pub fn title(self) -> &'static str {
        match self {
            QueueKind::SubscriptionRequests => "subscription requests",
            QueueKind::Support => "support access requests",
            QueueKind::Exports => "export jobs",
            QueueKind::Announcements => "announcements",
            QueueKind::Audit => "audit logs",
            QueueKind::PlatformAudit => "platform audit logs",
        }
    }
}

#[derive(Debug, Default)]
pub struct QueuePanels {
    pub subscription_requests: ListController<SubscriptionRequest>,
    pub support: ListController<SupportAccessRequest>,
    pub exports: ListController<ExportJob>,
    pub announcements: ListController<Announcement>,
    pub audit: ListController<AuditLogEntry>,
    pub platform_audit: ListController<AuditLogEntry>,
    pub audit_query: AuditQuery,
    pub metrics: Option<PlatformMetrics>,
}

impl QueuePanels {
    pub fn len(&self, kind: QueueKind) -> usize {
        match kind {
            QueueKind::SubscriptionRequests => self.subscription_requests.items().len(),
            QueueKind::Support => self.support.items().len(),
            QueueKind::Exports => self.exports.items().len(),
            QueueKind::Announcements => self.announcements.items().len(),
            QueueKind::Audit => self.audit.items().len(),
            QueueKind::PlatformAudit => self.platform_audit.items().len(),
        }
    }
}

fn first_page<T>(
    list: &mut ListController<T>,
    limit: u32,
    fetch: impl FnOnce(&PageQuery) -> Result<Page<T>>,
) -> Result<()> {
    list.refresh(|cursor| fetch(&PageQuery::new(limit).with_cursor(cursor.cloned())))
}

fn next_page<T>(
    list: &mut ListController<T>,
    limit: u32,
    fetch: impl FnOnce(&PageQuery) -> Result<Page<T>>,
) -> Result<bool> {
    list.load_more(|cursor| fetch(&PageQuery::new(limit).with_cursor(cursor.cloned())))
}

impl Console {
    pub fn refresh_queue(&mut self, kind: QueueKind) -> Result<()> {
        let limit = self.page_limit;
        let client = &self.client;
        let q = &mut self.queues;
        let filters = q.audit_query.clone();
        let res = match kind {
            QueueKind::SubscriptionRequests => first_page(&mut q.subscription_requests, limit, |p| {
                client.list_subscription_requests(p)
            }),
            QueueKind::Support => {
                first_page(&mut q.support, limit, |p| client.list_support_requests(p))
            }
            QueueKind::Exports => first_page(&mut q.exports, limit, |p| client.list_export_jobs(p)),
            QueueKind::Announcements => {
                first_page(&mut q.announcements, limit, |p| client.list_announcements(p))
            }
            QueueKind::Audit => {
                first_page(&mut q.audit, limit, |p| client.list_audit_logs(&filters, p))
            }
            QueueKind::PlatformAudit => first_page(&mut q.platform_audit, limit, |p| {
                client.list_platform_audit_logs(&filters, p)
            }),
        };
        let fallback = format!("Unable to load {}.", kind.title());
        self.report(res, &fallback)
    }

    /// Appends the next page of a queue. `Ok(false)` once exhausted.
    pub fn load_more_queue(&mut self, kind: QueueKind) -> Result<bool> {
        let limit = self.page_limit;
        let client = &self.client;
        let q = &mut self.queues;
        let filters = q.audit_query.clone();
        let res = match kind {
            QueueKind::SubscriptionRequests => next_page(&mut q.subscription_requests, limit, |p| {
                client.list_subscription_requests(p)
            }),
            QueueKind::Support => {
                next_page(&mut q.support, limit, |p| client.list_support_requests(p))
            }
            QueueKind::Exports => next_page(&mut q.exports, limit, |p| client.list_export_jobs(p)),
            QueueKind::Announcements => {
                next_page(&mut q.announcements, limit, |p| client.list_announcements(p))
            }
            QueueKind::Audit => {
                next_page(&mut q.audit, limit, |p| client.list_audit_logs(&filters, p))
            }
            QueueKind::PlatformAudit => next_page(&mut q.platform_audit, limit, |p| {
                client.list_platform_audit_logs(&filters, p)
            }),
        };
        let fallback = format!("Unable to load more {}.", kind.title());
        self.report(res, &fallback)
    }

    /// The request queue is secondary on the businesses screen: a failed
    /// first load leaves it empty with an informational banner instead of
    /// an error. Later refreshes report failures normally.
    pub fn load_subscription_requests(&mut self) -> Result<()> {
        // Only a queue that never loaded degrades quietly. An empty queue that
        // did load reports later failures like any other list.
        let never_loaded = matches!(
            self.queues.subscription_requests.phase(),
            ListPhase::Idle | ListPhase::Failed
        );
        if !never_loaded {
            return self.refresh_queue(QueueKind::SubscriptionRequests);
        }
        let limit = self.page_limit;
        let client = &self.client;
        let res = first_page(&mut self.queues.subscription_requests, limit, |p| {
            client.list_subscription_requests(p)
        });
        if let Err(err) = res {
            tracing::warn!(error = %format!("{:#}", err), "subscription requests unavailable");
            self.set_banner(Banner::info("Subscription requests are unavailable right now."));
        }
        Ok(())
    }

    pub fn set_audit_filters(&mut self, query: AuditQuery) -> Result<()> {
        self.queues.audit_query = query;
        self.refresh_queue(QueueKind::Audit)?;
        self.refresh_queue(QueueKind::PlatformAudit)
    }

    pub fn approve_subscription_request(&mut self, request_id: &str, reason: &str) -> Result<()> {
        let reason = trimmed(reason);
        let updated = self.mutate(
            &ActionKey::new("approve", "subscription-request", request_id),
            "Subscription request approved.",
            "Unable to approve subscription request.",
            |c| c.approve_subscription_request(request_id, reason.as_deref()),
        )?;
        self.queues
            .subscription_requests
            .replace_where(|r| r.id == request_id, updated);
        let _ = self.load_businesses();
        Ok(())
    }

    pub fn reject_subscription_request(&mut self, request_id: &str, reason: &str) -> Result<()> {
        let reason = match require_reason(reason) {
            Ok(r) => r,
            Err(e) => return self.reject(e),
        };
        let updated = self.mutate(
            &ActionKey::new("reject", "subscription-request", request_id),
            "Subscription request rejected.",
            "Unable to reject subscription request.",
            |c| c.reject_subscription_request(request_id, &reason),
        )?;
        self.queues
            .subscription_requests
            .replace_where(|r| r.id == request_id, updated);
        Ok(())
    }

    pub fn request_support_access(
        &mut self,
        business_id: &str,
        reason: &str,
        duration_hours: Option<u32>,
        scope: Option<&str>,
    ) -> Result<SupportAccessRequest> {
        let reason = match require_reason(reason) {
            Ok(r) => r,
            Err(e) => return self.reject(e),
        };
        if duration_hours == Some(0) {
            return self.reject(ValidationError::invalid(
                "Access duration must be at least one hour.",
            ));
        }
        let created = self.mutate(
            &ActionKey::business("support-request", business_id),
            "Support access requested.",
            "Unable to request support access.",
            |c| c.request_support_access(business_id, &reason, duration_hours, scope),
        )?;
        let _ = self.refresh_queue(QueueKind::Support);
        Ok(created)
    }

    pub fn activate_support_access(&mut self, request_id: &str) -> Result<()> {
        let updated = self.mutate(
            &ActionKey::new("activate", "support-request", request_id),
            "Support access activated.",
            "Unable to activate support access.",
            |c| c.activate_support_access(request_id),
        )?;
        self.queues.support.replace_where(|r| r.id == request_id, updated);
        Ok(())
    }

    pub fn create_export_job(
        &mut self,
        business_id: &str,
        kind: Option<&str>,
        reason: &str,
    ) -> Result<ExportJob> {
        let reason = trimmed(reason);
        let job = self.mutate(
            &ActionKey::business("export", business_id),
            "Export job queued.",
            "Unable to create export job.",
            |c| c.create_export_job(business_id, kind, reason.as_deref()),
        )?;
        let _ = self.refresh_queue(QueueKind::Exports);
        Ok(job)
    }

    pub fn create_exit_export(&mut self, business_id: &str, reason: &str) -> Result<ExportJob> {
        let reason = trimmed(reason);
        let job = self.mutate(
            &ActionKey::business("exit-export", business_id),
            "Exit export queued.",
            "Unable to create exit export.",
            |c| c.create_exit_export(business_id, reason.as_deref()),
        )?;
        let _ = self.refresh_queue(QueueKind::Exports);
        Ok(job)
    }

    pub fn mark_export_delivered(&mut self, job_id: &str, reason: &str) -> Result<()> {
        let reason = match require_reason(reason) {
            Ok(r) => r,
            Err(e) => return self.reject(e),
        };
        let updated = self.mutate(
            &ActionKey::new("delivered", "export", job_id),
            "Export marked as delivered.",
            "Unable to mark export as delivered.",
            |c| c.mark_export_delivered(job_id, &reason),
        )?;
        self.queues.exports.replace_where(|j| j.id == job_id, updated);
        Ok(())
    }

    pub fn create_announcement(&mut self, new: &NewAnnouncement) -> Result<Announcement> {
        if new.title.trim().is_empty() || new.message.trim().is_empty() {
            return self.reject(ValidationError::invalid(
                "An announcement needs a title and a message.",
            ));
        }
        let created = self.mutate(
            &ActionKey::new("create", "announcement", "new"),
            "Announcement published.",
            "Unable to publish announcement.",
            |c| c.create_announcement(new),
        )?;
        let _ = self.refresh_queue(QueueKind::Announcements);
        Ok(created)
    }

    pub fn end_announcement(&mut self, id: &str) -> Result<()> {
        let updated = self.mutate(
            &ActionKey::new("end", "announcement", id),
            "Announcement ended.",
            "Unable to end announcement.",
            |c| c.end_announcement(id),
        )?;
        self.queues.announcements.replace_where(|a| a.id == id, updated);
        Ok(())
    }

    pub fn load_metrics(&mut self) -> Result<()> {
        let res = self.client.get_metrics();
        let res = res.map(|m| {
            self.queues.metrics = Some(m);
        });
        self.report(res, "Unable to load platform metrics.")
    }
}
