//! The business detail view: one aggregate read, six tabs, per-tab drafts.

use crate::cursor_list::ListController;
use crate::drafts::{
    RateLimitDraft, ReadOnlyDraft, ReviewDraft, StatusDraft, SubscriptionDraft, require_reason,
};
use crate::model::{Business, BusinessWorkspace, Device, SubscriptionHistoryEntry};
use crate::page::PageQuery;
use crate::remote::SubscriptionUpdate;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkspaceTab {
    Summary,
    Subscription,
    RiskStatus,
    Access,
    Devices,
    Danger,
}

impl WorkspaceTab {
    pub const ALL: [WorkspaceTab; 6] = [
        WorkspaceTab::Summary,
        WorkspaceTab::Subscription,
        WorkspaceTab::RiskStatus,
        WorkspaceTab::Access,
        WorkspaceTab::Devices,
        WorkspaceTab::Danger,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WorkspaceTab::Summary => "Summary",
            WorkspaceTab::Subscription => "Subscription",
            WorkspaceTab::RiskStatus => "Risk & Status",
            WorkspaceTab::Access => "Access",
            WorkspaceTab::Devices => "Devices",
            WorkspaceTab::Danger => "Danger",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Drafts owned by the tabs. Seeded from the first aggregate that arrives
/// and re-seeded only for the form that was just saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceDrafts {
    pub subscription: SubscriptionDraft,
    pub status: StatusDraft,
    pub review: ReviewDraft,
    pub read_only: ReadOnlyDraft,
    pub rate_limits: RateLimitDraft,
    pub revoke_reason: String,
}

impl WorkspaceDrafts {
    fn from_business(b: &Business) -> Self {
        Self {
            subscription: SubscriptionDraft::from_business(b),
            status: StatusDraft::from_business(b),
            review: ReviewDraft::from_business(b),
            read_only: ReadOnlyDraft::from_business(b),
            rate_limits: RateLimitDraft::from_business(b),
            revoke_reason: String::new(),
        }
    }
}

#[derive(Debug)]
pub struct WorkspaceView {
    pub business_id: String,
    pub tab: WorkspaceTab,
    pub aggregate: Option<BusinessWorkspace>,
    pub drafts: Option<WorkspaceDrafts>,
    pub devices: ListController<Device>,
    pub history: ListController<SubscriptionHistoryEntry>,
    pub danger: DangerFlow,

    seq: u64,
    pending: Option<u64>,
}

impl WorkspaceView {
    pub fn new(business_id: &str) -> Self {
        Self {
            business_id: business_id.to_string(),
            tab: WorkspaceTab::Summary,
            aggregate: None,
            drafts: None,
            devices: ListController::new(),
            history: ListController::new(),
            danger: DangerFlow::new(business_id),
            seq: 0,
            pending: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Stamps a new aggregate request; earlier ones become stale.
    pub fn begin_load(&mut self) -> u64 {
        self.seq += 1;
        self.pending = Some(self.seq);
        self.seq
    }

    /// Applies an aggregate response unless a newer request was issued
    /// after it. Returns whether it was applied.
    pub fn apply(&mut self, seq: u64, ws: BusinessWorkspace) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "dropping stale workspace response");
            return false;
        }
        self.pending = None;
        if self.drafts.is_none() {
            self.drafts = Some(WorkspaceDrafts::from_business(&ws.merged_business()));
        }
        self.aggregate = Some(ws);
        true
    }

    pub fn fail(&mut self, seq: u64) {
        if seq == self.seq {
            self.pending = None;
        }
    }

    pub fn business(&self) -> Option<Business> {
        self.aggregate.as_ref().map(BusinessWorkspace::merged_business)
    }

    /// After a successful save the tab's drafts are rebuilt, but only from
    /// an aggregate fetched after the write. A stale aggregate would show
    /// the values from before the save.
    fn finish_save(&mut self, tab: WorkspaceTab, reloaded: bool) {
        if reloaded {
            self.reseed(tab);
        } else {
            tracing::debug!(business = %self.business_id, ?tab, "reload failed; keeping drafts");
        }
    }

    fn reseed(&mut self, tab: WorkspaceTab) {
        let (Some(b), Some(d)) = (self.business(), self.drafts.as_mut()) else {
            return;
        };
        match tab {
            WorkspaceTab::Subscription => {
                d.subscription = SubscriptionDraft::from_business(&b);
            }
            WorkspaceTab::RiskStatus => {
                d.status = StatusDraft::from_business(&b);
                d.review = ReviewDraft::from_business(&b);
            }
            WorkspaceTab::Access => {
                d.read_only = ReadOnlyDraft::from_business(&b);
                d.rate_limits = RateLimitDraft::from_business(&b);
                d.revoke_reason.clear();
            }
            _ => {}
        }
    }
}

/// Which form of a tab to save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkspaceForm {
    Subscription,
    Status,
    Review,
    ReadOnly,
    RateLimits,
    RevokeSessions,
}

impl WorkspaceForm {
    fn tab(self) -> WorkspaceTab {
        match self {
            WorkspaceForm::Subscription => WorkspaceTab::Subscription,
            WorkspaceForm::Status | WorkspaceForm::Review => WorkspaceTab::RiskStatus,
            WorkspaceForm::ReadOnly | WorkspaceForm::RateLimits | WorkspaceForm::RevokeSessions => {
                WorkspaceTab::Access
            }
        }
    }
}

impl Console {
    pub fn open_workspace(&mut self, business_id: &str) -> Result<()> {
        self.workspace = Some(WorkspaceView::new(business_id));
        self.load_workspace()
    }

    pub fn close_workspace(&mut self) {
        self.workspace = None;
    }

    /// (Re)loads the aggregate for the open business.
    pub fn load_workspace(&mut self) -> Result<()> {
        let Some(ws) = self.workspace.as_mut() else {
            return Ok(());
        };
        let seq = ws.begin_load();
        let id = ws.business_id.clone();
        let res = self.client.get_workspace(&id);
        // The view may have been replaced while the request was out.
        let res = match (res, self.workspace.as_mut()) {
            (Ok(agg), Some(ws)) if ws.business_id == id => {
                ws.apply(seq, agg);
                Ok(())
            }
            (Ok(_), _) => Ok(()),
            (Err(err), ws) => {
                if let Some(ws) = ws {
                    ws.fail(seq);
                }
                Err(err)
            }
        };
        self.report(res, "Unable to load business details.")
    }

    pub fn load_workspace_devices(&mut self) -> Result<()> {
        let limit = self.page_limit;
        let client = &self.client;
        let Some(ws) = self.workspace.as_mut() else {
            return Ok(());
        };
        let id = ws.business_id.clone();
        let res = ws.devices.refresh(|cursor| {
            client.list_devices(&id, &PageQuery::new(limit).with_cursor(cursor.cloned()))
        });
        self.report(res, "Unable to load devices.")
    }

    pub fn load_more_workspace_devices(&mut self) -> Result<bool> {
        let limit = self.page_limit;
        let client = &self.client;
        let Some(ws) = self.workspace.as_mut() else {
            return Ok(false);
        };
        let id = ws.business_id.clone();
        let res = ws.devices.load_more(|cursor| {
            client.list_devices(&id, &PageQuery::new(limit).with_cursor(cursor.cloned()))
        });
        self.report(res, "Unable to load more devices.")
    }

    pub fn load_subscription_history(&mut self) -> Result<()> {
        let limit = self.page_limit;
        let client = &self.client;
        let Some(ws) = self.workspace.as_mut() else {
            return Ok(());
        };
        let id = ws.business_id.clone();
        let res = ws.history.refresh(|cursor| {
            client.subscription_history(&id, &PageQuery::new(limit).with_cursor(cursor.cloned()))
        });
        self.report(res, "Unable to load subscription history.")
    }

    /// Refreshes only the health score of the open business.
    pub fn refresh_health(&mut self) -> Result<()> {
        let Some(id) = self.workspace.as_ref().map(|w| w.business_id.clone()) else {
            return Ok(());
        };
        let res = self.client.get_health(&id);
        let res = res.map(|health| {
            if let Some(agg) = self
                .workspace
                .as_mut()
                .and_then(|w| w.aggregate.as_mut())
            {
                agg.health = Some(health);
            }
        });
        self.report(res, "Unable to load health score.")
    }

    /// Saves one form of the open workspace with its own reason field.
    pub fn save_workspace_form(&mut self, form: WorkspaceForm) -> Result<()> {
        let Some((id, drafts)) = self
            .workspace
            .as_ref()
            .and_then(|w| w.drafts.clone().map(|d| (w.business_id.clone(), d)))
        else {
            return self.reject(ValidationError::invalid("business details are not loaded"));
        };

        let res = match form {
            WorkspaceForm::Subscription => {
                let d = &drafts.subscription;
                let reason = match require_reason(&d.reason) {
                    Ok(r) => r,
                    Err(e) => return self.reject(e),
                };
                let update = SubscriptionUpdate {
                    tier: Some(d.tier),
                    status: Some(d.status),
                    reason,
                    ..SubscriptionUpdate::default()
                };
                self.mutate(
                    &ActionKey::business("subscription", &id),
                    "Subscription updated.",
                    "Unable to update subscription.",
                    |c| c.update_subscription(&id, &update),
                )
            }
            WorkspaceForm::Status => {
                let d = &drafts.status;
                let reason = match require_reason(&d.reason) {
                    Ok(r) => r,
                    Err(e) => return self.reject(e),
                };
                self.mutate(
                    &ActionKey::business("status", &id),
                    "Business status updated.",
                    "Unable to update business status.",
                    |c| c.update_status(&id, d.status, &reason),
                )
            }
            WorkspaceForm::Review => {
                let d = &drafts.review;
                let reason = if d.under_review {
                    match require_reason(&d.reason) {
                        Ok(r) => Some(r),
                        Err(e) => return self.reject(e),
                    }
                } else {
                    trimmed(&d.reason)
                };
                let severity = d.under_review.then_some(d.severity);
                self.mutate(
                    &ActionKey::business("review", &id),
                    "Review flag updated.",
                    "Unable to update review flag.",
                    |c| c.update_review(&id, d.under_review, severity, reason.as_deref()),
                )
            }
            WorkspaceForm::ReadOnly => {
                let d = &drafts.read_only;
                let reason = if d.enabled {
                    match require_reason(&d.reason) {
                        Ok(r) => Some(r),
                        Err(e) => return self.reject(e),
                    }
                } else {
                    trimmed(&d.reason)
                };
                self.mutate(
                    &ActionKey::business("read-only", &id),
                    "Read-only mode updated.",
                    "Unable to update read-only mode.",
                    |c| c.update_read_only(&id, d.enabled, reason.as_deref()),
                )
            }
            WorkspaceForm::RateLimits => {
                let d = &drafts.rate_limits;
                let reason = match require_reason(&d.reason) {
                    Ok(r) => r,
                    Err(e) => return self.reject(e),
                };
                if d.limit == Some(0) {
                    return self.reject(ValidationError::invalid(
                        "Rate limit must be greater than zero.",
                    ));
                }
                self.mutate(
                    &ActionKey::business("rate-limits", &id),
                    "Rate limits updated.",
                    "Unable to update rate limits.",
                    |c| c.update_rate_limits(&id, d.limit, d.ttl_seconds, &reason),
                )
            }
            WorkspaceForm::RevokeSessions => {
                let reason = match require_reason(&drafts.revoke_reason) {
                    Ok(r) => r,
                    Err(e) => return self.reject(e),
                };
                self.mutate(
                    &ActionKey::business("revoke-sessions", &id),
                    "Sessions revoked.",
                    "Unable to revoke sessions.",
                    |c| c.revoke_sessions(&id, &reason),
                )
            }
        };
        res?;

        let reloaded = self.load_workspace().is_ok();
        if let Some(ws) = self.workspace.as_mut() {
            ws.finish_save(form.tab(), reloaded);
        }
        let _ = self.load_businesses();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/console/workspace_tests.rs"]
mod tests;
