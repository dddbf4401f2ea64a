//! The business list: cursor paging, per-row drafts and row mutations.

use crate::cursor_list::ListController;
use crate::drafts::{BusinessDrafts, require_reason};
use crate::model::{Business, SubscriptionSnapshot, SubscriptionTier};
use crate::page::PageQuery;
use crate::remote::{BusinessQuery, SubscriptionUpdate};

use super::*;

#[derive(Debug, Default)]
pub struct BusinessPanel {
    pub list: ListController<Business>,
    pub drafts: BusinessDrafts,
    pub query: BusinessQuery,
}

impl BusinessPanel {
    pub fn items(&self) -> &[Business] {
        self.list.items()
    }

    pub fn get(&self, id: &str) -> Option<&Business> {
        self.list.find(|b| b.id == id)
    }
}

impl Console {
    /// Fetches the first page with the current filters. Drafts of
    /// businesses that are no longer listed are discarded; new ones are
    /// seeded; the rest keep their in-progress edits.
    pub fn load_businesses(&mut self) -> Result<()> {
        let query = PageQuery::new(self.page_limit);
        let filters = self.businesses.query.clone();
        let client = &self.client;
        let res = self
            .businesses
            .list
            .refresh(|cursor| client.list_businesses(&filters, &query.with_cursor(cursor.cloned())));
        if res.is_ok() {
            let items = self.businesses.list.items();
            self.businesses.drafts.sync(items);
            tracing::debug!(count = items.len(), "businesses loaded");
        }
        self.report(res, "Unable to load businesses.")
    }

    /// Appends the next page. `Ok(false)` at the end of the list.
    pub fn load_more_businesses(&mut self) -> Result<bool> {
        let query = PageQuery::new(self.page_limit);
        let filters = self.businesses.query.clone();
        let client = &self.client;
        let res = self
            .businesses
            .list
            .load_more(|cursor| client.list_businesses(&filters, &query.with_cursor(cursor.cloned())));
        if let Ok(true) = res {
            self.businesses.drafts.seed(self.businesses.list.items());
        }
        self.report(res, "Unable to load more businesses.")
    }

    /// Loads every page; used by the CLI `--all` listing.
    pub fn load_all_businesses(&mut self) -> Result<()> {
        self.load_businesses()?;
        while self.load_more_businesses()? {}
        Ok(())
    }

    pub fn set_business_filters(&mut self, query: BusinessQuery) -> Result<()> {
        self.businesses.query = query;
        self.load_businesses()
    }

    fn reload_after_write(&mut self, business_id: &str) {
        // The write already succeeded; a failed reload only shows up in
        // the banner.
        let _ = self.load_businesses();
        if let Some(ws) = &self.workspace
            && ws.business_id == business_id
        {
            let _ = self.load_workspace();
        }
    }

    pub fn update_status(&mut self, business_id: &str) -> Result<()> {
        let Some(draft) = self.businesses.drafts.status.get(business_id).cloned() else {
            return self.reject(ValidationError::invalid(format!(
                "business {} is not loaded",
                business_id
            )));
        };
        let reason = match require_reason(&draft.reason) {
            Ok(r) => r,
            Err(e) => return self.reject(e),
        };
        let key = ActionKey::business("status", business_id);
        self.mutate(
            &key,
            "Business status updated.",
            "Unable to update business status.",
            |c| c.update_status(business_id, draft.status, &reason),
        )?;
        self.reload_after_write(business_id);
        Ok(())
    }

    pub fn update_subscription(&mut self, business_id: &str) -> Result<()> {
        let Some(draft) = self.businesses.drafts.subscription.get(business_id).cloned() else {
            return self.reject(ValidationError::invalid(format!(
                "business {} is not loaded",
                business_id
            )));
        };
        let reason = match require_reason(&draft.reason) {
            Ok(r) => r,
            Err(e) => return self.reject(e),
        };
        let update = SubscriptionUpdate {
            tier: Some(draft.tier),
            status: Some(draft.status),
            reason,
            ..SubscriptionUpdate::default()
        };
        let key = ActionKey::business("subscription", business_id);
        self.mutate(
            &key,
            "Subscription updated.",
            "Unable to update subscription.",
            |c| c.update_subscription(business_id, &update),
        )?;
        self.reload_after_write(business_id);
        Ok(())
    }

    /// Creates a trial subscription for a business that has none.
    pub fn start_trial(
        &mut self,
        business_id: &str,
        tier: SubscriptionTier,
        reason: &str,
    ) -> Result<SubscriptionSnapshot> {
        let reason = match require_reason(reason) {
            Ok(r) => r,
            Err(e) => return self.reject(e),
        };
        let sub = self.mutate(
            &ActionKey::business("start-trial", business_id),
            "Trial subscription started.",
            "Unable to start trial subscription.",
            |c| c.create_subscription(business_id, tier, &reason),
        )?;
        self.reload_after_write(business_id);
        Ok(sub)
    }

    /// Enabling read-only mode needs a reason; disabling does not.
    pub fn update_read_only(&mut self, business_id: &str) -> Result<()> {
        let Some(draft) = self.businesses.drafts.read_only.get(business_id).cloned() else {
            return self.reject(ValidationError::invalid(format!(
                "business {} is not loaded",
                business_id
            )));
        };
        let reason = if draft.enabled {
            match require_reason(&draft.reason) {
                Ok(r) => Some(r),
                Err(e) => return self.reject(e),
            }
        } else {
            trimmed(&draft.reason)
        };
        let key = ActionKey::business("read-only", business_id);
        self.mutate(
            &key,
            "Read-only mode updated.",
            "Unable to update read-only mode.",
            |c| c.update_read_only(business_id, draft.enabled, reason.as_deref()),
        )?;
        self.reload_after_write(business_id);
        Ok(())
    }

    /// Flagging for review needs a reason; clearing the flag does not.
    pub fn update_review(&mut self, business_id: &str) -> Result<()> {
        let Some(draft) = self.businesses.drafts.review.get(business_id).cloned() else {
            return self.reject(ValidationError::invalid(format!(
                "business {} is not loaded",
                business_id
            )));
        };
        let reason = if draft.under_review {
            match require_reason(&draft.reason) {
                Ok(r) => Some(r),
                Err(e) => return self.reject(e),
            }
        } else {
            trimmed(&draft.reason)
        };
        let severity = draft.under_review.then_some(draft.severity);
        let key = ActionKey::business("review", business_id);
        self.mutate(
            &key,
            "Review flag updated.",
            "Unable to update review flag.",
            |c| c.update_review(business_id, draft.under_review, severity, reason.as_deref()),
        )?;
        self.reload_after_write(business_id);
        Ok(())
    }

    pub fn update_rate_limits(&mut self, business_id: &str) -> Result<()> {
        let Some(draft) = self.businesses.drafts.rate_limits.get(business_id).cloned() else {
            return self.reject(ValidationError::invalid(format!(
                "business {} is not loaded",
                business_id
            )));
        };
        let reason = match require_reason(&draft.reason) {
            Ok(r) => r,
            Err(e) => return self.reject(e),
        };
        if draft.limit == Some(0) {
            return self.reject(ValidationError::invalid(
                "Rate limit must be greater than zero.",
            ));
        }
        let key = ActionKey::business("rate-limits", business_id);
        self.mutate(
            &key,
            "Rate limits updated.",
            "Unable to update rate limits.",
            |c| c.update_rate_limits(business_id, draft.limit, draft.ttl_seconds, &reason),
        )?;
        self.reload_after_write(business_id);
        Ok(())
    }

    pub fn revoke_sessions(&mut self, business_id: &str, reason: &str) -> Result<()> {
        let reason = match require_reason(reason) {
            Ok(r) => r,
            Err(e) => return self.reject(e),
        };
        let key = ActionKey::business("revoke-sessions", business_id);
        self.mutate(
            &key,
            "Sessions revoked.",
            "Unable to revoke sessions.",
            |c| c.revoke_sessions(business_id, &reason),
        )?;
        self.reload_after_write(business_id);
        Ok(())
    }
}
