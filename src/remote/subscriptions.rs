use reqwest::Method;

use super::*;

impl RemoteClient {
    pub fn get_subscription(&self, business_id: &str) -> Result<SubscriptionSnapshot> {
        self.get_json(
            &format!("/platform/subscriptions/{}", business_id),
            &[],
            "get subscription",
        )
    }

    pub fn update_subscription(
        &self,
        business_id: &str,
        update: &SubscriptionUpdate,
    ) -> Result<()> {
        self.send_unit(
            Method::PATCH,
            &format!("/platform/subscriptions/{}", business_id),
            Some(update),
            "update subscription",
        )
    }

    pub fn create_subscription(
        &self,
        business_id: &str,
        tier: SubscriptionTier,
        reason: &str,
    ) -> Result<SubscriptionSnapshot> {
        self.send_json(
            Method::POST,
            "/platform/subscriptions",
            Some(&CreateSubscriptionRequest {
                business_id,
                tier,
                reason,
            }),
            "create subscription",
        )
    }

    pub fn subscription_history(
        &self,
        business_id: &str,
        page: &PageQuery,
    ) -> Result<Page<SubscriptionHistoryEntry>> {
        self.get_page(
            &format!("/platform/subscriptions/{}/history", business_id),
            page,
            "subscription history",
        )
    }

    pub fn list_subscription_requests(
        &self,
        page: &PageQuery,
    ) -> Result<Page<SubscriptionRequest>> {
        self.get_page(
            "/platform/subscription-requests",
            page,
            "list subscription requests",
        )
    }

    pub fn approve_subscription_request(
        &self,
        request_id: &str,
        reason: Option<&str>,
    ) -> Result<SubscriptionRequest> {
        self.send_json(
            Method::POST,
            &format!("/platform/subscription-requests/{}/approve", request_id),
            Some(&serde_json::json!({ "reason": reason })),
            "approve subscription request",
        )
    }

    pub fn reject_subscription_request(
        &self,
        request_id: &str,
        reason: &str,
    ) -> Result<SubscriptionRequest> {
        self.send_json(
            Method::POST,
            &format!("/platform/subscription-requests/{}/reject", request_id),
            Some(&ReasonRequest { reason }),
            "reject subscription request",
        )
    }
}
