//! In-memory platform data, seeded deterministically at startup.

use super::*;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

pub(super) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

pub(super) fn ts_in_hours(hours: i64) -> String {
    (time::OffsetDateTime::now_utc() + time::Duration::hours(hours))
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

pub(super) struct Db {
    pub(super) businesses: Vec<Business>,
    pub(super) devices: HashMap<String, Vec<Device>>,
    pub(super) history: HashMap<String, Vec<SubscriptionHistoryEntry>>,
    pub(super) subscription_requests: Vec<SubscriptionRequest>,
    pub(super) support: Vec<SupportAccessRequest>,
    pub(super) exports: Vec<ExportJob>,
    pub(super) announcements: Vec<Announcement>,
    pub(super) audit: Vec<AuditLogEntry>,
    pub(super) platform_audit: Vec<AuditLogEntry>,

    pub(super) tenant_id: Option<String>,
    // Raw JSON so keys the client does not model survive a PUT round trip.
    pub(super) settings: serde_json::Value,
    pub(super) units: Vec<Unit>,

    next_id: u64,
}

impl Db {
    pub(super) fn seeded(count: usize) -> Self {
        let created_at = now_ts();
        let mut db = Db {
            businesses: Vec::new(),
            devices: HashMap::new(),
            history: HashMap::new(),
            subscription_requests: Vec::new(),
            support: Vec::new(),
            exports: Vec::new(),
            announcements: Vec::new(),
            audit: Vec::new(),
            platform_audit: Vec::new(),
            tenant_id: None,
            settings: serde_json::json!({
                "approvalDefaults": {"refundThreshold": 50.0},
                "stockPolicy": {"negativeStockAllowed": false, "lowStockThreshold": 5},
                "posPolicy": {"creditEnabled": true, "shiftTrackingEnabled": true},
                "localeSettings": {"language": "en", "currency": "USD", "timezone": "UTC"},
                "notificationDefaults": {"channels": {"email": true, "sms": false}},
                "receiptBranding": {"footer": "Thank you", "showLogo": true}
            }),
            units: vec![
                Unit {
                    id: "unit-1".to_string(),
                    code: "pcs".to_string(),
                    label: "Pieces".to_string(),
                },
                Unit {
                    id: "unit-2".to_string(),
                    code: "kg".to_string(),
                    label: "Kilogram".to_string(),
                },
            ],
            next_id: 100,
        };

        for i in 1..=count {
            let id = format!("biz-{:03}", i);
            let status = match i % 7 {
                3 => BusinessStatus::Grace,
                5 => BusinessStatus::Suspended,
                6 => BusinessStatus::Expired,
                _ => BusinessStatus::Active,
            };
            let tier = SubscriptionTier::ALL[i % SubscriptionTier::ALL.len()];
            let under_review = i % 4 == 0;
            let device_count = if i == 1 { 12 } else { i % 4 };

            db.businesses.push(Business {
                id: id.clone(),
                name: format!("Business {:03}", i),
                status,
                under_review,
                review_reason: under_review.then(|| "chargeback spike".to_string()),
                review_severity: under_review.then_some(ReviewSeverity::Medium),
                subscription: (i % 10 != 0).then(|| SubscriptionSnapshot {
                    tier,
                    status: if status == BusinessStatus::Grace {
                        SubscriptionStatus::Grace
                    } else {
                        SubscriptionStatus::Active
                    },
                    trial_ends_at: None,
                    grace_ends_at: None,
                    expires_at: Some(ts_in_hours(24 * 30)),
                    limits: None,
                }),
                settings: Some(SettingsSnapshot::default()),
                counts: Some(UsageCounts {
                    users: Some(3 + i as u64),
                    branches: Some(1 + (i as u64 % 3)),
                    products: Some(40 * i as u64),
                    devices: Some(device_count as u64),
                }),
                created_at: Some(created_at.clone()),
                last_activity_at: Some(created_at.clone()),
            });
            db.devices.insert(
                id.clone(),
                (1..=device_count)
                    .map(|d| Device {
                        id: format!("{}-dev-{}", id, d),
                        name: Some(format!("Register {}", d)),
                        status: Some("ONLINE".to_string()),
                        last_seen_at: Some(created_at.clone()),
                    })
                    .collect(),
            );
            db.audit.push(AuditLogEntry {
                id: format!("audit-{}", i),
                business_id: Some(id.clone()),
                actor: Some(format!("owner@{}.example", id)),
                action: "auth.login".to_string(),
                resource: Some("session".to_string()),
                outcome: Some("SUCCESS".to_string()),
                reason: None,
                created_at: created_at.clone(),
            });
        }

        db.tenant_id = db.businesses.first().map(|b| b.id.clone());

        for (n, b) in db.businesses.iter().take(3).enumerate() {
            db.subscription_requests.push(SubscriptionRequest {
                id: format!("req-{}", n + 1),
                business_id: b.id.clone(),
                business_name: Some(b.name.clone()),
                requested_tier: SubscriptionTier::Enterprise,
                status: RequestStatus::Pending,
                reason: Some("growing team".to_string()),
                created_at: created_at.clone(),
            });
        }
        if let Some(b) = db.businesses.get(1) {
            db.exports.push(ExportJob {
                id: "export-1".to_string(),
                business_id: b.id.clone(),
                kind: Some("FULL".to_string()),
                status: ExportJobStatus::Completed,
                attempts: 1,
                last_error: None,
                created_at: created_at.clone(),
                delivered_at: None,
            });
        }
        db.announcements.push(Announcement {
            id: "ann-1".to_string(),
            title: "Scheduled maintenance".to_string(),
            message: "Sync may be delayed on Sunday.".to_string(),
            severity: AnnouncementSeverity::Info,
            starts_at: created_at,
            ends_at: None,
            target_business_ids: Vec::new(),
        });
        db
    }

    pub(super) fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    pub(super) fn business_mut(&mut self, id: &str) -> Result<&mut Business, Response> {
        self.businesses
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("business"))
    }

    pub(super) fn business(&self, id: &str) -> Result<&Business, Response> {
        self.businesses
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("business"))
    }

    /// Appends to the operator audit trail; every platform mutation lands here.
    pub(super) fn record(
        &mut self,
        actor: &str,
        business_id: Option<&str>,
        action: &str,
        reason: Option<&str>,
    ) {
        let id = self.next_id("paudit");
        self.platform_audit.push(AuditLogEntry {
            id,
            business_id: business_id.map(str::to_string),
            actor: Some(actor.to_string()),
            action: action.to_string(),
            resource: business_id.map(|b| format!("business/{}", b)),
            outcome: Some("SUCCESS".to_string()),
            reason: reason.map(str::to_string),
            created_at: now_ts(),
        });
    }

    pub(super) fn recent_actions(&self, business_id: &str) -> Vec<AdminAction> {
        self.platform_audit
            .iter()
            .rev()
            .filter(|e| e.business_id.as_deref() == Some(business_id))
            .take(5)
            .map(|e| AdminAction {
                id: e.id.clone(),
                action: e.action.clone(),
                reason: e.reason.clone(),
                actor: e.actor.clone(),
                created_at: e.created_at.clone(),
            })
            .collect()
    }

    pub(super) fn health(&self, b: &Business) -> HealthScore {
        let mut score: u32 = 100;
        let mut reasons = Vec::new();
        if b.under_review {
            score = score.saturating_sub(30);
            reasons.push("under review".to_string());
        }
        match b.status {
            BusinessStatus::Active => {}
            other => {
                score = score.saturating_sub(40);
                reasons.push(format!("status {}", other.as_str()));
            }
        }
        if b.read_only_enabled() {
            score = score.saturating_sub(10);
            reasons.push("read-only mode".to_string());
        }
        let status = match score {
            80.. => "HEALTHY",
            50..=79 => "AT_RISK",
            _ => "CRITICAL",
        };
        HealthScore {
            score,
            status: Some(status.to_string()),
            reasons,
        }
    }
}

/// Cursor pagination over a snapshot. Cursors are stringified offsets.
pub(super) fn paginate<T: serde::Serialize>(
    items: &[T],
    params: &HashMap<String, String>,
) -> Result<Json<serde_json::Value>, Response> {
    let limit = match params.get("limit") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| bad_request("limit must be a number"))?,
        None => DEFAULT_LIMIT,
    }
    .clamp(1, MAX_LIMIT);
    let start = match params.get("cursor").filter(|c| !c.is_empty()) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| bad_request("invalid cursor"))?,
        None => 0,
    };
    let start = start.min(items.len());
    let end = (start + limit).min(items.len());
    let next = (end < items.len()).then(|| end.to_string());
    Ok(Json(serde_json::json!({
        "items": &items[start..end],
        "nextCursor": next,
    })))
}
