mod business;
mod config;
mod platform;
mod settings;
mod subscription;

pub use self::business::{
    AdminAction, Business, BusinessStatus, BusinessWorkspace, Device, HealthScore,
    RateLimitOverride, ReviewSeverity, SettingsSnapshot, UsageCounts,
};
pub use self::config::{ConsoleConfig, ConsoleState, DEFAULT_PAGE_LIMIT};
pub use self::platform::{
    Announcement, AnnouncementSeverity, AuditLogEntry, ExportJob, ExportJobStatus,
    PlatformMetrics, SupportAccessRequest, SupportAccessStatus,
};
pub use self::settings::{
    ApprovalDefaults, BusinessSettings, LocaleSettings, PosPolicy, StockPolicy, TenantBusiness,
    Unit,
};
pub use self::subscription::{
    RequestStatus, SubscriptionHistoryEntry, SubscriptionLimits, SubscriptionRequest,
    SubscriptionSnapshot, SubscriptionStatus, SubscriptionTier,
};
