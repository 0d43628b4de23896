use serde::{Deserialize, Serialize};

/// Aggregate renewal counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_subscriptions: u64,
    /// Renewals strictly after today and within the next 30 days.
    pub upcoming_renewals: u64,
    pub renewals_due_today: u64,
    pub expired_subscriptions: u64,
}
