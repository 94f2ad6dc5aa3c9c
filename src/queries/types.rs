use serde::{Deserialize, Serialize};

/// Month window for a client's session history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HistoryFilter {
    ThisMonth,
    LastMonth,
    #[default]
    All,
}

/// Headline numbers on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_clients: usize,
    pub sessions_today: usize,
    /// Placeholder: active clients with no credit left times a flat amount.
    pub pending_payments: u64,
}

/// Headline numbers on the client portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientOverview {
    pub client_id: i64,
    pub name: String,
    pub sessions_remaining: u32,
    pub upcoming_count: usize,
    pub completed_count: usize,
}
