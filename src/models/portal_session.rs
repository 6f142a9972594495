use chrono::{DateTime, Utc};
use serde::Serialize;

/// A validated client-portal session. Only the token hash is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PortalSession {
    pub id: i64,
    pub client_id: i64,
    pub aircraft_id: i64,
    pub client_name: String,
    pub registration: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PortalSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
