use chrono::{
    DateTime,
    Utc,
};
use uuid::Uuid;

/// Identity handed over by the login screen. Credentials are never checked
/// or kept; the session only lives until logout.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user: String,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Returns `None` for a blank user name.
    pub fn start(user: &str) -> Option<Self> {
        let user = user.trim();
        if user.is_empty() {
            return None;
        }

        Some(Self { id: Uuid::new_v4(), user: user.to_string(), started_at: Utc::now() })
    }
}
