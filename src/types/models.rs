use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Internal user id, assigned by the store on first authentication.
pub type UserId = i64;

/// Name reported in history for a sender or receiver that no longer resolves.
pub const UNKNOWN_USER_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub provider: String,
    pub provider_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// Identity supplied by an external provider on login.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub provider: String,
    pub provider_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// One URL sent from one sender to one receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub id: i64,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub sender_id: UserId,
    pub receiver_id: UserId,
}

/// A share as it appears in a user's history, with both parties' names
/// resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntry {
    #[serde(flatten)]
    pub share: Share,
    pub sender_name: Option<String>,
    pub receiver_name: Option<String>,
}
