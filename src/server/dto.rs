use serde::Deserialize;

use crate::types::UserId;

/// A user id as sent by clients: a JSON number, or a numeric string when the
/// caller forwards HTML form values.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Number(i64),
    Text(String),
}

impl IdParam {
    /// The id, if it names a plausible user (positive integer).
    #[must_use]
    pub fn resolve(&self) -> Option<UserId> {
        let id = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        (id > 0).then_some(id)
    }
}

/// Free text that some providers send as a JSON number (numeric subject ids).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextParam {
    Text(String),
    Number(serde_json::Number),
}

impl TextParam {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthUserRequest {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub provider_id: Option<TextParam>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateFriendshipRequest {
    #[serde(default)]
    pub user_id: Option<IdParam>,
    #[serde(default)]
    pub friend_id: Option<IdParam>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateShareRequest {
    #[serde(default)]
    pub sender_id: Option<IdParam>,
    #[serde(default)]
    pub friend_ids: Option<Vec<IdParam>>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AcceptInviteRequest {
    #[serde(default)]
    pub user_id: Option<IdParam>,
}
