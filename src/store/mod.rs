mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Identity operations
    fn resolve_or_create_user(&self, user: &NewUser) -> Result<User>;
    fn get_user(&self, id: UserId) -> Result<Option<User>>;

    // Friendship operations (symmetric, two rows per edge)
    /// Returns `false` when the friendship already existed.
    fn add_friendship(&self, user_id: UserId, friend_id: UserId) -> Result<bool>;
    fn are_friends(&self, user_id: UserId, friend_id: UserId) -> Result<bool>;
    fn list_friends(&self, user_id: UserId) -> Result<Vec<User>>;

    // Share operations (append-only)
    fn record_share(&self, sender_id: UserId, receiver_id: UserId, url: &str) -> Result<Share>;
    fn record_shares(
        &self,
        sender_id: UserId,
        receiver_ids: &[UserId],
        url: &str,
    ) -> Result<Vec<Share>>;
    /// Every share sent or received by the user, newest first.
    fn history(&self, user_id: UserId) -> Result<Vec<ShareEntry>>;
}
