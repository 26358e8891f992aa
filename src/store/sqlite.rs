use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

const USER_COLUMNS: &str = "id, provider, provider_id, name, email, avatar_url";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }

    fn get_user_by_provider(&self, provider: &str, provider_id: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE provider = ?1 AND provider_id = ?2"),
            params![provider, provider_id],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        provider: row.get(1)?,
        provider_id: row.get(2)?,
        name: row.get(3)?,
        email: row.get(4)?,
        avatar_url: row.get(5)?,
    })
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

/// Fixed width so that `ORDER BY created_at` matches chronological order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn require_id(id: UserId, field: &str) -> Result<()> {
    if id <= 0 {
        return Err(Error::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Identity operations

    fn resolve_or_create_user(&self, new_user: &NewUser) -> Result<User> {
        if let Some(user) = self.get_user_by_provider(&new_user.provider, &new_user.provider_id)? {
            return Ok(user);
        }

        let result = self.conn().execute(
            "INSERT INTO users (provider, provider_id, name, email, avatar_url)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new_user.provider,
                new_user.provider_id,
                new_user.name,
                new_user.email,
                new_user.avatar_url,
            ],
        );

        match result {
            Ok(_) => {}
            // Lost a race against a concurrent first login; the winner's row is returned below.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                tracing::debug!(
                    "User {}:{} created concurrently",
                    new_user.provider,
                    new_user.provider_id
                );
            }
            Err(e) => return Err(Error::from(e)),
        }

        self.get_user_by_provider(&new_user.provider, &new_user.provider_id)?
            .ok_or(Error::NotFound)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    // Friendship operations

    fn add_friendship(&self, user_id: UserId, friend_id: UserId) -> Result<bool> {
        require_id(user_id, "user_id")?;
        require_id(friend_id, "friend_id")?;

        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM friendships WHERE user_id = ?1 AND friend_id = ?2)",
            params![user_id, friend_id],
            |row| row.get(0),
        )?;
        if exists {
            return Ok(false);
        }

        let created_at = format_datetime(&Utc::now());
        tx.execute(
            "INSERT INTO friendships (user_id, friend_id, created_at) VALUES (?1, ?2, ?3)",
            params![user_id, friend_id, created_at],
        )?;
        // OR IGNORE: a self-edge is a single row
        tx.execute(
            "INSERT OR IGNORE INTO friendships (user_id, friend_id, created_at) VALUES (?1, ?2, ?3)",
            params![friend_id, user_id, created_at],
        )?;

        tx.commit()?;
        Ok(true)
    }

    fn are_friends(&self, user_id: UserId, friend_id: UserId) -> Result<bool> {
        let conn = self.conn();
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM friendships WHERE user_id = ?1 AND friend_id = ?2)",
            params![user_id, friend_id],
            |row| row.get(0),
        )
        .map_err(Error::from)
    }

    fn list_friends(&self, user_id: UserId) -> Result<Vec<User>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT u.id, u.provider, u.provider_id, u.name, u.email, u.avatar_url
             FROM friendships f
             JOIN users u ON u.id = f.friend_id
             WHERE f.user_id = ?1
             ORDER BY f.rowid",
        )?;

        let rows = stmt.query_map(params![user_id], user_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Share operations

    fn record_share(&self, sender_id: UserId, receiver_id: UserId, url: &str) -> Result<Share> {
        self.record_shares(sender_id, &[receiver_id], url)?
            .pop()
            .ok_or(Error::NotFound)
    }

    fn record_shares(
        &self,
        sender_id: UserId,
        receiver_ids: &[UserId],
        url: &str,
    ) -> Result<Vec<Share>> {
        if receiver_ids.is_empty() {
            return Err(Error::BadRequest(
                "at least one receiver is required".to_string(),
            ));
        }
        require_id(sender_id, "sender_id")?;
        if url.is_empty() {
            return Err(Error::BadRequest("url is required".to_string()));
        }

        let mut conn = self.conn();

        // Under the lock: id order agrees with time order. One timestamp per batch.
        let timestamp = Utc::now().trunc_subsecs(6);
        let created_at = format_datetime(&timestamp);

        let tx = conn.transaction()?;
        let mut shares = Vec::with_capacity(receiver_ids.len());

        for &receiver_id in receiver_ids {
            require_id(receiver_id, "receiver_id")?;

            tx.execute(
                "INSERT INTO shared_urls (sender_id, receiver_id, url, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![sender_id, receiver_id, url, created_at],
            )?;

            shares.push(Share {
                id: tx.last_insert_rowid(),
                url: url.to_string(),
                timestamp,
                sender_id,
                receiver_id,
            });
        }

        tx.commit()?;
        Ok(shares)
    }

    fn history(&self, user_id: UserId) -> Result<Vec<ShareEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT s.id, s.url, s.created_at, s.sender_id, s.receiver_id,
                    CASE WHEN su.id IS NULL THEN ?2 ELSE su.name END,
                    CASE WHEN ru.id IS NULL THEN ?2 ELSE ru.name END
             FROM shared_urls s
             LEFT JOIN users su ON su.id = s.sender_id
             LEFT JOIN users ru ON ru.id = s.receiver_id
             WHERE s.sender_id = ?1 OR s.receiver_id = ?1
             ORDER BY s.created_at DESC, s.id DESC",
        )?;

        let rows = stmt.query_map(params![user_id, UNKNOWN_USER_NAME], |row| {
            Ok(ShareEntry {
                share: Share {
                    id: row.get(0)?,
                    url: row.get(1)?,
                    timestamp: parse_datetime(&row.get::<_, String>(2)?),
                    sender_id: row.get(3)?,
                    receiver_id: row.get(4)?,
                },
                sender_name: row.get(5)?,
                receiver_name: row.get(6)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}
