pub const SCHEMA: &str = r#"
-- One row per external identity
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    provider TEXT NOT NULL,
    provider_id TEXT NOT NULL,
    name TEXT,
    email TEXT,
    avatar_url TEXT,
    created_at TEXT DEFAULT (datetime('now')),

    UNIQUE(provider, provider_id)
);

-- Directed friendship edges; an accepted friendship is stored in both directions.
-- No foreign keys: the graph accepts ids the API layer has already vetted.
CREATE TABLE IF NOT EXISTS friendships (
    user_id INTEGER NOT NULL,
    friend_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,  -- RFC 3339, written by the store
    PRIMARY KEY (user_id, friend_id)
);

-- Append-only share log
CREATE TABLE IF NOT EXISTS shared_urls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sender_id INTEGER NOT NULL,
    receiver_id INTEGER NOT NULL,
    url TEXT NOT NULL,
    created_at TEXT NOT NULL  -- fixed-width RFC 3339, sorts lexically
);

CREATE INDEX IF NOT EXISTS idx_shared_urls_sender ON shared_urls(sender_id);
CREATE INDEX IF NOT EXISTS idx_shared_urls_receiver ON shared_urls(receiver_id);
"#;
