use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            username    TEXT PRIMARY KEY COLLATE NOCASE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS activities (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            owner_username  TEXT NOT NULL COLLATE NOCASE REFERENCES users(username),
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_activities_owner
            ON activities(owner_username);

        -- Logs carry no owner column: their effective owner is always the
        -- parent activity's owner. Listing order is rowid (insertion order).
        CREATE TABLE IF NOT EXISTS logs (
            id          TEXT PRIMARY KEY,
            activity_id TEXT NOT NULL REFERENCES activities(id),
            summary     TEXT,
            date        INTEGER NOT NULL,
            duration    INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_logs_activity
            ON logs(activity_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
