use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use worklog_types::models::{ActivityView, LogView};

use crate::models::UserRow;
use crate::{Database, Result, StoreError};

impl Database {
    // -- Users --

    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            match conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                params![username, password_hash],
            ) {
                Ok(_) => Ok(()),
                // The NOCASE primary key makes 'alice' and 'Alice' collide.
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(StoreError::UsernameTaken)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Lookup is case-insensitive, matching the uniqueness collation.
    /// The returned row carries the stored casing.
    pub fn get_user(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .prepare("SELECT username, password FROM users WHERE username = ?1")?
                .query_row([username], |row| {
                    Ok(UserRow {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    // -- Activities --

    pub fn list_activities(&self, username: &str) -> Result<Vec<ActivityView>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name FROM activities
                 WHERE owner_username = ?1
                 ORDER BY rowid",
            )?;
            let heads = stmt
                .query_map([username], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            heads
                .into_iter()
                .map(|(id, name)| {
                    let logs = query_logs(conn, &id)?;
                    Ok(ActivityView { id, name, logs })
                })
                .collect()
        })
    }

    pub fn create_activity(&self, username: &str, name: &str) -> Result<ActivityView> {
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }

        let id = Uuid::new_v4().to_string();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO activities (id, name, owner_username) VALUES (?1, ?2, ?3)",
                params![id, name, username],
            )?;
            Ok(ActivityView {
                id: id.clone(),
                name: name.to_string(),
                logs: Vec::new(),
            })
        })
    }

    /// Ownership is fused into both deletes; zero affected parent rows means
    /// the activity does not exist or belongs to someone else, and the caller
    /// cannot tell which.
    pub fn delete_activity(&self, username: &str, activity_id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM logs WHERE activity_id IN
                   (SELECT id FROM activities WHERE id = ?1 AND owner_username = ?2)",
                params![activity_id, username],
            )?;
            let affected = tx.execute(
                "DELETE FROM activities WHERE id = ?1 AND owner_username = ?2",
                params![activity_id, username],
            )?;
            tx.commit()?;

            if affected == 0 {
                return Err(StoreError::AccessDenied);
            }
            Ok(())
        })
    }

    // -- Logs --

    /// Single conditional insert: the row only materializes if the parent
    /// activity exists and is owned by the requester. Returns the refreshed
    /// activity so the caller renders the merged view in one round trip.
    pub fn create_log(
        &self,
        username: &str,
        activity_id: &str,
        summary: Option<&str>,
        date: i64,
        duration: i64,
    ) -> Result<ActivityView> {
        let log_id = Uuid::new_v4().to_string();
        self.with_conn(|conn| {
            let affected = conn.execute(
                "INSERT INTO logs (id, activity_id, summary, date, duration)
                 SELECT ?1, id, ?3, ?4, ?5 FROM activities
                 WHERE id = ?2 AND owner_username = ?6",
                params![log_id, activity_id, summary, date, duration, username],
            )?;
            if affected == 0 {
                return Err(StoreError::AccessDenied);
            }
            owned_activity(conn, username, activity_id)
        })
    }

    /// Deletes the log only through its parent's ownership; a log id under
    /// someone else's activity (or a stale id) reads as denied.
    pub fn delete_log(&self, username: &str, activity_id: &str, log_id: &str) -> Result<ActivityView> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM logs WHERE id = ?1 AND activity_id IN
                   (SELECT id FROM activities WHERE id = ?2 AND owner_username = ?3)",
                params![log_id, activity_id, username],
            )?;
            if affected == 0 {
                return Err(StoreError::AccessDenied);
            }
            owned_activity(conn, username, activity_id)
        })
    }
}

fn owned_activity(conn: &Connection, username: &str, activity_id: &str) -> Result<ActivityView> {
    let head = conn
        .prepare("SELECT id, name FROM activities WHERE id = ?1 AND owner_username = ?2")?
        .query_row(params![activity_id, username], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .optional()?;

    let (id, name) = head.ok_or(StoreError::AccessDenied)?;
    let logs = query_logs(conn, &id)?;
    Ok(ActivityView { id, name, logs })
}

fn query_logs(conn: &Connection, activity_id: &str) -> Result<Vec<LogView>> {
    let mut stmt = conn.prepare(
        "SELECT id, summary, date, duration FROM logs
         WHERE activity_id = ?1
         ORDER BY rowid",
    )?;
    let rows = stmt
        .query_map([activity_id], |row| {
            Ok(LogView {
                id: row.get(0)?,
                summary: row.get(1)?,
                date: row.get(2)?,
                duration: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
