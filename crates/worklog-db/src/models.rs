/// Database row types — these map directly to SQLite rows.
/// Deliberately not `Serialize`: the password hash must never leave this
/// layer except through `UserRow::to_public`.

use worklog_types::models::PublicUser;

pub struct UserRow {
    pub username: String,
    pub password_hash: String,
}

impl UserRow {
    /// The projection applied at every boundary that returns a user.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            username: self.username.clone(),
        }
    }
}
