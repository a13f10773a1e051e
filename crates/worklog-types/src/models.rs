use serde::Serialize;

/// Outward-facing projection of a user. This is the only user shape that
/// ever reaches a serializer; the password hash lives in `worklog-db`'s row
/// type, which is not `Serialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub username: String,
}

/// An activity together with its logs, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    pub id: String,
    pub name: String,
    pub logs: Vec<LogView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogView {
    pub id: String,
    pub summary: Option<String>,
    pub date: i64,
    pub duration: i64,
}
