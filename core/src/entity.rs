//! Identity and timestamp contract shared by every Flare record.

use chrono::{DateTime, FixedOffset};

/// Implemented by deserialized domain records. Both fields are assigned by
/// the server and never change once issued.
pub trait Entity {
    /// Server-assigned unique identifier.
    fn id(&self) -> &str;

    /// Creation timestamp exactly as the server sent it.
    fn created_at(&self) -> &str;

    /// Creation timestamp parsed as RFC 3339, or `None` when the server
    /// string is malformed.
    fn created(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.created_at()).ok()
    }
}
