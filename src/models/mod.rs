pub mod alert;
pub mod email;
pub mod stats;
pub mod user;

pub use alert::*;
pub use email::*;
pub use stats::*;
pub use user::*;

use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::DateTime as BsonDateTime;

/// RFC 3339 rendering of a stored timestamp, as the dashboard expects it
pub fn format_timestamp(dt: BsonDateTime) -> String {
    DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis())
        .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}
