use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Document in the `alerts` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    /// Hex id of the email that triggered the alert
    pub email_id: String,
    pub subject: String,
    pub probability: f64,
    pub triggered_at: BsonDateTime,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_demo: bool,
}

/// Alert as shown in the banner and on the alerts page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AlertSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject: String,
    pub probability: f64,
    pub triggered_at: String,
    pub is_read: bool,
}

impl From<AlertRecord> for AlertSummary {
    fn from(record: AlertRecord) -> Self {
        AlertSummary {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            subject: record.subject,
            probability: record.probability,
            triggered_at: super::format_timestamp(record.triggered_at),
            is_read: record.is_read,
        }
    }
}
