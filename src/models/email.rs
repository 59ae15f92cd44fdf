use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Characters kept in `body_preview` before the ellipsis
pub const PREVIEW_CHARS: usize = 200;

/// Document in the `emails` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub subject: String,
    pub body: String,
    pub body_preview: String,
    pub received_at: BsonDateTime,
    pub is_phishing: bool,
    pub probability: f64,
    #[serde(default)]
    pub is_demo: bool,
}

impl EmailRecord {
    pub fn new(
        user_id: &str,
        subject: &str,
        body: &str,
        is_phishing: bool,
        probability: f64,
        is_demo: bool,
    ) -> Self {
        EmailRecord {
            id: None,
            user_id: user_id.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            body_preview: body_preview(body),
            received_at: BsonDateTime::now(),
            is_phishing,
            probability,
            is_demo,
        }
    }
}

/// Email as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EmailSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject: String,
    pub body_preview: String,
    pub received_at: String,
    pub is_phishing: bool,
    pub probability: f64,
}

impl From<EmailRecord> for EmailSummary {
    fn from(record: EmailRecord) -> Self {
        EmailSummary {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            subject: record.subject,
            body_preview: record.body_preview,
            received_at: super::format_timestamp(record.received_at),
            is_phishing: record.is_phishing,
            probability: record.probability,
        }
    }
}

/// Email totals for one user, optionally restricted to a time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailCounts {
    pub total: u64,
    pub phishing: u64,
}

/// First 200 characters of the body, with `...` appended when it was cut
pub fn body_preview(body: &str) -> String {
    if body.chars().count() > PREVIEW_CHARS {
        let cut: String = body.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept_verbatim() {
        let body = "Hi team, we have a meeting scheduled for tomorrow at 10 AM.";
        assert_eq!(body_preview(body), body);
    }

    #[test]
    fn long_body_is_cut_at_200_chars() {
        let body = "a".repeat(250);
        let preview = body_preview(&body);
        assert_eq!(preview.len(), 203);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn exactly_200_chars_is_not_cut() {
        let body = "é".repeat(200);
        assert_eq!(body_preview(&body), body);
    }
}
