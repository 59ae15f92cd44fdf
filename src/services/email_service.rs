use crate::{
    detection::{extract_features, preprocess_email, Classifier, EmailFeatures, Verdict},
    models::{AlertRecord, EmailRecord, EmailSummary},
    services::store::PhishStore,
    utils::AppError,
};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EMAIL_LIMIT: i64 = 20;
pub const MAX_EMAIL_LIMIT: i64 = 100;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeRequest {
    pub subject: Option<String>,
    pub body: Option<String>,
    /// Full RFC 822 message; takes precedence over `subject`/`body`
    pub raw: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AnalyzeResponse {
    pub subject: String,
    pub classifier: String,
    pub verdict: Verdict,
    pub features: EmailFeatures,
}

/// Ids written by [`record_verdict`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEmail {
    pub email_id: String,
    pub alert_id: Option<String>,
}

pub async fn recent_emails(
    store: &dyn PhishStore,
    user_id: &str,
    limit: Option<i64>,
) -> Result<Vec<EmailSummary>, AppError> {
    let limit = limit.unwrap_or(DEFAULT_EMAIL_LIMIT).clamp(1, MAX_EMAIL_LIMIT);
    let records = store.recent_emails(user_id, limit).await?;
    Ok(records.into_iter().map(EmailSummary::from).collect())
}

/// Scores one email without storing anything
pub fn analyze(classifier: &dyn Classifier, request: &AnalyzeRequest) -> Result<AnalyzeResponse, AppError> {
    let (subject, body) = match &request.raw {
        Some(raw) => {
            let parsed = preprocess_email(raw);
            (parsed.subject, parsed.body)
        }
        None => (
            request.subject.clone().unwrap_or_default(),
            request.body.clone().unwrap_or_default(),
        ),
    };

    if subject.trim().is_empty() && body.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Provide a subject, a body or a raw message".to_string(),
        ));
    }

    let verdict = classifier.predict(&subject, &body);
    let features = extract_features(&format!("{} {}", subject, body));

    Ok(AnalyzeResponse {
        subject,
        classifier: classifier.name().to_string(),
        verdict,
        features,
    })
}

/// Stores a classified email and, when it is phishing above `alert_threshold`,
/// an alert pointing at it.
pub async fn record_verdict(
    store: &dyn PhishStore,
    user_id: &str,
    subject: &str,
    body: &str,
    verdict: Verdict,
    is_demo: bool,
    alert_threshold: f64,
) -> Result<RecordedEmail, AppError> {
    let record = EmailRecord::new(user_id, subject, body, verdict.is_phishing, verdict.probability, is_demo);
    let email_id = store.insert_email(&record).await?;

    let alert_id = if verdict.is_phishing && verdict.probability > alert_threshold {
        let alert = AlertRecord {
            id: None,
            user_id: user_id.to_string(),
            email_id: email_id.clone(),
            subject: subject.to_string(),
            probability: verdict.probability,
            triggered_at: BsonDateTime::now(),
            is_read: false,
            is_demo,
        };
        let id = store.insert_alert(&alert).await?;
        log::info!(
            "🚨 Phishing alert created: {} (Probability: {:.2})",
            subject,
            verdict.probability
        );
        Some(id)
    } else {
        None
    };

    Ok(RecordedEmail { email_id, alert_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::RuleBasedClassifier;
    use crate::services::store::memory::InMemoryStore;

    const USER: &str = "demo@phishguard.ai";

    #[tokio::test]
    async fn phishing_above_threshold_raises_alert() {
        let store = InMemoryStore::default();
        let verdict = Verdict { is_phishing: true, probability: 0.95 };

        let recorded = record_verdict(&store, USER, "Verify now", "body", verdict, true, 0.7)
            .await
            .unwrap();

        let alert_id = recorded.alert_id.expect("alert expected");
        let alerts = store.alerts.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].email_id, recorded.email_id);
        assert_eq!(alerts[0].id.unwrap().to_hex(), alert_id);
        assert!(!alerts[0].is_read);
    }

    #[tokio::test]
    async fn phishing_at_threshold_is_stored_without_alert() {
        let store = InMemoryStore::default();
        let verdict = Verdict { is_phishing: true, probability: 0.7 };

        let recorded = record_verdict(&store, USER, "Hmm", "body", verdict, false, 0.7)
            .await
            .unwrap();

        assert!(recorded.alert_id.is_none());
        assert_eq!(store.emails.lock().unwrap().len(), 1);
        assert!(store.alerts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_emails_are_scoped_and_limited() {
        let store = InMemoryStore::default();
        let verdict = Verdict { is_phishing: false, probability: 0.1 };
        for i in 0..3 {
            record_verdict(&store, USER, &format!("mail {}", i), "hi", verdict, true, 0.7)
                .await
                .unwrap();
        }
        record_verdict(&store, "other@example.com", "not mine", "hi", verdict, true, 0.7)
            .await
            .unwrap();

        let emails = recent_emails(&store, USER, Some(2)).await.unwrap();
        assert_eq!(emails.len(), 2);
        assert!(emails.iter().all(|e| e.subject.starts_with("mail")));

        let clamped = recent_emails(&store, USER, Some(0)).await.unwrap();
        assert_eq!(clamped.len(), 1);
    }

    #[test]
    fn analyze_prefers_raw_message() {
        let request = AnalyzeRequest {
            subject: Some("ignored".to_string()),
            body: None,
            raw: Some("Subject: Urgent: verify your account\n\nLogin at http://bit.ly/x".to_string()),
        };
        let response = analyze(&RuleBasedClassifier, &request).unwrap();
        assert_eq!(response.subject, "Urgent: verify your account");
        assert_eq!(response.classifier, "rule-based");
        assert!(response.verdict.is_phishing);
        assert_eq!(response.features.num_links, 1);
    }

    #[test]
    fn analyze_scores_raw_text_without_headers() {
        let request = AnalyzeRequest {
            subject: None,
            body: None,
            raw: Some("Urgent verify your account now http://bit.ly/x".to_string()),
        };
        let response = analyze(&RuleBasedClassifier, &request).unwrap();
        assert_eq!(response.subject, "");
        assert_eq!(response.features.num_links, 1);
    }

    #[test]
    fn analyze_rejects_empty_input() {
        let request = AnalyzeRequest { subject: None, body: Some("  ".to_string()), raw: None };
        assert!(matches!(
            analyze(&RuleBasedClassifier, &request),
            Err(AppError::InvalidRequest(_))
        ));
    }
}
