use super::features::{extract_features, EmailFeatures};
use serde::Serialize;

/// Probability above which an email is labelled phishing
pub const PHISHING_THRESHOLD: f64 = 0.5;
/// The rule-based score never claims certainty
pub const MAX_PROBABILITY: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Verdict {
    pub is_phishing: bool,
    pub probability: f64,
}

/// Anything able to score an email. A trained model can replace the rules
/// without touching the monitor or the API.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn predict(&self, subject: &str, body: &str) -> Verdict;
}

/// Weighted sum of text features, capped at [`MAX_PROBABILITY`]
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn score(features: &EmailFeatures) -> f64 {
        let shouting = if features.uppercase_ratio > 0.3 { 1.0 } else { 0.0 };
        let sender = if features.suspicious_sender { 1.0 } else { 0.0 };

        let raw = features.suspicious_words as f64 * 0.15
            + features.num_links as f64 * 0.2
            + features.shortened_links as f64 * 0.3
            + sender * 0.2
            + shouting * 0.15;

        raw.min(MAX_PROBABILITY)
    }
}

impl Classifier for RuleBasedClassifier {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn predict(&self, subject: &str, body: &str) -> Verdict {
        let text = format!("{} {}", subject, body);
        let probability = Self::score(&extract_features(&text));

        Verdict {
            is_phishing: probability > PHISHING_THRESHOLD,
            probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_verification_scam_is_capped() {
        let verdict = RuleBasedClassifier.predict(
            "Urgent: Verify Your Bank Account",
            "Please verify your bank account immediately: http://fake-bank-security.com/verify",
        );
        assert!(verdict.is_phishing);
        assert_eq!(verdict.probability, MAX_PROBABILITY);
    }

    #[test]
    fn meeting_invite_is_legitimate() {
        let verdict = RuleBasedClassifier.predict(
            "Meeting Scheduled for Tomorrow",
            "Hi team, we have a meeting scheduled for tomorrow at 10 AM in the main conference room. Please bring your project updates.",
        );
        assert!(!verdict.is_phishing);
        assert!((verdict.probability - 0.15).abs() < 1e-9);
    }

    #[test]
    fn threshold_is_strict() {
        // two links + one shortener = 0.7, one link alone = 0.2
        let verdict = RuleBasedClassifier.predict("hello", "http://a.example https://bit.ly/b");
        assert!(verdict.is_phishing);
        assert!((verdict.probability - 0.7).abs() < 1e-9);

        let verdict = RuleBasedClassifier.predict("hello", "http://a.example");
        assert!(!verdict.is_phishing);
    }

    #[test]
    fn shouting_adds_weight() {
        let calm = RuleBasedClassifier.predict("hello there", "see you soon");
        let loud = RuleBasedClassifier.predict("HELLO THERE", "SEE YOU SOON");
        assert_eq!(calm.probability, 0.0);
        assert!((loud.probability - 0.15).abs() < 1e-9);
    }
}
