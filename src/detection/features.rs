use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref LINK: Regex = Regex::new(r#"https?://[^\s<>"']+"#).unwrap();
    static ref SUSPICIOUS_WORD: Regex = Regex::new(
        r"(?i)urgent|verify|password|security|update|account|login|confirm|bank|paypal|suspend|limited|warning"
    )
    .unwrap();
    static ref SPECIAL_CHAR: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref SUSPICIOUS_SENDER: Regex = Regex::new(r"(?i)\d{5,}@|support@\w+\.\w+\.\w+").unwrap();
    static ref SHORTENED_LINK: Regex = Regex::new(r"(?i)bit\.ly|goo\.gl|tinyurl|t\.co").unwrap();
}

const ATTACHMENT_MARKER: &str = "Content-Disposition: attachment";

/// Signals extracted from the text of one email
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct EmailFeatures {
    /// Length in characters
    pub length: usize,
    pub num_links: usize,
    pub num_attachments: usize,
    pub suspicious_words: usize,
    pub has_html: bool,
    pub special_chars: usize,
    pub uppercase_ratio: f64,
    pub suspicious_sender: bool,
    pub shortened_links: usize,
}

pub fn extract_features(text: &str) -> EmailFeatures {
    let length = text.chars().count();
    let uppercase = text.chars().filter(|c| c.is_uppercase()).count();

    EmailFeatures {
        length,
        num_links: LINK.find_iter(text).count(),
        num_attachments: text.matches(ATTACHMENT_MARKER).count(),
        suspicious_words: SUSPICIOUS_WORD.find_iter(text).count(),
        has_html: text.to_lowercase().contains("<html"),
        special_chars: SPECIAL_CHAR.find_iter(text).count(),
        uppercase_ratio: uppercase as f64 / length.max(1) as f64,
        suspicious_sender: SUSPICIOUS_SENDER.is_match(text),
        shortened_links: SHORTENED_LINK.find_iter(text).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_signals() {
        let f = extract_features("");
        assert_eq!(f.length, 0);
        assert_eq!(f.num_links, 0);
        assert_eq!(f.suspicious_words, 0);
        assert_eq!(f.uppercase_ratio, 0.0);
        assert!(!f.has_html);
        assert!(!f.suspicious_sender);
    }

    #[test]
    fn counts_links_and_shorteners() {
        let f = extract_features("see https://bit.ly/x and http://example.com/a?b=c, or tinyurl");
        assert_eq!(f.num_links, 2);
        assert_eq!(f.shortened_links, 2);
    }

    #[test]
    fn suspicious_words_are_case_insensitive() {
        let f = extract_features("URGENT: Verify your PayPal password");
        assert_eq!(f.suspicious_words, 4);
    }

    #[test]
    fn detects_numeric_and_support_senders() {
        assert!(extract_features("from 1234567@mail.example").suspicious_sender);
        assert!(extract_features("reply to support@secure.bank.example").suspicious_sender);
        assert!(!extract_features("reply to support@example.com").suspicious_sender);
        assert!(!extract_features("call 1234 @ noon").suspicious_sender);
    }

    #[test]
    fn html_attachments_and_uppercase() {
        let text = "<HTML>ABCD</html>\nContent-Disposition: attachment; filename=a.pdf";
        let f = extract_features(text);
        assert!(f.has_html);
        assert_eq!(f.num_attachments, 1);
        assert!(f.uppercase_ratio > 0.1);
        assert!(f.special_chars > 0);
    }
}
