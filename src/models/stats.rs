use serde::{Deserialize, Serialize};

/// Headline numbers of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DashboardStats {
    pub total_emails: u64,
    pub phishing_emails: u64,
    pub today_emails: u64,
    /// Percentage of scanned emails flagged as phishing
    pub detection_rate: f64,
}

/// Content of the statistics page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub total_scanned: u64,
    pub phishing_detected: u64,
    pub false_positives: u64,
    pub detection_accuracy: f64,
    /// Seconds
    pub avg_response_time: f64,
    pub top_threats: Vec<ThreatCount>,
    pub daily_stats: Vec<DailyStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ThreatCount {
    #[serde(rename = "type")]
    pub threat_type: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DailyStat {
    pub date: String,
    pub scanned: u64,
    pub threats: u64,
}

/// phishing / total as a percentage; 0 when nothing was scanned
pub fn detection_rate(phishing: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        phishing as f64 / total as f64 * 100.0
    }
}
