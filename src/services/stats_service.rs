use crate::{
    models::{detection_rate, DashboardStats},
    services::store::{PhishStore, TimeWindow},
    utils::AppError,
};
use chrono::{DateTime, Duration, Utc};
use mongodb::bson::DateTime as BsonDateTime;

/// `[00:00 UTC today, 00:00 UTC tomorrow)`
pub fn today_window(now: DateTime<Utc>) -> TimeWindow {
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now);
    let tomorrow = midnight + Duration::days(1);

    TimeWindow {
        from: BsonDateTime::from_millis(midnight.timestamp_millis()),
        to: BsonDateTime::from_millis(tomorrow.timestamp_millis()),
    }
}

pub async fn dashboard_stats(store: &dyn PhishStore, user_id: &str) -> Result<DashboardStats, AppError> {
    let all = store.email_counts(user_id, None).await?;
    let today = store.email_counts(user_id, Some(today_window(Utc::now()))).await?;

    Ok(DashboardStats {
        total_emails: all.total,
        phishing_emails: all.phishing,
        today_emails: today.total,
        detection_rate: detection_rate(all.phishing, all.total),
    })
}
