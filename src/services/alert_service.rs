use crate::{
    models::AlertSummary,
    services::store::PhishStore,
    utils::AppError,
};
use mongodb::bson::oid::ObjectId;

pub async fn list_alerts(
    store: &dyn PhishStore,
    user_id: &str,
    unread_only: bool,
) -> Result<Vec<AlertSummary>, AppError> {
    let records = store.alerts(user_id, unread_only).await?;
    Ok(records.into_iter().map(AlertSummary::from).collect())
}

pub async fn mark_read(store: &dyn PhishStore, user_id: &str, alert_id: &str) -> Result<(), AppError> {
    let oid = ObjectId::parse_str(alert_id)?;
    if store.mark_alert_read(user_id, &oid).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Alert {}", alert_id)))
    }
}

pub async fn dismiss(store: &dyn PhishStore, user_id: &str, alert_id: &str) -> Result<(), AppError> {
    let oid = ObjectId::parse_str(alert_id)?;
    if store.delete_alert(user_id, &oid).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Alert {}", alert_id)))
    }
}
