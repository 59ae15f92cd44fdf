//! Persistence seam between the services and MongoDB.

use crate::{
    database::{self, MongoDB},
    models::{AlertRecord, EmailCounts, EmailRecord, User},
    utils::AppError,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};

/// Half-open time window `[from, to)` on `received_at`
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub from: BsonDateTime,
    pub to: BsonDateTime,
}

#[async_trait]
pub trait PhishStore: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;

    /// Inserts the user or refreshes `name`, `picture` and `last_login`
    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;

    /// Returns the hex id of the new email
    async fn insert_email(&self, email: &EmailRecord) -> Result<String, AppError>;

    async fn insert_alert(&self, alert: &AlertRecord) -> Result<String, AppError>;

    /// Newest first
    async fn recent_emails(&self, user_id: &str, limit: i64) -> Result<Vec<EmailRecord>, AppError>;

    async fn email_counts(
        &self,
        user_id: &str,
        window: Option<TimeWindow>,
    ) -> Result<EmailCounts, AppError>;

    /// Newest first
    async fn alerts(&self, user_id: &str, unread_only: bool) -> Result<Vec<AlertRecord>, AppError>;

    /// `false` when no alert with that id belongs to the user
    async fn mark_alert_read(&self, user_id: &str, alert_id: &ObjectId) -> Result<bool, AppError>;

    async fn delete_alert(&self, user_id: &str, alert_id: &ObjectId) -> Result<bool, AppError>;
}

/// MongoDB-backed store
#[derive(Clone)]
pub struct MongoStore {
    db: MongoDB,
}

impl MongoStore {
    pub fn new(db: MongoDB) -> Self {
        Self { db }
    }
}

fn inserted_hex(id: mongodb::bson::Bson) -> String {
    id.as_object_id().map(|oid| oid.to_hex()).unwrap_or_else(|| id.to_string())
}

#[async_trait]
impl PhishStore for MongoStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.db.ping().await.map_err(AppError::from)
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let collection = self.db.collection::<User>(database::USERS);
        let now = BsonDateTime::now();

        collection
            .update_one(
                doc! { "email": &user.email },
                doc! {
                    "$set": {
                        "name": &user.name,
                        "picture": user.picture.as_deref(),
                        "last_login": now,
                    },
                    "$setOnInsert": { "created_at": now },
                },
            )
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn insert_email(&self, email: &EmailRecord) -> Result<String, AppError> {
        let result = self
            .db
            .collection::<EmailRecord>(database::EMAILS)
            .insert_one(email)
            .await?;
        Ok(inserted_hex(result.inserted_id))
    }

    async fn insert_alert(&self, alert: &AlertRecord) -> Result<String, AppError> {
        let result = self
            .db
            .collection::<AlertRecord>(database::ALERTS)
            .insert_one(alert)
            .await?;
        Ok(inserted_hex(result.inserted_id))
    }

    async fn recent_emails(&self, user_id: &str, limit: i64) -> Result<Vec<EmailRecord>, AppError> {
        let cursor = self
            .db
            .collection::<EmailRecord>(database::EMAILS)
            .find(doc! { "user_id": user_id })
            .sort(doc! { "received_at": -1 })
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn email_counts(
        &self,
        user_id: &str,
        window: Option<TimeWindow>,
    ) -> Result<EmailCounts, AppError> {
        let collection = self.db.collection::<EmailRecord>(database::EMAILS);

        let mut filter = doc! { "user_id": user_id };
        if let Some(w) = window {
            filter.insert("received_at", doc! { "$gte": w.from, "$lt": w.to });
        }

        let total = collection.count_documents(filter.clone()).await?;
        filter.insert("is_phishing", true);
        let phishing = collection.count_documents(filter).await?;

        Ok(EmailCounts { total, phishing })
    }

    async fn alerts(&self, user_id: &str, unread_only: bool) -> Result<Vec<AlertRecord>, AppError> {
        let mut filter = doc! { "user_id": user_id };
        if unread_only {
            filter.insert("is_read", false);
        }

        let cursor = self
            .db
            .collection::<AlertRecord>(database::ALERTS)
            .find(filter)
            .sort(doc! { "triggered_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn mark_alert_read(&self, user_id: &str, alert_id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .db
            .collection::<AlertRecord>(database::ALERTS)
            .update_one(
                doc! { "_id": *alert_id, "user_id": user_id },
                doc! { "$set": { "is_read": true } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_alert(&self, user_id: &str, alert_id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .db
            .collection::<AlertRecord>(database::ALERTS)
            .delete_one(doc! { "_id": *alert_id, "user_id": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-process stores for unit tests.

    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryStore {
        pub users: Mutex<Vec<User>>,
        pub emails: Mutex<Vec<EmailRecord>>,
        pub alerts: Mutex<Vec<AlertRecord>>,
    }

    #[async_trait]
    impl PhishStore for InMemoryStore {
        async fn ping(&self) -> Result<(), AppError> {
            Ok(())
        }

        async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.email == user.email) {
                Some(existing) => {
                    existing.name = user.name.clone();
                    existing.picture = user.picture.clone();
                    existing.last_login = Some(BsonDateTime::now());
                }
                None => users.push(user.clone()),
            }
            Ok(())
        }

        async fn insert_email(&self, email: &EmailRecord) -> Result<String, AppError> {
            let id = ObjectId::new();
            let mut record = email.clone();
            record.id = Some(id);
            self.emails.lock().unwrap().push(record);
            Ok(id.to_hex())
        }

        async fn insert_alert(&self, alert: &AlertRecord) -> Result<String, AppError> {
            let id = ObjectId::new();
            let mut record = alert.clone();
            record.id = Some(id);
            self.alerts.lock().unwrap().push(record);
            Ok(id.to_hex())
        }

        async fn recent_emails(&self, user_id: &str, limit: i64) -> Result<Vec<EmailRecord>, AppError> {
            let mut emails: Vec<EmailRecord> = self
                .emails
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect();
            emails.sort_by(|a, b| b.received_at.cmp(&a.received_at));
            emails.truncate(limit.max(0) as usize);
            Ok(emails)
        }

        async fn email_counts(
            &self,
            user_id: &str,
            window: Option<TimeWindow>,
        ) -> Result<EmailCounts, AppError> {
            let emails = self.emails.lock().unwrap();
            let matching: Vec<&EmailRecord> = emails
                .iter()
                .filter(|e| e.user_id == user_id)
                .filter(|e| match window {
                    Some(w) => e.received_at >= w.from && e.received_at < w.to,
                    None => true,
                })
                .collect();
            Ok(EmailCounts {
                total: matching.len() as u64,
                phishing: matching.iter().filter(|e| e.is_phishing).count() as u64,
            })
        }

        async fn alerts(&self, user_id: &str, unread_only: bool) -> Result<Vec<AlertRecord>, AppError> {
            let mut alerts: Vec<AlertRecord> = self
                .alerts
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.user_id == user_id && (!unread_only || !a.is_read))
                .cloned()
                .collect();
            alerts.sort_by(|a, b| b.triggered_at.cmp(&a.triggered_at));
            Ok(alerts)
        }

        async fn mark_alert_read(&self, user_id: &str, alert_id: &ObjectId) -> Result<bool, AppError> {
            let mut alerts = self.alerts.lock().unwrap();
            match alerts
                .iter_mut()
                .find(|a| a.id.as_ref() == Some(alert_id) && a.user_id == user_id)
            {
                Some(alert) => {
                    alert.is_read = true;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_alert(&self, user_id: &str, alert_id: &ObjectId) -> Result<bool, AppError> {
            let mut alerts = self.alerts.lock().unwrap();
            let before = alerts.len();
            alerts.retain(|a| !(a.id.as_ref() == Some(alert_id) && a.user_id == user_id));
            Ok(alerts.len() < before)
        }
    }

    /// Every call fails, as when the database is unreachable
    pub struct UnavailableStore;

    fn down<T>() -> Result<T, AppError> {
        Err(AppError::DatabaseError("server selection timeout".to_string()))
    }

    #[async_trait]
    impl PhishStore for UnavailableStore {
        async fn ping(&self) -> Result<(), AppError> {
            down()
        }
        async fn upsert_user(&self, _user: &User) -> Result<(), AppError> {
            down()
        }
        async fn insert_email(&self, _email: &EmailRecord) -> Result<String, AppError> {
            down()
        }
        async fn insert_alert(&self, _alert: &AlertRecord) -> Result<String, AppError> {
            down()
        }
        async fn recent_emails(&self, _user_id: &str, _limit: i64) -> Result<Vec<EmailRecord>, AppError> {
            down()
        }
        async fn email_counts(
            &self,
            _user_id: &str,
            _window: Option<TimeWindow>,
        ) -> Result<EmailCounts, AppError> {
            down()
        }
        async fn alerts(&self, _user_id: &str, _unread_only: bool) -> Result<Vec<AlertRecord>, AppError> {
            down()
        }
        async fn mark_alert_read(&self, _user_id: &str, _alert_id: &ObjectId) -> Result<bool, AppError> {
            down()
        }
        async fn delete_alert(&self, _user_id: &str, _alert_id: &ObjectId) -> Result<bool, AppError> {
            down()
        }
    }
}
