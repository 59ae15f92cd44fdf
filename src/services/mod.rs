pub mod alert_service;
pub mod auth_service;
pub mod email_service;
pub mod stats_service;
pub mod store;

pub use store::{MongoStore, PhishStore, TimeWindow};
