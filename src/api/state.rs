//! Shared state handed to every handler through `web::Data`.

use crate::{
    config::AppConfig,
    detection::{Classifier, RuleBasedClassifier},
    jobs::EmailMonitor,
    services::PhishStore,
};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn PhishStore>,
    pub classifier: Arc<dyn Classifier>,
    /// Demo inbox monitor; one per process
    pub monitor: EmailMonitor,
    /// For uptime in `/health`
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn PhishStore>) -> Self {
        let classifier: Arc<dyn Classifier> = Arc::new(RuleBasedClassifier);
        let monitor = EmailMonitor::new(Arc::clone(&store), Arc::clone(&classifier), config.monitor.clone());

        Self {
            config: Arc::new(config),
            store,
            classifier,
            monitor,
            start_time: Instant::now(),
        }
    }
}
