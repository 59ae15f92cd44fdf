// ═══════════════════════════════════════════════════════════════════
// EMAIL MONITOR - Background job that simulates the inbox (demo)
// ═══════════════════════════════════════════════════════════════════
//
// Pattern: background job with a shutdown channel
// - Runs on tokio::spawn in the background
// - Loops with a configurable interval
// - Classifies each demo email, writes it to `emails` and raises `alerts`
// - At most one monitor is active per process
//
// Env configuration:
//   MONITOR_INTERVAL_SECS     : pause between cycles (default: 30s)
//   MONITOR_EMAIL_DELAY_SECS  : pause between emails (default: 10s)
//   ALERT_THRESHOLD           : minimum probability for an alert (default: 0.7)
//

use crate::{
    config::MonitorConfig,
    detection::Classifier,
    services::{email_service, store::PhishStore},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// How long `stop` waits for the task before aborting it
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DemoEmail {
    pub subject: &'static str,
    pub body: &'static str,
    /// Label the demo mailbox was written with
    pub is_phishing: bool,
}

pub const DEMO_EMAILS: [DemoEmail; 4] = [
    DemoEmail {
        subject: "Urgent: Verify Your Bank Account",
        body: "Dear customer, we detected suspicious activity on your account. Please verify your bank account immediately by clicking here: http://fake-bank-security.com/verify",
        is_phishing: true,
    },
    DemoEmail {
        subject: "Meeting Scheduled for Tomorrow",
        body: "Hi team, we have a meeting scheduled for tomorrow at 10 AM in the main conference room. Please bring your project updates.",
        is_phishing: false,
    },
    DemoEmail {
        subject: "Your Account Will Be Suspended",
        body: "IMPORTANT: Your account will be suspended in 24 hours unless you confirm your details. Click here: http://secure-verify-account.com",
        is_phishing: true,
    },
    DemoEmail {
        subject: "Project Update Request",
        body: "Hello, could you please provide an update on the current project status? We need to prepare for the client meeting next week.",
        is_phishing: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MonitorStatus {
    pub running: bool,
    pub mode: String,
    pub user_id: Option<String>,
    pub started_at: Option<String>,
    pub cycles: u64,
    pub emails_processed: u64,
    pub alerts_raised: u64,
    pub errors: u64,
}

#[derive(Default)]
struct Counters {
    cycles: AtomicU64,
    emails_processed: AtomicU64,
    alerts_raised: AtomicU64,
    errors: AtomicU64,
}

impl Counters {
    fn reset(&self) {
        self.cycles.store(0, Ordering::Relaxed);
        self.emails_processed.store(0, Ordering::Relaxed);
        self.alerts_raised.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
    }
}

struct RunningMonitor {
    user_id: String,
    started_at: DateTime<Utc>,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

struct Inner {
    store: Arc<dyn PhishStore>,
    classifier: Arc<dyn Classifier>,
    config: MonitorConfig,
    counters: Counters,
    running: Mutex<Option<RunningMonitor>>,
}

/// Handle to the demo monitor. Cheap to clone; all clones drive the same task.
#[derive(Clone)]
pub struct EmailMonitor {
    inner: Arc<Inner>,
}

impl EmailMonitor {
    pub fn new(store: Arc<dyn PhishStore>, classifier: Arc<dyn Classifier>, config: MonitorConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                classifier,
                config,
                counters: Counters::default(),
                running: Mutex::new(None),
            }),
        }
    }

    /// Starts monitoring on behalf of `user_id`. A second start while a run is
    /// active changes nothing.
    pub async fn start(&self, user_id: &str) -> StartOutcome {
        let mut running = self.inner.running.lock().await;

        if let Some(current) = running.as_ref() {
            if !current.handle.is_finished() {
                log::warn!("⚠️  Monitoring already active for {}", current.user_id);
                return StartOutcome::AlreadyRunning;
            }
        }

        self.inner.counters.reset();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let inner = Arc::clone(&self.inner);
        let owner = user_id.to_string();
        let handle = tokio::spawn(async move {
            run_monitor(inner, owner, shutdown_rx).await;
        });

        *running = Some(RunningMonitor {
            user_id: user_id.to_string(),
            started_at: Utc::now(),
            shutdown,
            handle,
        });

        log::info!(
            "✅ Started email monitoring for user: {} (interval: {}s, delay: {}s)",
            user_id,
            self.inner.config.cycle_interval.as_secs(),
            self.inner.config.email_delay.as_secs()
        );

        StartOutcome::Started
    }

    /// Stops the active run. Returns `false` when nothing was running.
    pub async fn stop(&self) -> bool {
        let current = self.inner.running.lock().await.take();

        let Some(mut current) = current else {
            return false;
        };

        let was_running = !current.handle.is_finished();
        let _ = current.shutdown.send(true);

        if tokio::time::timeout(STOP_TIMEOUT, &mut current.handle).await.is_err() {
            log::warn!("⚠️  Monitor did not stop within {}s, aborting", STOP_TIMEOUT.as_secs());
            current.handle.abort();
        }

        log::info!("⏹️  Email monitoring stopped");
        was_running
    }

    pub async fn status(&self) -> MonitorStatus {
        let running = self.inner.running.lock().await;
        let active = running.as_ref().filter(|r| !r.handle.is_finished());
        let counters = &self.inner.counters;

        MonitorStatus {
            running: active.is_some(),
            mode: "demo".to_string(),
            user_id: active.map(|r| r.user_id.clone()),
            started_at: active.map(|r| r.started_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            cycles: counters.cycles.load(Ordering::Relaxed),
            emails_processed: counters.emails_processed.load(Ordering::Relaxed),
            alerts_raised: counters.alerts_raised.load(Ordering::Relaxed),
            errors: counters.errors.load(Ordering::Relaxed),
        }
    }
}

/// Sleeps for `duration` unless a shutdown arrives first. Returns `true` on shutdown.
async fn pause(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        _ = shutdown.changed() => true,
    }
}

async fn run_monitor(inner: Arc<Inner>, user_id: String, mut shutdown: watch::Receiver<bool>) {
    loop {
        let cycle = inner.counters.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("📬 Email monitor cycle #{} for {}", cycle, user_id);

        for demo in DEMO_EMAILS.iter() {
            if *shutdown.borrow() {
                return;
            }

            process_demo_email(&inner, &user_id, demo).await;

            if pause(inner.config.email_delay, &mut shutdown).await {
                return;
            }
        }

        if pause(inner.config.cycle_interval, &mut shutdown).await {
            return;
        }
    }
}

async fn process_demo_email(inner: &Inner, user_id: &str, demo: &DemoEmail) {
    let verdict = inner.classifier.predict(demo.subject, demo.body);

    if verdict.is_phishing != demo.is_phishing {
        log::debug!(
            "   🔎 '{}' labelled {} but scored {:.2}",
            demo.subject,
            if demo.is_phishing { "phishing" } else { "legitimate" },
            verdict.probability
        );
    }

    match email_service::record_verdict(
        inner.store.as_ref(),
        user_id,
        demo.subject,
        demo.body,
        verdict,
        true,
        inner.config.alert_threshold,
    )
    .await
    {
        Ok(recorded) => {
            inner.counters.emails_processed.fetch_add(1, Ordering::Relaxed);
            if recorded.alert_id.is_some() {
                inner.counters.alerts_raised.fetch_add(1, Ordering::Relaxed);
            }
        }
        Err(e) => {
            inner.counters.errors.fetch_add(1, Ordering::Relaxed);
            log::error!("❌ Error in email monitoring: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::RuleBasedClassifier;
    use crate::services::store::memory::{InMemoryStore, UnavailableStore};

    fn fast_config() -> MonitorConfig {
        MonitorConfig {
            cycle_interval: Duration::from_secs(3600),
            email_delay: Duration::ZERO,
            alert_threshold: 0.7,
        }
    }

    async fn wait_until<F: Fn(&MonitorStatus) -> bool>(monitor: &EmailMonitor, done: F) -> MonitorStatus {
        for _ in 0..200 {
            let status = monitor.status().await;
            if done(&status) {
                return status;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("monitor did not reach the expected state");
    }

    #[tokio::test]
    async fn one_cycle_stores_demo_mailbox_and_alerts() {
        let store = Arc::new(InMemoryStore::default());
        let monitor = EmailMonitor::new(store.clone(), Arc::new(RuleBasedClassifier), fast_config());

        assert_eq!(monitor.start("demo@phishguard.ai").await, StartOutcome::Started);
        let status = wait_until(&monitor, |s| s.emails_processed == 4).await;

        assert!(status.running);
        assert_eq!(status.cycles, 1);
        assert_eq!(status.alerts_raised, 2);
        assert_eq!(store.emails.lock().unwrap().len(), 4);

        let alerts = store.alerts.lock().unwrap();
        let subjects: Vec<&str> = alerts.iter().map(|a| a.subject.as_str()).collect();
        assert_eq!(
            subjects,
            vec!["Urgent: Verify Your Bank Account", "Your Account Will Be Suspended"]
        );
        assert!(alerts.iter().all(|a| a.is_demo && a.user_id == "demo@phishguard.ai"));
        drop(alerts);

        assert!(monitor.stop().await);
    }

    #[tokio::test]
    async fn second_start_is_a_no_op() {
        let store = Arc::new(InMemoryStore::default());
        let monitor = EmailMonitor::new(store, Arc::new(RuleBasedClassifier), fast_config());

        assert_eq!(monitor.start("a@example.com").await, StartOutcome::Started);
        assert_eq!(monitor.start("b@example.com").await, StartOutcome::AlreadyRunning);
        assert_eq!(monitor.status().await.user_id.as_deref(), Some("a@example.com"));

        assert!(monitor.stop().await);
        let status = monitor.status().await;
        assert!(!status.running);
        assert!(status.user_id.is_none());

        assert_eq!(monitor.start("b@example.com").await, StartOutcome::Started);
        monitor.stop().await;
    }

    #[tokio::test]
    async fn stop_without_start_reports_nothing_running() {
        let monitor = EmailMonitor::new(
            Arc::new(InMemoryStore::default()),
            Arc::new(RuleBasedClassifier),
            fast_config(),
        );
        assert!(!monitor.stop().await);
    }

    #[tokio::test]
    async fn store_failures_are_counted_and_the_loop_survives() {
        let monitor = EmailMonitor::new(Arc::new(UnavailableStore), Arc::new(RuleBasedClassifier), fast_config());

        monitor.start("demo@phishguard.ai").await;
        let status = wait_until(&monitor, |s| s.errors == 4).await;

        assert!(status.running);
        assert_eq!(status.emails_processed, 0);
        monitor.stop().await;
    }
}
