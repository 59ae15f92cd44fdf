//! Service configuration.
//!
//! Values come from the process environment after `.env` has been loaded.
//! Every setting has a default so the demo runs with no configuration at all.

use std::env;
use std::time::Duration;

pub const DEFAULT_DATABASE: &str = "phishguard";

/// Runtime configuration for the HTTP server, the database and the monitor
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    /// Origin allowed by CORS (the dashboard front-end)
    pub cors_origin: String,
    pub jwt: JwtConfig,
    pub monitor: MonitorConfig,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expires_hours: i64,
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Pause between two passes over the demo mailbox
    pub cycle_interval: Duration,
    /// Pause between two emails inside a pass
    pub email_delay: Duration,
    /// Minimum probability for a phishing verdict to raise an alert
    pub alert_threshold: f64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "dev-secret-key".to_string(),
            issuer: "phishguard".to_string(),
            audience: "phishguard-dashboard".to_string(),
            expires_hours: 24,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cycle_interval: Duration::from_secs(30),
            email_delay: Duration::from_secs(10),
            alert_threshold: 0.7,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            mongodb_uri: "mongodb://localhost:27017/".to_string(),
            mongodb_database: DEFAULT_DATABASE.to_string(),
            cors_origin: "http://localhost:3000".to_string(),
            jwt: JwtConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let monitor = MonitorConfig {
            cycle_interval: env_parse::<u64>("MONITOR_INTERVAL_SECS")
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or(defaults.monitor.cycle_interval),
            email_delay: env_parse::<u64>("MONITOR_EMAIL_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.monitor.email_delay),
            alert_threshold: env_parse::<f64>("ALERT_THRESHOLD")
                .filter(|t| (0.0..=1.0).contains(t))
                .unwrap_or(defaults.monitor.alert_threshold),
        };

        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt.secret),
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer),
            audience: env::var("JWT_AUDIENCE").unwrap_or(defaults.jwt.audience),
            expires_hours: env_parse::<i64>("JWT_EXPIRES_HOURS")
                .filter(|h| *h > 0)
                .unwrap_or(defaults.jwt.expires_hours),
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_parse::<u16>("PORT").unwrap_or(defaults.port),
            mongodb_uri: env::var("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            mongodb_database: env::var("MONGODB_DATABASE").unwrap_or(defaults.mongodb_database),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            jwt,
            monitor,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("⚠️  Ignoring invalid {}={:?}, using default", key, raw);
                None
            }
        },
        Err(_) => None,
    }
}
