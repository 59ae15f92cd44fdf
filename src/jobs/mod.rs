pub mod email_monitor;

pub use email_monitor::{EmailMonitor, MonitorStatus, StartOutcome};
