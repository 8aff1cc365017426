use chrono::{DateTime, Utc};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Transient user-facing messages. Delivery is best effort and the caller
/// never learns whether it succeeded.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

pub mod messages {
    pub const SERVER_UNREACHABLE: &str = "Could not read the directory server";
    pub const EMPTY_NAME: &str = "Enter a name and try again";

    pub fn removed(name: &str) -> String {
        format!("{} removed", name)
    }

    pub fn save_failed(reason: &str) -> String {
        format!("Could not save the directory: {}", reason)
    }
}

/// Prints notices to stderr, toast style.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => eprintln!("[info] {}", message),
            Severity::Error => eprintln!("[error] {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub at: DateTime<Utc>,
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.notices()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                message: message.to_string(),
                severity,
                at: Utc::now(),
            });
        }
    }
}
