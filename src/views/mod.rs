//! View controllers
//!
//! One controller per page, owning its mirror store, filter controls, form
//! state and workflow state. Controllers call the API facade, reconcile
//! local state only after confirmed replies, and hand the result to the
//! pure render functions. Toast presentation is a collaborator boundary
//! behind the [`Notifier`] trait.

pub mod books;
pub mod form;
pub mod loans;
pub mod members;

use std::sync::{Arc, Mutex};

/// Notification severity, mirroring the toast levels of the UI shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

/// Transient-notification collaborator boundary
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Notifier that forwards to the tracing subscriber, used by the binary
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success | Severity::Info => tracing::info!("[{}] {}", severity.as_str(), message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Danger => tracing::error!("{}", message),
        }
    }
}

/// Recording notifier for tests and embedders that render toasts themselves
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl MemoryNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(Severity, String)> {
        self.messages.lock().unwrap().last().cloned()
    }

    pub fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages.lock().unwrap().push((severity, message.to_string()));
    }
}

/// Lifecycle of a page's list data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed,
}
