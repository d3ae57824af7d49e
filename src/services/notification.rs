// src/services/notification.rs

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

// Avisos mais antigos saem do histórico
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Aviso transitório exibido após uma operação.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Superfície de notificações de uma tela: o aviso visível e o histórico.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    history: VecDeque<Toast>,
    current: Option<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.raise(Severity::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.raise(Severity::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("{}", message);
        self.raise(Severity::Info, message);
    }

    fn raise(&mut self, severity: Severity, message: String) {
        let toast = Toast {
            severity,
            message,
            raised_at: Utc::now(),
        };
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(toast.clone());
        self.current = Some(toast);
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &VecDeque<Toast> {
        &self.history
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.history.iter().filter(|t| t.severity == severity).count()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_toast_visible_and_counts_history() {
        let mut notifier = Notifier::new();
        notifier.error("Netzwerkfehler");
        notifier.success("Gespeichert");

        assert_eq!(notifier.current().map(|t| t.severity), Some(Severity::Success));
        assert_eq!(notifier.count(Severity::Error), 1);
        assert_eq!(notifier.count(Severity::Success), 1);

        notifier.dismiss();
        assert!(notifier.current().is_none());
        assert_eq!(notifier.history().len(), 2);
    }

    #[test]
    fn history_is_capped() {
        let mut notifier = Notifier::new();
        for i in 0..HISTORY_LIMIT + 5 {
            notifier.info(format!("Hinweis {i}"));
        }

        assert_eq!(notifier.history().len(), HISTORY_LIMIT);
        assert_eq!(notifier.history().front().map(|t| t.message.as_str()), Some("Hinweis 5"));
        assert_eq!(
            notifier.current().map(|t| t.message.clone()),
            Some(format!("Hinweis {}", HISTORY_LIMIT + 4))
        );
    }
}
