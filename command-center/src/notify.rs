use std::time::{Duration, Instant};

/// How long a notification stays in the status bar.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// A short user-facing message produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }
}

/// The single notification slot shown in the status bar.
#[derive(Debug, Default)]
pub struct NoticeBar {
    current: Option<(Notification, Instant)>,
}

impl NoticeBar {
    pub fn push(&mut self, notification: Notification, now: Instant) {
        match notification.level {
            Level::Error => log::warn!("{}", notification.message),
            _ => log::info!("{}", notification.message),
        }
        self.current = Some((notification, now));
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(notification, _)| notification)
    }

    /// Drops the current notification once it has been shown long enough.
    pub fn expire(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.current {
            if now.duration_since(*shown_at) >= NOTIFICATION_TTL {
                self.current = None;
            }
        }
    }
}
