use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{notice::NoticeTimings, typing_state::DEFAULT_TYPING_DEBOUNCE_MS};

const REDACTED: &str = "[REDACTED]";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub base_url: String,
    /// Sent as the `Cookie` header, e.g. `session=...`.
    pub session_cookie: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_owned(),
            session_cookie: None,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("base_url", &self.base_url)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| REDACTED),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    pub typing_debounce_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_debounce_ms: DEFAULT_TYPING_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationConfig {
    pub toast_visible_ms: u64,
    pub toast_fade_ms: u64,
    pub alert_visible_ms: u64,
    pub alert_fade_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_visible_ms: NoticeTimings::TOAST.visible_ms,
            toast_fade_ms: NoticeTimings::TOAST.fade_ms,
            alert_visible_ms: NoticeTimings::ALERT.visible_ms,
            alert_fade_ms: NoticeTimings::ALERT.fade_ms,
        }
    }
}

impl NotificationConfig {
    pub fn toast_timings(&self) -> NoticeTimings {
        NoticeTimings {
            visible_ms: self.toast_visible_ms,
            fade_ms: self.toast_fade_ms,
        }
    }

    pub fn alert_timings(&self) -> NoticeTimings {
        NoticeTimings {
            visible_ms: self.alert_visible_ms,
            fade_ms: self.alert_fade_ms,
        }
    }
}
