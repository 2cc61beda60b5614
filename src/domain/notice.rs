//! Transient notices: toasts and auto-dismissed alert banners.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Unknown labels fall back to info.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn background_class(self) -> &'static str {
        match self {
            Self::Info => "bg-blue-500",
            Self::Success => "bg-green-500",
            Self::Error => "bg-red-500",
        }
    }
}

impl From<String> for ToastKind {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTimings {
    pub visible_ms: u64,
    pub fade_ms: u64,
}

impl NoticeTimings {
    pub const TOAST: Self = Self {
        visible_ms: 3_000,
        fade_ms: 300,
    };

    pub const ALERT: Self = Self {
        visible_ms: 5_000,
        fade_ms: 300,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Visible { fade_at_ms: i64 },
    Fading { remove_at_ms: i64 },
    Removed,
}

/// Fire-and-forget fade-then-remove schedule for one notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeLifecycle {
    phase: NoticePhase,
    fade_ms: i64,
}

impl NoticeLifecycle {
    pub fn start(now_ms: i64, timings: NoticeTimings) -> Self {
        let visible = i64::try_from(timings.visible_ms).unwrap_or(i64::MAX);

        Self {
            phase: NoticePhase::Visible {
                fade_at_ms: now_ms.saturating_add(visible),
            },
            fade_ms: i64::try_from(timings.fade_ms).unwrap_or(i64::MAX),
        }
    }

    pub fn phase(&self) -> NoticePhase {
        self.phase
    }

    /// Moves the schedule forward to `now_ms`.
    ///
    /// Returns the new phase when it changed. A single call may jump
    /// straight from visible to removed when the clock skipped the fade.
    pub fn advance(&mut self, now_ms: i64) -> Option<NoticePhase> {
        let before = self.phase;

        if let NoticePhase::Visible { fade_at_ms } = self.phase {
            if now_ms >= fade_at_ms {
                self.phase = NoticePhase::Fading {
                    remove_at_ms: fade_at_ms.saturating_add(self.fade_ms),
                };
            }
        }

        if let NoticePhase::Fading { remove_at_ms } = self.phase {
            if now_ms >= remove_at_ms {
                self.phase = NoticePhase::Removed;
            }
        }

        (self.phase != before).then_some(self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_background_colors() {
        assert_eq!(ToastKind::Info.background_class(), "bg-blue-500");
        assert_eq!(ToastKind::Success.background_class(), "bg-green-500");
        assert_eq!(ToastKind::Error.background_class(), "bg-red-500");
    }

    #[test]
    fn unknown_label_falls_back_to_info() {
        assert_eq!(ToastKind::from_label("warning"), ToastKind::Info);
        assert_eq!(ToastKind::from_label(" Error "), ToastKind::Error);
    }

    #[test]
    fn deserializes_from_loose_label() {
        let kind: ToastKind = serde_json::from_str("\"success\"").expect("must parse");
        let unknown: ToastKind = serde_json::from_str("\"warning\"").expect("must parse");

        assert_eq!(kind, ToastKind::Success);
        assert_eq!(unknown, ToastKind::Info);
    }

    #[test]
    fn toast_fades_after_three_seconds_and_is_removed_after_fade() {
        let mut lifecycle = NoticeLifecycle::start(1_000, NoticeTimings::TOAST);

        assert_eq!(lifecycle.advance(3_999), None);
        assert_eq!(
            lifecycle.advance(4_000),
            Some(NoticePhase::Fading {
                remove_at_ms: 4_300
            })
        );
        assert_eq!(lifecycle.advance(4_299), None);
        assert_eq!(lifecycle.advance(4_300), Some(NoticePhase::Removed));
        assert_eq!(lifecycle.advance(9_000), None);
    }

    #[test]
    fn skipped_clock_jumps_straight_to_removed() {
        let mut lifecycle = NoticeLifecycle::start(0, NoticeTimings::ALERT);

        assert_eq!(lifecycle.advance(60_000), Some(NoticePhase::Removed));
    }
}
