//! Debounce state for the local "is typing" signal.
//!
//! `Idle` means nothing has been announced. `Pending` means a `typing`
//! signal went out and a `stop_typing` is owed at `deadline_ms` unless more
//! input pushes the deadline further. There is never more than one deadline.

pub const DEFAULT_TYPING_DEBOUNCE_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingState {
    #[default]
    Idle,
    Pending {
        deadline_ms: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    /// First keystroke after idle; the caller announces `typing`.
    Started,
    /// Already announced; only the deadline moved.
    Extended,
}

impl TypingState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn deadline_ms(&self) -> Option<i64> {
        match self {
            Self::Idle => None,
            Self::Pending { deadline_ms } => Some(*deadline_ms),
        }
    }

    pub fn keystroke(&mut self, now_ms: i64, debounce_ms: u64) -> KeystrokeOutcome {
        let outcome = if self.is_pending() {
            KeystrokeOutcome::Extended
        } else {
            KeystrokeOutcome::Started
        };

        let debounce = i64::try_from(debounce_ms).unwrap_or(i64::MAX);
        *self = Self::Pending {
            deadline_ms: now_ms.saturating_add(debounce),
        };

        outcome
    }

    /// Returns true when the deadline has lapsed and the state went back to idle.
    pub fn expire(&mut self, now_ms: i64) -> bool {
        match *self {
            Self::Pending { deadline_ms } if now_ms >= deadline_ms => {
                *self = Self::Idle;
                true
            }
            _ => false,
        }
    }

    /// Explicit stop. Returns true if a `stop_typing` is owed.
    pub fn stop(&mut self) -> bool {
        let was_pending = self.is_pending();
        *self = Self::Idle;
        was_pending
    }
}
