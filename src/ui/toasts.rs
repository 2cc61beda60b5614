//! Toasts and alert banners with their fade-then-remove schedules.

use crate::{
    domain::notice::{NoticeLifecycle, NoticePhase, NoticeTimings, ToastKind},
    usecases::contracts::ToastSink,
};

use super::dom::{Document, NodeId};

pub const TOAST_CLASS: &str = "toast";
pub const ALERT_CLASS: &str = "alert";

#[derive(Debug, Clone)]
pub struct NoticeBoard {
    notices: Vec<(NodeId, NoticeLifecycle)>,
    toast_timings: NoticeTimings,
    alert_timings: NoticeTimings,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NoticeTimings::TOAST, NoticeTimings::ALERT)
    }
}

impl NoticeBoard {
    pub fn new(toast_timings: NoticeTimings, alert_timings: NoticeTimings) -> Self {
        Self {
            notices: Vec::new(),
            toast_timings,
            alert_timings,
        }
    }

    /// Number of notices still on their way out.
    pub fn pending(&self) -> usize {
        self.notices.len()
    }

    pub fn show_toast(
        &mut self,
        doc: &mut Document,
        message: &str,
        kind: ToastKind,
        now_ms: i64,
    ) -> NodeId {
        let classes = format!("{TOAST_CLASS} {} text-white", kind.background_class());
        let toast = doc.append_element(doc.body(), "div", None, &classes);
        doc.set_text(toast, message);

        tracing::debug!(kind = kind.as_label(), "toast shown");
        self.notices
            .push((toast, NoticeLifecycle::start(now_ms, self.toast_timings)));
        toast
    }

    /// Schedules every `.alert` banner currently on the page for removal.
    pub fn schedule_alerts(&mut self, doc: &Document, now_ms: i64) -> usize {
        let alerts = doc.query_class(ALERT_CLASS);
        for alert in &alerts {
            self.notices
                .push((*alert, NoticeLifecycle::start(now_ms, self.alert_timings)));
        }
        alerts.len()
    }

    pub fn advance(&mut self, doc: &mut Document, now_ms: i64) {
        self.notices.retain_mut(|(node, lifecycle)| {
            match lifecycle.advance(now_ms) {
                Some(NoticePhase::Fading { .. }) => doc.set_style(*node, "opacity", "0"),
                Some(NoticePhase::Removed) => {
                    doc.set_style(*node, "opacity", "0");
                    doc.remove(*node);
                }
                Some(NoticePhase::Visible { .. }) | None => {}
            }
            lifecycle.phase() != NoticePhase::Removed
        });
    }
}

/// [`ToastSink`] that puts toasts on the page at a fixed clock value.
pub struct PageToasts<'a> {
    board: &'a mut NoticeBoard,
    document: &'a mut Document,
    now_ms: i64,
}

impl<'a> PageToasts<'a> {
    pub fn new(board: &'a mut NoticeBoard, document: &'a mut Document, now_ms: i64) -> Self {
        Self {
            board,
            document,
            now_ms,
        }
    }
}

impl ToastSink for PageToasts<'_> {
    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.board
            .show_toast(self.document, message, kind, self.now_ms);
    }
}
