//! Page controller: the event loop host for the chat widget and page utilities.
//!
//! Every [`TimedEvent`] first moves the clock (typing debounce, toast and
//! alert fades) and is then routed to its handler. Handler failures are
//! logged and never stop the loop.

use std::collections::HashMap;

use anyhow::Result;
use serde_json::Value;

use crate::{
    domain::{
        events::{PageEvent, TimedEvent},
        notice::{NoticeTimings, ToastKind},
        request::RequestOptions,
        session::SessionContext,
        typing_state::DEFAULT_TYPING_DEBOUNCE_MS,
    },
    infra::config::AppConfig,
    usecases::{
        chat_client::ChatClient,
        contracts::{ChatChannel, ChatView, FileReader, HttpTransport, PageOrchestrator},
        fetch_json::{fetch_json, FetchError},
        form_submit::SubmitCallback,
        load_messages::HttpHistorySource,
    },
};

use super::{
    chat_view::{DocumentChatView, SEND_BUTTON_ID},
    dom::Document,
    file_preview::{
        remove_preview, FilePreviewBinding, ATTACHMENTS_INPUT_ID, ATTACHMENTS_PREVIEW_ID,
        PORTFOLIO_INPUT_ID, PORTFOLIO_PREVIEW_ID,
    },
    forms::FormRegistry,
    modal::{close_if_backdrop, close_modal, open_modal},
    rating::{RatingWidget, RATING_CONTAINER_ID},
    toasts::{NoticeBoard, PageToasts},
};

const FORM_SUBMIT_FAILED: &str = "FORM_SUBMIT_FAILED";
const FETCH_FAILED: &str = "FETCH_FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub typing_debounce_ms: u64,
    pub toast_timings: NoticeTimings,
    pub alert_timings: NoticeTimings,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            typing_debounce_ms: DEFAULT_TYPING_DEBOUNCE_MS,
            toast_timings: NoticeTimings::TOAST,
            alert_timings: NoticeTimings::ALERT,
        }
    }
}

impl PageSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            typing_debounce_ms: config.chat.typing_debounce_ms,
            toast_timings: config.notifications.toast_timings(),
            alert_timings: config.notifications.alert_timings(),
        }
    }
}

pub struct PageController<C, T, R> {
    document: Document,
    chat: ChatClient<C>,
    transport: T,
    reader: R,
    notices: NoticeBoard,
    forms: FormRegistry,
    ratings: HashMap<String, RatingWidget>,
    previews: Vec<FilePreviewBinding>,
    fetch_results: Vec<Result<Value, FetchError>>,
}

impl<C, T, R> PageController<C, T, R>
where
    C: ChatChannel,
    T: HttpTransport,
    R: FileReader,
{
    pub fn new(
        document: Document,
        channel: C,
        transport: T,
        reader: R,
        settings: PageSettings,
    ) -> Self {
        Self {
            document,
            chat: ChatClient::new(channel, settings.typing_debounce_ms),
            transport,
            reader,
            notices: NoticeBoard::new(settings.toast_timings, settings.alert_timings),
            forms: FormRegistry::default(),
            ratings: HashMap::new(),
            previews: Vec::new(),
            fetch_results: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn chat(&self) -> &ChatClient<C> {
        &self.chat
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn rating(&self, container_id: &str) -> Option<&RatingWidget> {
        self.ratings.get(container_id)
    }

    /// Outcomes of `fetch_json` events, oldest first.
    pub fn fetch_results(&self) -> &[Result<Value, FetchError>] {
        &self.fetch_results
    }

    /// Page-load wiring: file previews, the rating widget and alert auto-dismiss.
    pub fn bootstrap(&mut self, now_ms: i64) {
        let previews = self.setup_file_preview(PORTFOLIO_INPUT_ID, PORTFOLIO_PREVIEW_ID) as usize
            + self.setup_file_preview(ATTACHMENTS_INPUT_ID, ATTACHMENTS_PREVIEW_ID) as usize;
        let rating = self.setup_rating(RATING_CONTAINER_ID);
        let alerts = self.notices.schedule_alerts(&self.document, now_ms);

        tracing::debug!(previews, rating, alerts, "page bootstrapped");
    }

    pub fn setup_file_preview(&mut self, input_id: &str, preview_id: &str) -> bool {
        match FilePreviewBinding::setup(&self.document, input_id, preview_id) {
            Some(binding) => {
                self.previews.retain(|existing| existing.input_id() != input_id);
                self.previews.push(binding);
                true
            }
            None => false,
        }
    }

    pub fn setup_rating(&mut self, container_id: &str) -> bool {
        match RatingWidget::setup(&mut self.document, container_id) {
            Some(widget) => {
                self.ratings.insert(container_id.to_owned(), widget);
                true
            }
            None => false,
        }
    }

    pub fn setup_form_submit(&mut self, form_id: &str, callback: SubmitCallback) -> bool {
        self.forms
            .setup_form_submit(&self.document, form_id, callback)
    }

    pub fn show_toast(&mut self, message: &str, kind: ToastKind, now_ms: i64) {
        self.notices
            .show_toast(&mut self.document, message, kind, now_ms);
    }

    pub fn fetch_json(
        &mut self,
        url: &str,
        options: &RequestOptions,
        now_ms: i64,
    ) -> Result<Value, FetchError> {
        let mut toasts = PageToasts::new(&mut self.notices, &mut self.document, now_ms);
        fetch_json(&self.transport, &mut toasts, url, options)
    }

    /// Fires every timer whose deadline is at or before `now_ms`.
    pub fn advance(&mut self, now_ms: i64) {
        self.chat.advance(now_ms);
        self.notices.advance(&mut self.document, now_ms);
    }

    fn dispatch(&mut self, event: PageEvent, now_ms: i64) {
        match event {
            PageEvent::ChatInit {
                project_id,
                user_id,
            } => {
                let history = HttpHistorySource::new(&self.transport);
                let mut view = DocumentChatView::new(&mut self.document);
                self.chat.init(
                    SessionContext::new(project_id, user_id),
                    &history,
                    &mut view,
                    now_ms,
                );
            }
            PageEvent::ChatLeave => self.chat.leave(),
            PageEvent::ChatInput { value } => {
                let mut view = DocumentChatView::new(&mut self.document);
                view.set_input_text(&value);
                self.chat.on_input(now_ms);
            }
            PageEvent::ChatKeyPress { key, shift } => {
                let mut view = DocumentChatView::new(&mut self.document);
                self.chat.on_key_press(&key, shift, &mut view);
            }
            PageEvent::SendClicked => self.send_chat_message(),
            PageEvent::Inbound { payload } => {
                let mut view = DocumentChatView::new(&mut self.document);
                self.chat.handle_inbound(payload, &mut view, now_ms);
            }
            PageEvent::Click { target_id } => self.click(&target_id),
            PageEvent::StarClicked {
                container_id,
                index,
            } => {
                if let Some(widget) = self.ratings.get_mut(&container_id) {
                    widget.click(&mut self.document, index);
                }
            }
            PageEvent::StarHovered {
                container_id,
                index,
            } => {
                if let Some(widget) = self.ratings.get_mut(&container_id) {
                    widget.hover(&mut self.document, index);
                }
            }
            PageEvent::RatingLeft { container_id } => {
                if let Some(widget) = self.ratings.get_mut(&container_id) {
                    widget.leave(&mut self.document);
                }
            }
            PageEvent::FilesSelected { input_id, files } => {
                match self.previews.iter().find(|binding| binding.input_id() == input_id) {
                    Some(binding) => {
                        binding.render(&mut self.document, &files, &self.reader);
                    }
                    None => tracing::debug!(input_id = %input_id, "no preview bound to input"),
                }
            }
            PageEvent::FormSubmitted { form_id } => {
                match self.forms.submit(&mut self.document, &form_id) {
                    Ok(true) => tracing::debug!(form_id = %form_id, "form submitted"),
                    Ok(false) => tracing::debug!(form_id = %form_id, "form has no submit handler"),
                    Err(error) => tracing::error!(
                        code = FORM_SUBMIT_FAILED,
                        form_id = %form_id,
                        error = %error,
                        "form submit handler failed"
                    ),
                }
            }
            PageEvent::OpenModal { modal_id } => {
                open_modal(&mut self.document, &modal_id);
            }
            PageEvent::CloseModal { modal_id } => {
                close_modal(&mut self.document, &modal_id);
            }
            PageEvent::ShowToast { message, kind } => self.show_toast(&message, kind, now_ms),
            PageEvent::FetchJson { url, options } => {
                let result = self.fetch_json(&url, &options, now_ms);
                if let Err(error) = &result {
                    tracing::warn!(code = FETCH_FAILED, url = %url, error = %error, "fetch failed");
                }
                self.fetch_results.push(result);
            }
            PageEvent::Tick => {}
        }
    }

    fn send_chat_message(&mut self) {
        let mut view = DocumentChatView::new(&mut self.document);
        self.chat.send_message(&mut view);
    }

    /// Delegated document click.
    fn click(&mut self, target_id: &str) {
        if target_id == SEND_BUTTON_ID {
            self.send_chat_message();
            return;
        }

        let Some(target) = self.document.get_element_by_id(target_id) else {
            tracing::debug!(target_id, "click on unknown element");
            return;
        };

        if !remove_preview(&mut self.document, target) {
            close_if_backdrop(&mut self.document, target);
        }
    }
}

impl<C, T, R> PageOrchestrator for PageController<C, T, R>
where
    C: ChatChannel,
    T: HttpTransport,
    R: FileReader,
{
    fn handle_event(&mut self, event: TimedEvent) -> Result<()> {
        tracing::trace!(at_ms = event.at_ms, event = ?event.event, "page event");

        self.advance(event.at_ms);
        self.dispatch(event.event, event.at_ms);
        Ok(())
    }
}
