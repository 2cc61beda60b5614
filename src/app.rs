use std::{cell::RefCell, path::Path, rc::Rc};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};

use crate::{
    cli::{Cli, Command, HistoryFormat},
    domain::{
        self,
        events::{PageEvent, TimedEvent},
        form::FormData,
        message::{Message, MessageBubble},
        request::RequestOptions,
        session::SessionContext,
        time_format::format_created_at,
    },
    infra::{self, file_reader::FsFileReader, stubs::OfflineChannel},
    ui::{
        self,
        chat_view::MESSAGES_CONTAINER_ID,
        event_source::{ReplayScript, ScriptEventSource},
        page::{PageController, PageSettings},
        page_template::{build_page, PageSkeleton},
        terminal_toast::TerminalToasts,
    },
    usecases::{
        self,
        bootstrap::{self, compose_transport},
        context::AppContext,
        contracts::{ChatChannel, FileReader, HttpTransport, PageOrchestrator},
        fetch_json::fetch_json,
        load_messages::{load_messages, HttpHistorySource},
    },
};

const OWN_SENDER_LABEL: &str = "You";

type Submissions = Rc<RefCell<Vec<(String, FormData)>>>;

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command {
        Command::History {
            project,
            user,
            format,
        } => history(&context, SessionContext::new(project, user), format),
        Command::Fetch {
            url,
            method,
            headers,
            body,
        } => {
            let options = RequestOptions {
                method,
                headers: headers.into_iter().collect(),
                body,
            };
            fetch(&context, &url, &options)
        }
        Command::FormatTime { timestamp } => {
            println!("{}", format_created_at(&timestamp, &Local::now()));
            Ok(())
        }
        Command::Replay { script } => replay(&context, &script),
    }
}

fn history(context: &AppContext, session: SessionContext, format: HistoryFormat) -> Result<()> {
    let transport = compose_transport(context)?;
    let now = Local::now();

    match format {
        HistoryFormat::Text => {
            let messages = load_messages(&HttpHistorySource::new(&transport), session.project_id)
                .map_err(|error| anyhow!("{}: chat history could not be loaded", error.code()))?;
            for line in transcript(&messages, session.user_id, &now) {
                println!("{line}");
            }
        }
        HistoryFormat::Html => {
            let mut controller = PageController::new(
                build_page(&PageSkeleton::chat_only()),
                OfflineChannel::default(),
                transport,
                FsFileReader,
                PageSettings::from_config(&context.config),
            );
            controller.handle_event(TimedEvent::new(
                now.timestamp_millis(),
                PageEvent::ChatInit {
                    project_id: session.project_id,
                    user_id: session.user_id,
                },
            ))?;

            let doc = controller.document();
            if let Some(container) = doc.get_element_by_id(MESSAGES_CONTAINER_ID) {
                println!("{}", doc.outer_html(container));
            }
        }
    }

    Ok(())
}

/// One line per message: `[time] sender: content`.
fn transcript(messages: &[Message], user_id: i64, now: &DateTime<Local>) -> Vec<String> {
    messages
        .iter()
        .map(|message| {
            let bubble = MessageBubble::from_message(message, Some(user_id), now);
            format!(
                "[{}] {}: {}",
                bubble.time_label,
                bubble.sender_label.as_deref().unwrap_or(OWN_SENDER_LABEL),
                bubble.content
            )
        })
        .collect()
}

fn fetch(context: &AppContext, url: &str, options: &RequestOptions) -> Result<()> {
    let transport = compose_transport(context)?;
    let mut toasts = TerminalToasts::stderr();

    let value = fetch_json(&transport, &mut toasts, url, options)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn replay(context: &AppContext, path: &Path) -> Result<()> {
    let script = ReplayScript::from_path(path)?;
    let transport = compose_transport(context)?;

    let report = replay_page(
        script,
        OfflineChannel::default(),
        transport,
        FsFileReader,
        PageSettings::from_config(&context.config),
    )?;
    print!("{}", report.render());
    Ok(())
}

#[derive(Debug)]
struct ReplayReport {
    handled: usize,
    outbound: Vec<String>,
    submissions: Vec<(String, FormData)>,
    failed_fetches: Vec<String>,
    html: String,
}

impl ReplayReport {
    fn render(&self) -> String {
        let mut out = format!("events handled: {}\n", self.handled);

        out.push_str("outbound events:\n");
        for line in &self.outbound {
            out.push_str(&format!("  {line}\n"));
        }

        out.push_str("form submissions:\n");
        for (form_id, data) in &self.submissions {
            let fields = data
                .fields()
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("&");
            out.push_str(&format!("  {form_id}: {fields}\n"));
        }

        if !self.failed_fetches.is_empty() {
            out.push_str("failed requests:\n");
            for error in &self.failed_fetches {
                out.push_str(&format!("  {error}\n"));
            }
        }

        out.push_str("document:\n");
        out.push_str(&self.html);
        out.push('\n');
        out
    }
}

fn replay_page<T, R>(
    script: ReplayScript,
    channel: OfflineChannel,
    transport: T,
    reader: R,
    settings: PageSettings,
) -> Result<ReplayReport>
where
    T: HttpTransport,
    R: FileReader,
{
    let start_ms = script
        .start_ms()
        .unwrap_or_else(|| Local::now().timestamp_millis());

    let mut controller =
        PageController::new(build_page(&script.page), channel, transport, reader, settings);
    let submissions = record_form_submissions(&mut controller);
    controller.bootstrap(start_ms);

    let mut source = ScriptEventSource::new(script.events);
    let handled = ui::shell::run(&mut source, &mut controller)?;

    let doc = controller.document();
    let submissions = submissions.borrow().clone();
    Ok(ReplayReport {
        handled,
        outbound: controller.chat().channel().wire_lines(),
        submissions,
        failed_fetches: controller
            .fetch_results()
            .iter()
            .filter_map(|result| result.as_ref().err().map(ToString::to_string))
            .collect(),
        html: doc.outer_html(doc.body()),
    })
}

/// Registers a recording submit handler on every form with an id.
fn record_form_submissions<C, T, R>(controller: &mut PageController<C, T, R>) -> Submissions
where
    C: ChatChannel,
    T: HttpTransport,
    R: FileReader,
{
    let submissions = Submissions::default();
    let doc = controller.document();
    let form_ids: Vec<String> = doc
        .query_tag_within(doc.body(), "form")
        .into_iter()
        .filter_map(|form| doc.attribute(form, "id").map(str::to_owned))
        .collect();

    for form_id in form_ids {
        let sink = Rc::clone(&submissions);
        let recorded_id = form_id.clone();
        controller.setup_form_submit(
            &form_id,
            Box::new(move |data: FormData| -> Result<()> {
                sink.borrow_mut().push((recorded_id.clone(), data));
                Ok(())
            }),
        );
    }

    submissions
}
