use anyhow::Result;

use crate::usecases::contracts::{PageEventSource, PageOrchestrator};

/// Drains the event source through the orchestrator. Returns the number of
/// events handled.
pub fn run(
    event_source: &mut dyn PageEventSource,
    orchestrator: &mut dyn PageOrchestrator,
) -> Result<usize> {
    tracing::info!("starting page event loop");

    let mut handled = 0;
    while let Some(event) = event_source.next_event()? {
        orchestrator.handle_event(event)?;
        handled += 1;
    }

    tracing::info!(handled, "page event loop drained");
    Ok(handled)
}
