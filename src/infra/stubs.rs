use std::cell::RefCell;

use crate::{
    domain::events::OutboundEvent,
    usecases::contracts::{ChannelError, ChatChannel},
};

#[cfg(test)]
use crate::infra::{config::AppConfig, contracts::ConfigAdapter};

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

#[cfg(test)]
impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> anyhow::Result<AppConfig> {
        Ok(AppConfig::default())
    }
}

/// Channel used when no socket transport is attached: every event is
/// accepted, logged and kept for inspection.
#[derive(Debug, Default)]
pub struct OfflineChannel {
    sent: RefCell<Vec<OutboundEvent>>,
}

impl OfflineChannel {
    pub fn sent(&self) -> Vec<OutboundEvent> {
        self.sent.borrow().clone()
    }

    /// Sent events in their `{"event","data"}` wire form, one per line.
    pub fn wire_lines(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|event| serde_json::to_string(event).ok())
            .collect()
    }
}

impl ChatChannel for OfflineChannel {
    fn emit(&self, event: &OutboundEvent) -> Result<(), ChannelError> {
        tracing::debug!(
            event = event.name(),
            project_id = event.project_id(),
            "outbound chat event (offline)"
        );
        self.sent.borrow_mut().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_config_returns_defaults() {
        let adapter = StubConfigAdapter;
        let config = adapter.load().expect("stub config must load");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn offline_channel_keeps_events_in_wire_form() {
        let channel = OfflineChannel::default();

        channel
            .emit(&OutboundEvent::Typing { project_id: 4 })
            .expect("offline emit never fails");

        assert_eq!(channel.sent(), vec![OutboundEvent::Typing { project_id: 4 }]);
        assert_eq!(
            channel.wire_lines(),
            vec![r#"{"event":"typing","data":{"project_id":4}}"#.to_owned()]
        );
    }
}
