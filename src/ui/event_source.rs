use std::{collections::VecDeque, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{domain::events::TimedEvent, usecases::contracts::PageEventSource};

use super::page_template::PageSkeleton;

/// A recorded page session: which page to build and what happened on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub page: PageSkeleton,
    pub events: Vec<TimedEvent>,
}

impl ReplayScript {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read replay script {}", path.display()))?;

        Self::parse(&raw).with_context(|| format!("invalid replay script {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Clock value of the earliest event.
    pub fn start_ms(&self) -> Option<i64> {
        self.events.iter().map(|event| event.at_ms).min()
    }
}

/// Yields scripted events in clock order; events sharing a timestamp keep
/// their script order.
#[derive(Debug, Clone, Default)]
pub struct ScriptEventSource {
    queue: VecDeque<TimedEvent>,
}

impl ScriptEventSource {
    pub fn new(mut events: Vec<TimedEvent>) -> Self {
        events.sort_by_key(|event| event.at_ms);
        Self {
            queue: events.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PageEventSource for ScriptEventSource {
    fn next_event(&mut self) -> Result<Option<TimedEvent>> {
        Ok(self.queue.pop_front())
    }
}
