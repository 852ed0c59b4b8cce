//! Collaborators the controller drives. Implemented by whatever renders and
//! plays audio; the controller only ever talks to these traits.

use crate::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Intro,
    Success,
    PartialSuccess,
    Failure,
}

impl Cue {
    pub fn id(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Success => "success",
            Self::PartialSuccess => "partial_success",
            Self::Failure => "failure",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "intro" => Some(Self::Intro),
            "success" => Some(Self::Success),
            "partial_success" => Some(Self::PartialSuccess),
            "failure" => Some(Self::Failure),
            _ => None,
        }
    }
}

pub trait DisplaySurface {
    fn show_reference(&mut self, item: &Item);
    fn hide_reference(&mut self);
    fn show_option_grid(&mut self);
    fn hide_option_grid(&mut self);
    fn render_slot(&mut self, slot: usize, item: &Item);
}

pub trait Narrator {
    /// Starts narration and reports how long the cue plays. `None` when the
    /// cue is unavailable.
    fn narrate(&mut self, text: &str, cue: Cue) -> Option<Duration>;
}

/// Cue lengths in milliseconds, keyed by cue id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CueTable {
    durations_ms: BTreeMap<String, u64>,
}

impl CueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, cue: Cue, millis: u64) -> Self {
        self.durations_ms.insert(cue.id().to_string(), millis);
        self
    }

    pub fn duration(&self, cue: Cue) -> Option<Duration> {
        self.durations_ms
            .get(cue.id())
            .copied()
            .map(Duration::from_millis)
    }

    /// Ids that do not name a known cue.
    pub fn unknown_ids(&self) -> Vec<&str> {
        self.durations_ms
            .keys()
            .map(String::as_str)
            .filter(|id| Cue::from_id(id).is_none())
            .collect()
    }
}

/// Silent narration: only reports durations.
impl Narrator for CueTable {
    fn narrate(&mut self, _text: &str, cue: Cue) -> Option<Duration> {
        self.duration(cue)
    }
}

/// Display that draws nothing, for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplaySurface for NullDisplay {
    fn show_reference(&mut self, _item: &Item) {}
    fn hide_reference(&mut self) {}
    fn show_option_grid(&mut self) {}
    fn hide_option_grid(&mut self) {}
    fn render_slot(&mut self, _slot: usize, _item: &Item) {}
}
