use crate::Item;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Intro,
    Accepting,
    CorrectPartial,
    CorrectFinal,
    Incorrect,
}

impl Phase {
    pub fn accepts_input(self) -> bool {
        self == Phase::Accepting
    }
}

/// Data for the round in progress; replaced wholesale when the next one starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub round: u32,
    pub target: Item,
    pub required_count: usize,
    pub found_count: usize,
    pub misses: u32,
}

impl RoundState {
    pub fn new(round: u32, target: Item, required_count: usize) -> Self {
        Self {
            round,
            target,
            required_count,
            found_count: 0,
            misses: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.required_count.saturating_sub(self.found_count)
    }

    pub fn is_complete(&self) -> bool {
        self.found_count == self.required_count
    }

    /// Counts one more found target, never past `required_count`.
    pub fn record_found(&mut self) -> bool {
        if self.found_count < self.required_count {
            self.found_count += 1;
        }
        self.is_complete()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scoreboard {
    pub rounds_started: u32,
    pub rounds_completed: u32,
    pub targets_found: u32,
    pub misses: u32,
}
