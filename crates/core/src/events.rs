use crate::{Phase, TimerToken, Transition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        round: u32,
        target: String,
        required: usize,
        slots: usize,
    },
    RoundAborted {
        reason: String,
    },
    InputUnlocked {
        active_slots: usize,
    },
    SelectionIgnored {
        slot: usize,
        phase: Phase,
    },
    TargetFound {
        slot: usize,
        found: usize,
        required: usize,
    },
    SelectionMissed {
        slot: usize,
        item: String,
        misses: u32,
    },
    RoundCompleted {
        round: u32,
        misses: u32,
    },
    TransitionScheduled {
        token: TimerToken,
        transition: Transition,
        delay_ms: u64,
    },
    TransitionCancelled {
        token: TimerToken,
    },
    StaleTimerIgnored {
        token: TimerToken,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn events(&self) -> &[Event] {
        &self.queue
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
