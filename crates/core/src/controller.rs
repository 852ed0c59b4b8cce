use crate::{
    Catalog, ConfigError, DisplaySurface, Narrator, OptionSlot, Phase, RandomSource, RoundConfig,
    RoundState, Scheduler, Scoreboard, TimerToken, Transition,
};
use std::fmt;

mod pool;
mod selection;
mod setup;
mod transition;

pub use pool::{build_selection_pool, draw_required_count};

pub const SUCCESS_TEXT: &str = "You found them all! Excellent job!";
pub const FAILURE_TEXT: &str = "Oops, that's not the right one. Try again!";

pub fn intro_text(required: usize, target: &str) -> String {
    format!("Find all {required} of the {target}!")
}

pub fn partial_text(remaining: usize) -> String {
    format!("Found one! Only {remaining} more to go!")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Slot locked, retired, out of range, or no round live.
    Ignored,
    Found { remaining: usize },
    Completed,
    Missed,
}

/// Everything outside the round logic, injected at construction.
pub struct Collaborators {
    pub rng: Box<dyn RandomSource>,
    pub display: Box<dyn DisplaySurface>,
    pub narrator: Box<dyn Narrator>,
    pub scheduler: Box<dyn Scheduler>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTransition {
    token: TimerToken,
    transition: Transition,
}

pub struct RoundController {
    config: RoundConfig,
    catalog: Catalog,
    slots: Vec<OptionSlot>,
    phase: Phase,
    round: Option<RoundState>,
    score: Scoreboard,
    pending: Option<PendingTransition>,
    rng: Box<dyn RandomSource>,
    display: Box<dyn DisplaySurface>,
    narrator: Box<dyn Narrator>,
    scheduler: Box<dyn Scheduler>,
}

impl fmt::Debug for RoundController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundController")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("score", &self.score)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl RoundController {
    pub fn new(
        config: RoundConfig,
        catalog: Catalog,
        collaborators: Collaborators,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let slots = (0..config.slot_count).map(OptionSlot::new).collect();
        let Collaborators {
            rng,
            display,
            narrator,
            scheduler,
        } = collaborators;
        Ok(Self {
            config,
            catalog,
            slots,
            phase: Phase::Idle,
            round: None,
            score: Scoreboard::default(),
            pending: None,
            rng,
            display,
            narrator,
            scheduler,
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn slots(&self) -> &[OptionSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&OptionSlot> {
        self.slots.get(index)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.score
    }

    /// The one transition that is allowed to fire next.
    pub fn pending_transition(&self) -> Option<(TimerToken, Transition)> {
        self.pending
            .map(|pending| (pending.token, pending.transition))
    }

    pub fn interactable_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .filter(|slot| slot.is_interactable())
            .map(OptionSlot::index)
            .collect()
    }
}
