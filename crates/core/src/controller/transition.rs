use super::*;
use crate::{Cue, Event, EventBus};
use std::time::Duration;
use tracing::{debug, warn};

impl RoundController {
    /// Delivers a fired timer. Anything but the live token is stale and dropped.
    pub fn on_timer(&mut self, token: TimerToken, events: &mut EventBus) -> Result<(), ConfigError> {
        let Some(pending) = self.pending.filter(|pending| pending.token == token) else {
            debug!(token = token.0, "stale timer ignored");
            events.push(Event::StaleTimerIgnored { token });
            return Ok(());
        };
        self.pending = None;
        debug!(token = token.0, transition = ?pending.transition, "transition fired");

        match pending.transition {
            Transition::RevealOptions => {
                self.display.hide_reference();
                self.display.show_option_grid();
                self.unlock_input(events);
            }
            Transition::UnlockInput => self.unlock_input(events),
            Transition::NextRound => return self.start_round(events),
        }
        Ok(())
    }

    pub(super) fn schedule(
        &mut self,
        delay: Duration,
        transition: Transition,
        events: &mut EventBus,
    ) {
        self.cancel_pending(events);
        let token = self.scheduler.schedule_after(delay, transition);
        self.pending = Some(PendingTransition { token, transition });
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        debug!(token = token.0, ?transition, delay_ms, "transition scheduled");
        events.push(Event::TransitionScheduled {
            token,
            transition,
            delay_ms,
        });
    }

    pub(super) fn cancel_pending(&mut self, events: &mut EventBus) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.token);
            debug!(token = pending.token.0, "transition cancelled");
            events.push(Event::TransitionCancelled {
                token: pending.token,
            });
        }
    }

    /// Cue length, or zero when the narrator has no such cue.
    pub(super) fn narrate(&mut self, text: &str, cue: Cue) -> Duration {
        match self.narrator.narrate(text, cue) {
            Some(duration) => duration,
            None => {
                warn!(cue = cue.id(), "narration cue missing, using zero delay");
                Duration::ZERO
            }
        }
    }

    pub(super) fn lock_input(&mut self) {
        for slot in &mut self.slots {
            slot.set_interactable(false);
        }
    }

    fn unlock_input(&mut self, events: &mut EventBus) {
        for slot in &mut self.slots {
            slot.set_interactable(true);
        }
        self.phase = Phase::Accepting;
        let active_slots = self.slots.iter().filter(|slot| slot.is_active()).count();
        events.push(Event::InputUnlocked { active_slots });
    }
}
