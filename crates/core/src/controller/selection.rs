use super::*;
use crate::{partial_text, Cue, Event, EventBus, FAILURE_TEXT, SUCCESS_TEXT};
use tracing::{debug, info};

impl RoundController {
    /// Routes one click. Locked or unknown slots are ignored without touching
    /// the pending transition; every other click replaces it.
    pub fn handle_selection(&mut self, slot_index: usize, events: &mut EventBus) -> SelectionOutcome {
        let live = self.phase.accepts_input()
            && self
                .slots
                .get(slot_index)
                .is_some_and(OptionSlot::is_interactable);
        let is_match = match (&self.round, self.slots.get(slot_index)) {
            (Some(round), Some(slot)) if live => Some(slot.matches(&round.target.name)),
            _ => None,
        };
        let Some(is_match) = is_match else {
            debug!(slot = slot_index, phase = ?self.phase, "selection ignored");
            events.push(Event::SelectionIgnored {
                slot: slot_index,
                phase: self.phase,
            });
            return SelectionOutcome::Ignored;
        };

        self.cancel_pending(events);
        if is_match {
            self.target_found(slot_index, events)
        } else {
            self.target_missed(slot_index, events)
        }
    }

    fn target_found(&mut self, slot_index: usize, events: &mut EventBus) -> SelectionOutcome {
        self.slots[slot_index].retire();
        self.lock_input();
        let Some(round) = self.round.as_mut() else {
            return SelectionOutcome::Ignored;
        };
        let complete = round.record_found();
        let (found, required, remaining) =
            (round.found_count, round.required_count, round.remaining());
        let (round_no, misses) = (round.round, round.misses);
        self.score.targets_found += 1;
        events.push(Event::TargetFound {
            slot: slot_index,
            found,
            required,
        });

        if complete {
            self.phase = Phase::CorrectFinal;
            self.score.rounds_completed += 1;
            info!(round = round_no, misses, "round completed");
            events.push(Event::RoundCompleted {
                round: round_no,
                misses,
            });
            self.display.hide_reference();
            let delay = self.narrate(SUCCESS_TEXT, Cue::Success) + self.config.timing.success_pad();
            self.schedule(delay, Transition::NextRound, events);
            SelectionOutcome::Completed
        } else {
            self.phase = Phase::CorrectPartial;
            let delay = self.narrate(&partial_text(remaining), Cue::PartialSuccess)
                + self.config.timing.retry_pad();
            self.schedule(delay, Transition::UnlockInput, events);
            SelectionOutcome::Found { remaining }
        }
    }

    fn target_missed(&mut self, slot_index: usize, events: &mut EventBus) -> SelectionOutcome {
        self.lock_input();
        self.phase = Phase::Incorrect;
        self.score.misses += 1;
        let misses = match self.round.as_mut() {
            Some(round) => {
                round.misses += 1;
                round.misses
            }
            None => 0,
        };
        let item = self.slots[slot_index]
            .assigned_item()
            .map(|item| item.name.clone())
            .unwrap_or_default();
        debug!(slot = slot_index, item = %item, "wrong selection");
        events.push(Event::SelectionMissed {
            slot: slot_index,
            item,
            misses,
        });
        let delay = self.narrate(FAILURE_TEXT, Cue::Failure) + self.config.timing.retry_pad();
        self.schedule(delay, Transition::UnlockInput, events);
        SelectionOutcome::Missed
    }
}
