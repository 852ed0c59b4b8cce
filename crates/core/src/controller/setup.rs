use super::*;
use crate::{choose, intro_text, shuffle, Cue, Event, EventBus};
use tracing::{info, warn};

impl RoundController {
    /// Draws a target, fills and shuffles the grid, and starts the intro.
    /// On error nothing is rendered and every slot stays locked.
    pub fn start_round(&mut self, events: &mut EventBus) -> Result<(), ConfigError> {
        self.cancel_pending(events);

        let target = choose(self.rng.as_mut(), self.catalog.items())
            .cloned()
            .ok_or(ConfigError::EmptyCatalog)?;
        let required = draw_required_count(self.rng.as_mut(), &self.config);
        let mut pool = match build_selection_pool(
            self.rng.as_mut(),
            &self.catalog,
            &target,
            required,
            self.config.slot_count,
        ) {
            Ok(pool) => pool,
            Err(err) => {
                self.abort_round(&err, events);
                return Err(err);
            }
        };
        shuffle(self.rng.as_mut(), &mut pool);

        self.score.rounds_started += 1;
        let round_no = self.score.rounds_started;

        self.display.hide_option_grid();
        for (slot, item) in self.slots.iter_mut().zip(pool) {
            self.display.render_slot(slot.index(), &item);
            slot.set_content(item);
        }
        self.lock_input();
        self.display.show_reference(&target);

        info!(round = round_no, target = %target.name, required, "round started");
        events.push(Event::RoundStarted {
            round: round_no,
            target: target.name.clone(),
            required,
            slots: self.slots.len(),
        });

        let text = intro_text(required, &target.name);
        self.round = Some(RoundState::new(round_no, target, required));
        self.phase = Phase::Intro;

        let delay = self.narrate(&text, Cue::Intro) + self.config.timing.intro_pad();
        self.schedule(delay, Transition::RevealOptions, events);
        Ok(())
    }

    fn abort_round(&mut self, err: &ConfigError, events: &mut EventBus) {
        warn!(error = %err, "round aborted");
        self.lock_input();
        self.round = None;
        self.phase = Phase::Idle;
        events.push(Event::RoundAborted {
            reason: err.to_string(),
        });
    }
}
