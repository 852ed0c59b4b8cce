use anyhow::Context;
use matchfind_core::{
    choose, Collaborators, Cue, CueTable, DisplaySurface, Event, EventBus, Item, ManualScheduler,
    Narrator, RngState, RoundController, Scoreboard, SelectionOutcome,
};
use matchfind_data::{load_game, GameData};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 0xC0FFEE;
const DEFAULT_ROUNDS: u32 = 3;
const DEFAULT_ASSETS: &str = "assets";
const MAX_AUTO_CLICKS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    assets: PathBuf,
    seed: u64,
    auto: bool,
    rounds: u32,
    json: bool,
}

struct ConsoleDisplay;

impl DisplaySurface for ConsoleDisplay {
    fn show_reference(&mut self, item: &Item) {
        println!("\n>>> look closely: {} [{}]", item.name, item.sprite.0);
    }

    fn hide_reference(&mut self) {
        println!("(reference hidden)");
    }

    fn show_option_grid(&mut self) {
        println!("(options revealed)");
    }

    fn hide_option_grid(&mut self) {
        debug!("option grid hidden");
    }

    fn render_slot(&mut self, slot: usize, item: &Item) {
        debug!(slot, item = %item.name, sprite = %item.sprite.0, "slot rendered");
    }
}

struct ConsoleNarrator {
    cues: CueTable,
}

impl Narrator for ConsoleNarrator {
    fn narrate(&mut self, text: &str, cue: Cue) -> Option<Duration> {
        println!("narrator: {text}");
        self.cues.duration(cue)
    }
}

struct Session {
    controller: RoundController,
    scheduler: ManualScheduler,
    events: EventBus,
}

impl Session {
    fn new(game: GameData, seed: u64) -> anyhow::Result<Self> {
        for warning in &game.warnings {
            warn!("{warning}");
        }
        let scheduler = ManualScheduler::new();
        let collaborators = Collaborators {
            rng: Box::new(RngState::from_seed(seed)),
            display: Box::new(ConsoleDisplay),
            narrator: Box::new(ConsoleNarrator { cues: game.cues }),
            scheduler: Box::new(scheduler.clone()),
        };
        let controller = RoundController::new(game.config, game.catalog, collaborators)
            .context("build round controller")?;
        Ok(Self {
            controller,
            scheduler,
            events: EventBus::default(),
        })
    }

    fn start(&mut self) -> anyhow::Result<()> {
        let result = self.controller.start_round(&mut self.events);
        self.flush_events();
        result.context("start round")?;
        self.settle()
    }

    /// Runs queued transitions on the virtual clock until input opens again.
    fn settle(&mut self) -> anyhow::Result<()> {
        while !self.controller.phase().accepts_input() {
            let Some(fired) = self.scheduler.advance_to_next() else {
                break;
            };
            let result = self.controller.on_timer(fired.token, &mut self.events);
            self.flush_events();
            result.context("run transition")?;
        }
        Ok(())
    }

    fn click(&mut self, slot: usize) -> anyhow::Result<SelectionOutcome> {
        let outcome = self.controller.handle_selection(slot, &mut self.events);
        self.flush_events();
        self.settle()?;
        Ok(outcome)
    }

    fn flush_events(&mut self) {
        for event in self.events.drain() {
            match &event {
                Event::RoundAborted { reason } => warn!(%reason, "round aborted"),
                Event::RoundCompleted { round, misses } => {
                    info!(round, misses, "round completed")
                }
                _ => debug!(?event, "event"),
            }
        }
    }

    fn print_grid(&self) {
        let mut line = String::new();
        for slot in self.controller.slots() {
            let label = match slot.assigned_item() {
                Some(item) if slot.is_active() => item.name.as_str(),
                _ => "--",
            };
            line.push_str(&format!("  {}) {}", slot.index() + 1, label));
        }
        println!("{line}");
    }
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut assets = std::env::var("MATCHFIND_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ASSETS));
    let mut seed = DEFAULT_SEED;
    let mut auto = false;
    let mut rounds = DEFAULT_ROUNDS;
    let mut json = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => auto = true,
            "--json" => json = true,
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().unwrap_or(seed);
                    idx += 1;
                }
            }
            "--rounds" => {
                if let Some(value) = args.get(idx + 1) {
                    rounds = value.parse::<u32>().unwrap_or(rounds).max(1);
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        assets,
        seed,
        auto,
        rounds,
        json,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if let Err(err) = run(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let game = load_game(&options.assets)
        .with_context(|| format!("load assets from {}", options.assets.display()))?;
    println!("seed: {}", options.seed);
    let score = if options.auto {
        run_auto(game, options.seed, options.rounds)?
    } else {
        run_interactive(game, options.seed)?
    };
    print_summary(&score, options.json)?;
    Ok(())
}

fn run_auto(game: GameData, seed: u64, rounds: u32) -> anyhow::Result<Scoreboard> {
    let mut session = Session::new(game, seed)?;
    let mut bot = RngState::from_seed(seed.rotate_left(17) ^ 0x5EED);
    session.start()?;
    let mut clicks = 0u32;
    while session.controller.scoreboard().rounds_completed < rounds {
        if clicks >= MAX_AUTO_CLICKS {
            anyhow::bail!("auto play made no progress after {clicks} clicks");
        }
        let open = session.controller.interactable_slots();
        let Some(&slot) = choose(&mut bot, &open) else {
            anyhow::bail!("no selectable slot while waiting for input");
        };
        clicks += 1;
        println!("bot picks slot {}", slot + 1);
        session.click(slot)?;
    }
    println!("virtual time: {:.1}s", session.scheduler.now().as_secs_f64());
    Ok(session.controller.scoreboard())
}

fn run_interactive(game: GameData, seed: u64) -> anyhow::Result<Scoreboard> {
    let mut session = Session::new(game, seed)?;
    session.start()?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        session.print_grid();
        print!("slot (1-{}), q to quit: ", session.controller.slots().len());
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        let input = line.trim();
        if matches!(input, "q" | "quit" | "exit") {
            break;
        }
        match input.parse::<usize>() {
            Ok(choice) if choice >= 1 => {
                if session.click(choice - 1)? == SelectionOutcome::Ignored {
                    println!("(that slot is not selectable)");
                }
            }
            _ => println!("enter a slot number"),
        }
    }
    Ok(session.controller.scoreboard())
}

fn print_summary(score: &Scoreboard, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(score).context("serialize scoreboard")?);
        return Ok(());
    }
    println!(
        "rounds started: {}  completed: {}  targets found: {}  misses: {}",
        score.rounds_started, score.rounds_completed, score.targets_found, score.misses
    );
    Ok(())
}
