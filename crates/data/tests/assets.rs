use matchfind_core::{Cue, MAX_TARGET_LIMIT};
use matchfind_data::{load_game, GameData};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn bundled() -> GameData {
    load_game(&assets_root()).expect("load bundled assets")
}

#[test]
fn bundled_assets_load_without_warnings() {
    let game = bundled();
    assert!(game.warnings.is_empty(), "{:?}", game.warnings);
}

#[test]
fn bundled_round_config_is_playable() {
    let game = bundled();
    assert!(game.config.slot_count >= 1);
    assert!((1..=MAX_TARGET_LIMIT).contains(&game.config.max_target_count));
    // Enough distinct items that decoys always exist.
    assert!(game.catalog.len() >= 2);
}

#[test]
fn bundled_cues_cover_every_phase() {
    let game = bundled();
    for cue in [Cue::Intro, Cue::Success, Cue::PartialSuccess, Cue::Failure] {
        assert!(game.cues.duration(cue).is_some(), "missing {}", cue.id());
    }
}
