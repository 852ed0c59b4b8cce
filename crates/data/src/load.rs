use crate::schema::{Catalog, CatalogFile, CueTable, ItemDef, RoundConfig};
use anyhow::Context;
use matchfind_core::Cue;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const CATALOG_FILE: &str = "catalog.json";
pub const ROUND_FILE: &str = "round.json";
pub const CUES_FILE: &str = "cues.json";

#[derive(Debug)]
pub struct GameData {
    pub config: RoundConfig,
    pub catalog: Catalog,
    pub cues: CueTable,
    pub warnings: Vec<String>,
}

pub fn load_catalog(dir: &Path) -> anyhow::Result<Catalog> {
    let path = dir.join(CATALOG_FILE);
    let file: CatalogFile = load_json(&path)?;
    let items = file.into_defs().into_iter().map(ItemDef::into_item).collect();
    let catalog = Catalog::new(items).with_context(|| format!("validate {}", path.display()))?;
    Ok(catalog)
}

pub fn load_round_config(dir: &Path) -> anyhow::Result<RoundConfig> {
    let path = dir.join(ROUND_FILE);
    let config: RoundConfig = load_json(&path)?;
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

/// Missing file yields an empty table; every cue then plays with zero delay.
pub fn load_cue_table(dir: &Path) -> anyhow::Result<CueTable> {
    let path = dir.join(CUES_FILE);
    if !path.exists() {
        return Ok(CueTable::default());
    }
    load_json(&path)
}

pub fn load_game(dir: &Path) -> anyhow::Result<GameData> {
    let config = load_round_config(dir)?;
    let catalog = load_catalog(dir)?;
    let cues = load_cue_table(dir)?;
    let warnings = collect_warnings(&config, &catalog, &cues);
    Ok(GameData {
        config,
        catalog,
        cues,
        warnings,
    })
}

fn collect_warnings(config: &RoundConfig, catalog: &Catalog, cues: &CueTable) -> Vec<String> {
    let mut warnings = Vec::new();
    for id in cues.unknown_ids() {
        warnings.push(format!("unknown cue id {id}"));
    }
    for cue in [Cue::Intro, Cue::Success, Cue::PartialSuccess, Cue::Failure] {
        if cues.duration(cue).is_none() {
            warnings.push(format!("cue {} has no duration, transitions use padding only", cue.id()));
        }
    }
    if catalog.len() < 2 && config.slot_count > 1 {
        warnings.push(format!(
            "catalog has one item but {} slots; rounds needing decoys will abort",
            config.slot_count
        ));
    }
    warnings
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchfind_core::ConfigError;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(tag: &str) -> Self {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos();
            let dir = std::env::temp_dir().join(format!(
                "matchfind_data_test_{}_{}_{}",
                tag,
                std::process::id(),
                nanos
            ));
            fs::create_dir_all(&dir).expect("mkdir");
            Self(dir)
        }

        fn write(&self, name: &str, body: &str) {
            fs::write(self.0.join(name), body).expect("write");
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn loads_full_game() {
        let dir = TempDir::new("full");
        dir.write(
            ROUND_FILE,
            r#"{"slot_count":6,"max_target_count":3,"timing":{"retry_pad_ms":150}}"#,
        );
        dir.write(
            CATALOG_FILE,
            r#"[{"name":"Apple","sprite":"fruit/apple.png"},{"name":"Banana"}]"#,
        );
        dir.write(
            CUES_FILE,
            r#"{"intro":1500,"success":1200,"partial_success":700,"failure":900}"#,
        );
        let game = load_game(&dir.0).expect("load");
        assert_eq!(game.config.slot_count, 6);
        assert_eq!(game.config.timing.retry_pad_ms, 150);
        assert_eq!(game.config.timing.intro_pad_ms, 500);
        assert_eq!(game.catalog.len(), 2);
        assert_eq!(
            game.catalog.get("Apple").map(|item| item.sprite.0.as_str()),
            Some("fruit/apple.png")
        );
        assert_eq!(
            game.catalog.get("Banana").map(|item| item.sprite.0.as_str()),
            Some("Banana")
        );
        assert_eq!(game.cues.duration(Cue::Intro), Some(Duration::from_millis(1500)));
        assert!(game.warnings.is_empty(), "{:?}", game.warnings);
    }

    #[test]
    fn accepts_object_catalog() {
        let dir = TempDir::new("object");
        dir.write(CATALOG_FILE, r#"{"items":[{"name":"Kiwi"},{"name":"Plum"}]}"#);
        let catalog = load_catalog(&dir.0).expect("catalog");
        let names: Vec<_> = catalog.items().iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Kiwi", "Plum"]);
    }

    #[test]
    fn rejects_duplicate_catalog_names() {
        let dir = TempDir::new("dup");
        dir.write(CATALOG_FILE, r#"[{"name":"Kiwi"},{"name":"Kiwi"}]"#);
        let err = load_catalog(&dir.0).expect_err("duplicate");
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::DuplicateItem(name)) if name == "Kiwi"
        ));
    }

    #[test]
    fn rejects_out_of_range_round_config() {
        let dir = TempDir::new("range");
        dir.write(ROUND_FILE, r#"{"slot_count":4,"max_target_count":9}"#);
        let err = load_round_config(&dir.0).expect_err("range");
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::MaxTargetOutOfRange(9))
        );
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = TempDir::new("parse");
        dir.write(ROUND_FILE, "{ not json");
        let err = load_round_config(&dir.0).expect_err("parse");
        assert!(err.to_string().contains(ROUND_FILE), "{err}");
    }

    #[test]
    fn missing_cues_file_is_empty_table_with_warnings() {
        let dir = TempDir::new("nocues");
        dir.write(ROUND_FILE, r#"{"slot_count":4,"max_target_count":2}"#);
        dir.write(CATALOG_FILE, r#"[{"name":"Apple"}]"#);
        let game = load_game(&dir.0).expect("load");
        assert_eq!(game.cues, CueTable::default());
        assert_eq!(game.warnings.len(), 5, "{:?}", game.warnings);
        assert!(game.warnings.iter().any(|w| w.contains("one item")));
    }
}
