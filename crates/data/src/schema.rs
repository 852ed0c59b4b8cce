use serde::{Deserialize, Serialize};

pub use matchfind_core::{Catalog, CueTable, Item, RoundConfig, TransitionTiming};

/// One catalog entry as written on disk. `sprite` falls back to the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    #[serde(default)]
    pub sprite: Option<String>,
}

impl ItemDef {
    pub fn into_item(self) -> Item {
        match self.sprite {
            Some(sprite) => Item::new(self.name, sprite),
            None => Item::named(self.name),
        }
    }
}

/// Accepts either a bare list of items or `{ "items": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogFile {
    List(Vec<ItemDef>),
    Object { items: Vec<ItemDef> },
}

impl CatalogFile {
    pub fn into_defs(self) -> Vec<ItemDef> {
        match self {
            Self::List(items) | Self::Object { items } => items,
        }
    }
}
