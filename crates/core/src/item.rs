use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque handle to a visual asset. The core never resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteRef(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub sprite: SpriteRef,
}

impl Item {
    pub fn new(name: impl Into<String>, sprite: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sprite: SpriteRef(sprite.into()),
        }
    }

    /// Item whose sprite handle is its own name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            sprite: SpriteRef(name.clone()),
            name,
        }
    }
}

/// Every item a round may draw from. Non-empty with unique names.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.name.as_str()) {
                return Err(ConfigError::DuplicateItem(item.name.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Items that can stand in as decoys for `target`.
    pub fn decoys_for(&self, target: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.name != target)
            .collect()
    }
}
