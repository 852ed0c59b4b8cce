use crate::Item;
use serde::{Deserialize, Serialize};

/// One fixed position in the option grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSlot {
    index: usize,
    assigned: Option<Item>,
    active: bool,
    interactable: bool,
}

impl OptionSlot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            assigned: None,
            active: false,
            interactable: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn assigned_item(&self) -> Option<&Item> {
        self.assigned.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    pub fn set_content(&mut self, item: Item) {
        self.assigned = Some(item);
        self.active = true;
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.assigned
            .as_ref()
            .is_some_and(|item| item.name == candidate)
    }

    /// Removes the slot from play for the rest of the round.
    pub fn retire(&mut self) {
        self.active = false;
        self.interactable = false;
    }

    /// Only active slots ever accept input.
    pub fn set_interactable(&mut self, interactable: bool) {
        self.interactable = interactable && self.active;
    }
}
