//! Item counts carried by the player.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    Potion,
    Key,
}

impl Item {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Potion => "healing potion",
            Self::Key => "rusty key",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counts are never negative and items with a count of zero are not stored,
/// so two inventories holding the same things always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeMap<Item, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: Item, count: u32) -> Self {
        self.add(item, count);
        self
    }

    pub fn count(&self, item: Item) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: Item) -> bool {
        self.count(item) > 0
    }

    pub fn add(&mut self, item: Item, count: u32) {
        if count == 0 {
            return;
        }
        let held = self.items.entry(item).or_insert(0);
        *held = held.saturating_add(count);
    }

    /// Removes one `item`. Returns `false` and changes nothing when none is held.
    pub fn take(&mut self, item: Item) -> bool {
        match self.items.get_mut(&item) {
            Some(held) if *held > 1 => {
                *held -= 1;
                true
            }
            Some(_) => {
                self.items.remove(&item);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_decrements_until_empty() {
        let mut inventory = Inventory::new().with(Item::Potion, 2);
        assert!(inventory.take(Item::Potion));
        assert_eq!(1, inventory.count(Item::Potion));
        assert!(inventory.take(Item::Potion));
        assert_eq!(0, inventory.count(Item::Potion));
        assert!(!inventory.take(Item::Potion));
        assert_eq!(0, inventory.count(Item::Potion));
        assert_eq!(Inventory::new(), inventory);
    }

    #[test]
    fn take_missing_item_is_noop() {
        let mut inventory = Inventory::new().with(Item::Key, 1);
        let before = inventory.clone();
        assert!(!inventory.take(Item::Potion));
        assert_eq!(before, inventory);
    }

    #[test]
    fn adding_zero_stores_nothing() {
        let inventory = Inventory::new().with(Item::Potion, 0);
        assert_eq!(Inventory::new(), inventory);
        assert!(!inventory.has(Item::Potion));
    }

    #[test]
    fn items_display_their_names() {
        assert_eq!("healing potion", Item::Potion.to_string());
        assert_eq!("rusty key", Item::Key.to_string());
    }
}
