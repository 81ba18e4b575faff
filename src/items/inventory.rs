use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unequipped items and stored consumables, keyed by catalog id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn has(&self, item_id: &str) -> bool {
        self.count(item_id) > 0
    }

    pub fn add(&mut self, item_id: &str, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.items.entry(item_id.to_string()).or_insert(0) += amount;
    }

    /// Removes `amount` units. Leaves the inventory untouched and returns
    /// false when fewer than `amount` are held.
    pub fn remove(&mut self, item_id: &str, amount: u32) -> bool {
        let held = self.count(item_id);
        if held < amount {
            return false;
        }
        if held == amount {
            self.items.remove(item_id);
        } else {
            self.items.insert(item_id.to_string(), held - amount);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, count)| (id.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_count() {
        let mut inv = Inventory::new();
        assert_eq!(inv.count("hp_potion"), 0);
        inv.add("hp_potion", 2);
        inv.add("hp_potion", 1);
        assert_eq!(inv.count("hp_potion"), 3);
        assert!(inv.has("hp_potion"));
    }

    #[test]
    fn test_remove_refuses_when_short() {
        let mut inv = Inventory::new();
        inv.add("revive_stone", 1);
        assert!(!inv.remove("revive_stone", 2));
        assert_eq!(inv.count("revive_stone"), 1);
        assert!(inv.remove("revive_stone", 1));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut inv = Inventory::new();
        inv.add("hp_potion", 0);
        assert!(inv.is_empty());
    }
}
