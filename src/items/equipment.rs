use super::catalog::find_item;
use super::types::{EquipmentSlot, ItemDef};
use serde::{Deserialize, Serialize};

/// Equipped item ids, one per slot.
///
/// IMPORTANT: When adding new slots, use `#[serde(default)]` so older
/// character snapshots still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub accessory: Option<String>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&str> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_deref(),
            EquipmentSlot::Armor => self.armor.as_deref(),
            EquipmentSlot::Accessory => self.accessory.as_deref(),
        }
    }

    /// Puts `item_id` into `slot` and returns whatever was there before.
    pub fn set(&mut self, slot: EquipmentSlot, item_id: Option<String>) -> Option<String> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
        };
        std::mem::replace(target, item_id)
    }

    /// Removes the first slot holding `item_id`. Returns true if one was found.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        for slot in EquipmentSlot::ALL {
            if self.get(slot) == Some(item_id) {
                self.set(slot, None);
                return true;
            }
        }
        false
    }

    /// How many slots currently hold `item_id`.
    pub fn count_of(&self, item_id: &str) -> u32 {
        EquipmentSlot::ALL
            .iter()
            .filter(|slot| self.get(**slot) == Some(item_id))
            .count() as u32
    }

    /// Catalog definitions of everything equipped. Unknown ids are skipped.
    pub fn iter_equipped(&self) -> impl Iterator<Item = &'static ItemDef> + '_ {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot))
            .filter_map(find_item)
    }
}
