use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Accessory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Accessory => "Accessory",
        }
    }
}

/// A single stat modifier carried by equipment or a buff.
///
/// Combat stat effects are summed by the stat aggregator. The three
/// "meta" effects (XP, gold and gem luck) never touch combat stats and
/// are folded separately into [`crate::character::Multipliers`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Attack(i32),
    Defense(i32),
    Crit(i32),
    MaxHp(i32),
    XpMultiplier(f64),
    GoldMultiplier(f64),
    GemLuck(u32),
}

impl Effect {
    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            Effect::XpMultiplier(_) | Effect::GoldMultiplier(_) | Effect::GemLuck(_)
        )
    }
}

/// One-shot effect applied when a consumable is bought or used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    Heal(u32),
    FullHeal,
    Energy(u32),
    FullEnergy,
    MaxEnergyUp(u32),
    /// Kept in the inventory and consumed automatically on a lethal blow.
    Revive,
    /// Kept in the inventory and consumed by a class change.
    Respec,
}

impl ConsumableEffect {
    /// Whether the item is stored rather than applied on purchase.
    pub fn is_stored(&self) -> bool {
        matches!(self, ConsumableEffect::Revive | ConsumableEffect::Respec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    Gold(u64),
    Gems(u64),
    /// Only obtainable through crafting.
    Crafted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemKind {
    Consumable(&'static [ConsumableEffect]),
    Buff {
        effects: &'static [Effect],
        uses: u32,
    },
    Equipment {
        slot: EquipmentSlot,
        effects: &'static [Effect],
    },
}

/// Static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Price,
    pub kind: ItemKind,
}

impl ItemDef {
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self.kind {
            ItemKind::Equipment { slot, .. } => Some(slot),
            _ => None,
        }
    }

    /// Stat effects of an equipment item, empty for anything else.
    pub fn equipment_effects(&self) -> &'static [Effect] {
        match self.kind {
            ItemKind::Equipment { effects, .. } => effects,
            _ => &[],
        }
    }
}
