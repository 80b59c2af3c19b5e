//! Block inventory and hotbar selection

use serde::{Deserialize, Serialize};

use super::block::{BlockKind, PLACEABLE};

/// Counts of each placeable block held by the player
///
/// Serializes as `{"dirt": n, "stone": n, "wood": n, "leaf": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub dirt: u32,
    #[serde(default)]
    pub stone: u32,
    #[serde(default)]
    pub wood: u32,
    #[serde(default)]
    pub leaf: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, kind: BlockKind) -> Option<&mut u32> {
        match kind {
            BlockKind::Dirt => Some(&mut self.dirt),
            BlockKind::Stone => Some(&mut self.stone),
            BlockKind::Wood => Some(&mut self.wood),
            BlockKind::Leaf => Some(&mut self.leaf),
            BlockKind::Empty | BlockKind::Bedrock => None,
        }
    }

    /// Count held for `kind` (always 0 for non-placeable kinds)
    pub fn count(&self, kind: BlockKind) -> u32 {
        match kind {
            BlockKind::Dirt => self.dirt,
            BlockKind::Stone => self.stone,
            BlockKind::Wood => self.wood,
            BlockKind::Leaf => self.leaf,
            BlockKind::Empty | BlockKind::Bedrock => 0,
        }
    }

    /// Add one block. Returns false for non-placeable kinds.
    pub fn add(&mut self, kind: BlockKind) -> bool {
        match self.slot_mut(kind) {
            Some(n) => {
                *n = n.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Remove one block if any are held
    pub fn take(&mut self, kind: BlockKind) -> bool {
        match self.slot_mut(kind) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    /// (kind, count) pairs in hotbar order
    pub fn entries(&self) -> impl Iterator<Item = (BlockKind, u32)> + '_ {
        PLACEABLE.iter().map(|&k| (k, self.count(k)))
    }

    /// Blocks held across all kinds; widened so loaded counts cannot overflow
    pub fn total(&self) -> u64 {
        PLACEABLE.iter().map(|&k| u64::from(self.count(k))).sum()
    }
}

/// Currently active placeable kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    slot: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self { slot: 0 }
    }
}

impl Selection {
    /// Select by 1-based hotbar number (keys 1-4). Other numbers are ignored.
    pub fn select_number(&mut self, number: u32) -> bool {
        let Some(slot) = (number as usize).checked_sub(1) else {
            return false;
        };
        if slot >= PLACEABLE.len() {
            return false;
        }
        self.slot = slot;
        true
    }

    /// Select a placeable kind directly
    pub fn select_kind(&mut self, kind: BlockKind) -> bool {
        match kind.hotbar_slot() {
            Some(slot) => {
                self.slot = slot;
                true
            }
            None => false,
        }
    }

    /// Zero-based slot index
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[inline]
    pub fn kind(&self) -> BlockKind {
        PLACEABLE[self.slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_take() {
        let mut inv = Inventory::new();
        assert!(!inv.take(BlockKind::Dirt));
        assert!(inv.add(BlockKind::Dirt));
        assert_eq!(inv.count(BlockKind::Dirt), 1);
        assert!(inv.take(BlockKind::Dirt));
        assert_eq!(inv.count(BlockKind::Dirt), 0);
    }

    #[test]
    fn test_bedrock_never_stored() {
        let mut inv = Inventory::new();
        assert!(!inv.add(BlockKind::Bedrock));
        assert!(!inv.add(BlockKind::Empty));
        assert_eq!(inv.total(), 0);
    }

    #[test]
    fn test_total_of_saturated_counts() {
        let inv: Inventory = serde_json::from_str(r#"{"dirt":4294967295,"stone":1}"#).unwrap();
        assert_eq!(inv.total(), u64::from(u32::MAX) + 1);

        let mut inv = inv;
        assert!(inv.add(BlockKind::Dirt));
        assert_eq!(inv.count(BlockKind::Dirt), u32::MAX);
    }

    #[test]
    fn test_serializes_as_map() {
        let inv = Inventory {
            dirt: 3,
            stone: 0,
            wood: 1,
            leaf: 7,
        };
        let json = serde_json::to_string(&inv).unwrap();
        assert_eq!(json, r#"{"dirt":3,"stone":0,"wood":1,"leaf":7}"#);
        let back: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inv);
    }

    #[test]
    fn test_selection_numbers() {
        let mut sel = Selection::default();
        assert_eq!(sel.kind(), BlockKind::Dirt);
        assert!(sel.select_number(3));
        assert_eq!(sel.kind(), BlockKind::Wood);
        assert!(!sel.select_number(0));
        assert!(!sel.select_number(5));
        assert_eq!(sel.kind(), BlockKind::Wood);
        assert!(!sel.select_kind(BlockKind::Bedrock));
    }
}
