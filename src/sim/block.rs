//! Block kinds and their properties

use serde::{Deserialize, Serialize};

/// Material stored in a grid cell
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Empty,
    Dirt,
    Stone,
    Wood,
    Leaf,
    /// Immutable floor of deep worlds
    Bedrock,
}

/// Kinds a player can hold and place, in hotbar order
pub const PLACEABLE: [BlockKind; 4] = [
    BlockKind::Dirt,
    BlockKind::Stone,
    BlockKind::Wood,
    BlockKind::Leaf,
];

impl BlockKind {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == BlockKind::Empty
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_empty()
    }

    /// Whether this kind can be broken into, and placed from, the inventory
    #[inline]
    pub fn is_placeable(self) -> bool {
        self.hotbar_slot().is_some()
    }

    /// Zero-based hotbar slot for placeable kinds
    pub fn hotbar_slot(self) -> Option<usize> {
        PLACEABLE.iter().position(|&k| k == self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Empty => "empty",
            BlockKind::Dirt => "dirt",
            BlockKind::Stone => "stone",
            BlockKind::Wood => "wood",
            BlockKind::Leaf => "leaf",
            BlockKind::Bedrock => "bedrock",
        }
    }

    /// Display color as 8-bit RGB
    pub fn rgb(self) -> [u8; 3] {
        match self {
            BlockKind::Empty => [0, 0, 0],
            BlockKind::Dirt => [0xb9, 0x7a, 0x57],
            BlockKind::Stone => [0xaa, 0xaa, 0xaa],
            BlockKind::Wood => [0x8b, 0x5c, 0x2a],
            BlockKind::Leaf => [0x3f, 0xc2, 0x5b],
            BlockKind::Bedrock => [0x3a, 0x3a, 0x40],
        }
    }

    /// Display color as a float RGBA quad color
    pub fn color(self) -> [f32; 4] {
        crate::rgb_to_f32(self.rgb())
    }

    /// CSS hex color for DOM widgets
    pub fn css_color(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeable_subset() {
        assert!(BlockKind::Dirt.is_placeable());
        assert!(BlockKind::Leaf.is_placeable());
        assert!(!BlockKind::Bedrock.is_placeable());
        assert!(!BlockKind::Empty.is_placeable());
        assert_eq!(BlockKind::Wood.hotbar_slot(), Some(2));
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        let json = serde_json::to_string(&BlockKind::Bedrock).unwrap();
        assert_eq!(json, "\"bedrock\"");
        let kind: BlockKind = serde_json::from_str("\"leaf\"").unwrap();
        assert_eq!(kind, BlockKind::Leaf);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(BlockKind::Dirt.css_color(), "#b97a57");
    }
}
