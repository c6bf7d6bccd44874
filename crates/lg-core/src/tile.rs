//! Tile classification of a lane-graph node.

use std::fmt;

/// What a node represents on the map.
///
/// `Road` and `Track` nodes are produced by topology expansion, `House` nodes
/// by house attachment.  `Blank` is never produced by the generator; it is
/// available to hand-built graphs and viewers for filler cells.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileType {
    #[default]
    Road,
    House,
    Blank,
    /// Road cell on the transit track line.
    Track,
}

impl TileType {
    /// `true` for tiles agents drive along (`Road` and `Track`).
    #[inline]
    pub fn is_roadway(self) -> bool {
        matches!(self, TileType::Road | TileType::Track)
    }

    /// Single-character glyph used by the ASCII map dump.
    pub fn glyph(self) -> char {
        match self {
            TileType::Road  => '-',
            TileType::House => 'H',
            TileType::Blank => '.',
            TileType::Track => 'T',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TileType::Road  => "road",
            TileType::House => "house",
            TileType::Blank => "blank",
            TileType::Track => "track",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
