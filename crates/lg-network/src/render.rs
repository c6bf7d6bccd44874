//! Plain-text map of the graph.

use crate::Graph;

/// Glyph for a node with at least one agent on it.
pub const AGENT_GLYPH: char = '@';
/// Glyph for a blocked, empty node.
pub const BLOCKED_GLYPH: char = '#';

impl Graph {
    /// Render one character per fine cell, rows separated by `'\n'`.
    ///
    /// Empty cells are spaces.  Occupied nodes show [`AGENT_GLYPH`], blocked
    /// ones [`BLOCKED_GLYPH`], and the rest their tile glyph.
    pub fn render_ascii(&self) -> String {
        let width = self.width() as usize;
        let height = self.height() as usize;
        let mut cells = vec![' '; width * height];

        for node in self.nodes() {
            let (Ok(x), Ok(y)) = (usize::try_from(node.x()), usize::try_from(node.y())) else {
                continue;
            };
            let glyph = if !node.occupants().is_empty() {
                AGENT_GLYPH
            } else if node.is_blocked() {
                BLOCKED_GLYPH
            } else {
                node.tile().glyph()
            };
            if let Some(cell) = cells.get_mut(y * width + x) {
                *cell = glyph;
            }
        }

        let mut out = String::with_capacity((width + 1) * height);
        for (i, row) in cells.chunks(width.max(1)).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row);
        }
        out
    }
}
