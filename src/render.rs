//! Plain-text drawing of boards, palettes and level listings.

use puzzleville_core::{
    CellKind, CellView, Coord, Grid, LevelCatalog, LevelDefinition, TileSupply, TileType,
};
use serde::Serialize;
use std::fmt::Write as _;

/// Symbol for one cell.
pub fn cell_symbol(view: &CellView) -> &'static str {
    match view.kind {
        CellKind::Empty => "·",
        CellKind::Start => "S",
        CellKind::Goal => "G",
        CellKind::Obstacle => "#",
        CellKind::Tile => view.glyph.map(|glyph| glyph.symbol()).unwrap_or("?"),
    }
}

/// The board with row and column indices.
pub fn render_board(grid: &Grid) -> String {
    let width = grid.size().saturating_sub(1).to_string().len();
    let mut out = String::new();

    let header: Vec<String> = (0..grid.size())
        .map(|col| format!("{:>width$}", col))
        .collect();
    let _ = writeln!(out, "{:>width$} {}", "", header.join(" "));

    for (row, cells) in grid.views().iter().enumerate() {
        let symbols: Vec<String> = cells
            .iter()
            .map(|view| format!("{:>width$}", cell_symbol(view)))
            .collect();
        let _ = writeln!(out, "{:>width$} {}", row, symbols.join(" "));
    }
    out
}

/// Remaining tiles, with the pending type marked.
pub fn render_palette(supply: &TileSupply, pending: Option<TileType>) -> String {
    let mut out = String::new();
    for (tile, remaining) in supply.iter() {
        let marker = if pending == Some(tile) { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {} {:<12} ({}) x{}",
            marker,
            tile.icon(),
            tile.label(),
            tile,
            remaining
        );
    }
    out
}

/// Route as `(r, c) -> (r, c) -> ...`.
pub fn render_route(route: &[Coord]) -> String {
    route
        .iter()
        .map(Coord::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Advice printed by `hint`.
pub const HINT: &str =
    "Hint: Build a continuous path from S to G. Use 'rotate' to turn a placed tile!";

/// One-line summary of an attempt, for sharing.
pub fn share_text(level: usize, moves: usize, solved: bool) -> String {
    if solved {
        format!("I solved Level {} of PuzzleVille in {} moves!", level, moves)
    } else {
        format!(
            "I tried Level {} of PuzzleVille and made {} moves!",
            level, moves
        )
    }
}

/// Catalog entry as listed by `puzzleville levels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    /// Level number, 1-based.
    pub number: usize,
    /// The level itself.
    #[serde(flatten)]
    pub definition: LevelDefinition,
}

/// Every level in `catalog`, in order.
pub fn level_summaries(catalog: &LevelCatalog) -> Vec<LevelSummary> {
    catalog
        .iter()
        .map(|(number, definition)| LevelSummary {
            number,
            definition: definition.clone(),
        })
        .collect()
}

/// Human-readable level listing.
pub fn render_levels(summaries: &[LevelSummary]) -> String {
    let mut out = String::new();
    for summary in summaries {
        let def = &summary.definition;
        let tiles: Vec<String> = def
            .tiles()
            .iter()
            .map(|(tile, count)| format!("{} x{}", tile.label(), count))
            .collect();
        let _ = writeln!(
            out,
            "Level {}: {}x{}, start {}, goal {}, {} obstacles, tiles: {}",
            summary.number,
            def.size(),
            def.size(),
            def.start(),
            def.goal(),
            def.obstacles().len(),
            tiles.join(", ")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzleville_core::{EngineConfig, LevelInProgress};

    #[test]
    fn test_fresh_board() {
        let catalog = LevelCatalog::builtin();
        let attempt = LevelInProgress::load(&catalog, 1, EngineConfig::default()).unwrap();
        let expected = concat!(
            "  0 1 2 3 4\n",
            "0 S · · · ·\n",
            "1 · · · · ·\n",
            "2 · # · · ·\n",
            "3 · · · · ·\n",
            "4 · · · · G\n",
        );
        assert_eq!(render_board(attempt.session().grid()), expected);
    }

    #[test]
    fn test_board_shows_glyphs() {
        let catalog = LevelCatalog::builtin();
        let mut attempt = LevelInProgress::load(&catalog, 1, EngineConfig::default()).unwrap();
        attempt.select_tile(TileType::Straight);
        attempt.place_tile(Coord::new(0, 1)).unwrap();
        attempt.select_tile(TileType::Corner);
        attempt.place_tile(Coord::new(1, 1)).unwrap();
        attempt.rotate_tile(Coord::new(0, 1)).unwrap();

        let board = render_board(attempt.session().grid());
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines[1], "0 S ━ · · ·");
        assert_eq!(lines[2], "1 · ┗ · · ·");
    }

    #[test]
    fn test_palette_marks_pending() {
        let supply = TileSupply::new([(TileType::Straight, 6), (TileType::Corner, 5)]);
        let palette = render_palette(&supply, Some(TileType::Corner));
        let lines: Vec<&str> = palette.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  — Dirt Road"));
        assert!(lines[0].ends_with("x6"));
        assert!(lines[1].starts_with("* └ Corner Path"));
    }

    #[test]
    fn test_share_text() {
        assert_eq!(
            share_text(2, 11, true),
            "I solved Level 2 of PuzzleVille in 11 moves!"
        );
        assert_eq!(
            share_text(1, 3, false),
            "I tried Level 1 of PuzzleVille and made 3 moves!"
        );
    }

    #[test]
    fn test_level_summaries_serialize() {
        let summaries = level_summaries(&LevelCatalog::builtin());
        assert_eq!(summaries.len(), 3);
        let json = serde_json::to_value(&summaries).unwrap();
        assert_eq!(json[2]["number"], 3);
        assert_eq!(json[2]["size"], 8);
        assert_eq!(json[0]["obstacles"][0]["row"], 2);
    }

    #[test]
    fn test_route_text() {
        let route = [Coord::new(0, 0), Coord::new(0, 1)];
        assert_eq!(render_route(&route), "(0, 0) -> (0, 1)");
    }
}
