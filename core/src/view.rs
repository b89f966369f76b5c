use alloc::string::String;
use core::fmt;
use core::iter::FusedIterator;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

impl<G> PlayEngine<G> {
    /// What the player sees at `pos`.
    ///
    /// The grid is fully revealed once the game is over. Before that, `reveal_all` shows mines and counts of
    /// hidden cells, as long as the mines have been placed.
    pub fn cell_view(&self, pos: Ix2, reveal_all: bool) -> CellView {
        let cell = self.grid()[pos.to_nd_index()];
        let show_all = reveal_all && self.mines_placed();

        match cell {
            Cell { mine: true, .. } if self.triggered_mine() == Some(pos) => CellView::Exploded,
            Cell {
                flagged: true,
                mine: false,
                ..
            } if self.state() == GameState::Lost => CellView::IncorrectFlag,
            Cell { flagged: true, .. } => CellView::Flagged,
            Cell {
                revealed: true,
                mine: true,
                ..
            } => CellView::Mine,
            Cell {
                revealed: true,
                adjacent,
                ..
            } => CellView::Open(adjacent.unwrap_or_else(|| self.count_adjacent_mines(pos))),
            Cell { mine: true, .. } if show_all => CellView::Mine,
            _ if show_all => CellView::Open(self.count_adjacent_mines(pos)),
            _ => CellView::Hidden,
        }
    }

    /// Text rendering of the board, one string per row.
    pub fn render(&self, reveal_all: bool) -> Render<'_, G> {
        Render {
            engine: self,
            reveal_all,
        }
    }

    pub fn snapshot(&self, reveal_all: bool) -> Snapshot {
        Snapshot::from_engine(self, reveal_all)
    }
}

/// Lazy view over the rows of a board.
///
/// Iterating yields each row as cell symbols separated by spaces. The view is `Copy`, so it can be iterated any
/// number of times; `Display` adds row and column indices.
pub struct Render<'a, G> {
    engine: &'a PlayEngine<G>,
    reveal_all: bool,
}

impl<G> Clone for Render<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for Render<'_, G> {}

impl<'a, G> Render<'a, G> {
    pub fn rows(self) -> RenderRows<'a, G> {
        RenderRows {
            render: self,
            row: 0,
        }
    }

    fn row_string(&self, row: usize) -> String {
        let cols = self.engine.size().1;
        let mut line = String::with_capacity(cols * 2);
        for col in 0..cols {
            if col > 0 {
                line.push(' ');
            }
            line.push(self.engine.cell_view((row, col), self.reveal_all).symbol());
        }
        line
    }
}

impl<'a, G> IntoIterator for Render<'a, G> {
    type Item = String;
    type IntoIter = RenderRows<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

impl<G> fmt::Display for Render<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.engine.size();
        let row_width = digits(rows - 1);
        let col_width = digits(cols - 1);

        write!(f, "{:row_width$}", "")?;
        for col in 0..cols {
            write!(f, " {col:>col_width$}")?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>row_width$}")?;
            for col in 0..cols {
                let symbol = self.engine.cell_view((row, col), self.reveal_all).symbol();
                write!(f, " {symbol:>col_width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

pub struct RenderRows<'a, G> {
    render: Render<'a, G>,
    row: usize,
}

impl<G> Iterator for RenderRows<'_, G> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.render.engine.size().0 {
            return None;
        }
        let line = self.render.row_string(self.row);
        self.row += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.render.engine.size().0.saturating_sub(self.row);
        (remaining, Some(remaining))
    }
}

impl<G> ExactSizeIterator for RenderRows<'_, G> {}

impl<G> FusedIterator for RenderRows<'_, G> {}

/// Structured counterpart of [`Render`] for front-ends that draw the board themselves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Ix2,
    pub state: GameState,
    pub mines: CellCount,
    pub mines_left: isize,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_engine<G>(engine: &PlayEngine<G>, reveal_all: bool) -> Self {
        let size = engine.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            engine.cell_view((row, col), reveal_all)
        });

        Self {
            size,
            state: engine.state(),
            mines: engine.total_mines(),
            mines_left: engine.mines_left(),
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn preset(
        (rows, cols): Coord2,
        mines: &[Coord2],
    ) -> PlayEngine<PresetMinefieldGenerator> {
        let config = GameConfig::new(rows, cols, mines.len() as Coord).unwrap();
        PlayEngine::new(config, PresetMinefieldGenerator::new(mines))
    }

    fn lines<G>(engine: &PlayEngine<G>, reveal_all: bool) -> Vec<String> {
        engine.render(reveal_all).into_iter().collect()
    }

    #[test]
    fn fresh_board_is_all_placeholders() {
        let engine = preset((2, 3), &[(1, 2)]);

        assert_eq!(lines(&engine, false), ["- - -", "- - -"]);
        assert_eq!(lines(&engine, true), ["- - -", "- - -"]);
    }

    #[test]
    fn hides_mines_until_requested() {
        let mut engine = preset((1, 5), &[(0, 3)]);
        engine.reveal((0, 0)).unwrap();
        engine.toggle_flag((0, 3)).unwrap();

        assert_eq!(engine.state(), GameState::InProgress);
        assert_eq!(lines(&engine, false), ["    1 F -"]);

        engine.toggle_flag((0, 3)).unwrap();
        assert_eq!(lines(&engine, false), ["    1 - -"]);
        assert_eq!(lines(&engine, true), ["    1 * 1"]);
    }

    #[test]
    fn loss_shows_all_mines_and_wrong_flags() {
        let mut engine = preset((2, 3), &[(0, 2), (1, 2)]);
        engine.toggle_flag((0, 1)).unwrap();
        engine.reveal((0, 0)).unwrap();
        engine.reveal((1, 2)).unwrap();

        assert_eq!(engine.state(), GameState::Lost);
        assert_eq!(lines(&engine, false), ["  ! *", "  2 X"]);
    }

    #[test]
    fn win_reveals_full_grid() {
        let mut engine = preset((3, 3), &[(2, 2)]);
        engine.reveal((0, 0)).unwrap();

        assert_eq!(lines(&engine, false), ["     ", "  1 1", "  1 *"]);
    }

    #[test]
    fn flags_stay_visible_after_game_end() {
        let mut engine = preset((1, 3), &[(0, 2)]);
        engine.toggle_flag((0, 2)).unwrap();
        engine.reveal((0, 0)).unwrap();

        assert_eq!(engine.state(), GameState::Won);
        assert!(engine.cell_at((0, 2)).unwrap().is_revealed());
        assert_eq!(lines(&engine, false), ["  1 F"]);
    }

    #[test]
    fn render_is_restartable() {
        let mut engine = preset((3, 3), &[(2, 2)]);
        engine.reveal((0, 0)).unwrap();
        let render = engine.render(false);

        let first: Vec<_> = render.into_iter().collect();
        let second: Vec<_> = render.rows().collect();

        assert_eq!(first, second);
        assert_eq!(render.rows().len(), 3);
    }

    #[test]
    fn display_adds_indices() {
        let engine = preset((2, 11), &[(0, 0)]);

        let text = alloc::format!("{}", engine.render(false));
        let mut text_lines = text.lines();

        assert_eq!(
            text_lines.next(),
            Some("   0  1  2  3  4  5  6  7  8  9 10")
        );
        assert_eq!(
            text_lines.next(),
            Some("0  -  -  -  -  -  -  -  -  -  -  -")
        );
        assert_eq!(text_lines.count(), 1);
    }

    #[test]
    fn snapshot_matches_render() {
        let mut engine = preset((2, 2), &[(1, 1)]);
        engine.reveal((0, 0)).unwrap();
        engine.toggle_flag((1, 1)).unwrap();

        let snapshot = engine.snapshot(false);

        assert_eq!(snapshot.size, (2, 2));
        assert_eq!(snapshot.state, GameState::InProgress);
        assert_eq!(snapshot.mines_left, 0);
        assert_eq!(snapshot.cells[(0, 0)], CellView::Open(1));
        assert_eq!(snapshot.cells[(0, 1)], CellView::Hidden);
        assert_eq!(snapshot.cells[(1, 1)], CellView::Flagged);
    }

    #[test]
    fn snapshot_serializes_cell_views() {
        assert_eq!(
            serde_json::to_string(&CellView::Open(2)).unwrap(),
            r#"{"Open":2}"#
        );
        assert_eq!(
            serde_json::to_string(&GameState::InProgress).unwrap(),
            r#""InProgress""#
        );

        let engine = preset((1, 2), &[(0, 1)]);
        let json = serde_json::to_string(&engine.snapshot(false)).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, engine.snapshot(false));
    }
}
