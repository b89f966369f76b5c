use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// A single game from first reveal to win or loss.
///
/// Mines are requested from the generator on the first reveal, so the first revealed cell is always safe.
#[derive(Clone, Debug)]
pub struct PlayEngine<G = RandomMinefieldGenerator> {
    config: GameConfig,
    grid: Array2<Cell>,
    generator: G,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Ix2>,
}

impl PlayEngine {
    /// Validates the dimensions and creates a game with seeded random mine placement.
    pub fn initialize(rows: Coord, cols: Coord, mines: Coord, seed: u64) -> Result<Self> {
        let config = GameConfig::new(rows, cols, mines)?;
        Ok(Self::new(config, RandomMinefieldGenerator::new(seed)))
    }
}

impl<G> PlayEngine<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            grid: Array2::default(config.size().to_nd_index()),
            generator,
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Ix2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    /// Whether the mines have been laid, which happens on the first reveal.
    pub fn mines_placed(&self) -> bool {
        !self.state.is_initial()
    }

    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.flagged_count as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let pos = self.config.validate_coords(coords)?;
        Ok(self.grid[pos.to_nd_index()])
    }

    pub fn triggered_mine(&self) -> Option<Ix2> {
        self.triggered_mine
    }

    pub(crate) fn grid(&self) -> &Array2<Cell> {
        &self.grid
    }

    pub(crate) fn count_adjacent_mines(&self, pos: Ix2) -> u8 {
        self.grid
            .iter_neighbors(pos)
            .filter(|&neighbor| self.grid[neighbor.to_nd_index()].mine)
            .count() as u8
    }

    fn count_flagged_neighbors(&self, pos: Ix2) -> u8 {
        self.grid
            .iter_neighbors(pos)
            .filter(|&neighbor| self.grid[neighbor.to_nd_index()].flagged)
            .count() as u8
    }
}

impl<G: MinefieldGenerator> PlayEngine<G> {
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let pos = self.config.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.grid[pos.to_nd_index()];
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::debug!("Toggled flag at {:?}, flagged: {}", pos, cell.flagged);
        Ok(MarkOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let pos = self.config.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.grid[pos.to_nd_index()];
        if cell.flagged || cell.revealed {
            return Ok(RevealOutcome::NoChange);
        }

        if self.state.is_initial() {
            self.place_mines(pos)?;
        }

        Ok(self.reveal_single_cell(pos))
    }

    /// Reveal a hidden cell, or every unflagged neighbour of a number whose flags are all placed.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let pos = self.config.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.grid[pos.to_nd_index()];
        match cell.adjacent {
            Some(count) if cell.revealed && count == self.count_flagged_neighbors(pos) => {
                Ok(self
                    .grid
                    .iter_neighbors(pos)
                    .map(|neighbor| self.reveal_single_cell(neighbor))
                    .reduce(core::ops::BitOr::bitor)
                    .unwrap_or(RevealOutcome::NoChange))
            }
            _ if cell.revealed => Ok(RevealOutcome::NoChange),
            _ => self.reveal(coords),
        }
    }

    fn place_mines(&mut self, start: Ix2) -> Result<()> {
        let mut layout = self.generator.generate(&self.config, start)?;
        if layout.size() != self.config.size() || layout.mine_count() != self.config.mines() {
            log::warn!(
                "Rejected layout of {:?} with {} mines for config {:?}",
                layout.size(),
                layout.mine_count(),
                self.config
            );
            return Err(GameError::InvalidLayout);
        }

        if let Some(moved_to) = layout.relocate_mine(start) {
            log::debug!("Moved mine away from first reveal {:?} to {:?}", start, moved_to);
        }

        for (pos, cell) in self.grid.indexed_iter_mut() {
            cell.mine = layout.contains_mine(pos);
        }
        self.state = GameState::InProgress;
        log::debug!("Placed {} mines, game started at {:?}", layout.mine_count(), start);
        Ok(())
    }

    /// Reveals one hidden, unflagged cell and flood-fills from it when it has no adjacent mines.
    fn reveal_single_cell(&mut self, pos: Ix2) -> RevealOutcome {
        if self.state.is_finished() {
            return RevealOutcome::NoChange;
        }

        let cell = self.grid[pos.to_nd_index()];
        if cell.revealed || cell.flagged {
            return RevealOutcome::NoChange;
        }

        if cell.mine {
            self.grid[pos.to_nd_index()].revealed = true;
            self.triggered_mine = Some(pos);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        let mut to_visit = VecDeque::from([pos]);
        while let Some(visit_pos) = to_visit.pop_front() {
            let visit_cell = self.grid[visit_pos.to_nd_index()];
            // the revealed flag doubles as the visited set
            if visit_cell.revealed || visit_cell.flagged || visit_cell.mine {
                continue;
            }

            let count = self.count_adjacent_mines(visit_pos);
            let visit_cell = &mut self.grid[visit_pos.to_nd_index()];
            visit_cell.revealed = true;
            visit_cell.adjacent = Some(count);
            self.revealed_count += 1;
            log::trace!("Revealed {:?}, adjacent mines: {}", visit_pos, count);

            if count == 0 {
                to_visit.extend(self.grid.iter_neighbors(visit_pos).filter(|&neighbor| {
                    let neighbor = self.grid[neighbor.to_nd_index()];
                    !neighbor.revealed && !neighbor.flagged
                }));
            }
        }

        if self.revealed_count == self.config.safe_cells() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            GameState::Won
        } else {
            GameState::Lost
        };
        log::debug!(
            "Game ended: {:?}, revealed {} of {} safe cells",
            self.state,
            self.revealed_count,
            self.config.safe_cells()
        );
        self.reveal_remaining();
    }

    /// Opens every cell still hidden at game end. `revealed_count` keeps counting only the player's reveals.
    fn reveal_remaining(&mut self) {
        for pos in ndarray::indices(self.grid.dim()) {
            let cell = self.grid[pos.to_nd_index()];
            if cell.revealed {
                continue;
            }

            let adjacent = (!cell.mine).then(|| self.count_adjacent_mines(pos));
            let cell = &mut self.grid[pos.to_nd_index()];
            cell.revealed = true;
            cell.adjacent = adjacent;
        }
    }
}
