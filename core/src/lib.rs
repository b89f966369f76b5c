#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::Serialize;

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;
mod view;

/// Validated board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    size: Ix2,
    mines: CellCount,
}

impl GameConfig {
    pub const BEGINNER: Self = Self::new_unchecked((9, 9), 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked((16, 16), 40);
    pub const EXPERT: Self = Self::new_unchecked((16, 30), 99);

    /// Longest allowed side of a board.
    pub const MAX_SIDE: usize = u16::MAX as usize;

    const fn new_unchecked(size: Ix2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Checks `rows x cols` with `mines` mines, which must leave at least one safe cell.
    ///
    /// Sides are capped at [`Self::MAX_SIDE`] and the grid must fit in a single allocation.
    pub fn new(rows: Coord, cols: Coord, mines: Coord) -> Result<Self> {
        let side = |len: Coord| {
            usize::try_from(len)
                .ok()
                .filter(|len| (1..=Self::MAX_SIDE).contains(len))
        };
        let (Some(rows), Some(cols)) = (side(rows), side(cols)) else {
            return Err(GameError::InvalidDimensions);
        };
        let total_cells = rows
            .checked_mul(cols)
            .filter(|&cells| {
                cells
                    .checked_mul(core::mem::size_of::<Cell>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(GameError::InvalidDimensions)?;
        let mines = usize::try_from(mines).map_err(|_| GameError::InvalidMineCount)?;
        if mines >= total_cells {
            return Err(GameError::InvalidMineCount);
        }
        Ok(Self::new_unchecked((rows, cols), mines))
    }

    pub const fn size(&self) -> Ix2 {
        self.size
    }

    pub const fn rows(&self) -> usize {
        self.size.0
    }

    pub const fn cols(&self) -> usize {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        self.size.0 * self.size.1
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Ix2> {
        checked_index(coords, self.size).ok_or(GameError::OutOfBounds)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Ix2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            let pos = checked_index(coords, size).ok_or(GameError::OutOfBounds)?;
            mine_mask[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Ix2 {
        self.mine_mask.dim()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, pos: Ix2) -> bool {
        self[pos]
    }

    /// Moves the mine at `from` to the first mine-free cell in row-major order, other than `from` itself.
    ///
    /// Returns the new position, or `None` when `from` holds no mine or there is nowhere to move it.
    pub fn relocate_mine(&mut self, from: Ix2) -> Option<Ix2> {
        if !self[from] {
            return None;
        }

        let (to, _) = self
            .mine_mask
            .indexed_iter()
            .find(|&(pos, &is_mine)| !is_mine && pos != from)?;
        self.mine_mask[from.to_nd_index()] = false;
        self.mine_mask[to.to_nd_index()] = true;
        Some(to)
    }
}

impl Index<Ix2> for MineLayout {
    type Output = bool;

    fn index(&self, pos: Ix2) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when revealing several cells at once
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_dimensions() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(5, 0, 1), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(-3, 5, 1), Err(GameError::InvalidDimensions));
    }

    #[test]
    fn config_rejects_oversized_dimensions() {
        let max = GameConfig::MAX_SIDE as Coord;

        assert_eq!(
            GameConfig::new(Coord::MAX, Coord::MAX, 0),
            Err(GameError::InvalidDimensions)
        );
        assert_eq!(GameConfig::new(max + 1, 1, 0), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(1, max + 1, 0), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(max, 1, 0).unwrap().size(), (GameConfig::MAX_SIDE, 1));
    }

    #[test]
    fn config_rejects_bad_mine_counts() {
        assert_eq!(GameConfig::new(3, 3, -1), Err(GameError::InvalidMineCount));
        assert_eq!(GameConfig::new(3, 3, 9), Err(GameError::InvalidMineCount));
        assert_eq!(GameConfig::new(1, 1, 1), Err(GameError::InvalidMineCount));
    }

    #[test]
    fn config_accepts_zero_and_maximal_mines() {
        let empty = GameConfig::new(1, 1, 0).unwrap();
        assert_eq!(empty.safe_cells(), 1);

        let dense = GameConfig::new(3, 3, 8).unwrap();
        assert_eq!(dense.size(), (3, 3));
        assert_eq!(dense.safe_cells(), 1);
    }

    #[test]
    fn presets_are_valid() {
        for preset in [
            GameConfig::BEGINNER,
            GameConfig::INTERMEDIATE,
            GameConfig::EXPERT,
        ] {
            let (rows, cols) = preset.size();
            let rebuilt =
                GameConfig::new(rows as Coord, cols as Coord, preset.mines() as Coord).unwrap();
            assert_eq!(rebuilt, preset);
        }
    }

    #[test]
    fn layout_from_coords_rejects_out_of_bounds() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn relocate_moves_mine_to_first_free_cell() {
        let mut layout = MineLayout::from_mine_coords((2, 2), &[(0, 0), (1, 1)]).unwrap();

        assert_eq!(layout.relocate_mine((1, 1)), Some((0, 1)));
        assert!(!layout.contains_mine((1, 1)));
        assert!(layout.contains_mine((0, 1)));
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.relocate_mine((1, 1)), None);
    }

    #[test]
    fn hit_mine_dominates_merged_outcomes() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
