use alloc::vec::Vec;

use super::*;

/// Places mines at fixed coordinates, for scripted games and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMinefieldGenerator {
    mines: Vec<Coord2>,
}

impl PresetMinefieldGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MinefieldGenerator for PresetMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, start: Ix2) -> Result<MineLayout> {
        let layout = MineLayout::from_mine_coords(config.size(), &self.mines)
            .map_err(|_| GameError::InvalidLayout)?;
        if layout.contains_mine(start) {
            log::warn!("Preset layout has a mine on the starting cell {:?}", start);
        }
        Ok(layout)
    }
}
