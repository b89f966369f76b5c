use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniformly random placement that never puts a mine on the starting cell.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R = SmallRng> {
    rng: R,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMinefieldGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn generate(&mut self, config: &GameConfig, start: Ix2) -> Result<MineLayout> {
        let (rows, cols) = config.size();
        let start_index = start.0 * cols + start.1;
        let candidates = config.total_cells() - 1;

        let mut mines: Array2<bool> = Array2::default([rows, cols]);
        {
            let cells = mines
                .as_slice_mut()
                .ok_or(GameError::InvalidLayout)?;
            // sample among every cell but the start, then shift past it
            for index in rand::seq::index::sample(&mut self.rng, candidates, config.mines()) {
                let index = if index >= start_index { index + 1 } else { index };
                cells[index] = true;
            }
        }

        let layout = MineLayout::from_mine_mask(mines);
        log::debug!(
            "Generated {} mines on {}x{} board avoiding {:?}",
            layout.mine_count(),
            rows,
            cols,
            start
        );
        Ok(layout)
    }
}
