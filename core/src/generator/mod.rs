use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Source of mine layouts, consulted once on the first reveal of a game.
///
/// Implementations should keep `start` free of mines; the engine relocates a mine found there anyway.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, start: Ix2) -> Result<MineLayout>;
}

impl<G: MinefieldGenerator + ?Sized> MinefieldGenerator for &mut G {
    fn generate(&mut self, config: &GameConfig, start: Ix2) -> Result<MineLayout> {
        (**self).generate(config, start)
    }
}
