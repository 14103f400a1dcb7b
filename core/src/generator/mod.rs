use crate::*;
pub use batch::*;
pub use threshold::*;

mod batch;
mod threshold;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}
