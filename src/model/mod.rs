pub mod budget;
pub mod ladder;
pub mod media;
pub mod output;
pub mod plan;

pub use budget::SizeBudget;
pub use ladder::{Quality, QualityLadder, ScaleLadder};
pub use media::{MediaType, SourceFile};
pub use output::{CompressedOutput, Strategy};
pub use plan::{Attempt, Phase, Plan};
