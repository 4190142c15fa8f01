mod engine;
pub mod region;

pub use engine::{Outcome, QuizEngine, RoundPhase};
pub use region::{Region, RegionState};
