use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::map::geometry::point_in_ring;
use crate::map::projection::Projector;
use crate::quiz::region::{Region, RegionState};

/// Lifecycle of one round of prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Unstarted,
    InProgress,
    Complete,
}

/// What a click resolved to, for the rendering collaborator to apply.
/// `region` is the prompted region (the one whose state was decided);
/// `hit` is whatever the click actually landed on.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub is_correct: bool,
    pub region: String,
    pub new_state: RegionState,
    pub hit: Option<String>,
}

/// Owns all per-region quiz state and the current round: a shuffled prompt
/// order consumed front-to-back, with point-in-region hit detection against
/// the cached pixel geometry.
///
/// Fully synchronous; the surrounding event loop serializes clicks.
pub struct QuizEngine {
    regions: Vec<Region>,
    order: Vec<usize>,
    cursor: usize,
    phase: RoundPhase,
}

impl QuizEngine {
    pub fn new(regions: Vec<Region>) -> Self {
        Self {
            order: (0..regions.len()).collect(),
            regions,
            cursor: 0,
            phase: RoundPhase::Unstarted,
        }
    }

    /// Begin a fresh round: uniformly reshuffled prompt order, every region
    /// back to unresolved, cursor on the first prompt. The RNG is supplied
    /// by the caller so tests can seed it.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for region in &mut self.regions {
            region.state = RegionState::Unresolved;
        }
        self.order.shuffle(rng);
        self.cursor = 0;
        // An empty region set (loader-rejected, but constructible) has
        // nothing to prompt.
        self.phase = if self.order.is_empty() {
            RoundPhase::Complete
        } else {
            RoundPhase::InProgress
        };
        tracing::debug!(regions = self.regions.len(), "round started");
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// (prompts resolved so far, total prompts in the round)
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.order.len())
    }

    /// Name of the region the player should click next.
    pub fn current_prompt(&self) -> Result<&str, QuizError> {
        if self.phase != RoundPhase::InProgress {
            return Err(QuizError::NoActiveRound);
        }
        let idx = *self.order.get(self.cursor).ok_or(QuizError::NoActiveRound)?;
        self.region_name(idx)
    }

    /// Resolve a pixel to the region containing it, if any. Valid datasets
    /// do not overlap, so the first containing region is the only one.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<&str> {
        self.hit_index(x, y)
            .and_then(|idx| self.regions.get(idx))
            .map(|region| region.name.as_str())
    }

    fn hit_index(&self, x: i32, y: i32) -> Option<usize> {
        self.regions.iter().position(|region| {
            region
                .projected
                .iter()
                .any(|ring| point_in_ring(ring, x, y))
        })
    }

    /// Judge a click against the current prompt and advance the round.
    ///
    /// A correct click marks the prompted region correct. Anything else,
    /// the wrong region or open water alike, marks the prompted region
    /// incorrect, so the round always moves forward.
    pub fn submit_click(&mut self, x: i32, y: i32) -> Result<Outcome, QuizError> {
        if self.phase != RoundPhase::InProgress {
            return Err(QuizError::NoActiveRound);
        }

        let prompted = *self.order.get(self.cursor).ok_or(QuizError::NoActiveRound)?;
        let hit = self.hit_index(x, y);
        let is_correct = hit == Some(prompted);
        let new_state = if is_correct {
            RegionState::Correct
        } else {
            RegionState::Incorrect
        };

        let hit_name = hit.map(|idx| self.region_name(idx)).transpose()?.map(String::from);

        let region = self
            .regions
            .get_mut(prompted)
            .ok_or_else(|| QuizError::UnknownRegion(format!("round index {prompted}")))?;
        region.state = new_state;
        let name = region.name.clone();

        self.cursor += 1;
        if self.cursor >= self.order.len() {
            self.phase = RoundPhase::Complete;
        }

        Ok(Outcome {
            is_correct,
            region: name,
            new_state,
            hit: hit_name,
        })
    }

    pub fn is_round_complete(&self) -> bool {
        self.phase == RoundPhase::Complete
    }

    /// Recompute every cached pixel ring against a new projector; used when
    /// the render surface changes size. Round state is untouched.
    pub fn reproject(&mut self, projector: &Projector) {
        use rayon::prelude::*;
        self.regions.par_iter_mut().for_each(|region| {
            region.projected = region
                .rings
                .iter()
                .map(|ring| projector.project_ring(ring))
                .collect();
        });
    }

    fn region_name(&self, idx: usize) -> Result<&str, QuizError> {
        self.regions
            .get(idx)
            .map(|region| region.name.as_str())
            .ok_or_else(|| QuizError::UnknownRegion(format!("round index {idx}")))
    }
}
