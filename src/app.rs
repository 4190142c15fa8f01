use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratatui::style::Color;

use crate::data::RegionRecord;
use crate::error::QuizError;
use crate::map::projection::{GeoBounds, Projector};
use crate::quiz::region::project_records;
use crate::quiz::{Outcome, QuizEngine};

/// Fill colors applied to resolved regions. Fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct QuizColors {
    pub correct: Color,
    pub incorrect: Color,
}

impl Default for QuizColors {
    fn default() -> Self {
        Self {
            correct: Color::Green,
            incorrect: Color::Red,
        }
    }
}

/// Application state: the quiz engine plus everything the event loop and the
/// widgets need around it (colors, feedback line, terminal geometry).
pub struct App {
    pub engine: QuizEngine,
    pub colors: QuizColors,
    pub status: String,
    pub should_quit: bool,
    term_width: usize,
    term_height: usize,
    bounds: GeoBounds,
    rng: SmallRng,
}

impl App {
    /// Build the full pipeline: dataset bounds → projector sized to the
    /// initial terminal → projected regions → engine with a started round.
    pub fn new(
        records: Vec<RegionRecord>,
        term_width: usize,
        term_height: usize,
        colors: QuizColors,
    ) -> Result<Self, QuizError> {
        let bounds = GeoBounds::from_points(
            records
                .iter()
                .flat_map(|r| r.rings.iter().flatten().copied()),
        );

        let (pw, ph) = surface_size(term_width, term_height);
        let projector = Projector::new(bounds, pw, ph)?;
        let regions = project_records(records, &projector);

        let mut engine = QuizEngine::new(regions);
        let mut rng = SmallRng::from_os_rng();
        engine.start(&mut rng);

        Ok(Self {
            engine,
            colors,
            status: String::new(),
            should_quit: false,
            term_width,
            term_height,
            bounds,
            rng,
        })
    }

    /// Name the player should click next. The app restarts rounds
    /// immediately, so a prompt is always available outside of shutdown.
    pub fn prompt(&self) -> String {
        self.engine
            .current_prompt()
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Handle a left click at terminal cell (col, row).
    pub fn handle_click(&mut self, col: u16, row: u16) {
        let (col, row) = (col as usize, row as usize);

        // Only clicks inside the map block's border resolve; the status bar
        // and frame are not the ocean.
        let inside = col >= 1
            && col + 1 < self.term_width
            && row >= 1
            && self.term_height >= 3
            && row + 2 < self.term_height;
        if !inside {
            return;
        }

        // Terminal cell → Braille pixel, sampling the cell center.
        let px = ((col - 1) * 2 + 1) as i32;
        let py = ((row - 1) * 4 + 2) as i32;

        match self.engine.submit_click(px, py) {
            Ok(outcome) => {
                self.status = feedback(&outcome);
                if self.engine.is_round_complete() {
                    self.status = format!(
                        "Round complete! All {} regions prompted. Starting a new round...",
                        self.engine.region_count()
                    );
                    self.engine.start(&mut self.rng);
                }
            }
            // Unreachable while the app restarts rounds itself.
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Reshuffle into a fresh round on demand.
    pub fn restart_round(&mut self) {
        self.engine.start(&mut self.rng);
        self.status = String::from("New round.");
    }

    /// The projector is immutable, so a terminal resize builds a new one and
    /// reprojects every cached ring.
    pub fn resize(&mut self, term_width: usize, term_height: usize) -> Result<(), QuizError> {
        self.term_width = term_width;
        self.term_height = term_height;
        let (pw, ph) = surface_size(term_width, term_height);
        let projector = Projector::new(self.bounds, pw, ph)?;
        self.engine.reproject(&projector);
        Ok(())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// Render-surface size in Braille pixels for a terminal of (width, height)
/// cells: the map block inner area (1-cell border, 1-line status bar) at 2x4
/// dots per cell.
fn surface_size(term_width: usize, term_height: usize) -> (usize, usize) {
    let inner_width = term_width.saturating_sub(2).max(1);
    let inner_height = term_height.saturating_sub(3).max(1);
    (inner_width * 2, inner_height * 4)
}

fn feedback(outcome: &Outcome) -> String {
    if outcome.is_correct {
        format!("Correct! {}", outcome.region)
    } else {
        match &outcome.hit {
            Some(hit) => format!(
                "Incorrect. You clicked {hit}, correct answer: {}",
                outcome.region
            ),
            None => format!("Ocean click. Correct answer: {}", outcome.region),
        }
    }
}
