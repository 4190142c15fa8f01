use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between the dataset file and a resolved click.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The dataset collapses to a point or a line; no scale can be derived.
    #[error("degenerate bounding box (lon span {lon_span}, lat span {lat_span}): both spans must be positive")]
    DegenerateBounds { lon_span: f64, lat_span: f64 },

    /// A prompt or click was requested while no round is in progress.
    #[error("no active round: call start() before prompting or submitting clicks")]
    NoActiveRound,

    /// The round order referenced a region the engine does not know.
    /// Internal-consistency fault, never user-facing.
    #[error("unknown region reference: {0}")]
    UnknownRegion(String),

    #[error("dataset file not found: {0}")]
    MissingFile(PathBuf),

    #[error("malformed dataset: {0}")]
    DataFormat(String),
}
