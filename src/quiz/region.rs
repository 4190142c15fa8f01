use rayon::prelude::*;

use crate::data::RegionRecord;
use crate::map::projection::Projector;

/// A geographic ring: ordered closed sequence of (lon, lat) vertices.
pub type GeoRing = Vec<(f64, f64)>;

/// The same ring in render-surface pixel coordinates.
pub type PixelRing = Vec<(i32, i32)>;

/// Per-round resolution state of a region. Transitions away from
/// `Unresolved` exactly once per round, when the region is prompted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionState {
    Unresolved,
    Correct,
    Incorrect,
}

/// One quiz-identifiable entity: a name plus one ring per constituent
/// polygon (archipelagos carry several), in both geographic and cached
/// pixel coordinates.
#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    pub rings: Vec<GeoRing>,
    pub projected: Vec<PixelRing>,
    pub state: RegionState,
}

impl Region {
    pub fn from_record(record: RegionRecord, projector: &Projector) -> Self {
        let projected = record.rings.iter().map(|r| projector.project_ring(r)).collect();
        Self {
            name: record.name,
            rings: record.rings,
            projected,
            state: RegionState::Unresolved,
        }
    }
}

/// Project every record once, in parallel. Runs to completion before the
/// engine accepts any click.
pub fn project_records(records: Vec<RegionRecord>, projector: &Projector) -> Vec<Region> {
    records
        .into_par_iter()
        .map(|record| Region::from_record(record, projector))
        .collect()
}
