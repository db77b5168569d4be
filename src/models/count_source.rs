use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Number of media inputs a count source must provide, one per approach.
pub const DIRECTIONS: usize = 4;

/// Counts above this are treated as this value.
pub const MAX_VEHICLE_COUNT: u32 = 100;

/// Stored reference to a raw input, for example an uploaded video path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef(pub String);

/// Vehicle counts per direction, in north, south, west, east order, and the
/// media they were derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counts {
    pub cars: Vec<u32>,
    pub media: Vec<MediaRef>,
}

/// Supplies vehicle counts for one optimization. How the counts are produced
/// (video analysis, loop detectors, manual entry) is up to the implementation.
pub trait CountSource {
    fn counts<'a>(&'a self) -> BoxFuture<'a, Result<Counts, anyhow::Error>>;
}
