use super::{Gene, Individual};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Approach of the intersection a green phase belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    West,
    East,
    /// Positional label used when the intersection does not have four lights.
    Lane(usize),
}

impl Direction {
    pub const FOUR_WAY: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Direction of the gene at `index` among `num_lights` genes.
    pub fn at(index: usize, num_lights: usize) -> Self {
        match (num_lights, Self::FOUR_WAY.get(index)) {
            (4, Some(direction)) => *direction,
            _ => Direction::Lane(index),
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
            Direction::East => write!(f, "east"),
            Direction::Lane(index) => write!(f, "lane_{index}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub direction: Direction,
    pub green_seconds: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no solution was produced")]
    NoSolution,
    #[error("green time {gene} is not a valid number of seconds")]
    InvalidGreenTime { gene: Gene },
}

/// Green time per direction, in direction order.
///
/// Serializes as a map from direction label to seconds, for example
/// `{"north": 37, "south": 37, "west": 37, "east": 37}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalTiming {
    phases: Vec<Phase>,
}

impl SignalTiming {
    /// Maps the best individual's genes onto directions by position.
    pub fn extract(best: Option<&Individual>) -> Result<Self, ExtractionError> {
        let best = best.ok_or(ExtractionError::NoSolution)?;
        Self::from_genes(best.genes())
    }

    pub fn from_genes(genes: &[Gene]) -> Result<Self, ExtractionError> {
        let seconds = genes
            .iter()
            .map(|&gene| u32::try_from(gene).map_err(|_| ExtractionError::InvalidGreenTime { gene }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_seconds(seconds))
    }

    pub fn from_seconds(seconds: Vec<u32>) -> Self {
        let num_lights = seconds.len();
        let phases = seconds
            .into_iter()
            .enumerate()
            .map(|(index, green_seconds)| Phase {
                direction: Direction::at(index, num_lights),
                green_seconds,
            })
            .collect();

        Self { phases }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn get(&self, direction: Direction) -> Option<u32> {
        self.phases
            .iter()
            .find(|phase| phase.direction == direction)
            .map(|phase| phase.green_seconds)
    }

    pub fn total_green(&self) -> u32 {
        self.phases.iter().map(|phase| phase.green_seconds).sum()
    }

    pub fn to_map(&self) -> BTreeMap<String, u32> {
        self.phases
            .iter()
            .map(|phase| (phase.direction.label(), phase.green_seconds))
            .collect()
    }
}

impl Serialize for SignalTiming {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.phases.len()))?;
        for phase in &self.phases {
            map.serialize_entry(&phase.direction.label(), &phase.green_seconds)?;
        }
        map.end()
    }
}
