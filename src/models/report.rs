use super::{Individual, MediaRef, SignalTiming};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// How a run ended. Every status carries a valid timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// All scheduled generations were bred.
    Completed,
    /// The wall-clock budget ran out; the timing is the best found so far.
    TimedOut,
    /// The run was cancelled; the timing is the best found so far.
    Interrupted,
}

/// Outcome of one optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
    /// Vehicle counts the run was optimized for.
    pub cars: Vec<u32>,
    pub timing: SignalTiming,
    pub best: Individual,
    /// Best delay of the initial population followed by the best delay after
    /// each generation.
    pub history: Vec<f64>,
    pub generations: u32,
    pub evaluations: u64,
    /// Inputs the counts were derived from, when they came from a count source.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaRef>,
}
