use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::instrument;

/// Cooperative cancellation signal checked between generations.
pub trait Terminated {
    fn is_terminated(&self) -> bool;
}

impl Terminated for AtomicBool {
    fn is_terminated(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// A run that can only end by exhausting its schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTerminated;

impl Terminated for NeverTerminated {
    fn is_terminated(&self) -> bool {
        false
    }
}

/// Controls how long an optimization run keeps breeding generations.
///
/// A run always stops after `max_generations`. An optional wall-clock
/// `time_budget` ends it earlier; the best timing found so far is still
/// returned in that case.
///
/// # Examples
///
/// ```rust
/// use signal_timing_ga::models::Schedule;
/// use std::time::Duration;
///
/// // 25 generations, no deadline
/// let schedule = Schedule::generational(25);
///
/// // At most 500 generations or two seconds, whichever comes first
/// let bounded = Schedule::generational(500).with_time_budget(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Schedule {
    /// Number of generations to breed before the run completes.
    pub max_generations: u32,
    /// Wall-clock budget for the whole run, initialization included.
    pub time_budget: Option<Duration>,
}

/// Decision about what the evolution loop does next.
#[derive(Debug, PartialEq)]
pub enum ScheduleDecision {
    /// Breed the given generation (1-based).
    Breed { generation: u32 },
    /// All generations were bred.
    Complete,
    /// The time budget ran out.
    TimedOut,
    /// The run was cancelled from outside.
    Interrupted,
}

impl Schedule {
    pub fn generational(max_generations: u32) -> Self {
        Self {
            max_generations,
            time_budget: None,
        }
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = Some(time_budget);
        self
    }

    /// Decides the next step given the generations bred so far and the time
    /// elapsed since the run started.
    #[instrument(level = "debug", skip(self, terminated), fields(max_generations = self.max_generations, time_budget = ?self.time_budget))]
    pub(crate) fn decide<T: Terminated + ?Sized>(
        &self,
        completed_generations: u32,
        elapsed: Duration,
        terminated: &T,
    ) -> ScheduleDecision {
        if completed_generations >= self.max_generations {
            return ScheduleDecision::Complete;
        }

        if terminated.is_terminated() {
            return ScheduleDecision::Interrupted;
        }

        if self.time_budget.is_some_and(|budget| elapsed >= budget) {
            return ScheduleDecision::TimedOut;
        }

        ScheduleDecision::Breed {
            generation: completed_generations + 1,
        }
    }
}
