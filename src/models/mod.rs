mod baseline;
mod breeder;
mod congestion;
mod convergence;
mod count_source;
mod crossover;
mod delay;
mod distribution;
pub(crate) mod evaluator;
mod gene_bounds;
mod genotype;
mod inversion;
mod morphology;
mod mutagen;
mod parameters;
mod population;
mod report;
mod request;
mod schedule;
mod selector;
mod timing;

pub use baseline::{BASELINE_MAX_GREEN, BASELINE_MIN_GREEN, proportional_timing};
pub use breeder::DEFAULT_REFILL_ATTEMPTS;
pub use congestion::Congestion;
pub use convergence::BestTracker;
pub use count_source::{CountSource, Counts, DIRECTIONS, MAX_VEHICLE_COUNT, MediaRef};
pub use crossover::crossover;
pub use delay::{
    DENOMINATOR_TOLERANCE, Degeneracy, Delay, DelayModel, Evaluation, PENALTY, lane_delay,
};
pub use distribution::{DEFAULT_ATTEMPTS_PER_INDIVIDUAL, Distribution, InitializationError};
pub use evaluator::Evaluator;
pub use gene_bounds::{GeneBoundError, GeneBounds, MUTATION_STEP_FRACTION};
pub use genotype::{Gene, Individual};
pub use inversion::invert;
pub use morphology::Morphology;
pub use mutagen::{Mutagen, RateOutOfRange};
pub use parameters::{DEFAULT_CAPACITY, ParameterError, Parameters};
pub use population::Population;
pub use report::{Report, RunStatus};
pub use request::Request;
pub use schedule::{NeverTerminated, Schedule, Terminated};
pub use selector::Selector;
pub use timing::{Direction, ExtractionError, Phase, SignalTiming};

pub(crate) use breeder::Breeder;
pub(crate) use schedule::ScheduleDecision;
