use super::{Error, ServiceBuilder};
use crate::models::evaluator::CountingEvaluator;
use crate::models::{
    BestTracker, Breeder, CountSource, DIRECTIONS, DelayModel, MAX_VEHICLE_COUNT,
    NeverTerminated, ParameterError, Parameters, Report, Request, RunStatus, Schedule,
    ScheduleDecision, SignalTiming, Terminated,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::instrument;

/// Optimizes green times for one intersection configuration.
///
/// Each call is an independent run that owns its population and RNG, so a
/// single service can be shared between threads.
#[derive(Debug, Clone)]
pub struct Service {
    pub(super) parameters: Parameters,
    pub(super) capacity: Vec<u32>,
    pub(super) time_budget: Option<Duration>,
    pub(super) attempts_per_individual: usize,
    pub(super) refill_attempts: usize,
}

impl Service {
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::default()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn capacity(&self) -> &[u32] {
        &self.capacity
    }

    pub fn schedule(&self) -> Schedule {
        let schedule = Schedule::generational(self.parameters.max_iter);
        match self.time_budget {
            Some(time_budget) => schedule.with_time_budget(time_budget),
            None => schedule,
        }
    }

    /// Runs the full schedule for `cars`, one count per light.
    pub fn optimize<R: Rng>(&self, cars: &[u32], rng: &mut R) -> Result<Report, Error> {
        self.optimize_with(cars, rng, &NeverTerminated)
    }

    /// Like [`Service::optimize`], but stops before the next generation once
    /// `terminated` is set. An interrupted run still reports its best timing.
    #[instrument(level = "info", skip(self, rng, terminated), fields(cars = ?cars))]
    pub fn optimize_with<R: Rng, T: Terminated + ?Sized>(
        &self,
        cars: &[u32],
        rng: &mut R,
        terminated: &T,
    ) -> Result<Report, Error> {
        tracing::info!("Optimization request received");

        let request = Request::new(
            self.parameters.clone(),
            self.schedule(),
            cars,
            &self.capacity,
        )?;

        self.run(&request, rng, terminated)
    }

    #[instrument(level = "info", skip_all, fields(request_id = %request.id()))]
    fn run<R: Rng, T: Terminated + ?Sized>(
        &self,
        request: &Request,
        rng: &mut R,
        terminated: &T,
    ) -> Result<Report, Error> {
        let clock = Instant::now();
        let population_size = request.parameters().population_size;

        let morphology = request.morphology()?;
        let mutagen = request.mutagen()?;
        let model = DelayModel::new(request.parameters().cycle_time, request.congestion());
        let evaluator = CountingEvaluator::new(&model);

        let mut population = request
            .distribution()
            .with_attempts_per_individual(self.attempts_per_individual)
            .distribute(rng, &morphology, &evaluator)?;

        let initial = population
            .best()
            .cloned()
            .ok_or_else(|| Error::optimization_failed("initial population is empty"))?;
        tracing::info!(
            best_delay = initial.total_delay(),
            green_times = ?initial.genes(),
            "Initial population generated"
        );

        let mut tracker = BestTracker::new(initial);
        let breeder = Breeder::new(
            &morphology,
            request.selector(),
            &mutagen,
            self.refill_attempts,
        );

        let mut generations = 0;
        let status = loop {
            match request
                .schedule()
                .decide(generations, clock.elapsed(), terminated)
            {
                ScheduleDecision::Breed { generation } => {
                    let offspring = breeder.breed(rng, &population, population_size, &evaluator);
                    population.merge(offspring, population_size);
                    generations = generation;

                    let best = population
                        .best()
                        .ok_or_else(|| Error::optimization_failed("population died out"))?;
                    tracker.observe(best);

                    tracing::info!(
                        generation,
                        best_delay = tracker.best().total_delay(),
                        green_times = ?tracker.best().genes(),
                        "Generation completed"
                    );
                }
                ScheduleDecision::Complete => break RunStatus::Completed,
                ScheduleDecision::TimedOut => {
                    tracing::warn!(generations, elapsed = ?clock.elapsed(), "Time budget spent");
                    break RunStatus::TimedOut;
                }
                ScheduleDecision::Interrupted => {
                    tracing::warn!(generations, "Optimization interrupted");
                    break RunStatus::Interrupted;
                }
            }
        };

        let evaluations = evaluator.count();
        let (best, history) = tracker.into_parts();
        let timing = SignalTiming::extract(Some(&best))?;

        tracing::info!(
            ?status,
            generations,
            evaluations,
            best_delay = best.total_delay(),
            "Optimization finished"
        );

        Ok(Report {
            id: request.id(),
            started_at: request.requested_at,
            finished_at: Utc::now(),
            status,
            cars: request.cars.clone(),
            timing,
            best,
            history,
            generations,
            evaluations,
            media: Vec::new(),
        })
    }

    /// Runs on tokio's blocking pool with an `StdRng` seeded from `seed`.
    ///
    /// When `timeout` elapses the run is interrupted before its next
    /// generation and reported as [`RunStatus::TimedOut`].
    #[instrument(level = "info", skip(self), fields(cars = ?cars, seed = seed, timeout = ?timeout))]
    pub async fn optimize_with_timeout(
        &self,
        cars: Vec<u32>,
        seed: u64,
        timeout: Duration,
    ) -> Result<Report, Error> {
        let terminated = Arc::new(AtomicBool::new(false));

        let service = self.clone();
        let flag = terminated.clone();
        let mut handle = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            service.optimize_with(&cars, &mut rng, &*flag)
        });

        match tokio::time::timeout(timeout, &mut handle).await {
            Ok(joined) => joined?,
            Err(_) => {
                tracing::warn!("Timeout elapsed, interrupting optimization");
                terminated.store(true, Ordering::Relaxed);

                let mut report = handle.await??;
                if report.status == RunStatus::Interrupted {
                    report.status = RunStatus::TimedOut;
                }
                Ok(report)
            }
        }
    }

    /// Fetches counts from `source` and optimizes for them. Each count is
    /// capped at [`MAX_VEHICLE_COUNT`].
    #[instrument(level = "info", skip(self, source, rng))]
    pub async fn optimize_counts<S: CountSource + ?Sized, R: Rng>(
        &self,
        source: &S,
        rng: &mut R,
    ) -> Result<Report, Error> {
        let counts = source.counts().await.map_err(Error::CountSource)?;

        if counts.cars.len() != DIRECTIONS {
            return Err(ParameterError::LengthMismatch {
                name: "cars",
                expected: DIRECTIONS,
                provided: counts.cars.len(),
            }
            .into());
        }
        if !counts.media.is_empty() && counts.media.len() != DIRECTIONS {
            return Err(ParameterError::LengthMismatch {
                name: "media",
                expected: DIRECTIONS,
                provided: counts.media.len(),
            }
            .into());
        }

        let cars: Vec<u32> = counts
            .cars
            .iter()
            .map(|&count| count.min(MAX_VEHICLE_COUNT))
            .collect();

        let mut report = self.optimize(&cars, rng)?;
        report.media = counts.media;
        Ok(report)
    }
}

/// Optimizes `cars` with default parameters and capacities, returning only
/// the timing.
pub fn optimize_traffic(cars: &[u32]) -> Result<SignalTiming, Error> {
    let service = Service::builder().build()?;
    let report = service.optimize(cars, &mut rand::rng())?;
    Ok(report.timing)
}
