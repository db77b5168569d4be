use rand::{SeedableRng, rngs::StdRng};
use signal_timing_ga::models::{Direction, InitializationError, Parameters, RunStatus};
use signal_timing_ga::{Error, Service, optimize_traffic};
use std::time::Duration;

fn service(parameters: Parameters) -> Service {
    Service::builder()
        .with_parameters(parameters)
        .build()
        .expect("valid parameters")
}

#[test]
fn test_default_run_yields_a_feasible_timing() {
    let mut rng = StdRng::seed_from_u64(42);
    let parameters = Parameters::default();

    let report = service(parameters.clone())
        .optimize(&[5, 5, 5, 5], &mut rng)
        .unwrap();

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.generations, parameters.max_iter);
    assert_eq!(report.timing.phases().len(), 4);
    for direction in Direction::FOUR_WAY {
        let green = report.timing.get(direction).unwrap();
        assert!((10..=60).contains(&green), "{direction} got {green}");
    }
    assert!(report.timing.total_green() <= 148);

    let first = report.history.first().unwrap();
    let last = report.history.last().unwrap();
    assert!(last <= first);
}

#[test]
fn test_best_delay_never_increases() {
    let mut rng = StdRng::seed_from_u64(3);

    let report = service(Parameters {
        population_size: 60,
        max_iter: 40,
        ..Default::default()
    })
    .optimize(&[12, 3, 18, 7], &mut rng)
    .unwrap();

    assert_eq!(report.history.len(), 41);
    assert!(report.history.windows(2).all(|pair| pair[1] <= pair[0]));
    assert_eq!(*report.history.last().unwrap(), report.best.total_delay());
}

#[test]
fn test_inverted_green_bounds_are_infeasible() {
    let mut rng = StdRng::seed_from_u64(42);

    let result = service(Parameters {
        green_min: 80,
        ..Default::default()
    })
    .optimize(&[5, 5, 5, 5], &mut rng);

    assert!(matches!(result, Err(Error::InfeasibleParameters(_))));
}

#[test]
fn test_minimum_greens_longer_than_the_cycle_are_infeasible() {
    let mut rng = StdRng::seed_from_u64(42);

    let result = service(Parameters {
        green_min: 40,
        ..Default::default()
    })
    .optimize(&[5, 5, 5, 5], &mut rng);

    assert!(matches!(
        result,
        Err(Error::InfeasibleParameters(
            InitializationError::CycleTooShort {
                min_green_sum: 160,
                cycle_time: 148
            }
        ))
    ));
}

#[test]
fn test_huge_green_bounds_fail_without_panicking() {
    let mut rng = StdRng::seed_from_u64(42);

    let result = service(Parameters {
        population_size: 5,
        max_iter: 1,
        green_max: i64::MAX / 2,
        cycle_time: i64::MAX,
        ..Default::default()
    })
    .optimize(&[5, 5, 5, 5], &mut rng);

    // green times this large do not fit in whole seconds of a timing
    assert!(matches!(
        result,
        Ok(_) | Err(Error::OptimizationFailed { .. })
    ));
}

#[test]
fn test_full_lanes_are_never_penalized() {
    let mut rng = StdRng::seed_from_u64(42);

    let report = service(Parameters {
        population_size: 100,
        ..Default::default()
    })
    .optimize(&[20, 20, 20, 20], &mut rng)
    .unwrap();

    assert!(!report.best.is_penalized());
    assert!(report.history.iter().all(|delay| delay.is_finite()));
}

#[test]
fn test_same_seed_gives_the_same_run() {
    let service = service(Parameters {
        population_size: 80,
        max_iter: 10,
        ..Default::default()
    });

    let first = service
        .optimize(&[9, 4, 15, 2], &mut StdRng::seed_from_u64(1234))
        .unwrap();
    let second = service
        .optimize(&[9, 4, 15, 2], &mut StdRng::seed_from_u64(1234))
        .unwrap();

    assert_eq!(first.best.genes(), second.best.genes());
    assert_eq!(first.history, second.history);
    assert_eq!(first.evaluations, second.evaluations);
    assert_ne!(first.id, second.id);
}

#[test]
fn test_spent_budget_returns_the_initial_best() {
    let mut rng = StdRng::seed_from_u64(42);

    let report = Service::builder()
        .with_parameters(Parameters {
            population_size: 50,
            ..Default::default()
        })
        .with_time_budget(Duration::ZERO)
        .build()
        .unwrap()
        .optimize(&[5, 5, 5, 5], &mut rng)
        .unwrap();

    assert_eq!(report.status, RunStatus::TimedOut);
    assert_eq!(report.generations, 0);
    assert_eq!(report.history, vec![report.best.total_delay()]);
    assert_eq!(report.evaluations, 50);
}

#[test]
fn test_three_light_intersections_use_lane_labels() {
    let mut rng = StdRng::seed_from_u64(42);

    let report = Service::builder()
        .with_parameters(Parameters {
            population_size: 40,
            num_lights: 3,
            max_iter: 5,
            ..Default::default()
        })
        .build()
        .unwrap()
        .optimize(&[5, 10, 15], &mut rng)
        .unwrap();

    let map = report.timing.to_map();
    assert_eq!(map.len(), 3);
    assert!(map.contains_key("lane_0"));
    assert!(map.contains_key("lane_2"));
}

#[test]
fn test_wrong_number_of_counts_is_rejected() {
    let mut rng = StdRng::seed_from_u64(42);

    let result = service(Parameters::default()).optimize(&[5, 5, 5], &mut rng);

    assert!(matches!(result, Err(Error::InvalidParameters(_))));
}

#[test]
fn test_optimize_traffic_returns_a_four_way_timing() {
    let timing = optimize_traffic(&[10, 2, 7, 0]).unwrap();

    assert_eq!(timing.phases().len(), 4);
    assert!(timing.total_green() <= 148);
    assert!(timing.phases().iter().all(|p| (10..=60).contains(&p.green_seconds)));
}
