use super::SignalTiming;

pub const BASELINE_MIN_GREEN: u32 = 5;
pub const BASELINE_MAX_GREEN: u32 = 30;

/// Green times proportional to the vehicle count of each direction, scaled so
/// the busiest direction gets [`BASELINE_MAX_GREEN`] and clamped to
/// `[BASELINE_MIN_GREEN, BASELINE_MAX_GREEN]`.
///
/// Ignores capacity and cycle time. Useful as a reference point for the
/// optimized timing.
pub fn proportional_timing(cars: &[u32]) -> SignalTiming {
    let busiest = cars.iter().copied().max().unwrap_or(0).max(1);

    let seconds = cars
        .iter()
        .map(|&count| {
            let share = f64::from(count) / f64::from(busiest);
            ((share * f64::from(BASELINE_MAX_GREEN)) as u32)
                .clamp(BASELINE_MIN_GREEN, BASELINE_MAX_GREEN)
        })
        .collect();

    SignalTiming::from_seconds(seconds)
}
