use std::time::Instant;

/// Start time in seconds of entry `i` of the `k` entries sharing beat `beat`.
/// Entries split the beat evenly.
pub fn beat_start(beat: usize, i: usize, k: usize, seconds_per_beat: f64) -> f64 {
    (beat as f64 + i as f64 / k as f64) * seconds_per_beat
}

/// Measures the execution time of a function.
///
/// # Arguments
///
/// * `f` - A closure to execute for which the execution time is measured.
///
/// # Returns
///
/// A tuple containing the result of the function and the duration it took to execute.
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, std::time::Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
