use std::time::{SystemTime, UNIX_EPOCH};

/// Fractional Unix time, as reported in `timestamp` and `generated_at` fields.
pub fn current_time_in_secs_f64() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
