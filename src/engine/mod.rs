pub mod advisor;
pub mod history;
pub mod keyword_matcher;
pub mod meta_trends;
pub mod runners;
pub mod sentiment;
pub mod token_weight;

pub use advisor::Advisor;
pub use history::HistoryWindow;
pub use meta_trends::MetaTrendTracker;
pub use runners::RunnerScreen;
pub use sentiment::SentimentAggregator;

/// Scale `value` from `[min, max]` onto `[0, 100]`, clamped at both ends.
/// Shared by all sentiment sub-metrics.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

/// Percentage change from `previous` to `current`. A zero base yields 0
/// rather than a division error.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_midpoint_and_clamp() {
        assert_eq!(normalize(0.0, -50.0, 50.0), 50.0);
        assert_eq!(normalize(-200.0, -100.0, 100.0), 0.0);
        assert_eq!(normalize(200.0, -100.0, 100.0), 100.0);
        assert_eq!(normalize(15.0, 0.0, 30.0), 50.0);
    }

    #[test]
    fn test_percentage_change_zero_base() {
        assert_eq!(percentage_change(10.0, 0.0), 0.0);
        assert_eq!(percentage_change(15.0, 10.0), 50.0);
        assert_eq!(percentage_change(5.0, 10.0), -50.0);
    }
}
