/// Meta Trend Tracker
///
/// Converts batches of token observations into ranked keyword categories:
/// - trending: largest shares of current volume-weighted activity (top 5)
/// - rising / declining: biggest movers vs the oldest retained snapshot
///
/// Keeps a 24-hour window of share snapshots. State is replaced wholesale on
/// every ingest; snapshots are immutable once stored.
use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::engine::history::HistoryWindow;
use crate::engine::keyword_matcher::{match_keywords, observation_text};
use crate::engine::percentage_change;
use crate::engine::token_weight::weight;
use crate::models::{TokenObservation, TrendEntry, TrendReport};

const TRENDING_LIMIT: usize = 5;
const MOVER_LIMIT: usize = 4;
/// Minimum |change_24h| for the rising/declining lists.
const MOVER_THRESHOLD: f64 = 5.0;

pub struct MetaTrendTracker {
    vocabulary: Vec<String>,
    current: HashMap<String, f64>,
    history: HistoryWindow<HashMap<String, f64>>,
    last_update: i64,
}

impl MetaTrendTracker {
    /// `vocabulary` order doubles as the ranking tie-break.
    pub fn new(vocabulary: Vec<String>, retention_ms: i64) -> Self {
        Self {
            vocabulary,
            current: HashMap::new(),
            history: HistoryWindow::new(retention_ms),
            last_update: 0,
        }
    }

    pub fn ingest(&mut self, observations: &[TokenObservation], now: i64) -> TrendReport {
        let mut accumulated: HashMap<String, f64> = HashMap::new();
        let mut total_volume = 0.0;

        for obs in observations {
            let w = weight(obs);
            let text = observation_text(obs);
            for keyword in match_keywords(&text, &self.vocabulary) {
                *accumulated.entry(keyword).or_insert(0.0) += w;
            }
            total_volume += obs.volume_24h.max(0.0);
        }

        // Weighted share of total raw volume, clamped to 0..100. A zero
        // total defines every share as zero.
        let shares: HashMap<String, f64> = self
            .vocabulary
            .iter()
            .map(|keyword| {
                let share = if total_volume > 0.0 {
                    let w = accumulated.get(keyword.as_str()).copied().unwrap_or(0.0);
                    (w / total_volume * 100.0).clamp(0.0, 100.0)
                } else {
                    0.0
                };
                (keyword.clone(), share)
            })
            .collect();

        self.history.record(now, shares.clone());
        self.current = shares;
        self.last_update = now;

        let report = self.build_report(now, total_volume);
        debug!(
            trending = report.trending.len(),
            rising = report.rising.len(),
            declining = report.declining.len(),
            total_volume,
            "meta trends updated"
        );
        report
    }

    fn build_report(&self, now: i64, total_volume: f64) -> TrendReport {
        let baseline = self.history.oldest().map(|e| &e.value);

        let mut ranked: Vec<TrendEntry> = self
            .vocabulary
            .iter()
            .filter_map(|keyword| {
                let percentage = self.current.get(keyword).copied().unwrap_or(0.0);
                if percentage <= 0.0 {
                    return None;
                }
                let previous = baseline
                    .and_then(|shares| shares.get(keyword))
                    .copied()
                    .unwrap_or(0.0);
                Some(TrendEntry {
                    keyword: keyword.clone(),
                    percentage,
                    change_24h: percentage_change(percentage, previous),
                    momentum: self.momentum(keyword),
                })
            })
            .collect();

        // Stable sort: equal shares keep vocabulary order.
        ranked.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(Ordering::Equal)
        });

        let remainder = ranked.split_off(ranked.len().min(TRENDING_LIMIT));
        let trending = ranked;

        let mut rising: Vec<TrendEntry> = remainder
            .iter()
            .filter(|e| e.change_24h > MOVER_THRESHOLD)
            .cloned()
            .collect();
        rising.sort_by(|a, b| {
            b.change_24h
                .partial_cmp(&a.change_24h)
                .unwrap_or(Ordering::Equal)
        });
        rising.truncate(MOVER_LIMIT);

        let mut declining: Vec<TrendEntry> = remainder
            .iter()
            .filter(|e| e.change_24h < -MOVER_THRESHOLD)
            .cloned()
            .collect();
        declining.sort_by(|a, b| {
            a.change_24h
                .partial_cmp(&b.change_24h)
                .unwrap_or(Ordering::Equal)
        });
        declining.truncate(MOVER_LIMIT);

        TrendReport {
            timestamp: now,
            total_volume,
            trending,
            rising,
            declining,
        }
    }

    /// Time-weighted average of successive share changes for one keyword,
    /// clamped to [-100, 100]. The i-th of N changes carries weight (i+1)/N,
    /// so the most recent change counts most. Fewer than two snapshots
    /// yields 0.
    pub fn momentum(&self, keyword: &str) -> f64 {
        let shares: Vec<f64> = self
            .history
            .iter()
            .map(|e| e.value.get(keyword).copied().unwrap_or(0.0))
            .collect();
        if shares.len() < 2 {
            return 0.0;
        }

        let changes: Vec<f64> = shares
            .windows(2)
            .map(|pair| percentage_change(pair[1], pair[0]))
            .collect();
        let n = changes.len() as f64;

        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        for (i, change) in changes.iter().enumerate() {
            let w = (i as f64 + 1.0) / n;
            weighted_sum += w * change;
            weight_sum += w;
        }

        (weighted_sum / weight_sum).clamp(-100.0, 100.0)
    }

    pub fn current_shares(&self) -> &HashMap<String, f64> {
        &self.current
    }

    pub fn last_update(&self) -> i64 {
        self.last_update
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HOUR_MS;

    fn vocab(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn obs(name: &str, volume_24h: f64) -> TokenObservation {
        TokenObservation {
            name: name.to_string(),
            symbol: String::new(),
            description: None,
            volume_24h,
            price_change_24h: 0.0,
            holders: 0,
            created_at: 0,
        }
    }

    /// Seven disjoint keywords so each token matches exactly one.
    fn seven_color_vocab() -> Vec<String> {
        vocab(&["red", "blue", "green", "gold", "pink", "cyan", "gray"])
    }

    fn color_batch(volumes: &[(&str, f64)]) -> Vec<TokenObservation> {
        volumes
            .iter()
            .map(|(name, v)| obs(&format!("{} token", name), *v))
            .collect()
    }

    #[test]
    fn test_zero_total_volume_yields_empty_report() {
        let mut tracker = MetaTrendTracker::new(vocab(&["ai", "defi"]), 24 * HOUR_MS);
        let report = tracker.ingest(&[obs("ai defi token", 0.0)], 1_000);

        assert!(report.trending.is_empty());
        assert!(report.rising.is_empty());
        assert!(report.declining.is_empty());
        assert!(tracker.current_shares().values().all(|&s| s == 0.0));
    }

    #[test]
    fn test_single_token_matching_whole_vocabulary() {
        let mut tracker = MetaTrendTracker::new(vocab(&["ai", "squid"]), 24 * HOUR_MS);
        let batch = vec![TokenObservation {
            name: "AI Squid".to_string(),
            symbol: String::new(),
            description: None,
            volume_24h: 1000.0,
            price_change_24h: 10.0,
            holders: 50,
            created_at: 0,
        }];
        let report = tracker.ingest(&batch, 1_000);

        // The weighted share exceeds the raw volume and clamps at 100.
        assert_eq!(report.trending.len(), 2);
        for entry in &report.trending {
            assert_eq!(entry.percentage, 100.0);
        }
    }

    #[test]
    fn test_trending_sorted_descending_capped_at_five() {
        let mut tracker = MetaTrendTracker::new(seven_color_vocab(), 24 * HOUR_MS);
        let batch = color_batch(&[
            ("red", 700.0),
            ("blue", 600.0),
            ("green", 500.0),
            ("gold", 400.0),
            ("pink", 300.0),
            ("cyan", 200.0),
            ("gray", 100.0),
        ]);
        let report = tracker.ingest(&batch, 1_000);

        assert_eq!(report.trending.len(), 5);
        let keywords: Vec<&str> = report.trending.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["red", "blue", "green", "gold", "pink"]);
        for pair in report.trending.windows(2) {
            assert!(pair[0].percentage >= pair[1].percentage);
        }
        // First ingest: baseline equals current, so no movers.
        assert!(report.rising.is_empty());
        assert!(report.declining.is_empty());
    }

    #[test]
    fn test_rising_and_declining_movers() {
        let mut tracker = MetaTrendTracker::new(seven_color_vocab(), 24 * HOUR_MS);
        tracker.ingest(
            &color_batch(&[
                ("red", 700.0),
                ("blue", 600.0),
                ("green", 500.0),
                ("gold", 400.0),
                ("pink", 300.0),
                ("cyan", 200.0),
                ("gray", 100.0),
            ]),
            0,
        );
        let report = tracker.ingest(
            &color_batch(&[
                ("red", 700.0),
                ("blue", 600.0),
                ("green", 500.0),
                ("gold", 400.0),
                ("pink", 300.0),
                ("cyan", 300.0),
                ("gray", 50.0),
            ]),
            HOUR_MS,
        );

        // pink and cyan tie on share; vocabulary order keeps pink in the
        // top five and leaves cyan as a mover.
        assert_eq!(report.rising.len(), 1);
        assert_eq!(report.rising[0].keyword, "cyan");
        assert!(report.rising[0].change_24h > 5.0);

        assert_eq!(report.declining.len(), 1);
        assert_eq!(report.declining[0].keyword, "gray");
        assert!(report.declining[0].change_24h < -5.0);
    }

    #[test]
    fn test_mover_lists_capped_at_four_and_sorted_by_change() {
        // Fifteen disjoint keywords: five stay on top, five surge, five fade.
        let vocabulary = vocab(&[
            "alpha", "bravo", "cyan", "delta", "echo", "fox", "gold", "hotel",
            "india", "jade", "kilo", "lima", "mike", "nova", "oscar",
        ]);
        let mut tracker = MetaTrendTracker::new(vocabulary, 24 * HOUR_MS);

        tracker.ingest(
            &color_batch(&[
                ("alpha", 2000.0),
                ("bravo", 1900.0),
                ("cyan", 1800.0),
                ("delta", 1700.0),
                ("echo", 1600.0),
                ("fox", 50.0),
                ("gold", 50.0),
                ("hotel", 50.0),
                ("india", 50.0),
                ("jade", 50.0),
                ("kilo", 100.0),
                ("lima", 90.0),
                ("mike", 80.0),
                ("nova", 70.0),
                ("oscar", 60.0),
            ]),
            0,
        );
        let report = tracker.ingest(
            &color_batch(&[
                ("alpha", 2000.0),
                ("bravo", 1900.0),
                ("cyan", 1800.0),
                ("delta", 1700.0),
                ("echo", 1600.0),
                ("fox", 160.0),
                ("gold", 140.0),
                ("hotel", 120.0),
                ("india", 100.0),
                ("jade", 80.0),
                ("kilo", 70.0),
                ("lima", 60.0),
                ("mike", 50.0),
                ("nova", 40.0),
                ("oscar", 30.0),
            ]),
            HOUR_MS,
        );

        // Five remainder keywords rose past +5% and five fell past -5%;
        // both lists cap at four, largest mover first.
        assert_eq!(report.trending.len(), 5);
        assert_eq!(report.rising.len(), 4);
        let risers: Vec<&str> = report.rising.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(risers, vec!["fox", "gold", "hotel", "india"]);
        for pair in report.rising.windows(2) {
            assert!(pair[0].change_24h >= pair[1].change_24h);
        }
        assert!(report.rising.iter().all(|e| e.change_24h > 5.0));

        assert_eq!(report.declining.len(), 4);
        let fallers: Vec<&str> = report
            .declining
            .iter()
            .map(|e| e.keyword.as_str())
            .collect();
        assert_eq!(fallers, vec!["oscar", "nova", "mike", "lima"]);
        for pair in report.declining.windows(2) {
            assert!(pair[0].change_24h <= pair[1].change_24h);
        }
        assert!(report.declining.iter().all(|e| e.change_24h < -5.0));
    }

    #[test]
    fn test_idempotent_for_identical_input_and_timestamp() {
        let mut tracker = MetaTrendTracker::new(seven_color_vocab(), 24 * HOUR_MS);
        let batch = color_batch(&[("red", 500.0), ("blue", 300.0)]);

        let first = tracker.ingest(&batch, 1_000);
        let second = tracker.ingest(&batch, 1_000);

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_history_pruned_to_retention() {
        let mut tracker = MetaTrendTracker::new(vocab(&["red"]), 24 * HOUR_MS);
        tracker.ingest(&color_batch(&[("red", 100.0)]), 0);
        tracker.ingest(&color_batch(&[("red", 100.0)]), 25 * HOUR_MS);

        assert_eq!(tracker.history_len(), 1);
        assert_eq!(tracker.last_update(), 25 * HOUR_MS);
    }

    /// Drive the red share through 10% -> 20% -> 30% using a non-matching
    /// filler token to control the denominator.
    fn ingest_share(tracker: &mut MetaTrendTracker, share: f64, now: i64) {
        let batch = vec![
            obs("red token", share),
            obs("plain filler", 100.0 - share),
        ];
        tracker.ingest(&batch, now);
    }

    #[test]
    fn test_momentum_weights_recent_changes_more() {
        let mut tracker = MetaTrendTracker::new(vocab(&["red"]), 24 * HOUR_MS);
        ingest_share(&mut tracker, 10.0, 0);
        ingest_share(&mut tracker, 20.0, HOUR_MS);
        ingest_share(&mut tracker, 30.0, 2 * HOUR_MS);

        // Changes are +100% then +50%; weights 0.5 and 1.0.
        let momentum = tracker.momentum("red");
        assert!((momentum - 100.0 / 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_momentum_clamped() {
        let mut tracker = MetaTrendTracker::new(vocab(&["red"]), 24 * HOUR_MS);
        ingest_share(&mut tracker, 1.0, 0);
        ingest_share(&mut tracker, 99.0, HOUR_MS);

        assert_eq!(tracker.momentum("red"), 100.0);
    }

    #[test]
    fn test_momentum_empty_history_is_zero() {
        let tracker = MetaTrendTracker::new(vocab(&["red"]), 24 * HOUR_MS);
        assert_eq!(tracker.momentum("red"), 0.0);
    }
}
