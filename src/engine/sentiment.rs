/// Market Sentiment Aggregator
///
/// Combines five normalized sub-metrics into a composite 0-100 fear/greed
/// score, classifies it, and derives trend direction/strength plus a market
/// status from a 7-day score window.
///
/// Degenerate inputs never raise: zero social totals score 0, short price or
/// liquidity series fall back to their neutral defaults.
use tracing::debug;

use crate::config::{ClassificationThresholds, MetricWeights};
use crate::engine::history::HistoryWindow;
use crate::engine::{normalize, percentage_change};
use crate::models::{
    Classification, MarketSnapshot, MarketStatus, SentimentMetrics, SentimentShift,
    SentimentSnapshot, SentimentTrend, ShiftSeverity, TrendDirection, TrendReport,
    TrendStrength,
};

/// |newest - oldest| at or below this reads as flat.
const FLAT_DELTA: f64 = 2.0;
const WEAK_DELTA: f64 = 5.0;
const MODERATE_DELTA: f64 = 15.0;

/// Score delta between consecutive ingests that counts as a shift.
const SHIFT_DELTA: f64 = 10.0;
const SHIFT_DELTA_HIGH: f64 = 20.0;

pub struct SentimentAggregator {
    thresholds: ClassificationThresholds,
    weights: MetricWeights,
    metrics: SentimentMetrics,
    history: HistoryWindow<u8>,
    last_update: i64,
}

impl SentimentAggregator {
    pub fn new(
        thresholds: ClassificationThresholds,
        weights: MetricWeights,
        retention_ms: i64,
    ) -> Self {
        Self {
            thresholds,
            weights,
            metrics: SentimentMetrics::default(),
            history: HistoryWindow::new(retention_ms),
            last_update: 0,
        }
    }

    pub fn ingest(
        &mut self,
        market: &MarketSnapshot,
        trends: &TrendReport,
        now: i64,
    ) -> SentimentSnapshot {
        let metrics = SentimentMetrics {
            price_action: price_action_score(&market.price_history),
            volume: volume_score(market.volume_24h, market.volume_average_24h),
            social_sentiment: social_score(
                market.social.positive,
                market.social.negative,
                market.social.total,
            ),
            meta_momentum: meta_momentum_score(trends),
            liquidity_flow: liquidity_flow_score(&market.liquidity_history),
        };

        let composite = metrics.price_action * self.weights.price_action
            + metrics.volume * self.weights.volume
            + metrics.social_sentiment * self.weights.social_sentiment
            + metrics.meta_momentum * self.weights.meta_momentum
            + metrics.liquidity_flow * self.weights.liquidity_flow;
        let value = composite.round().clamp(0.0, 100.0) as u8;

        // Prune first so the shift comparison never reads a score that has
        // already aged out of the window.
        self.history.prune(now);
        let shift = self.detect_shift(value);
        self.history.record(now, value);
        self.metrics = metrics;
        self.last_update = now;

        let trend = self.score_trend();
        let classification = classify(value, &self.thresholds);
        let market_status = self.market_status(value, &trend);

        debug!(
            value,
            classification = classification.label(),
            direction = ?trend.direction,
            strength = ?trend.strength,
            "sentiment updated"
        );

        SentimentSnapshot {
            timestamp: now,
            value,
            classification,
            metrics,
            trend,
            market_status,
            shift,
        }
    }

    /// Slope of the retained window: newest minus oldest score.
    fn score_trend(&self) -> SentimentTrend {
        let change = match (self.history.newest(), self.history.oldest()) {
            (Some(newest), Some(oldest)) if self.history.len() >= 2 => {
                newest.value as f64 - oldest.value as f64
            }
            _ => 0.0,
        };

        let direction = if change > FLAT_DELTA {
            TrendDirection::Positive
        } else if change < -FLAT_DELTA {
            TrendDirection::Negative
        } else {
            TrendDirection::Flat
        };

        let strength = if change.abs() < WEAK_DELTA {
            TrendStrength::Weak
        } else if change.abs() < MODERATE_DELTA {
            TrendStrength::Moderate
        } else {
            TrendStrength::Strong
        };

        SentimentTrend {
            direction,
            strength,
            change,
        }
    }

    /// Check order matters: Bull, then Bear, then weak strength, then
    /// Recovery, then the Consolidation fallback.
    fn market_status(&self, value: u8, trend: &SentimentTrend) -> MarketStatus {
        let t = &self.thresholds;
        if value > t.neutral && trend.direction == TrendDirection::Positive {
            MarketStatus::Bull
        } else if value <= t.fear && trend.direction == TrendDirection::Negative {
            MarketStatus::Bear
        } else if trend.strength == TrendStrength::Weak {
            MarketStatus::Consolidation
        } else if value > t.fear && trend.direction == TrendDirection::Positive {
            MarketStatus::Recovery
        } else {
            MarketStatus::Consolidation
        }
    }

    /// Compare the incoming score against the newest retained one; a jump
    /// past the shift threshold is surfaced to the presentation layer.
    fn detect_shift(&self, value: u8) -> Option<SentimentShift> {
        let previous = self.history.newest()?.value as f64;
        let change = value as f64 - previous;
        if change.abs() <= SHIFT_DELTA {
            return None;
        }
        let severity = if change.abs() > SHIFT_DELTA_HIGH {
            ShiftSeverity::High
        } else {
            ShiftSeverity::Medium
        };
        Some(SentimentShift {
            change,
            severity,
            message: format!("Sentiment shifted by {:+.1} points", change),
        })
    }

    pub fn current_metrics(&self) -> &SentimentMetrics {
        &self.metrics
    }

    pub fn last_update(&self) -> i64 {
        self.last_update
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

pub fn classify(value: u8, thresholds: &ClassificationThresholds) -> Classification {
    if value <= thresholds.extreme_fear {
        Classification::ExtremeFear
    } else if value <= thresholds.fear {
        Classification::Fear
    } else if value <= thresholds.neutral {
        Classification::Neutral
    } else if value <= thresholds.greed {
        Classification::Greed
    } else {
        Classification::ExtremeGreed
    }
}

/// Std-dev of percentage returns over the supplied price series, scored
/// against a 0..30 volatility reference range. Under two prices scores 0.
fn price_action_score(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = prices
        .windows(2)
        .map(|pair| percentage_change(pair[1], pair[0]))
        .collect();
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    normalize(variance.sqrt(), 0.0, 30.0)
}

/// Relative deviation of current volume from its trailing average, scored
/// against -50%..+50%. A missing average reads as no deviation.
fn volume_score(volume_24h: f64, average: f64) -> f64 {
    let deviation = if average > 0.0 {
        (volume_24h - average) / average * 100.0
    } else {
        0.0
    };
    normalize(deviation, -50.0, 50.0)
}

/// Net positive share of social mentions. A zero total scores 0, not
/// neutral: no signal is treated as absence of sentiment.
fn social_score(positive: u64, negative: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let net = (positive as f64 - negative as f64) / total as f64 * 100.0;
    normalize(net, -100.0, 100.0)
}

/// Mean momentum across the trending keywords, rescaled onto 0..100.
/// Momentum is already bounded to [-100, 100]; the rescale is kept anyway
/// for parity with the upstream behavior.
fn meta_momentum_score(trends: &TrendReport) -> f64 {
    if trends.trending.is_empty() {
        return normalize(0.0, -100.0, 100.0);
    }
    let mean = trends.trending.iter().map(|e| e.momentum).sum::<f64>()
        / trends.trending.len() as f64;
    normalize(mean, -100.0, 100.0)
}

/// Stability of the liquidity series: 100 minus the mean absolute
/// percentage change. Fewer than two points is neutral (50).
fn liquidity_flow_score(liquidity: &[f64]) -> f64 {
    if liquidity.len() < 2 {
        return 50.0;
    }
    let mean_abs_change = liquidity
        .windows(2)
        .map(|pair| percentage_change(pair[1], pair[0]).abs())
        .sum::<f64>()
        / (liquidity.len() - 1) as f64;
    (100.0 - mean_abs_change).clamp(0.0, 100.0)
}
