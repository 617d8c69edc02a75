use anyhow::{bail, Result};
use std::env;

pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

const DEFAULT_VOCABULARY: &str =
    "ai,defi,gaming,meme,nft,metaverse,web3,dao,play2earn,gamefi";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Tracked meta keywords, lower-cased. Order is the ranking tie-break.
    pub vocabulary: Vec<String>,
    /// Retention for trend share snapshots (default 24h).
    pub trend_retention_ms: i64,
    /// Retention for sentiment scores (default 7d).
    pub sentiment_retention_ms: i64,
    pub thresholds: ClassificationThresholds,
    pub weights: MetricWeights,
    pub runners: RunnerConfig,
}

/// Inclusive upper bounds of each fear/greed band; anything above `greed`
/// classifies as extreme greed.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationThresholds {
    pub extreme_fear: u8,
    pub fear: u8,
    pub neutral: u8,
    pub greed: u8,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            extreme_fear: 25,
            fear: 45,
            neutral: 55,
            greed: 75,
        }
    }
}

/// Composite weights for the five sentiment sub-metrics. Must sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct MetricWeights {
    pub price_action: f64,
    pub volume: f64,
    pub social_sentiment: f64,
    pub meta_momentum: f64,
    pub liquidity_flow: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            price_action: 0.25,
            volume: 0.25,
            social_sentiment: 0.20,
            meta_momentum: 0.15,
            liquidity_flow: 0.15,
        }
    }
}

impl MetricWeights {
    pub fn sum(&self) -> f64 {
        self.price_action
            + self.volume
            + self.social_sentiment
            + self.meta_momentum
            + self.liquidity_flow
    }
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Score above which a token is a confirmed runner.
    pub current_score: f64,
    /// Score above which a token is a potential runner.
    pub potential_score: f64,
    /// Optional 24h volume floor applied to both lists.
    pub min_volume_24h: Option<f64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            current_score: 80.0,
            potential_score: 60.0,
            min_volume_24h: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let vocabulary: Vec<String> = env::var("META_KEYWORDS")
            .unwrap_or_else(|_| DEFAULT_VOCABULARY.to_string())
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let trend_retention_hours: i64 = env::var("TREND_RETENTION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()?;
        let sentiment_retention_days: i64 = env::var("SENTIMENT_RETENTION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()?;

        let runners = RunnerConfig {
            current_score: env::var("RUNNER_CURRENT_SCORE")
                .unwrap_or_else(|_| "80".to_string())
                .parse()?,
            potential_score: env::var("RUNNER_POTENTIAL_SCORE")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
            min_volume_24h: env::var("RUNNER_MIN_VOLUME_24H")
                .ok()
                .map(|v| v.parse())
                .transpose()?,
        };

        let config = Self {
            vocabulary,
            trend_retention_ms: trend_retention_hours * HOUR_MS,
            sentiment_retention_ms: sentiment_retention_days * DAY_MS,
            thresholds: ClassificationThresholds::default(),
            weights: MetricWeights::default(),
            runners,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration errors are caught here, before construction of any
    /// tracker; ingestion itself never fails.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            bail!("META_KEYWORDS must contain at least one keyword");
        }
        if (self.weights.sum() - 1.0).abs() > 1e-6 {
            bail!(
                "sentiment metric weights must sum to 1.0 (got {:.4})",
                self.weights.sum()
            );
        }
        if self.trend_retention_ms <= 0 || self.sentiment_retention_ms <= 0 {
            bail!("retention periods must be positive");
        }
        let t = &self.thresholds;
        if !(t.extreme_fear < t.fear && t.fear < t.neutral && t.neutral < t.greed) {
            bail!("classification thresholds must be strictly increasing");
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY
                .split(',')
                .map(str::to_string)
                .collect(),
            trend_retention_ms: 24 * HOUR_MS,
            sentiment_retention_ms: 7 * DAY_MS,
            thresholds: ClassificationThresholds::default(),
            weights: MetricWeights::default(),
            runners: RunnerConfig::default(),
        }
    }
}
