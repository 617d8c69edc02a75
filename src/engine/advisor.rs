/// Recommendation / Risk Advisor
///
/// Stateless layer over a sentiment snapshot: a fixed decision table keyed
/// on (market status, trend strength) picks one or two suggestions, and the
/// score picks a risk tier.
use crate::config::ClassificationThresholds;
use crate::models::{
    MarketStatus, Recommendation, RiskTier, SentimentSnapshot, TrendStrength,
};

pub struct Advisor {
    thresholds: ClassificationThresholds,
}

impl Advisor {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn recommend(&self, snapshot: &SentimentSnapshot) -> Recommendation {
        Recommendation {
            suggestions: suggestions(snapshot.market_status, snapshot.trend.strength),
            risk: self.risk_tier(snapshot),
        }
    }

    fn risk_tier(&self, snapshot: &SentimentSnapshot) -> RiskTier {
        if snapshot.value > self.thresholds.greed {
            RiskTier::VeryHigh
        } else if snapshot.value <= self.thresholds.extreme_fear {
            RiskTier::High
        } else if snapshot.trend.strength == TrendStrength::Strong {
            RiskTier::Moderate
        } else {
            RiskTier::Normal
        }
    }
}

fn suggestions(status: MarketStatus, strength: TrendStrength) -> Vec<String> {
    let picks: &[&str] = match (status, strength) {
        (MarketStatus::Bull, TrendStrength::Strong) => &[
            "Momentum is broad and accelerating; ride winners but scale out into strength.",
            "Crowded greed builds fast on runs like this - keep stops trailing.",
        ],
        (MarketStatus::Bull, _) => &[
            "Uptrend intact; favor trending metas over bottom-fishing laggards.",
        ],
        (MarketStatus::Bear, TrendStrength::Strong) => &[
            "Heavy selling across the board; stay mostly in stables and size small.",
            "Capitulation phases produce the best entries - build a watchlist now.",
        ],
        (MarketStatus::Bear, _) => &[
            "Downtrend in control; wait for sentiment to stabilize before adding risk.",
        ],
        (MarketStatus::Recovery, TrendStrength::Strong) => &[
            "Sharp rebound underway; early trend entries are favored while fear lingers.",
        ],
        (MarketStatus::Recovery, _) => &[
            "Sentiment is recovering off the lows; probe positions in leading metas.",
            "Confirm the bounce with volume before committing full size.",
        ],
        (MarketStatus::Consolidation, _) => &[
            "Range-bound market; rotate toward metas showing relative strength.",
        ],
    };
    picks.iter().map(|s| s.to_string()).collect()
}
