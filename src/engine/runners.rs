/// Runner screening
///
/// Scores each observation on capped volume / price / holder / meta-affinity
/// components and splits the batch into confirmed and potential runners for
/// the `runners_update` push message.
use std::cmp::Ordering;

use crate::config::RunnerConfig;
use crate::engine::keyword_matcher::{match_keywords, observation_text};
use crate::models::{RunnerBoard, RunnerEntry, TokenObservation};

const VOLUME_WEIGHT: f64 = 0.30;
const PRICE_WEIGHT: f64 = 0.25;
const HOLDER_WEIGHT: f64 = 0.25;
const META_WEIGHT: f64 = 0.20;

pub struct RunnerScreen {
    vocabulary: Vec<String>,
    config: RunnerConfig,
}

impl RunnerScreen {
    pub fn new(vocabulary: Vec<String>, config: RunnerConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn score(&self, obs: &TokenObservation) -> f64 {
        let volume_score = (obs.volume_24h / 10_000.0 * 20.0).min(100.0);
        let price_score = (obs.price_change_24h.abs() * 2.0).min(100.0);
        let holder_score = (obs.holders as f64 / 1_000.0 * 20.0).min(100.0);
        let matched = match_keywords(&observation_text(obs), &self.vocabulary).len();
        let meta_score = (matched as f64 * 25.0).min(100.0);

        let score = volume_score * VOLUME_WEIGHT
            + price_score * PRICE_WEIGHT
            + holder_score * HOLDER_WEIGHT
            + meta_score * META_WEIGHT;
        (score * 100.0).round() / 100.0
    }

    pub fn screen(&self, observations: &[TokenObservation], now: i64) -> RunnerBoard {
        let mut current = Vec::new();
        let mut potential = Vec::new();

        for obs in observations {
            if let Some(min_volume) = self.config.min_volume_24h {
                if obs.volume_24h < min_volume {
                    continue;
                }
            }
            let score = self.score(obs);
            let entry = RunnerEntry {
                name: obs.name.clone(),
                symbol: obs.symbol.clone(),
                volume_24h: obs.volume_24h,
                price_change_24h: obs.price_change_24h,
                score,
            };
            if score > self.config.current_score {
                current.push(entry);
            } else if score > self.config.potential_score {
                potential.push(entry);
            }
        }

        sort_by_score(&mut current);
        sort_by_score(&mut potential);

        RunnerBoard {
            timestamp: now,
            current,
            potential,
        }
    }
}

fn sort_by_score(entries: &mut [RunnerEntry]) {
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
