use anyhow::Result;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use solmeta::config::EngineConfig;
use solmeta::engine::{Advisor, MetaTrendTracker, RunnerScreen, SentimentAggregator};
use solmeta::models::{EngineUpdate, FeedRecord, TrendReport};
use solmeta::services::UpdateBroadcaster;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading configuration...");
    let config = EngineConfig::from_env()?;
    info!("Engine configuration:");
    info!("  Keywords: {}", config.vocabulary.join(", "));
    info!(
        "  Trend retention: {}h",
        config.trend_retention_ms / (60 * 60 * 1000)
    );
    info!(
        "  Sentiment retention: {}d",
        config.sentiment_retention_ms / (24 * 60 * 60 * 1000)
    );

    let mut trends = MetaTrendTracker::new(config.vocabulary.clone(), config.trend_retention_ms);
    let mut sentiment = SentimentAggregator::new(
        config.thresholds,
        config.weights,
        config.sentiment_retention_ms,
    );
    let advisor = Advisor::new(config.thresholds);
    let runners = RunnerScreen::new(config.vocabulary.clone(), config.runners.clone());

    let broadcaster = UpdateBroadcaster::new(64);

    // Demo transport: every published update goes to stdout as one JSON line.
    let mut updates = broadcaster.subscribe();
    tokio::spawn(async move {
        while let Ok(update) = updates.recv().await {
            match serde_json::to_string(&update) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("failed to serialize update: {}", e),
            }
        }
    });

    tokio::spawn(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c signal: {}", e);
            std::process::exit(1);
        }
        info!("Received interrupt signal, shutting down...");
        std::process::exit(0);
    });

    // Feed loop: newline-delimited JSON records on stdin, engine output on
    // the broadcast channel. Ends at EOF.
    info!("Reading feed records from stdin...");
    let mut last_report = TrendReport::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let record: FeedRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed feed record: {}", e);
                continue;
            }
        };
        let now = Utc::now().timestamp_millis();

        match record {
            FeedRecord::Tokens(batch) => {
                let report = trends.ingest(&batch, now);
                info!(
                    "trends: {} trending / {} rising / {} declining",
                    report.trending.len(),
                    report.rising.len(),
                    report.declining.len()
                );
                broadcaster.publish(EngineUpdate::MetaUpdate(report.clone()));
                last_report = report;

                let board = runners.screen(&batch, now);
                broadcaster.publish(EngineUpdate::RunnersUpdate(board));
            }
            FeedRecord::Market(market) => {
                let snapshot = sentiment.ingest(&market, &last_report, now);
                let recommendation = advisor.recommend(&snapshot);
                info!(
                    "sentiment: {} ({}) status={:?} risk={:?}",
                    snapshot.value,
                    snapshot.classification.label(),
                    snapshot.market_status,
                    recommendation.risk
                );
                broadcaster.publish(EngineUpdate::SentimentUpdate(snapshot));
            }
        }
    }

    info!("Feed closed, exiting");
    Ok(())
}
