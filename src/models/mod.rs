use serde::{Deserialize, Serialize};

/// One token as seen by the ingestion layer. Observations are not retained
/// past the ingest call that consumed them.
///
/// Missing numeric fields deserialize as zero by convention; the engine does
/// not validate upstream data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenObservation {
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub price_change_24h: f64,
    #[serde(default)]
    pub holders: u64,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialCounts {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub negative: u64,
    #[serde(default)]
    pub total: u64,
}

/// Market-wide inputs for one sentiment ingestion. Supplied pre-parsed by
/// the (external) feed layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Recent price series, oldest first.
    #[serde(default)]
    pub price_history: Vec<f64>,
    #[serde(default)]
    pub volume_24h: f64,
    /// Trailing average of the 24h volume.
    #[serde(default)]
    pub volume_average_24h: f64,
    #[serde(default)]
    pub social: SocialCounts,
    /// Recent liquidity series, oldest first.
    #[serde(default)]
    pub liquidity_history: Vec<f64>,
}

/// One ranked keyword category. Recomputed on every ingest, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendEntry {
    pub keyword: String,
    /// Share of total volume-weighted activity, 0..100.
    pub percentage: f64,
    /// Percentage change vs the oldest retained snapshot.
    pub change_24h: f64,
    /// Time-weighted average of recent share changes, -100..100.
    pub momentum: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendReport {
    pub timestamp: i64,
    pub total_volume: f64,
    pub trending: Vec<TrendEntry>,
    pub rising: Vec<TrendEntry>,
    pub declining: Vec<TrendEntry>,
}

/// The five sub-metrics behind the composite score, each normalized to 0..100.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SentimentMetrics {
    pub price_action: f64,
    pub volume: f64,
    pub social_sentiment: f64,
    pub meta_momentum: f64,
    pub liquidity_flow: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl Classification {
    pub fn label(&self) -> &str {
        match self {
            Classification::ExtremeFear => "Extreme Fear",
            Classification::Fear => "Fear",
            Classification::Neutral => "Neutral",
            Classification::Greed => "Greed",
            Classification::ExtremeGreed => "Extreme Greed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Positive,
    Negative,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SentimentTrend {
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    /// Newest minus oldest retained score.
    pub change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    Bull,
    Bear,
    Consolidation,
    Recovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftSeverity {
    Medium,
    High,
}

/// Significant move between the two most recent retained scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentShift {
    pub change: f64,
    pub severity: ShiftSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    pub timestamp: i64,
    /// Composite score, integer 0..100.
    pub value: u8,
    pub classification: Classification,
    pub metrics: SentimentMetrics,
    pub trend: SentimentTrend,
    pub market_status: MarketStatus,
    /// Present only when the score moved sharply since the previous ingest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<SentimentShift>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    VeryHigh,
    High,
    Moderate,
    Normal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub suggestions: Vec<String>,
    pub risk: RiskTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerEntry {
    pub name: String,
    pub symbol: String,
    pub volume_24h: f64,
    pub price_change_24h: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerBoard {
    pub timestamp: i64,
    pub current: Vec<RunnerEntry>,
    pub potential: Vec<RunnerEntry>,
}

/// Push-channel message forwarded to presentation clients. Serializes as
/// `{"type": "...", "payload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum EngineUpdate {
    MetaUpdate(TrendReport),
    SentimentUpdate(SentimentSnapshot),
    RunnersUpdate(RunnerBoard),
}

/// Inbound feed record consumed by the binary's stdin loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FeedRecord {
    Tokens(Vec<TokenObservation>),
    Market(MarketSnapshot),
}
