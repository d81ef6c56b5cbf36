use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day's counters as the reading-data API reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DailyData {
    pub daily_book_count: u64,
    pub daily_chapter_count: u64,
    pub daily_word_count: u64,
}

/// A month's declared totals plus its per-day breakdown, keyed by day number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MonthlyStats {
    pub book_count: u64,
    pub chapter_count: u64,
    pub word_count: u64,
    #[serde(default)]
    pub daily_data: BTreeMap<String, DailyData>,
}

/// `year -> month -> stats`, with the string keys the API uses.
pub type ReadingData = BTreeMap<String, BTreeMap<String, MonthlyStats>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheInfo {
    pub cached: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReadingDataResponse {
    pub data: ReadingData,
    #[serde(default)]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub cache_info: Option<CacheInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedReading {
    pub response: ReadingDataResponse,
    pub last_fetch: DateTime<Utc>,
}

/// Monthly word target; `month` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingGoal {
    pub value: u64,
    pub month: String,
}

/// Everything persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub cache: Option<CachedReading>,
    #[serde(default)]
    pub goal: Option<ReadingGoal>,
}

impl AppData {
    pub fn clear_session(&mut self) {
        self.token = None;
        self.cache = None;
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub logged_in: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
    pub last_fetch: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub value: u64,
}
