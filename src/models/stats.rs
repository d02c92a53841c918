// src/models/stats.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::question::Difficulty;
use crate::models::topic::Topic;

/// Per-topic summary of a user's answer history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStat {
    pub topic_number: i32,
    pub total: i64,
    pub correct: i64,
    /// Integer percentage, rounded half-up. 0 when `total` is 0.
    pub accuracy: i64,
    pub last_study: Option<DateTime<Utc>>,
    /// Short date (`dd/mm/yyyy`) or the literal "Never".
    pub last_study_formatted: String,
}

/// Envelope returned by the theme-stats operations. Failures are carried
/// in-band (`success:false` plus `error`); the service never panics or
/// returns a raw error across this boundary, so UI callers can always
/// render a degraded state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStatsResult {
    pub success: bool,
    /// Keyed by topic number; BTreeMap keeps keys in ascending numeric
    /// order and serializes them as strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<i32, ThemeStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ThemeStatsResult {
    pub fn ok(stats: BTreeMap<i32, ThemeStat>, generated_at: DateTime<Utc>, cached: bool) -> Self {
        Self {
            success: true,
            stats: Some(stats),
            cached: Some(cached),
            generated_at: Some(generated_at),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            stats: None,
            cached: None,
            generated_at: None,
            error: Some(error.into()),
        }
    }
}

/// Topic metadata echoed back to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicInfo {
    pub id: i64,
    pub topic_number: i32,
    pub title: String,
}

impl From<&Topic> for TopicInfo {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id,
            topic_number: topic.topic_number,
            title: topic.title.clone(),
        }
    }
}

/// Distinct articles with at least one question, per law.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LawArticleCount {
    pub law: String,
    pub articles_with_questions: i64,
}

/// Accuracy breakdown for one difficulty bucket of a user's answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyPerformance {
    pub total: i64,
    pub correct: i64,
    pub accuracy: i64,
}

/// Distinct questions answered within independent trailing windows.
/// A 10-day-old answer counts for the 15 and 30 day windows but not the
/// 7 day one; the windows are not cumulative exclusions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentStats {
    pub last_7_days: i64,
    pub last_15_days: i64,
    pub last_30_days: i64,
}

/// A user's progress against one topic's question pool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub total_answers: i64,
    pub overall_accuracy: f64,
    pub unique_questions_answered: i64,
    pub total_questions_available: i64,
    /// Never negative: clamped to 0 when the user has seen questions
    /// that later left the pool.
    pub never_seen: i64,
    pub performance_by_difficulty: BTreeMap<Difficulty, DifficultyPerformance>,
    pub recent_stats: RecentStats,
}

impl UserProgress {
    /// All-zero progress against a pool of `total_questions_available`.
    pub fn empty(total_questions_available: i64) -> Self {
        Self {
            total_answers: 0,
            overall_accuracy: 0.0,
            unique_questions_answered: 0,
            total_questions_available,
            never_seen: total_questions_available.max(0),
            performance_by_difficulty: BTreeMap::new(),
            recent_stats: RecentStats::default(),
        }
    }
}

/// The computed payload for one topic. Cached as a unit for anonymous
/// lookups; `user_progress` stays `None` (serialized as an explicit
/// `null`) unless the caller identified a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicData {
    pub topic: TopicInfo,
    pub difficulty_stats: BTreeMap<Difficulty, i64>,
    pub total_questions: i64,
    pub official_questions_count: i64,
    pub articles_by_law: Vec<LawArticleCount>,
    pub user_progress: Option<UserProgress>,
}

/// Envelope returned by the topic-data operations. Same in-band failure
/// contract as `ThemeStatsResult`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDataResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Option<TopicData>,
}

impl TopicDataResult {
    pub fn ok(data: TopicData, cached: bool) -> Self {
        Self {
            success: true,
            cached: Some(cached),
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            cached: None,
            error: Some(error.into()),
            data: None,
        }
    }
}
