// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The slice of a `questions` row the statistics layer needs.
/// Option text, answers and explanations never reach this service.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionMeta {
    pub id: i64,
    pub law_id: i64,
    pub article_number: i32,

    /// Continuous 0-100 difficulty score recomputed from global answer
    /// history. Takes precedence over the static label when present.
    pub global_difficulty: Option<f64>,

    /// Static editorial difficulty label.
    pub difficulty: Option<String>,

    pub is_official_exam: bool,
}

/// Difficulty buckets used by histograms and per-user breakdowns.
/// `Auto` collects questions that carry neither a score nor a
/// recognized label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
    Auto,
}

impl Difficulty {
    /// Buckets a continuous 0-100 score by fixed thresholds.
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            Difficulty::Easy
        } else if score < 50.0 {
            Difficulty::Medium
        } else if score < 75.0 {
            Difficulty::Hard
        } else {
            Difficulty::Extreme
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "extreme" => Some(Difficulty::Extreme),
            _ => None,
        }
    }

    /// Two-tier bucketing rule: the continuous score wins when present,
    /// then the static label, then `Auto`.
    pub fn classify(global_difficulty: Option<f64>, label: Option<&str>) -> Self {
        match global_difficulty {
            Some(score) => Difficulty::from_score(score),
            None => label
                .and_then(Difficulty::from_label)
                .unwrap_or(Difficulty::Auto),
        }
    }
}

impl QuestionMeta {
    pub fn difficulty_bucket(&self) -> Difficulty {
        Difficulty::classify(self.global_difficulty, self.difficulty.as_deref())
    }
}
