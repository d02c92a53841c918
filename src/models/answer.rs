// src/models/answer.rs

use sqlx::FromRow;

/// One row of the `test_answers` table: a single question answered by a
/// user inside a test attempt. Read-only input to the aggregation layer.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerRecord {
    pub user_id: String,

    /// Syllabus topic the question was mapped to when the test was built.
    /// NULL for answers that could not be mapped; those rows are excluded
    /// from every aggregation.
    pub topic_number: Option<i32>,

    pub question_id: i64,
    pub is_correct: bool,

    /// Difficulty label captured at answer time (e.g. "medium").
    pub difficulty: Option<String>,

    pub answered_at: chrono::DateTime<chrono::Utc>,
}
