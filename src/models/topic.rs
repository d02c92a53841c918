// src/models/topic.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents a row of the `topics` table: a numbered syllabus unit
/// within a position type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: i64,
    pub position_type: String,
    pub topic_number: i32,
    pub title: String,
    pub is_active: bool,
}

/// One `topic_scope` mapping joined with its law: the topic covers the
/// given law, either restricted to an explicit article list or, when
/// `article_numbers` is NULL, the whole law ("virtual law").
#[derive(Debug, Clone, FromRow)]
pub struct TopicScope {
    pub law_id: i64,
    pub law_name: String,
    pub article_numbers: Option<Vec<i32>>,
}
