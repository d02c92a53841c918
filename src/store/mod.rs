// src/store/mod.rs

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::StatsError;
use crate::models::answer::AnswerRecord;
use crate::models::oposicion::PositionType;
use crate::models::question::QuestionMeta;
use crate::models::topic::{Topic, TopicScope};

pub use memory::MemoryStore;
pub use postgres::PgStatsStore;

/// Read-only view of the catalog and answer-history tables.
///
/// The aggregation service only ever reads; writes happen elsewhere in
/// the platform. Implementations surface every fault as
/// `StatsError::DataFetch` so the service can convert it into a
/// structured failure result.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// All of a user's answers that carry a topic mapping.
    /// Rows with a NULL topic number are excluded at the query.
    async fn answers_for_user(&self, user_id: &str) -> Result<Vec<AnswerRecord>, StatsError>;

    /// All of a user's answers tagged with one topic number.
    async fn answers_for_user_topic(
        &self,
        user_id: &str,
        topic_number: i32,
    ) -> Result<Vec<AnswerRecord>, StatsError>;

    /// Topic numbers active for a position type, ascending.
    async fn active_topic_numbers(
        &self,
        position: PositionType,
    ) -> Result<Vec<i32>, StatsError>;

    /// The active topic matching `(position, topic_number)`, if any.
    async fn find_active_topic(
        &self,
        position: PositionType,
        topic_number: i32,
    ) -> Result<Option<Topic>, StatsError>;

    /// The law/article mappings of a topic. Empty is a valid outcome
    /// (topic exists but has no question pool yet).
    async fn scopes_for_topic(&self, topic_id: i64) -> Result<Vec<TopicScope>, StatsError>;

    /// Active questions of a law, optionally restricted to an explicit
    /// article list. `None` means the whole law.
    async fn questions_for_law(
        &self,
        law_id: i64,
        articles: Option<&[i32]>,
    ) -> Result<Vec<QuestionMeta>, StatsError>;
}
