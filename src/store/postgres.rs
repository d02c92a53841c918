// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StatsError;
use crate::models::answer::AnswerRecord;
use crate::models::oposicion::PositionType;
use crate::models::question::QuestionMeta;
use crate::models::topic::{Topic, TopicScope};
use crate::store::StatsStore;

/// Postgres-backed store. Plain read queries over the catalog and
/// answer-history tables; timeouts and connectivity faults bubble up as
/// `StatsError::DataFetch` via the `From<sqlx::Error>` impl.
#[derive(Clone)]
pub struct PgStatsStore {
    pool: PgPool,
}

impl PgStatsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsStore for PgStatsStore {
    async fn answers_for_user(&self, user_id: &str) -> Result<Vec<AnswerRecord>, StatsError> {
        let rows = sqlx::query_as::<_, AnswerRecord>(
            r#"
            SELECT user_id, topic_number, question_id, is_correct, difficulty, answered_at
            FROM test_answers
            WHERE user_id = $1 AND topic_number IS NOT NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn answers_for_user_topic(
        &self,
        user_id: &str,
        topic_number: i32,
    ) -> Result<Vec<AnswerRecord>, StatsError> {
        let rows = sqlx::query_as::<_, AnswerRecord>(
            r#"
            SELECT user_id, topic_number, question_id, is_correct, difficulty, answered_at
            FROM test_answers
            WHERE user_id = $1 AND topic_number = $2
            "#,
        )
        .bind(user_id)
        .bind(topic_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn active_topic_numbers(
        &self,
        position: PositionType,
    ) -> Result<Vec<i32>, StatsError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            r#"
            SELECT topic_number
            FROM topics
            WHERE position_type = $1 AND is_active = TRUE
            ORDER BY topic_number
            "#,
        )
        .bind(position.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(n,)| n).collect())
    }

    async fn find_active_topic(
        &self,
        position: PositionType,
        topic_number: i32,
    ) -> Result<Option<Topic>, StatsError> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, position_type, topic_number, title, is_active
            FROM topics
            WHERE position_type = $1 AND topic_number = $2 AND is_active = TRUE
            "#,
        )
        .bind(position.as_str())
        .bind(topic_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(topic)
    }

    async fn scopes_for_topic(&self, topic_id: i64) -> Result<Vec<TopicScope>, StatsError> {
        let scopes = sqlx::query_as::<_, TopicScope>(
            r#"
            SELECT ts.law_id, l.short_name AS law_name, ts.article_numbers
            FROM topic_scope ts
            JOIN laws l ON l.id = ts.law_id
            WHERE ts.topic_id = $1
            "#,
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(scopes)
    }

    async fn questions_for_law(
        &self,
        law_id: i64,
        articles: Option<&[i32]>,
    ) -> Result<Vec<QuestionMeta>, StatsError> {
        // NULL article list means the whole law (virtual-law scope).
        let questions = sqlx::query_as::<_, QuestionMeta>(
            r#"
            SELECT id, law_id, article_number, global_difficulty, difficulty, is_official_exam
            FROM questions
            WHERE law_id = $1
              AND is_active = TRUE
              AND ($2::INT[] IS NULL OR article_number = ANY($2))
            "#,
        )
        .bind(law_id)
        .bind(articles.map(|a| a.to_vec()))
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }
}
