// src/store/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StatsError;
use crate::models::answer::AnswerRecord;
use crate::models::oposicion::PositionType;
use crate::models::question::QuestionMeta;
use crate::models::topic::{Topic, TopicScope};
use crate::store::StatsStore;

/// In-process store over fixture data. Used by the test suite and local
/// demos; holds active questions only (the Postgres store filters
/// inactive rows at the query instead).
#[derive(Default)]
pub struct MemoryStore {
    answers: Vec<AnswerRecord>,
    topics: Vec<Topic>,
    scopes: HashMap<i64, Vec<TopicScope>>,
    questions_by_law: HashMap<i64, Vec<QuestionMeta>>,
    fail_message: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_answer(&mut self, answer: AnswerRecord) {
        self.answers.push(answer);
    }

    pub fn insert_topic(&mut self, topic: Topic, scopes: Vec<TopicScope>) {
        self.scopes.insert(topic.id, scopes);
        self.topics.push(topic);
    }

    pub fn insert_law_questions(&mut self, law_id: i64, questions: Vec<QuestionMeta>) {
        self.questions_by_law
            .entry(law_id)
            .or_default()
            .extend(questions);
    }

    /// Makes every subsequent call fail with the given message,
    /// simulating a store fault. Takes `&self` so tests can flip a
    /// store that is already shared with a service.
    pub fn fail_with(&self, message: &str) {
        *self.fail_message.lock().unwrap() = Some(message.to_string());
    }

    fn check(&self) -> Result<(), StatsError> {
        match self.fail_message.lock().unwrap().clone() {
            Some(msg) => Err(StatsError::DataFetch(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn answers_for_user(&self, user_id: &str) -> Result<Vec<AnswerRecord>, StatsError> {
        self.check()?;
        Ok(self
            .answers
            .iter()
            .filter(|a| a.user_id == user_id && a.topic_number.is_some())
            .cloned()
            .collect())
    }

    async fn answers_for_user_topic(
        &self,
        user_id: &str,
        topic_number: i32,
    ) -> Result<Vec<AnswerRecord>, StatsError> {
        self.check()?;
        Ok(self
            .answers
            .iter()
            .filter(|a| a.user_id == user_id && a.topic_number == Some(topic_number))
            .cloned()
            .collect())
    }

    async fn active_topic_numbers(
        &self,
        position: PositionType,
    ) -> Result<Vec<i32>, StatsError> {
        self.check()?;
        let mut numbers: Vec<i32> = self
            .topics
            .iter()
            .filter(|t| t.position_type == position.as_str() && t.is_active)
            .map(|t| t.topic_number)
            .collect();
        numbers.sort_unstable();
        Ok(numbers)
    }

    async fn find_active_topic(
        &self,
        position: PositionType,
        topic_number: i32,
    ) -> Result<Option<Topic>, StatsError> {
        self.check()?;
        Ok(self
            .topics
            .iter()
            .find(|t| {
                t.position_type == position.as_str()
                    && t.topic_number == topic_number
                    && t.is_active
            })
            .cloned())
    }

    async fn scopes_for_topic(&self, topic_id: i64) -> Result<Vec<TopicScope>, StatsError> {
        self.check()?;
        Ok(self.scopes.get(&topic_id).cloned().unwrap_or_default())
    }

    async fn questions_for_law(
        &self,
        law_id: i64,
        articles: Option<&[i32]>,
    ) -> Result<Vec<QuestionMeta>, StatsError> {
        self.check()?;
        let questions = self
            .questions_by_law
            .get(&law_id)
            .map(|qs| {
                qs.iter()
                    .filter(|q| match articles {
                        Some(list) => list.contains(&q.article_number),
                        None => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(questions)
    }
}
