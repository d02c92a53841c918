// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use opostats::models::answer::AnswerRecord;
use opostats::models::oposicion::Oposicion;
use opostats::models::question::QuestionMeta;
use opostats::models::topic::{Topic, TopicScope};
use opostats::services::StatsService;
use opostats::store::MemoryStore;

pub fn service(store: MemoryStore) -> StatsService {
    StatsService::new(Arc::new(store))
}

pub fn service_with_ttls(
    store: MemoryStore,
    theme_ttl: Duration,
    topic_ttl: Duration,
) -> StatsService {
    StatsService::with_ttls(Arc::new(store), theme_ttl, topic_ttl)
}

pub fn aux_position() -> &'static str {
    Oposicion::AuxiliarAdministrativoEstado.position_type().as_str()
}

pub fn answer(
    user_id: &str,
    topic_number: Option<i32>,
    question_id: i64,
    is_correct: bool,
    days_ago: i64,
) -> AnswerRecord {
    AnswerRecord {
        user_id: user_id.to_string(),
        topic_number,
        question_id,
        is_correct,
        difficulty: None,
        answered_at: Utc::now() - chrono::Duration::days(days_ago),
    }
}

pub fn answer_with_difficulty(
    user_id: &str,
    topic_number: Option<i32>,
    question_id: i64,
    is_correct: bool,
    days_ago: i64,
    difficulty: &str,
) -> AnswerRecord {
    AnswerRecord {
        difficulty: Some(difficulty.to_string()),
        ..answer(user_id, topic_number, question_id, is_correct, days_ago)
    }
}

pub fn topic(id: i64, position_type: &str, topic_number: i32, title: &str) -> Topic {
    Topic {
        id,
        position_type: position_type.to_string(),
        topic_number,
        title: title.to_string(),
        is_active: true,
    }
}

pub fn scope(law_id: i64, law_name: &str, article_numbers: Option<Vec<i32>>) -> TopicScope {
    TopicScope {
        law_id,
        law_name: law_name.to_string(),
        article_numbers,
    }
}

pub fn question(
    id: i64,
    law_id: i64,
    article_number: i32,
    global_difficulty: Option<f64>,
    difficulty: Option<&str>,
    is_official_exam: bool,
) -> QuestionMeta {
    QuestionMeta {
        id,
        law_id,
        article_number,
        global_difficulty,
        difficulty: difficulty.map(str::to_string),
        is_official_exam,
    }
}
