// tests/topic_data_tests.rs

mod common;

use std::time::Duration;

use common::{
    answer, answer_with_difficulty, aux_position, question, scope, service, service_with_ttls,
    topic,
};
use opostats::models::oposicion::Oposicion;
use opostats::models::question::Difficulty;
use opostats::store::MemoryStore;

const OPOSICION: Oposicion = Oposicion::AuxiliarAdministrativoEstado;
const LPAC: i64 = 1;
const CE: i64 = 2;

/// Topic 1 covers LPAC articles 1, 2 and 5 plus the whole of CE
/// (virtual-law scope). LPAC also has a question on article 7 that is
/// outside the topic. Topic 2 exists but has no scope yet.
fn catalog() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_topic(
        topic(1, aux_position(), 1, "Procedimiento administrativo"),
        vec![
            scope(LPAC, "LPAC", Some(vec![1, 2, 5])),
            scope(CE, "CE", None),
        ],
    );
    store.insert_topic(topic(2, aux_position(), 2, "Unión Europea"), Vec::new());

    store.insert_law_questions(
        LPAC,
        vec![
            question(1, LPAC, 1, Some(10.0), None, true),
            question(2, LPAC, 2, Some(30.0), None, false),
            question(3, LPAC, 2, Some(60.0), None, false),
            question(4, LPAC, 5, Some(80.0), None, false),
            // Outside the topic's article list.
            question(5, LPAC, 7, Some(5.0), None, false),
        ],
    );
    store.insert_law_questions(
        CE,
        vec![
            question(10, CE, 1, None, Some("hard"), true),
            question(11, CE, 9, None, None, false),
        ],
    );
    store
}

#[tokio::test]
async fn missing_topic_is_an_expected_failure() {
    let result = service(catalog())
        .get_topic_full_data(9999, OPOSICION, Some("u1"))
        .await;

    assert!(!result.success);
    assert!(result.data.is_none());
    let error = result.error.unwrap();
    assert!(error.contains("9999"));
    assert!(error.contains(OPOSICION.as_key()));
}

#[tokio::test]
async fn collects_questions_honoring_article_lists_and_virtual_laws() {
    let result = service(catalog())
        .get_topic_full_data(1, OPOSICION, None)
        .await;

    assert!(result.success);
    let data = result.data.unwrap();

    assert_eq!(data.topic.topic_number, 1);
    // 4 LPAC questions inside the article list (article 7 excluded)
    // plus every CE question via the virtual-law scope.
    assert_eq!(data.total_questions, 6);
    assert_eq!(data.official_questions_count, 2);
}

#[tokio::test]
async fn difficulty_histogram_applies_the_two_tier_rule() {
    let result = service(catalog())
        .get_topic_full_data(1, OPOSICION, None)
        .await;

    let stats = result.data.unwrap().difficulty_stats;
    assert_eq!(stats[&Difficulty::Easy], 1);
    assert_eq!(stats[&Difficulty::Medium], 1);
    // One bucketed by score, one by static label.
    assert_eq!(stats[&Difficulty::Hard], 2);
    assert_eq!(stats[&Difficulty::Extreme], 1);
    // No score, no label.
    assert_eq!(stats[&Difficulty::Auto], 1);
}

#[tokio::test]
async fn articles_by_law_sorts_descending_by_distinct_articles() {
    let result = service(catalog())
        .get_topic_full_data(1, OPOSICION, None)
        .await;

    let articles = result.data.unwrap().articles_by_law;
    assert_eq!(articles.len(), 2);
    // LPAC has questions on articles {1, 2, 5}, CE on {1, 9}.
    assert_eq!(articles[0].law, "LPAC");
    assert_eq!(articles[0].articles_with_questions, 3);
    assert_eq!(articles[1].law, "CE");
    assert_eq!(articles[1].articles_with_questions, 2);
}

#[tokio::test]
async fn empty_scope_short_circuits_to_all_zero_statistics() {
    let result = service(catalog())
        .get_topic_full_data(2, OPOSICION, Some("u1"))
        .await;

    assert!(result.success);
    let data = result.data.unwrap();
    assert_eq!(data.total_questions, 0);
    assert_eq!(data.official_questions_count, 0);
    assert!(data.articles_by_law.is_empty());
    assert!(data.difficulty_stats.values().all(|&count| count == 0));

    let progress = data.user_progress.unwrap();
    assert_eq!(progress.total_answers, 0);
    assert_eq!(progress.never_seen, 0);
}

#[tokio::test]
async fn anonymous_lookup_carries_no_user_progress() {
    let result = service(catalog())
        .get_topic_full_data(1, OPOSICION, None)
        .await;

    assert!(result.success);
    assert!(result.data.unwrap().user_progress.is_none());
}

#[tokio::test]
async fn anonymous_progress_serializes_as_explicit_null() {
    let result = service(catalog())
        .get_topic_full_data(1, OPOSICION, None)
        .await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert!(json["userProgress"].is_null());
    assert!(json.get("userProgress").is_some());
}

#[tokio::test]
async fn anonymous_lookups_are_cached_for_the_topic() {
    let service = service(catalog());

    let first = service.get_topic_full_data(1, OPOSICION, None).await;
    let second = service.get_topic_full_data(1, OPOSICION, None).await;

    assert_eq!(first.cached, Some(false));
    assert_eq!(second.cached, Some(true));
    assert_eq!(
        first.data.unwrap().total_questions,
        second.data.unwrap().total_questions
    );
}

#[tokio::test]
async fn personalized_lookups_are_never_cached() {
    let mut store = catalog();
    store.push_answer(answer("u1", Some(1), 1, true, 1));
    let service = service(store);

    // Warm the anonymous entry first; it must not leak into the
    // personalized path.
    service.get_topic_full_data(1, OPOSICION, None).await;

    let first = service.get_topic_full_data(1, OPOSICION, Some("u1")).await;
    let second = service.get_topic_full_data(1, OPOSICION, Some("u1")).await;

    assert_eq!(first.cached, Some(false));
    assert_eq!(second.cached, Some(false));
    assert!(first.data.unwrap().user_progress.is_some());
}

#[tokio::test]
async fn topic_invalidation_forces_recompute() {
    let service = service(catalog());

    service.get_topic_full_data(1, OPOSICION, None).await;
    service.invalidate_topic_cache(1, OPOSICION);

    let result = service.get_topic_full_data(1, OPOSICION, None).await;
    assert_eq!(result.cached, Some(false));
}

#[tokio::test]
async fn expired_topic_entry_is_recomputed() {
    let service = service_with_ttls(
        catalog(),
        Duration::from_secs(30),
        Duration::from_millis(50),
    );

    assert_eq!(
        service.get_topic_full_data(1, OPOSICION, None).await.cached,
        Some(false)
    );
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(
        service.get_topic_full_data(1, OPOSICION, None).await.cached,
        Some(false)
    );
}

#[tokio::test]
async fn clear_all_topic_cache_drops_every_entry() {
    let mut store = catalog();
    store.insert_topic(
        topic(3, aux_position(), 3, "Régimen jurídico"),
        vec![scope(LPAC, "LPAC", Some(vec![1]))],
    );
    let service = service(store);

    service.get_topic_full_data(1, OPOSICION, None).await;
    service.get_topic_full_data(3, OPOSICION, None).await;
    service.clear_all_topic_cache();

    assert_eq!(
        service.get_topic_full_data(1, OPOSICION, None).await.cached,
        Some(false)
    );
    assert_eq!(
        service.get_topic_full_data(3, OPOSICION, None).await.cached,
        Some(false)
    );
}

#[tokio::test]
async fn user_progress_aggregates_answers_for_the_topic() {
    let mut store = catalog();
    store.push_answer(answer_with_difficulty("u1", Some(1), 1, true, 2, "easy"));
    store.push_answer(answer_with_difficulty("u1", Some(1), 1, false, 20, "easy"));
    store.push_answer(answer_with_difficulty("u1", Some(1), 2, true, 10, "medium"));
    store.push_answer(answer("u1", Some(1), 99, false, 40));
    // Another topic and another user stay out of the aggregation.
    store.push_answer(answer("u1", Some(2), 50, true, 1));
    store.push_answer(answer("u2", Some(1), 1, true, 1));

    let result = service(store)
        .get_topic_full_data(1, OPOSICION, Some("u1"))
        .await;

    let progress = result.data.unwrap().user_progress.unwrap();
    assert_eq!(progress.total_answers, 4);
    assert_eq!(progress.overall_accuracy, 50.0);
    assert_eq!(progress.unique_questions_answered, 3);
    assert_eq!(progress.total_questions_available, 6);
    // 6 available, 3 distinct answered.
    assert_eq!(progress.never_seen, 3);

    let easy = &progress.performance_by_difficulty[&Difficulty::Easy];
    assert_eq!((easy.total, easy.correct, easy.accuracy), (2, 1, 50));
    let medium = &progress.performance_by_difficulty[&Difficulty::Medium];
    assert_eq!((medium.total, medium.correct, medium.accuracy), (1, 1, 100));
    // No label falls back to the auto bucket.
    let auto = &progress.performance_by_difficulty[&Difficulty::Auto];
    assert_eq!((auto.total, auto.correct, auto.accuracy), (1, 0, 0));
}

#[tokio::test]
async fn recency_windows_are_independent_filters() {
    let mut store = catalog();
    store.push_answer(answer("u1", Some(1), 1, true, 2));
    // Exactly ten days old: inside 15 and 30, outside 7.
    store.push_answer(answer("u1", Some(1), 2, true, 10));
    store.push_answer(answer("u1", Some(1), 3, true, 20));
    store.push_answer(answer("u1", Some(1), 4, true, 40));

    let result = service(store)
        .get_topic_full_data(1, OPOSICION, Some("u1"))
        .await;

    let recent = result.data.unwrap().user_progress.unwrap().recent_stats;
    assert_eq!(recent.last_7_days, 1);
    assert_eq!(recent.last_15_days, 2);
    assert_eq!(recent.last_30_days, 3);
}

#[tokio::test]
async fn repeat_answers_count_once_per_window() {
    let mut store = catalog();
    // Same question three times this week.
    store.push_answer(answer("u1", Some(1), 1, true, 1));
    store.push_answer(answer("u1", Some(1), 1, false, 2));
    store.push_answer(answer("u1", Some(1), 1, true, 3));

    let result = service(store)
        .get_topic_full_data(1, OPOSICION, Some("u1"))
        .await;

    let recent = result.data.unwrap().user_progress.unwrap().recent_stats;
    assert_eq!(recent.last_7_days, 1);
    assert_eq!(recent.last_30_days, 1);
}

#[tokio::test]
async fn never_seen_is_clamped_when_the_pool_shrinks() {
    let mut store = catalog();
    // Only one question left in the pool, but the user has history on
    // three distinct questions (answered before the pool was trimmed).
    store.insert_topic(
        topic(4, aux_position(), 4, "Atención al ciudadano"),
        vec![scope(LPAC, "LPAC", Some(vec![1]))],
    );
    store.push_answer(answer("u1", Some(4), 1, true, 1));
    store.push_answer(answer("u1", Some(4), 2, true, 2));
    store.push_answer(answer("u1", Some(4), 3, false, 3));

    let result = service(store)
        .get_topic_full_data(4, OPOSICION, Some("u1"))
        .await;

    let progress = result.data.unwrap().user_progress.unwrap();
    assert_eq!(progress.total_questions_available, 1);
    assert_eq!(progress.unique_questions_answered, 3);
    assert_eq!(progress.never_seen, 0);
}

#[tokio::test]
async fn user_with_no_topic_answers_gets_zero_progress() {
    let result = service(catalog())
        .get_topic_full_data(1, OPOSICION, Some("fresh-user"))
        .await;

    let progress = result.data.unwrap().user_progress.unwrap();
    assert_eq!(progress.total_answers, 0);
    assert_eq!(progress.overall_accuracy, 0.0);
    assert_eq!(progress.unique_questions_answered, 0);
    assert_eq!(progress.total_questions_available, 6);
    assert_eq!(progress.never_seen, 6);
    assert!(progress.performance_by_difficulty.is_empty());
    assert_eq!(progress.recent_stats.last_30_days, 0);
}

#[tokio::test]
async fn store_fault_becomes_structured_failure() {
    let store = catalog();
    store.fail_with("timeout acquiring connection");

    let result = service(store)
        .get_topic_full_data(1, OPOSICION, None)
        .await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("timeout"));
}

#[tokio::test]
async fn cached_entry_keeps_serving_while_the_store_fails() {
    let store = std::sync::Arc::new(catalog());
    let service = opostats::services::StatsService::new(store.clone());

    let first = service.get_topic_full_data(1, OPOSICION, None).await;
    assert!(first.success);

    store.fail_with("connection reset");

    // Within the TTL the cached entry is still served.
    let hit = service.get_topic_full_data(1, OPOSICION, None).await;
    assert!(hit.success);
    assert_eq!(hit.cached, Some(true));

    // Once the entry is dropped, the failure surfaces as a structured
    // result.
    service.invalidate_topic_cache(1, OPOSICION);
    let miss = service.get_topic_full_data(1, OPOSICION, None).await;
    assert!(!miss.success);
    assert!(miss.error.unwrap().contains("connection reset"));
}
