// src/services/topic_data.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::error::StatsError;
use crate::models::answer::AnswerRecord;
use crate::models::oposicion::Oposicion;
use crate::models::question::Difficulty;
use crate::models::stats::{
    DifficultyPerformance, LawArticleCount, RecentStats, TopicData, TopicDataResult, TopicInfo,
    UserProgress,
};
use crate::services::{percentage, StatsService, TopicKey};

impl StatsService {
    /// Full statistics for one topic of a track: catalog-level counts
    /// (difficulty histogram, official-exam questions, articles per law)
    /// plus, when a user is given, that user's progress.
    ///
    /// Only the anonymous variant is cached. Personalized results are
    /// always recomputed so one user's progress can never be served to
    /// another, and personal progress is never stale.
    pub async fn get_topic_full_data(
        &self,
        topic_number: i32,
        oposicion: Oposicion,
        user_id: Option<&str>,
    ) -> TopicDataResult {
        let key = TopicKey {
            oposicion,
            topic_number,
        };

        if user_id.is_none() {
            if let Some(data) = self.topic_cache.get(&key) {
                return TopicDataResult::ok(data, true);
            }
        }

        match self.compute_topic_data(topic_number, oposicion, user_id).await {
            Ok(data) => {
                if user_id.is_none() {
                    self.topic_cache.set(key, data.clone());
                }
                TopicDataResult::ok(data, false)
            }
            // A topic number out of range for the track is an expected
            // outcome, reported without noise in the logs.
            Err(e @ StatsError::TopicNotFound { .. }) => TopicDataResult::failure(e.to_string()),
            Err(e) => {
                tracing::error!(
                    "Failed to build topic data for {} topic {}: {}",
                    oposicion,
                    topic_number,
                    e
                );
                TopicDataResult::failure(e.to_string())
            }
        }
    }

    /// Drops the cached anonymous entry for one topic.
    pub fn invalidate_topic_cache(&self, topic_number: i32, oposicion: Oposicion) {
        self.topic_cache.invalidate(&TopicKey {
            oposicion,
            topic_number,
        });
    }

    pub fn clear_all_topic_cache(&self) {
        self.topic_cache.clear();
    }

    async fn compute_topic_data(
        &self,
        topic_number: i32,
        oposicion: Oposicion,
        user_id: Option<&str>,
    ) -> Result<TopicData, StatsError> {
        let position = oposicion.position_type();

        let topic = self
            .store
            .find_active_topic(position, topic_number)
            .await?
            .ok_or(StatsError::TopicNotFound {
                topic_number,
                oposicion,
            })?;

        let info = TopicInfo::from(&topic);
        let scopes = self.store.scopes_for_topic(topic.id).await?;

        // A topic without scope mappings has no question pool yet;
        // that is all-zero statistics, not an error.
        if scopes.is_empty() {
            return Ok(TopicData {
                topic: info,
                difficulty_stats: zero_histogram(),
                total_questions: 0,
                official_questions_count: 0,
                articles_by_law: Vec::new(),
                user_progress: user_id.map(|_| UserProgress::empty(0)),
            });
        }

        let mut difficulty_stats = zero_histogram();
        let mut total_questions = 0i64;
        let mut official_questions_count = 0i64;
        let mut articles_per_law: HashMap<String, HashSet<i32>> = HashMap::new();

        for scope in &scopes {
            let questions = self
                .store
                .questions_for_law(scope.law_id, scope.article_numbers.as_deref())
                .await?;

            for question in &questions {
                *difficulty_stats.entry(question.difficulty_bucket()).or_insert(0) += 1;
                if question.is_official_exam {
                    official_questions_count += 1;
                }
                articles_per_law
                    .entry(scope.law_name.clone())
                    .or_default()
                    .insert(question.article_number);
            }
            total_questions += questions.len() as i64;
        }

        let mut articles_by_law: Vec<LawArticleCount> = articles_per_law
            .into_iter()
            .map(|(law, articles)| LawArticleCount {
                law,
                articles_with_questions: articles.len() as i64,
            })
            .collect();
        articles_by_law.sort_by(|a, b| {
            b.articles_with_questions
                .cmp(&a.articles_with_questions)
                .then_with(|| a.law.cmp(&b.law))
        });

        let user_progress = match user_id {
            Some(uid) => Some(
                self.compute_user_progress(uid, topic_number, total_questions)
                    .await?,
            ),
            None => None,
        };

        Ok(TopicData {
            topic: info,
            difficulty_stats,
            total_questions,
            official_questions_count,
            articles_by_law,
            user_progress,
        })
    }

    async fn compute_user_progress(
        &self,
        user_id: &str,
        topic_number: i32,
        total_questions_available: i64,
    ) -> Result<UserProgress, StatsError> {
        let answers = self
            .store
            .answers_for_user_topic(user_id, topic_number)
            .await?;

        if answers.is_empty() {
            return Ok(UserProgress::empty(total_questions_available));
        }

        let now = Utc::now();
        let total_answers = answers.len() as i64;
        let correct = answers.iter().filter(|a| a.is_correct).count() as i64;
        let overall_accuracy = (correct as f64 / total_answers as f64) * 100.0;

        let unique_questions_answered = answers
            .iter()
            .map(|a| a.question_id)
            .collect::<HashSet<_>>()
            .len() as i64;
        let never_seen = (total_questions_available - unique_questions_answered).max(0);

        let mut performance_by_difficulty: BTreeMap<Difficulty, DifficultyPerformance> =
            BTreeMap::new();
        for answer in &answers {
            let bucket = answer
                .difficulty
                .as_deref()
                .and_then(Difficulty::from_label)
                .unwrap_or(Difficulty::Auto);
            let perf = performance_by_difficulty
                .entry(bucket)
                .or_insert(DifficultyPerformance {
                    total: 0,
                    correct: 0,
                    accuracy: 0,
                });
            perf.total += 1;
            if answer.is_correct {
                perf.correct += 1;
            }
        }
        for perf in performance_by_difficulty.values_mut() {
            perf.accuracy = percentage(perf.correct, perf.total);
        }

        // Each window is an independent filter against `now`, not a
        // cumulative exclusion of the shorter ones.
        let recent_stats = RecentStats {
            last_7_days: distinct_questions_since(&answers, now, 7),
            last_15_days: distinct_questions_since(&answers, now, 15),
            last_30_days: distinct_questions_since(&answers, now, 30),
        };

        Ok(UserProgress {
            total_answers,
            overall_accuracy,
            unique_questions_answered,
            total_questions_available,
            never_seen,
            performance_by_difficulty,
            recent_stats,
        })
    }
}

/// Histogram with the four scored buckets at zero. `Auto` only shows up
/// when a question actually falls into it.
fn zero_histogram() -> BTreeMap<Difficulty, i64> {
    BTreeMap::from([
        (Difficulty::Easy, 0),
        (Difficulty::Medium, 0),
        (Difficulty::Hard, 0),
        (Difficulty::Extreme, 0),
    ])
}

fn distinct_questions_since(answers: &[AnswerRecord], now: DateTime<Utc>, days: i64) -> i64 {
    let cutoff = now - Duration::days(days);
    answers
        .iter()
        .filter(|a| a.answered_at >= cutoff)
        .map(|a| a.question_id)
        .collect::<HashSet<_>>()
        .len() as i64
}
