// src/services/theme_stats.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::error::StatsError;
use crate::models::oposicion::Oposicion;
use crate::models::stats::{ThemeStat, ThemeStatsResult};
use crate::services::{percentage, StatsService, ThemeKey, ThemeSnapshot};

/// Running totals for one topic while grouping answers.
#[derive(Default)]
struct TopicAccumulator {
    total: i64,
    correct: i64,
    last_study: Option<DateTime<Utc>>,
}

impl StatsService {
    /// Per-topic stats over the user's whole answer history.
    ///
    /// * Groups answers by topic number (unmapped answers excluded).
    /// * Serves from the theme cache within its TTL.
    /// * Store faults come back as a `success:false` envelope, never as
    ///   an error the caller has to catch.
    pub async fn get_user_theme_stats(&self, user_id: &str) -> ThemeStatsResult {
        self.theme_stats_scoped(user_id, None).await
    }

    /// Same aggregation restricted to topic numbers active for one track.
    pub async fn get_user_theme_stats_by_oposicion(
        &self,
        user_id: &str,
        oposicion: Oposicion,
    ) -> ThemeStatsResult {
        self.theme_stats_scoped(user_id, Some(oposicion)).await
    }

    /// Scoped stats for several users at once. Each user is computed
    /// independently and consults the cache on its own; users with no
    /// answers still get an entry. An empty input yields an empty map.
    pub async fn get_user_theme_stats_batch(
        &self,
        user_ids: &[String],
        oposicion: Oposicion,
    ) -> HashMap<String, ThemeStatsResult> {
        let mut results = HashMap::with_capacity(user_ids.len());
        for user_id in user_ids {
            let stats = self
                .get_user_theme_stats_by_oposicion(user_id, oposicion)
                .await;
            results.insert(user_id.clone(), stats);
        }
        results
    }

    /// Drops every theme-stats entry of one user (whole-history and all
    /// scoped variants). Called after a known mutation, e.g. the user
    /// finished a test.
    pub fn invalidate_theme_stats_cache(&self, user_id: &str) {
        self.theme_cache
            .invalidate_where(|key| key.user_id == user_id);
    }

    pub fn clear_all_theme_stats_cache(&self) {
        self.theme_cache.clear();
    }

    async fn theme_stats_scoped(
        &self,
        user_id: &str,
        oposicion: Option<Oposicion>,
    ) -> ThemeStatsResult {
        if user_id.trim().is_empty() {
            return ThemeStatsResult::failure("User id must not be empty");
        }

        let key = ThemeKey {
            user_id: user_id.to_string(),
            oposicion,
        };

        if let Some(snapshot) = self.theme_cache.get(&key) {
            return ThemeStatsResult::ok(snapshot.stats, snapshot.generated_at, true);
        }

        match self.compute_theme_stats(user_id, oposicion).await {
            Ok(snapshot) => {
                self.theme_cache.set(key, snapshot.clone());
                ThemeStatsResult::ok(snapshot.stats, snapshot.generated_at, false)
            }
            Err(e) => {
                tracing::error!("Failed to compute theme stats for user {}: {}", user_id, e);
                ThemeStatsResult::failure(e.to_string())
            }
        }
    }

    async fn compute_theme_stats(
        &self,
        user_id: &str,
        oposicion: Option<Oposicion>,
    ) -> Result<ThemeSnapshot, StatsError> {
        let answers = self.store.answers_for_user(user_id).await?;

        // Scoped variant: keep only topics active for the track.
        let allowed: Option<HashSet<i32>> = match oposicion {
            Some(op) => Some(
                self.store
                    .active_topic_numbers(op.position_type())
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => None,
        };

        let mut groups: BTreeMap<i32, TopicAccumulator> = BTreeMap::new();
        for answer in &answers {
            let Some(topic_number) = answer.topic_number else {
                continue;
            };
            if let Some(allowed) = &allowed {
                if !allowed.contains(&topic_number) {
                    continue;
                }
            }

            let acc = groups.entry(topic_number).or_default();
            acc.total += 1;
            if answer.is_correct {
                acc.correct += 1;
            }
            acc.last_study = match acc.last_study {
                Some(prev) => Some(prev.max(answer.answered_at)),
                None => Some(answer.answered_at),
            };
        }

        let stats = groups
            .into_iter()
            .map(|(topic_number, acc)| {
                let stat = ThemeStat {
                    topic_number,
                    total: acc.total,
                    correct: acc.correct,
                    accuracy: percentage(acc.correct, acc.total),
                    last_study: acc.last_study,
                    last_study_formatted: format_last_study(acc.last_study),
                };
                (topic_number, stat)
            })
            .collect();

        Ok(ThemeSnapshot {
            stats,
            generated_at: Utc::now(),
        })
    }
}

/// Short date for dashboards, or "Never" for topics without a single
/// recorded answer timestamp.
fn format_last_study(last_study: Option<DateTime<Utc>>) -> String {
    match last_study {
        Some(ts) => ts.format("%d/%m/%Y").to_string(),
        None => "Never".to_string(),
    }
}
