// src/services/mod.rs

pub mod theme_stats;
pub mod topic_data;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::TtlCache;
use crate::models::oposicion::Oposicion;
use crate::models::stats::{ThemeStat, TopicData};
use crate::store::StatsStore;

/// Theme-stats entries go stale quickly: a user finishing a test expects
/// the dashboard to move within seconds.
pub const THEME_STATS_TTL: Duration = Duration::from_secs(30);

/// Anonymous topic data is catalog-only and changes rarely.
pub const TOPIC_DATA_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache key for theme stats: one entry per user, plus one per
/// (user, track) for the scoped variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ThemeKey {
    pub user_id: String,
    pub oposicion: Option<Oposicion>,
}

/// Cache key for anonymous topic data. User-scoped lookups are never
/// cached, so no user discriminator is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct TopicKey {
    pub oposicion: Oposicion,
    pub topic_number: i32,
}

/// Cached theme-stats payload: the grouped stats plus the time they
/// were computed, so cache hits report the original generation time.
#[derive(Debug, Clone)]
pub(crate) struct ThemeSnapshot {
    pub stats: BTreeMap<i32, ThemeStat>,
    pub generated_at: DateTime<Utc>,
}

/// The statistics aggregation service.
///
/// Holds its caches as injected state rather than module globals, so
/// tests get isolation for free and two services never share entries
/// by accident. Cloning is cheap and clones share the store and caches.
#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn StatsStore>,
    theme_cache: TtlCache<ThemeKey, ThemeSnapshot>,
    topic_cache: TtlCache<TopicKey, TopicData>,
}

impl StatsService {
    pub fn new(store: Arc<dyn StatsStore>) -> Self {
        Self::with_ttls(store, THEME_STATS_TTL, TOPIC_DATA_TTL)
    }

    /// Construct with explicit TTLs (config override, short TTLs in
    /// expiry tests).
    pub fn with_ttls(store: Arc<dyn StatsStore>, theme_ttl: Duration, topic_ttl: Duration) -> Self {
        Self {
            store,
            theme_cache: TtlCache::new(theme_ttl),
            topic_cache: TtlCache::new(topic_ttl),
        }
    }
}

/// Integer percentage, rounded half-up (`.round()` is half-away-from-zero,
/// which is half-up for the non-negative counts we feed it). 0 when
/// `total` is 0.
pub(crate) fn percentage(correct: i64, total: i64) -> i64 {
    if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as i64
    }
}
