use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted form of a player, one JSON document per player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub category_stats: BTreeMap<String, u32>,
    pub score: u32,
    pub streak: u32,
    pub high_score: u32,
}

/// Lenient read of a record. Absent fields are reported, not rejected.
#[derive(Debug, Deserialize)]
pub(crate) struct PartialRecord {
    pub category_stats: Option<BTreeMap<String, u32>>,
    pub score: Option<u32>,
    pub streak: Option<u32>,
    pub high_score: Option<u32>,
}

impl PartialRecord {
    pub(crate) fn complete(self) -> (ProfileRecord, Vec<&'static str>) {
        let mut missing = Vec::new();
        let category_stats = match self.category_stats {
            Some(stats) => stats,
            None => {
                missing.push("category_stats");
                BTreeMap::new()
            }
        };
        let mut field = |value: Option<u32>, name: &'static str| {
            value.unwrap_or_else(|| {
                missing.push(name);
                0
            })
        };
        let score = field(self.score, "score");
        let streak = field(self.streak, "streak");
        let high_score = field(self.high_score, "high_score");

        (
            ProfileRecord {
                category_stats,
                score,
                streak,
                high_score,
            },
            missing,
        )
    }
}

/// A player and their running statistics.
///
/// `high_score >= score` holds after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: String,
    pub category_stats: BTreeMap<String, u32>,
    pub score: u32,
    pub streak: u32,
    pub high_score: u32,
}

impl PlayerProfile {
    pub fn new(name: &str) -> Self {
        Self::from_record(name, ProfileRecord::default())
    }

    pub fn from_record(name: &str, record: ProfileRecord) -> Self {
        let mut profile = Self {
            name: name.to_string(),
            category_stats: record.category_stats,
            score: record.score,
            streak: record.streak,
            high_score: record.high_score,
        };
        profile.capture_high_score();
        profile
    }

    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord {
            category_stats: self.category_stats.clone(),
            score: self.score,
            streak: self.streak,
            high_score: self.high_score,
        }
    }

    pub fn correct_count(&self, category: &str) -> u32 {
        self.category_stats.get(category).copied().unwrap_or(0)
    }

    pub fn record_correct(&mut self, category: &str, increment: u32) {
        self.score += increment;
        self.streak += 1;
        self.capture_high_score();
        *self.category_stats.entry(category.to_string()).or_default() += 1;
    }

    /// A miss still captures a high score reached right before it.
    pub fn record_miss(&mut self) {
        self.capture_high_score();
        self.score = 0;
        self.streak = 0;
    }

    pub fn reset<'a>(&mut self, categories: impl IntoIterator<Item = &'a str>) {
        self.score = 0;
        self.streak = 0;
        self.high_score = 0;
        self.category_stats = categories
            .into_iter()
            .map(|name| (name.to_string(), 0))
            .collect();
    }

    fn capture_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }
}

/// Result of a successful load. `missing` names fields that were absent and defaulted.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub profile: PlayerProfile,
    pub missing: Vec<&'static str>,
}
