//! Per-perspective fact namespaces
//!
//! Each struct is optional in [`DeliberationContext`](super::DeliberationContext)
//! and every field defaults, so partial documents deserialize.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rating scale upper bound for skills and topic ratings
pub const RATING_SCALE_MAX: f64 = 5.0;

// ==================== Reality ====================

/// Grounding facts: current skill ratings against what the decision requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealityFacts {
    /// Current rating per topic (0–5)
    pub skills: BTreeMap<String, f64>,
    /// Required rating per topic (0–5)
    pub requirements: BTreeMap<String, f64>,
    pub resources: Option<String>,
    pub timeline: Option<String>,
    pub scope: Option<String>,
    pub stakeholders: Vec<String>,
}

/// Shortfall between a required and a current rating for one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGap {
    pub topic: String,
    pub current: f64,
    pub required: f64,
}

impl SkillGap {
    pub fn points(&self) -> f64 {
        self.required - self.current
    }
}

impl RealityFacts {
    /// All positive gaps, largest first (ties by topic name).
    ///
    /// A required topic with no recorded skill counts as rated 0.
    /// Non-finite ratings are ignored.
    pub fn skill_gaps(&self) -> Vec<SkillGap> {
        let mut gaps: Vec<SkillGap> = self
            .requirements
            .iter()
            .filter(|(_, required)| required.is_finite())
            .map(|(topic, required)| {
                let current = self
                    .skills
                    .get(topic)
                    .copied()
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0);
                SkillGap {
                    topic: topic.clone(),
                    current: current.clamp(0.0, RATING_SCALE_MAX),
                    required: required.clamp(0.0, RATING_SCALE_MAX),
                }
            })
            .filter(|gap| gap.points() > 0.0)
            .collect();

        gaps.sort_by(|a, b| b.points().total_cmp(&a.points()).then(a.topic.cmp(&b.topic)));
        gaps
    }

    pub fn largest_gap(&self) -> Option<SkillGap> {
        self.skill_gaps().into_iter().next()
    }

    /// Topics rated below 2.0 on the 0–5 scale
    pub fn weak_skills(&self) -> Vec<(&str, f64)> {
        self.skills
            .iter()
            .filter(|(_, rating)| rating.is_finite() && **rating < 2.0)
            .map(|(topic, rating)| (topic.as_str(), *rating))
            .collect()
    }
}

// ==================== Causality ====================

/// One step in a recorded trajectory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub label: String,
    pub status: String,
}

/// Temporal facts: the trajectory so far and its pacing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CausalityFacts {
    /// Ordered oldest first
    pub milestones: Vec<Milestone>,
    pub avg_days_between_steps: Option<f64>,
}

// ==================== Equilibrium ====================

/// Balance facts: stated preferences and competing options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquilibriumFacts {
    /// Preference label → number of times it was chosen
    pub preferences: BTreeMap<String, u32>,
    pub remote_ratio: Option<f64>,
    pub options: Vec<String>,
}

impl EquilibriumFacts {
    /// Most frequently chosen preference (ties by label)
    pub fn dominant_preference(&self) -> Option<(&str, u32)> {
        self.preferences
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Total recorded choices, summed in `u64`
    pub fn total_choices(&self) -> u64 {
        self.preferences.values().map(|count| u64::from(*count)).sum()
    }
}

// ==================== Transformation ====================

/// Learning-progress facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationFacts {
    /// Topic → recent change in self-rated confidence
    pub deltas: BTreeMap<String, f64>,
    pub total_sessions: u32,
}

impl TransformationFacts {
    pub fn mean_delta(&self) -> Option<f64> {
        let finite: Vec<f64> = self.deltas.values().copied().filter(|d| d.is_finite()).collect();
        if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64)
        }
    }

    /// Topics whose confidence is moving fastest, largest delta first
    pub fn fastest_growing(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut topics: Vec<(&str, f64)> = self
            .deltas
            .iter()
            .filter(|(_, d)| d.is_finite())
            .map(|(topic, d)| (topic.as_str(), *d))
            .collect();
        topics.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(b.0)));
        topics.truncate(limit);
        topics
    }
}

// ==================== Simulation ====================

/// Historical outcome distribution used to weight scenarios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationFacts {
    /// Outcome label → count
    pub outcomes: BTreeMap<String, u32>,
}

impl SimulationFacts {
    /// Summed in `u64` so any set of `u32` counts fits
    pub fn total_outcomes(&self) -> u64 {
        self.outcomes.values().map(|count| u64::from(*count)).sum()
    }

    /// Outcomes with their share of the total, most frequent first
    pub fn distribution(&self) -> Vec<(&str, f64)> {
        let total = self.total_outcomes();
        if total == 0 {
            return Vec::new();
        }
        let mut shares: Vec<(&str, f64)> = self
            .outcomes
            .iter()
            .map(|(label, count)| (label.as_str(), f64::from(*count) / total as f64))
            .collect();
        shares.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(b.0)));
        shares
    }
}

// ==================== Memory ====================

/// Prior attempts and successes for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeTally {
    pub attempts: u32,
    pub successes: u32,
}

impl OutcomeTally {
    pub fn success_rate(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(f64::from(self.successes.min(self.attempts)) / f64::from(self.attempts))
        }
    }
}

/// Memory facts: prior outcomes grouped by category and topic ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryFacts {
    pub categories: BTreeMap<String, OutcomeTally>,
    /// Topic → average rating (0–5)
    pub topic_ratings: BTreeMap<String, f64>,
}

impl MemoryFacts {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.topic_ratings.is_empty()
    }

    /// Category names that appear (case-insensitively) in the normalized query
    pub fn mentioned_categories<'a>(&'a self, normalized_query: &str) -> Vec<&'a str> {
        let padded = format!(" {} ", normalized_query);
        self.categories
            .keys()
            .filter(|name| {
                let needle = name.to_lowercase();
                !needle.trim().is_empty() && padded.contains(&format!(" {} ", needle.trim()))
            })
            .map(String::as_str)
            .collect()
    }

    /// Weakest rated topics, lowest first
    pub fn weakest_topics(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut topics: Vec<(&str, f64)> = self
            .topic_ratings
            .iter()
            .filter(|(_, r)| r.is_finite())
            .map(|(topic, r)| (topic.as_str(), *r))
            .collect();
        topics.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(b.0)));
        topics.truncate(limit);
        topics
    }
}
