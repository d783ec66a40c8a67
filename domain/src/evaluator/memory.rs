//! Memory evaluator: brings precedent and prior outcomes to bear
//!
//! Besides the caller's `memory` namespace, this evaluator reads the digests
//! of recent deliberations the orchestrator attaches to its context copy.

use super::cues::{Cue, QueryCues};
use super::rules::{ActivationRule, RuleLadder, SignalRule, always};
use super::thresholds::DEFAULT_THRESHOLD;
use super::traits::Evaluator;
use crate::activation::{ContextSnapshot, EvaluatorId};
use crate::core::string::{percent, quote_query, truncate};
use crate::facts::DeliberationContext;
use serde_json::json;

const PATTERN: &[Cue] = &[
    Cue::Stem("pattern"),
    Cue::Stem("recurr"),
    Cue::Stem("repeat"),
    Cue::Word("again"),
];

const HISTORY: &[Cue] = &[
    Cue::Stem("histor"),
    Cue::Word("past"),
    Cue::Word("previously"),
    Cue::Word("earlier"),
    Cue::Word("ago"),
    Cue::Phrase("last time"),
];

const LESSON: &[Cue] = &[
    Cue::Stem("lesson"),
    Cue::Stem("experience"),
    Cue::Stem("precedent"),
    Cue::Word("similar"),
    Cue::Stem("analog"),
];

const REMEMBER: &[Cue] = &[
    Cue::Stem("remember"),
    Cue::Stem("recall"),
    Cue::Stem("remind"),
];

fn recurring_pattern(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(PATTERN)
}

fn history(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(HISTORY)
}

fn has_recent_decisions(_: &QueryCues, context: &DeliberationContext) -> bool {
    !context.signals.recent_decisions.is_empty()
}

fn history_with_record(cues: &QueryCues, context: &DeliberationContext) -> bool {
    history(cues, context) && has_recent_decisions(cues, context)
}

fn known_category(cues: &QueryCues, context: &DeliberationContext) -> bool {
    context
        .memory
        .as_ref()
        .is_some_and(|facts| !facts.mentioned_categories(cues.normalized()).is_empty())
}

fn lesson(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(LESSON)
}

fn remember(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(REMEMBER)
}

fn has_memory_facts(_: &QueryCues, context: &DeliberationContext) -> bool {
    context.memory.as_ref().is_some_and(|facts| !facts.is_empty())
}

fn pattern_recognition(cues: &QueryCues, context: &DeliberationContext) -> bool {
    recurring_pattern(cues, context) || known_category(cues, context)
}

const LADDER: RuleLadder = RuleLadder {
    rules: &[
        ActivationRule {
            name: "recurring_pattern",
            strength: 0.90,
            applies: recurring_pattern,
        },
        ActivationRule {
            name: "history_with_record",
            strength: 0.90,
            applies: history_with_record,
        },
        ActivationRule {
            name: "history",
            strength: 0.80,
            applies: history,
        },
        ActivationRule {
            name: "known_category",
            strength: 0.75,
            applies: known_category,
        },
        ActivationRule {
            name: "lesson",
            strength: 0.75,
            applies: lesson,
        },
        ActivationRule {
            name: "remember",
            strength: 0.70,
            applies: remember,
        },
        ActivationRule {
            name: "memory_facts",
            strength: 0.40,
            applies: has_memory_facts,
        },
    ],
    fallback: 0.15,
};

const SIGNALS: &[SignalRule] = &[
    SignalRule {
        signal: "history_retrieval",
        applies: always,
    },
    SignalRule {
        signal: "pattern_recognition",
        applies: pattern_recognition,
    },
    SignalRule {
        signal: "lineage_trace",
        applies: has_recent_decisions,
    },
    SignalRule {
        signal: "factual_pattern_analysis",
        applies: has_memory_facts,
    },
];

/// Asks what has happened before in situations like this one.
#[derive(Debug, Clone)]
pub struct MemoryEvaluator {
    threshold: f64,
}

impl Default for MemoryEvaluator {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl MemoryEvaluator {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for MemoryEvaluator {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::Memory
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn ladder(&self) -> &RuleLadder {
        &LADDER
    }

    fn signal_rules(&self) -> &[SignalRule] {
        SIGNALS
    }

    fn deliberate(
        &self,
        cues: &QueryCues,
        context: &DeliberationContext,
        _signals: &[String],
    ) -> String {
        let mut lines = vec![format!("Memory for {}:", quote_query(cues.raw(), 80))];

        let recent = &context.signals.recent_decisions;
        if let Some(last) = recent.last() {
            lines.push(format!(
                "- {} recent decision(s) on record; the last was #{} \"{}\" at {} confidence.",
                recent.len(),
                last.sequence_number,
                truncate(&last.query, 60),
                percent(last.confidence)
            ));
        }

        match &context.memory {
            Some(facts) if !facts.is_empty() => {
                let mentioned = facts.mentioned_categories(cues.normalized());
                let categories: Vec<&str> = if mentioned.is_empty() {
                    facts.categories.keys().map(String::as_str).take(3).collect()
                } else {
                    mentioned
                };
                for name in categories {
                    let Some(tally) = facts.categories.get(name) else {
                        continue;
                    };
                    if let Some(rate) = tally.success_rate() {
                        lines.push(format!(
                            "- {name}: {} of {} attempts succeeded ({}).",
                            tally.successes.min(tally.attempts),
                            tally.attempts,
                            percent(rate)
                        ));
                    }
                }
                let weakest = facts.weakest_topics(3);
                if !weakest.is_empty() {
                    let listed: Vec<String> = weakest
                        .iter()
                        .map(|(topic, rating)| format!("{topic} ({rating:.1}/5)"))
                        .collect();
                    lines.push(format!("- Weakest rated topics: {}.", listed.join(", ")));
                }
            }
            _ if recent.is_empty() => lines.push(
                "- No prior record was supplied; write down what you expect so the next decision has a precedent."
                    .to_string(),
            ),
            _ => {}
        }

        lines.push("Repeat what worked; change what failed twice.".to_string());
        lines.join("\n")
    }

    fn extract_context(&self, cues: &QueryCues, context: &DeliberationContext) -> ContextSnapshot {
        let mut snapshot = ContextSnapshot::new();
        snapshot.insert(
            "recent_decisions".into(),
            json!(context.signals.recent_decisions.len()),
        );
        if let Some(facts) = &context.memory {
            snapshot.insert("categories".into(), json!(facts.categories.len()));
            snapshot.insert(
                "mentioned_categories".into(),
                json!(facts.mentioned_categories(cues.normalized())),
            );
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{DecisionDigest, MemoryFacts, OutcomeTally};

    fn with_recent() -> DeliberationContext {
        let mut context = DeliberationContext::default();
        context.signals.recent_decisions.push(DecisionDigest {
            sequence_number: 3,
            query: "Should we hire a contractor?".into(),
            confidence: 0.62,
            active: vec![EvaluatorId::Reality],
        });
        context
    }

    #[test]
    fn test_history_boosted_by_recent_decisions() {
        let cues = QueryCues::new("What did we do in the past?");
        let bare = LADDER.evaluate(&cues, &DeliberationContext::default());
        let recorded = LADDER.evaluate(&cues, &with_recent());

        assert_eq!(bare.strength, 0.80);
        assert_eq!(recorded.strength, 0.90);
        assert_eq!(recorded.rule, Some("history_with_record"));
    }

    #[test]
    fn test_recent_decisions_cited() {
        let perspective = MemoryEvaluator::default()
            .activate("Have we seen this pattern?", &with_recent())
            .unwrap();

        assert_eq!(
            perspective.record.fired_signals(),
            ["history_retrieval", "pattern_recognition", "lineage_trace"]
        );
        assert!(perspective.response.contains("last was #3"));
        assert!(perspective.response.contains("62% confidence"));
    }

    #[test]
    fn test_category_mention() {
        let context = DeliberationContext::new().with_memory(MemoryFacts {
            categories: [(
                "interviews".to_string(),
                OutcomeTally {
                    attempts: 4,
                    successes: 1,
                },
            )]
            .into(),
            topic_ratings: [("sql".to_string(), 2.5)].into(),
        });
        let perspective = MemoryEvaluator::default()
            .activate("How do I prepare for interviews?", &context)
            .unwrap();

        assert_eq!(perspective.record.strength(), 0.75);
        assert!(perspective.response.contains("interviews: 1 of 4 attempts succeeded (25%)"));
        assert!(perspective.response.contains("sql (2.5/5)"));
    }

    #[test]
    fn test_fallback_is_passive() {
        let perspective = MemoryEvaluator::default()
            .activate("", &DeliberationContext::default())
            .unwrap();
        assert_eq!(perspective.record.strength(), 0.15);
        assert!(perspective.response.is_empty());
    }
}
