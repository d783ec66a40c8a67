//! Transformation evaluator: reads a query as a question of change

use super::cues::{Cue, QueryCues};
use super::rules::{ActivationRule, RuleLadder, SignalRule, always};
use super::thresholds::DEFAULT_THRESHOLD;
use super::traits::Evaluator;
use crate::activation::{ContextSnapshot, EvaluatorId};
use crate::core::string::quote_query;
use crate::facts::DeliberationContext;
use serde_json::json;

const RADICAL: &[Cue] = &[
    Cue::Stem("transform"),
    Cue::Stem("mutat"),
    Cue::Stem("revolution"),
    Cue::Stem("radical"),
    Cue::Stem("pivot"),
    Cue::Stem("overhaul"),
    Cue::Stem("reinvent"),
];

const LEARNING: &[Cue] = &[
    Cue::Stem("learn"),
    Cue::Stem("grow"),
    Cue::Stem("improv"),
    Cue::Stem("evolv"),
    Cue::Stem("skill"),
    Cue::Word("progress"),
    Cue::Word("upskill"),
];

const ADAPTATION: &[Cue] = &[
    Cue::Stem("adapt"),
    Cue::Stem("adjust"),
    Cue::Stem("transition"),
    Cue::Stem("shift"),
    Cue::Word("change"),
    Cue::Word("changes"),
    Cue::Word("changing"),
];

fn radical(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(RADICAL)
}

fn learning(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(LEARNING)
}

fn adaptation(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(ADAPTATION)
}

fn positive_momentum(_: &QueryCues, context: &DeliberationContext) -> bool {
    context
        .transformation
        .as_ref()
        .and_then(|facts| facts.mean_delta())
        .is_some_and(|delta| delta > 0.0)
}

fn learning_update(cues: &QueryCues, context: &DeliberationContext) -> bool {
    learning(cues, context)
        || context
            .transformation
            .as_ref()
            .is_some_and(|facts| !facts.deltas.is_empty())
}

fn progress_review(_: &QueryCues, context: &DeliberationContext) -> bool {
    context
        .transformation
        .as_ref()
        .is_some_and(|facts| facts.total_sessions > 0 || !facts.deltas.is_empty())
}

const LADDER: RuleLadder = RuleLadder {
    rules: &[
        ActivationRule {
            name: "radical_change",
            strength: 0.90,
            applies: radical,
        },
        ActivationRule {
            name: "learning",
            strength: 0.75,
            applies: learning,
        },
        ActivationRule {
            name: "adaptation",
            strength: 0.55,
            applies: adaptation,
        },
        ActivationRule {
            name: "positive_momentum",
            strength: 0.40,
            applies: positive_momentum,
        },
    ],
    fallback: 0.15,
};

const SIGNALS: &[SignalRule] = &[
    SignalRule {
        signal: "adaptation_pathway",
        applies: always,
    },
    SignalRule {
        signal: "learning_update",
        applies: learning_update,
    },
    SignalRule {
        signal: "mutation_trigger",
        applies: radical,
    },
    SignalRule {
        signal: "progress_review",
        applies: progress_review,
    },
];

/// Treats the decision as a step in an ongoing change.
#[derive(Debug, Clone)]
pub struct TransformationEvaluator {
    threshold: f64,
}

impl Default for TransformationEvaluator {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl TransformationEvaluator {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for TransformationEvaluator {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::Transformation
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
        signals: &[String],
    ) -> String {
        let mut lines = vec![format!(
            "Transformation path for {}:",
            quote_query(cues.raw(), 80)
        )];

        if signals.iter().any(|s| s == "mutation_trigger") {
            lines.push(
                "- This is a change of kind, not degree; expect a period where old and new run side by side."
                    .to_string(),
            );
        }

        if let Some(facts) = &context.transformation {
            let growing = facts.fastest_growing(3);
            if !growing.is_empty() {
                let listed: Vec<String> = growing
                    .iter()
                    .map(|(topic, delta)| format!("{topic} ({delta:+.2})"))
                    .collect();
                lines.push(format!("- Fastest movement: {}.", listed.join(", ")));
            }
            if let Some(mean) = facts.mean_delta() {
                lines.push(format!(
                    "- Average confidence change {mean:+.2} across {} sessions.",
                    facts.total_sessions
                ));
                if mean <= 0.0 {
                    lines.push(
                        "- Momentum has stalled; change the method before adding more effort."
                            .to_string(),
                    );
                }
            }
        } else {
            lines.push(
                "- No progress data was supplied; decide now how you will measure the change."
                    .to_string(),
            );
        }

        lines.push(
            "Move in small reversible increments and review after each one.".to_string(),
        );
        lines.join("\n")
    }

    fn extract_context(&self, cues: &QueryCues, context: &DeliberationContext) -> ContextSnapshot {
        let mut snapshot = ContextSnapshot::new();
        snapshot.insert("change_cues".into(), json!(cues.matched(RADICAL)));
        snapshot.insert("learning_cues".into(), json!(cues.matched(LEARNING)));
        if let Some(facts) = &context.transformation {
            snapshot.insert("total_sessions".into(), json!(facts.total_sessions));
            if let Some(mean) = facts.mean_delta() {
                snapshot.insert("mean_delta".into(), json!(mean));
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::TransformationFacts;

    fn rule_for(query: &str, context: &DeliberationContext) -> Option<&'static str> {
        LADDER.evaluate(&QueryCues::new(query), context).rule
    }

    #[test]
    fn test_ladder_tiers() {
        let empty = DeliberationContext::default();
        assert_eq!(rule_for("Should we pivot the product?", &empty), Some("radical_change"));
        assert_eq!(rule_for("How do I keep learning Go?", &empty), Some("learning"));
        assert_eq!(rule_for("Can the team adapt?", &empty), Some("adaptation"));
        assert_eq!(rule_for("Lunch plans", &empty), None);
    }

    #[test]
    fn test_momentum_from_facts() {
        let context = DeliberationContext::new().with_transformation(TransformationFacts {
            deltas: [("sql".to_string(), 0.4), ("go".to_string(), -0.1)].into(),
            total_sessions: 6,
        });
        assert_eq!(rule_for("Lunch plans", &context), Some("positive_momentum"));

        let perspective = TransformationEvaluator::default()
            .activate("Lunch plans", &context)
            .unwrap();
        assert_eq!(perspective.record.strength(), 0.40);
        assert_eq!(
            perspective.record.fired_signals(),
            ["adaptation_pathway", "learning_update", "progress_review"]
        );
        assert!(perspective.response.contains("sql (+0.40)"));
        assert!(perspective.response.contains("+0.15 across 6 sessions"));
    }

    #[test]
    fn test_radical_change_fires_mutation_trigger() {
        let perspective = TransformationEvaluator::default()
            .activate("Should we transform the org?", &DeliberationContext::default())
            .unwrap();
        assert!(
            perspective
                .record
                .fired_signals()
                .contains(&"mutation_trigger".to_string())
        );
        assert!(perspective.response.contains("No progress data"));
    }
}
