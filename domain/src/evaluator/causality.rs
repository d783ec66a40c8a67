//! Causality evaluator: traces consequences through time

use super::cues::{Cue, QueryCues};
use super::rules::{ActivationRule, RuleLadder, SignalRule, always};
use super::thresholds::DEFAULT_THRESHOLD;
use super::traits::Evaluator;
use crate::activation::{ContextSnapshot, EvaluatorId};
use crate::core::string::quote_query;
use crate::facts::DeliberationContext;
use serde_json::json;

const TEMPORAL: &[Cue] = &[
    Cue::Word("after"),
    Cue::Word("before"),
    Cue::Word("then"),
    Cue::Word("next"),
    Cue::Word("later"),
    Cue::Word("eventually"),
    Cue::Word("until"),
    Cue::Stem("timeline"),
    Cue::Stem("sequen"),
    Cue::Phrase("over time"),
    Cue::Phrase("long term"),
];

const CAUSAL: &[Cue] = &[
    Cue::Word("because"),
    Cue::Word("therefore"),
    Cue::Stem("caus"),
    Cue::Stem("effect"),
    Cue::Stem("consequen"),
    Cue::Stem("impact"),
    Cue::Stem("result"),
    Cue::Stem("ripple"),
    Cue::Word("downstream"),
    Cue::Phrase("lead to"),
    Cue::Phrase("leads to"),
];

const RIPPLE: &[Cue] = &[
    Cue::Stem("ripple"),
    Cue::Word("downstream"),
    Cue::Stem("impact"),
    Cue::Stem("effect"),
    Cue::Phrase("second order"),
];

const PLANNING: &[Cue] = &[
    Cue::Word("should"),
    Cue::Stem("decid"),
    Cue::Stem("plan"),
    Cue::Phrase("next step"),
];

fn causal_chain(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.count(TEMPORAL) >= 2 && cues.count(CAUSAL) >= 1
}

fn strong_cues(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.count(TEMPORAL) >= 2 || cues.count(CAUSAL) >= 2
}

fn any_cue(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(TEMPORAL) || cues.has_any(CAUSAL)
}

fn has_trajectory(_: &QueryCues, context: &DeliberationContext) -> bool {
    context
        .causality
        .as_ref()
        .is_some_and(|facts| !facts.milestones.is_empty())
}

fn trajectory_under_decision(cues: &QueryCues, context: &DeliberationContext) -> bool {
    has_trajectory(cues, context) && cues.has_any(PLANNING)
}

fn ripple(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(RIPPLE)
}

fn temporal(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(TEMPORAL)
}

const LADDER: RuleLadder = RuleLadder {
    rules: &[
        ActivationRule {
            name: "causal_chain",
            strength: 0.90,
            applies: causal_chain,
        },
        ActivationRule {
            name: "strong_cues",
            strength: 0.75,
            applies: strong_cues,
        },
        ActivationRule {
            name: "any_cue",
            strength: 0.50,
            applies: any_cue,
        },
        ActivationRule {
            name: "trajectory_under_decision",
            strength: 0.40,
            applies: trajectory_under_decision,
        },
    ],
    fallback: 0.15,
};

const SIGNALS: &[SignalRule] = &[
    SignalRule {
        signal: "consequence_modeling",
        applies: always,
    },
    SignalRule {
        signal: "ripple_analysis",
        applies: ripple,
    },
    SignalRule {
        signal: "temporal_flow",
        applies: temporal,
    },
    SignalRule {
        signal: "trajectory_review",
        applies: has_trajectory,
    },
];

/// Follows cause and effect forward from the decision point.
#[derive(Debug, Clone)]
pub struct CausalityEvaluator {
    threshold: f64,
}

impl Default for CausalityEvaluator {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl CausalityEvaluator {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for CausalityEvaluator {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::Causality
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
        let mut lines = vec![format!("Causal chain for {}:", quote_query(cues.raw(), 80))];

        let drivers = cues.matched(CAUSAL);
        if !drivers.is_empty() {
            lines.push(format!("- Causal language: {}.", drivers.join(", ")));
        }
        lines.push(
            "- First-order effect: what changes immediately once this is done?".to_string(),
        );
        if signals.iter().any(|s| s == "ripple_analysis") {
            lines.push(
                "- Second-order effect: who depends on that change, and what do they do next?"
                    .to_string(),
            );
        }

        if let Some(facts) = &context.causality {
            let done = facts
                .milestones
                .iter()
                .filter(|m| m.status.eq_ignore_ascii_case("done"))
                .count();
            if !facts.milestones.is_empty() {
                lines.push(format!(
                    "- Trajectory so far: {done} of {} milestones done.",
                    facts.milestones.len()
                ));
            }
            if let Some(next) = facts
                .milestones
                .iter()
                .find(|m| !m.status.eq_ignore_ascii_case("done"))
            {
                lines.push(format!("- Next open step: {} ({}).", next.label, next.status));
            }
            if let Some(days) = facts.avg_days_between_steps.filter(|d| d.is_finite()) {
                lines.push(format!(
                    "- Steps have landed about {days:.0} days apart; budget the next one accordingly."
                ));
            }
        }

        if signals.iter().any(|s| s == "temporal_flow") {
            lines.push("Order matters here: settle the earlier step before the later one.".to_string());
        } else {
            lines.push("Trace the chain one link at a time before committing.".to_string());
        }
        lines.join("\n")
    }

    fn extract_context(&self, cues: &QueryCues, context: &DeliberationContext) -> ContextSnapshot {
        let mut snapshot = ContextSnapshot::new();
        snapshot.insert("temporal_cues".into(), json!(cues.matched(TEMPORAL)));
        snapshot.insert("causal_cues".into(), json!(cues.matched(CAUSAL)));
        if let Some(facts) = &context.causality {
            snapshot.insert("milestones".into(), json!(facts.milestones.len()));
            if let Some(days) = facts.avg_days_between_steps {
                snapshot.insert("avg_days_between_steps".into(), json!(days));
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{CausalityFacts, Milestone};

    fn evaluate(query: &str) -> f64 {
        LADDER
            .evaluate(&QueryCues::new(query), &DeliberationContext::default())
            .strength
    }

    #[test]
    fn test_ladder_tiers() {
        assert_eq!(evaluate("After the migration and then the launch, what is the impact?"), 0.90);
        assert_eq!(evaluate("What happens before and after the release?"), 0.75);
        assert_eq!(evaluate("What is the impact and effect of caching?"), 0.75);
        assert_eq!(evaluate("What comes next?"), 0.50);
        assert_eq!(evaluate("Is the sky blue?"), 0.15);
    }

    #[test]
    fn test_trajectory_needs_planning_language() {
        let context = DeliberationContext::new().with_causality(CausalityFacts {
            milestones: vec![Milestone {
                label: "prototype".into(),
                status: "done".into(),
            }],
            avg_days_between_steps: None,
        });
        let planning = LADDER.evaluate(&QueryCues::new("Should we hire?"), &context);
        assert_eq!(planning.rule, Some("trajectory_under_decision"));

        let idle = LADDER.evaluate(&QueryCues::new("Nice weather"), &context);
        assert_eq!(idle.rule, None);
    }

    #[test]
    fn test_response_cites_milestones() {
        let context = DeliberationContext::new().with_causality(CausalityFacts {
            milestones: vec![
                Milestone {
                    label: "prototype".into(),
                    status: "done".into(),
                },
                Milestone {
                    label: "beta".into(),
                    status: "in progress".into(),
                },
            ],
            avg_days_between_steps: Some(12.0),
        });
        let perspective = CausalityEvaluator::default()
            .activate("What is the downstream effect of the beta?", &context)
            .unwrap();

        assert_eq!(
            perspective.record.fired_signals(),
            ["consequence_modeling", "ripple_analysis", "trajectory_review"]
        );
        assert!(perspective.response.contains("1 of 2 milestones done"));
        assert!(perspective.response.contains("Next open step: beta"));
        assert!(perspective.response.contains("12 days"));
    }
}
