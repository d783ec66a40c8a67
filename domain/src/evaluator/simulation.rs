//! Simulation evaluator: runs the decision forward as scenarios

use super::cues::{Cue, QueryCues};
use super::rules::{ActivationRule, RuleLadder, SignalRule, always};
use super::thresholds::DEFAULT_THRESHOLD;
use super::traits::Evaluator;
use crate::activation::{ContextSnapshot, EvaluatorId};
use crate::core::string::{percent, quote_query};
use crate::facts::DeliberationContext;
use serde_json::json;

const MODELING: &[Cue] = &[
    Cue::Stem("simulat"),
    Cue::Word("model"),
    Cue::Word("modeling"),
    Cue::Word("modelling"),
    Cue::Stem("predict"),
    Cue::Stem("forecast"),
    Cue::Stem("imagin"),
    Cue::Stem("envision"),
];

const SCENARIO: &[Cue] = &[
    Cue::Phrase("what if"),
    Cue::Stem("scenario"),
    Cue::Word("suppose"),
];

const FUTURE: &[Cue] = &[
    Cue::Word("future"),
    Cue::Word("tomorrow"),
    Cue::Stem("outcome"),
    Cue::Stem("likel"),
    Cue::Word("odds"),
    Cue::Phrase("next year"),
    Cue::Phrase("years from now"),
];

const CHOICE: &[Cue] = &[Cue::Word("should"), Cue::Stem("decid"), Cue::Word("choose")];

fn modeling(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(MODELING)
}

fn scenario(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(SCENARIO)
}

fn future(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(FUTURE)
}

fn has_outcomes(_: &QueryCues, context: &DeliberationContext) -> bool {
    context
        .simulation
        .as_ref()
        .is_some_and(|facts| facts.total_outcomes() > 0)
}

fn outcomes_under_choice(cues: &QueryCues, context: &DeliberationContext) -> bool {
    has_outcomes(cues, context) && cues.has_any(CHOICE)
}

fn possibility_space(cues: &QueryCues, context: &DeliberationContext) -> bool {
    modeling(cues, context) || future(cues, context)
}

const LADDER: RuleLadder = RuleLadder {
    rules: &[
        ActivationRule {
            name: "explicit_modeling",
            strength: 0.90,
            applies: modeling,
        },
        ActivationRule {
            name: "scenario",
            strength: 0.75,
            applies: scenario,
        },
        ActivationRule {
            name: "future_orientation",
            strength: 0.60,
            applies: future,
        },
        ActivationRule {
            name: "outcomes_under_choice",
            strength: 0.40,
            applies: outcomes_under_choice,
        },
    ],
    fallback: 0.20,
};

const SIGNALS: &[SignalRule] = &[
    SignalRule {
        signal: "forward_model",
        applies: always,
    },
    SignalRule {
        signal: "scenario_generation",
        applies: scenario,
    },
    SignalRule {
        signal: "possibility_space",
        applies: possibility_space,
    },
    SignalRule {
        signal: "outcome_distribution",
        applies: has_outcomes,
    },
];

/// Projects the decision into best, expected and worst cases.
#[derive(Debug, Clone)]
pub struct SimulationEvaluator {
    threshold: f64,
}

impl Default for SimulationEvaluator {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl SimulationEvaluator {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for SimulationEvaluator {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::Simulation
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
        let mut lines = vec![format!("Simulation of {}:", quote_query(cues.raw(), 80))];

        let distribution = context
            .simulation
            .as_ref()
            .map(|facts| facts.distribution())
            .unwrap_or_default();

        if distribution.is_empty() {
            lines.push("- Best case: the plan works as intended on the first attempt.".to_string());
            lines.push("- Expected case: it works after one round of correction.".to_string());
            lines.push("- Worst case: it fails late, after most of the cost is spent.".to_string());
        } else {
            let shares: Vec<String> = distribution
                .iter()
                .map(|(label, share)| format!("{label} {}", percent(*share)))
                .collect();
            lines.push(format!("- Historical outcomes: {}.", shares.join(", ")));
            if let Some((likely, share)) = distribution.first() {
                lines.push(format!(
                    "- Expected case follows the most common outcome: {likely} ({}).",
                    percent(*share)
                ));
            }
            if let Some((rare, share)) = distribution.last().filter(|_| distribution.len() > 1) {
                lines.push(format!(
                    "- Tail case to prepare for: {rare} ({}).",
                    percent(*share)
                ));
            }
        }

        lines.push(
            "Decide in advance which observation would make you change course.".to_string(),
        );
        lines.join("\n")
    }

    fn extract_context(&self, cues: &QueryCues, context: &DeliberationContext) -> ContextSnapshot {
        let mut snapshot = ContextSnapshot::new();
        snapshot.insert("modeling_cues".into(), json!(cues.matched(MODELING)));
        snapshot.insert("scenario_cues".into(), json!(cues.matched(SCENARIO)));
        if let Some(facts) = &context.simulation {
            snapshot.insert("total_outcomes".into(), json!(facts.total_outcomes()));
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::SimulationFacts;

    #[test]
    fn test_ladder_tiers() {
        let empty = DeliberationContext::default();
        let strength = |q: &str| LADDER.evaluate(&QueryCues::new(q), &empty).strength;

        assert_eq!(strength("Can we forecast demand?"), 0.90);
        assert_eq!(strength("What if the vendor disappears?"), 0.75);
        assert_eq!(strength("How does the future look?"), 0.60);
        assert_eq!(strength("Should I go?"), 0.20);
    }

    #[test]
    fn test_outcomes_need_a_choice() {
        let context = DeliberationContext::new().with_simulation(SimulationFacts {
            outcomes: [("success".to_string(), 6), ("failure".to_string(), 4)].into(),
        });
        let chosen = LADDER.evaluate(&QueryCues::new("Should I go?"), &context);
        assert_eq!(chosen.strength, 0.40);

        let perspective = SimulationEvaluator::default()
            .activate("Should I go?", &context)
            .unwrap();
        assert_eq!(
            perspective.record.fired_signals(),
            ["forward_model", "outcome_distribution"]
        );
        assert!(perspective.response.contains("success 60%, failure 40%"));
        assert!(perspective.response.contains("Tail case to prepare for: failure"));
    }

    #[test]
    fn test_generic_scenarios_without_facts() {
        let perspective = SimulationEvaluator::default()
            .activate("What if we wait?", &DeliberationContext::default())
            .unwrap();
        assert!(
            perspective
                .record
                .fired_signals()
                .contains(&"scenario_generation".to_string())
        );
        assert!(perspective.response.contains("Worst case"));
    }
}
