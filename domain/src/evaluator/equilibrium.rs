//! Equilibrium evaluator: mediates tension between competing pulls
//!
//! This is the only evaluator that reads orchestrator-owned signals. On the
//! conditional second pass the context carries `conflict_detected = true`
//! and the first-pass conflict score, which lift it to the top of its ladder.

use super::cues::{Cue, QueryCues};
use super::rules::{ActivationRule, RuleLadder, SignalRule, always};
use super::thresholds::DEFAULT_THRESHOLD;
use super::traits::Evaluator;
use crate::activation::{ContextSnapshot, EvaluatorId};
use crate::core::string::{percent, quote_query};
use crate::facts::DeliberationContext;
use serde_json::json;

/// Above this first-pass conflict score a detected conflict counts as severe
pub const SEVERE_CONFLICT: f64 = 0.7;

const CONFLICT: &[Cue] = &[
    Cue::Word("versus"),
    Cue::Word("vs"),
    Cue::Word("tradeoff"),
    Cue::Phrase("trade off"),
    Cue::Phrase("torn between"),
    Cue::Stem("conflict"),
    Cue::Stem("tension"),
    Cue::Stem("dilemma"),
    Cue::Stem("compet"),
];

const BALANCE: &[Cue] = &[
    Cue::Stem("balanc"),
    Cue::Stem("stabil"),
    Cue::Stem("harmon"),
    Cue::Stem("equilibri"),
    Cue::Stem("sustainab"),
    Cue::Stem("mediat"),
    Cue::Word("fair"),
];

fn severe_conflict(_: &QueryCues, context: &DeliberationContext) -> bool {
    context.signals.conflict_detected && context.signals.conflict_score > SEVERE_CONFLICT
}

fn conflict_detected(_: &QueryCues, context: &DeliberationContext) -> bool {
    context.signals.conflict_detected
}

fn conflict_language(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(CONFLICT)
}

fn balance_language(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(BALANCE)
}

fn weighing_options(cues: &QueryCues, context: &DeliberationContext) -> bool {
    cues.matches(Cue::Word("either"))
        || context
            .equilibrium
            .as_ref()
            .is_some_and(|facts| facts.options.len() >= 2)
}

fn needs_resolution(cues: &QueryCues, context: &DeliberationContext) -> bool {
    conflict_detected(cues, context) || conflict_language(cues, context)
}

fn needs_balance(cues: &QueryCues, context: &DeliberationContext) -> bool {
    conflict_detected(cues, context) || balance_language(cues, context)
}

fn has_preferences(_: &QueryCues, context: &DeliberationContext) -> bool {
    context
        .equilibrium
        .as_ref()
        .is_some_and(|facts| !facts.preferences.is_empty() || facts.options.len() >= 2)
}

const LADDER: RuleLadder = RuleLadder {
    rules: &[
        ActivationRule {
            name: "severe_conflict",
            strength: 0.95,
            applies: severe_conflict,
        },
        ActivationRule {
            name: "conflict_detected",
            strength: 0.80,
            applies: conflict_detected,
        },
        ActivationRule {
            name: "conflict_language",
            strength: 0.80,
            applies: conflict_language,
        },
        ActivationRule {
            name: "balance_language",
            strength: 0.60,
            applies: balance_language,
        },
        ActivationRule {
            name: "weighing_options",
            strength: 0.45,
            applies: weighing_options,
        },
    ],
    fallback: 0.10,
};

const SIGNALS: &[SignalRule] = &[
    SignalRule {
        signal: "stability_check",
        applies: always,
    },
    SignalRule {
        signal: "conflict_resolution",
        applies: needs_resolution,
    },
    SignalRule {
        signal: "balance_restore",
        applies: needs_balance,
    },
    SignalRule {
        signal: "preference_weighing",
        applies: has_preferences,
    },
];

/// Looks for the position that holds competing pulls in balance.
#[derive(Debug, Clone)]
pub struct EquilibriumEvaluator {
    threshold: f64,
}

impl Default for EquilibriumEvaluator {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl EquilibriumEvaluator {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for EquilibriumEvaluator {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::Equilibrium
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
        let mut lines = vec![format!("Equilibrium view on {}:", quote_query(cues.raw(), 80))];

        if context.signals.conflict_detected {
            lines.push(format!(
                "- The other perspectives disagree sharply (conflict {}); mediate before acting.",
                percent(context.signals.conflict_score)
            ));
        }
        let tensions = cues.matched(CONFLICT);
        if !tensions.is_empty() {
            lines.push(format!("- Named tension: {}.", tensions.join(", ")));
        }

        if let Some(facts) = &context.equilibrium {
            if facts.options.len() >= 2 {
                lines.push(format!("- Competing options: {}.", facts.options.join(" / ")));
            }
            if let Some((label, count)) = facts.dominant_preference() {
                let total = facts.total_choices();
                lines.push(format!(
                    "- Past choices lean toward {label} ({count} of {total})."
                ));
            }
            if let Some(ratio) = facts.remote_ratio.filter(|r| r.is_finite()) {
                lines.push(format!("- Current remote ratio: {}.", percent(ratio)));
            }
        }

        lines.push(
            "Favor the option that keeps the most constraints satisfied at once, and name what is given up."
                .to_string(),
        );
        lines.join("\n")
    }

    fn extract_context(&self, cues: &QueryCues, context: &DeliberationContext) -> ContextSnapshot {
        let mut snapshot = ContextSnapshot::new();
        snapshot.insert(
            "conflict_detected".into(),
            json!(context.signals.conflict_detected),
        );
        if context.signals.conflict_detected {
            snapshot.insert(
                "conflict_score".into(),
                json!(context.signals.conflict_score),
            );
        }
        snapshot.insert("tension_cues".into(), json!(cues.matched(CONFLICT)));
        if let Some(facts) = &context.equilibrium {
            snapshot.insert("options".into(), json!(facts.options));
            if let Some((label, _)) = facts.dominant_preference() {
                snapshot.insert("dominant_preference".into(), json!(label));
            }
        }
        snapshot
    }
}
