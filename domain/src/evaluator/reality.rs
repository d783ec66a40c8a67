//! Reality evaluator: grounds a decision in present capability and constraints

use super::cues::{Cue, QueryCues};
use super::rules::{ActivationRule, RuleLadder, SignalRule, always};
use super::thresholds::DEFAULT_THRESHOLD;
use super::traits::Evaluator;
use crate::activation::{ContextSnapshot, EvaluatorId};
use crate::core::string::quote_query;
use crate::facts::{DeliberationContext, LARGE_SKILL_GAP};
use serde_json::json;

const DECISION: &[Cue] = &[
    Cue::Word("should"),
    Cue::Stem("implement"),
    Cue::Stem("build"),
    Cue::Stem("deploy"),
    Cue::Word("apply"),
    Cue::Word("choose"),
    Cue::Stem("decid"),
    Cue::Word("commit"),
];

const SPECULATION: &[Cue] = &[
    Cue::Word("maybe"),
    Cue::Word("could"),
    Cue::Word("might"),
    Cue::Word("possibly"),
    Cue::Word("perhaps"),
    Cue::Stem("theoretical"),
    Cue::Stem("hypothetical"),
];

const CONSTRAINT: &[Cue] = &[
    Cue::Stem("budget"),
    Cue::Stem("deadline"),
    Cue::Word("cost"),
    Cue::Word("costs"),
    Cue::Stem("constraint"),
    Cue::Stem("resource"),
    Cue::Stem("capacity"),
    Cue::Word("feasible"),
    Cue::Word("realistic"),
    Cue::Word("ready"),
];

const EMBODIED: &[Cue] = &[
    Cue::Stem("build"),
    Cue::Stem("deploy"),
    Cue::Stem("infrastructure"),
    Cue::Stem("production"),
    Cue::Stem("hardware"),
];

const SOVEREIGNTY: &[Cue] = &[
    Cue::Stem("communit"),
    Cue::Stem("stakeholder"),
    Cue::Stem("team"),
    Cue::Word("users"),
    Cue::Stem("customer"),
];

fn decision(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(DECISION)
}

fn speculation(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(SPECULATION)
}

fn speculative_decision(cues: &QueryCues, context: &DeliberationContext) -> bool {
    decision(cues, context) && speculation(cues, context)
}

fn large_skill_gap(_: &QueryCues, context: &DeliberationContext) -> bool {
    context
        .reality
        .as_ref()
        .and_then(|facts| facts.largest_gap())
        .is_some_and(|gap| gap.points() >= LARGE_SKILL_GAP)
}

fn grounded_gap(cues: &QueryCues, context: &DeliberationContext) -> bool {
    large_skill_gap(cues, context) && (decision(cues, context) || speculation(cues, context))
}

fn constraint_language(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(CONSTRAINT)
}

fn embodied(cues: &QueryCues, _: &DeliberationContext) -> bool {
    cues.has_any(EMBODIED)
}

fn sovereignty(cues: &QueryCues, context: &DeliberationContext) -> bool {
    cues.has_any(SOVEREIGNTY)
        || context
            .reality
            .as_ref()
            .is_some_and(|facts| !facts.stakeholders.is_empty())
}

fn skill_gap_analysis(_: &QueryCues, context: &DeliberationContext) -> bool {
    context
        .reality
        .as_ref()
        .is_some_and(|facts| !facts.skill_gaps().is_empty() || !facts.weak_skills().is_empty())
}

const LADDER: RuleLadder = RuleLadder {
    rules: &[
        ActivationRule {
            name: "speculative_decision",
            strength: 0.95,
            applies: speculative_decision,
        },
        ActivationRule {
            name: "grounded_gap",
            strength: 0.90,
            applies: grounded_gap,
        },
        ActivationRule {
            name: "decision",
            strength: 0.75,
            applies: decision,
        },
        ActivationRule {
            name: "large_skill_gap",
            strength: 0.65,
            applies: large_skill_gap,
        },
        ActivationRule {
            name: "speculation",
            strength: 0.60,
            applies: speculation,
        },
        ActivationRule {
            name: "constraint_language",
            strength: 0.45,
            applies: constraint_language,
        },
    ],
    fallback: 0.20,
};

const SIGNALS: &[SignalRule] = &[
    SignalRule {
        signal: "reality_anchor",
        applies: always,
    },
    SignalRule {
        signal: "embodied_grounding",
        applies: embodied,
    },
    SignalRule {
        signal: "sovereignty_alignment",
        applies: sovereignty,
    },
    SignalRule {
        signal: "skill_gap_analysis",
        applies: skill_gap_analysis,
    },
];

/// Anchors abstract or speculative plans to what can be done now.
#[derive(Debug, Clone)]
pub struct RealityEvaluator {
    threshold: f64,
}

impl Default for RealityEvaluator {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl RealityEvaluator {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Evaluator for RealityEvaluator {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::Reality
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
            "Reality check on {}:",
            quote_query(cues.raw(), 80)
        )];

        if speculation(cues, context) {
            lines.push(
                "- The question leans on speculation; separate what is known today from what is hoped for."
                    .to_string(),
            );
        }

        match &context.reality {
            Some(facts) => {
                let gaps = facts.skill_gaps();
                for gap in gaps.iter().take(3) {
                    lines.push(format!(
                        "- Skill gap in {}: rated {:.1}/5 against {:.1}/5 required ({:.1} points).",
                        gap.topic,
                        gap.current,
                        gap.required,
                        gap.points()
                    ));
                }
                if gaps.first().is_some_and(|gap| gap.points() >= LARGE_SKILL_GAP) {
                    lines.push(
                        "- The largest gap is significant; close it before committing.".to_string(),
                    );
                }
                if gaps.is_empty() {
                    for (topic, rating) in facts.weak_skills().into_iter().take(3) {
                        lines.push(format!("- {topic} is still weak at {rating:.1}/5."));
                    }
                }
                if let Some(resources) = &facts.resources {
                    lines.push(format!("- Available resources: {resources}."));
                }
                if let Some(timeline) = &facts.timeline {
                    lines.push(format!("- Timeline: {timeline}."));
                }
                if let Some(scope) = &facts.scope {
                    lines.push(format!("- Scope: {scope}."));
                }
                if !facts.stakeholders.is_empty() {
                    lines.push(format!(
                        "- People affected: {}.",
                        facts.stakeholders.join(", ")
                    ));
                }
            }
            None => lines.push(
                "- No capability facts were supplied; verify current skills and resources before acting."
                    .to_string(),
            ),
        }

        if signals.iter().any(|s| s == "embodied_grounding") {
            lines.push(
                "- Plan the physical rollout: environments, ownership, and a rollback path."
                    .to_string(),
            );
        }
        if signals.iter().any(|s| s == "sovereignty_alignment") {
            lines.push(
                "- Confirm the people affected have a say before the change lands.".to_string(),
            );
        }

        lines.push("Anchor: name the smallest concrete step you can take this week.".to_string());
        lines.join("\n")
    }

    fn extract_context(&self, cues: &QueryCues, context: &DeliberationContext) -> ContextSnapshot {
        let mut snapshot = ContextSnapshot::new();
        snapshot.insert("decision_language".into(), json!(cues.matched(DECISION)));
        snapshot.insert(
            "speculation_language".into(),
            json!(cues.matched(SPECULATION)),
        );

        if let Some(facts) = &context.reality {
            if let Some(gap) = facts.largest_gap() {
                snapshot.insert(
                    "largest_gap".into(),
                    json!({ "topic": gap.topic, "points": gap.points() }),
                );
            }
            snapshot.insert("skills_rated".into(), json!(facts.skills.len()));
            snapshot.insert("stakeholders".into(), json!(facts.stakeholders.len()));
            if let Some(timeline) = &facts.timeline {
                snapshot.insert("timeline".into(), json!(timeline));
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::RealityFacts;

    fn gap_context() -> DeliberationContext {
        DeliberationContext::new().with_reality(RealityFacts {
            skills: [("rust".to_string(), 1.5)].into(),
            requirements: [("rust".to_string(), 4.0)].into(),
            ..Default::default()
        })
    }

    #[test]
    fn test_speculative_decision_is_top_tier() {
        let perspective = RealityEvaluator::default()
            .activate(
                "Should we maybe rebuild the platform in Rust?",
                &gap_context(),
            )
            .unwrap();

        assert!(perspective.record.strength() >= 0.9);
        assert!(perspective.record.is_active());
        assert!(
            perspective
                .record
                .fired_signals()
                .contains(&"skill_gap_analysis".to_string())
        );
        assert!(perspective.response.contains("Skill gap in rust"));
        assert!(perspective.response.contains("significant"));
    }

    #[test]
    fn test_gap_with_decision_language() {
        let outcome = LADDER.evaluate(&QueryCues::new("Could I lead this?"), &gap_context());
        assert_eq!(outcome.rule, Some("grounded_gap"));
        assert_eq!(outcome.strength, 0.90);
    }

    #[test]
    fn test_decision_without_context() {
        let perspective = RealityEvaluator::default()
            .activate(
                "Should we deploy the authentication system to production?",
                &DeliberationContext::default(),
            )
            .unwrap();

        assert_eq!(perspective.record.strength(), 0.75);
        assert_eq!(
            perspective.record.fired_signals(),
            ["reality_anchor", "embodied_grounding"]
        );
        assert!(perspective.response.contains("No capability facts"));
    }

    #[test]
    fn test_neutral_query_is_passive() {
        let perspective = RealityEvaluator::default()
            .activate("What is 2 plus 2?", &DeliberationContext::default())
            .unwrap();

        assert_eq!(perspective.record.strength(), 0.20);
        assert!(!perspective.record.is_active());
        assert!(perspective.response.is_empty());
    }

    #[test]
    fn test_stakeholders_fire_sovereignty() {
        let context = DeliberationContext::new().with_reality(RealityFacts {
            stakeholders: vec!["platform team".to_string()],
            ..Default::default()
        });
        let perspective = RealityEvaluator::default()
            .activate("Should we switch vendors?", &context)
            .unwrap();

        assert!(
            perspective
                .record
                .fired_signals()
                .contains(&"sovereignty_alignment".to_string())
        );
        assert!(perspective.response.contains("platform team"));
    }
}
