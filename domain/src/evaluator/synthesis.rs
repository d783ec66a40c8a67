//! Synthesis evaluator: collapses the perspectives into one decision
//!
//! Synthesis is always active (strength 1.0, threshold 0.0). Inside a
//! deliberation it runs through [`SynthesisEvaluator::synthesize`], which
//! sees every perspective's response and the trace built so far. The plain
//! [`Evaluator::activate`] path only produces the generic completion.

use super::cues::QueryCues;
use super::rules::{RuleLadder, SignalRule, always};
use super::thresholds::SYNTHESIS_THRESHOLD;
use super::traits::Evaluator;
use crate::activation::{ActivationRecord, ContextSnapshot, EvaluatorId, Perspective};
use crate::core::error::DomainError;
use crate::core::string::{percent, quote_query};
use crate::deliberation::STRONG_ACTIVATION;
use crate::facts::DeliberationContext;
use crate::trace::TraceDraft;
use serde_json::json;
use std::collections::BTreeMap;

/// Strength Synthesis always reports
pub const SYNTHESIS_STRENGTH: f64 = 1.0;

const LADDER: RuleLadder = RuleLadder {
    rules: &[],
    fallback: SYNTHESIS_STRENGTH,
};

const SIGNALS: &[SignalRule] = &[SignalRule {
    signal: "generic_completion",
    applies: always,
}];

/// Integrates the perspective responses into the decision text.
#[derive(Debug, Clone, Default)]
pub struct SynthesisEvaluator;

impl SynthesisEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Build the decision from the perspective responses.
    ///
    /// Perspectives whose strength exceeds 0.5 are integrated strongest first
    /// (canonical order breaks ties); weaker active perspectives are listed
    /// as supporting notes. With nothing active the text degrades to a
    /// generic completion. Never returns empty text.
    pub fn synthesize(
        &self,
        responses: &BTreeMap<EvaluatorId, String>,
        draft: &TraceDraft,
    ) -> Result<Perspective, DomainError> {
        let mut strong: Vec<(EvaluatorId, f64)> = Vec::new();
        let mut supporting: Vec<(EvaluatorId, f64)> = Vec::new();
        for id in EvaluatorId::PERSPECTIVES {
            let Some(record) = draft.activation(id).filter(|r| r.is_active()) else {
                continue;
            };
            let has_text = responses.get(&id).is_some_and(|r| !r.trim().is_empty());
            if record.strength() > STRONG_ACTIVATION && has_text {
                strong.push((id, record.strength()));
            } else {
                supporting.push((id, record.strength()));
            }
        }
        // stable sort keeps canonical order among equal strengths
        strong.sort_by(|a, b| b.1.total_cmp(&a.1));

        let reevaluated = draft.equilibrium_reevaluated();
        let active_count = strong.len() + supporting.len();
        let mut sections = vec![format!("Decision on {}", quote_query(draft.query(), 100))];

        if strong.is_empty() {
            if supporting.is_empty() {
                sections.push(generic_completion(draft.query()));
            } else {
                sections.push(
                    "No perspective engaged strongly; the weaker signals below are the only guidance."
                        .to_string(),
                );
            }
        } else {
            sections.push("Perspectives, strongest first:".to_string());
            for (rank, (id, strength)) in strong.iter().enumerate() {
                let body = responses
                    .get(id)
                    .map(|text| indent(text, "    "))
                    .unwrap_or_default();
                sections.push(format!(
                    "[{}] {} ({:.2})\n{}",
                    rank + 1,
                    id.display_name(),
                    strength,
                    body
                ));
            }
        }

        if !supporting.is_empty() {
            let listed: Vec<String> = supporting
                .iter()
                .map(|(id, strength)| format!("{} ({strength:.2})", id.display_name()))
                .collect();
            sections.push(format!("Supporting: {}.", listed.join(", ")));
        }

        if reevaluated {
            sections.push(format!(
                "Tension: the perspectives disagreed (conflict {}); Equilibrium was consulted again to mediate.",
                percent(draft.conflict_score())
            ));
        }

        if active_count > 0 {
            sections.push(format!(
                "Engagement: {active_count} of {} perspectives active.",
                EvaluatorId::PERSPECTIVES.len()
            ));
        }
        sections.push(format!(
            "Recommendation: {}",
            strong
                .first()
                .map(|(id, _)| directive(*id))
                .unwrap_or("treat this as exploratory and gather the missing facts before deciding.")
        ));

        let decision_text = sections.join("\n\n");
        if decision_text.trim().is_empty() {
            return Err(DomainError::EmptySynthesis);
        }

        let mut signals: Vec<String> = if strong.is_empty() {
            vec!["generic_completion".into(), "presence_anchor".into()]
        } else {
            vec![
                "integration".into(),
                "decision_collapse".into(),
                "presence_anchor".into(),
            ]
        };
        if reevaluated {
            signals.push("conflict_mediation".into());
        }

        let mut snapshot = ContextSnapshot::new();
        snapshot.insert(
            "integrated".into(),
            json!(strong.iter().map(|(id, _)| *id).collect::<Vec<_>>()),
        );
        snapshot.insert(
            "supporting".into(),
            json!(supporting.iter().map(|(id, _)| *id).collect::<Vec<_>>()),
        );
        snapshot.insert("conflict_score".into(), json!(draft.conflict_score()));

        let record = ActivationRecord::new(
            EvaluatorId::Synthesis,
            SYNTHESIS_STRENGTH,
            SYNTHESIS_THRESHOLD,
            signals,
            snapshot,
        )?;
        Ok(Perspective::new(decision_text, record))
    }
}

impl Evaluator for SynthesisEvaluator {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::Synthesis
    }

    fn threshold(&self) -> f64 {
        SYNTHESIS_THRESHOLD
    }

    fn ladder(&self) -> &RuleLadder {
        &LADDER
    }

    fn signal_rules(&self) -> &[SignalRule] {
        SIGNALS
    }

    fn deliberate(&self, cues: &QueryCues, _: &DeliberationContext, _: &[String]) -> String {
        generic_completion(cues.raw())
    }

    fn extract_context(&self, cues: &QueryCues, _: &DeliberationContext) -> ContextSnapshot {
        let mut snapshot = ContextSnapshot::new();
        snapshot.insert("query_tokens".into(), json!(cues.token_count()));
        snapshot
    }
}

fn generic_completion(query: &str) -> String {
    format!(
        "No perspective engaged with {}. Restate it as a decision with its main constraint and time horizon to get a grounded answer.",
        quote_query(query, 100)
    )
}

/// Closing advice keyed by the strongest perspective
fn directive(id: EvaluatorId) -> &'static str {
    match id {
        EvaluatorId::Reality => "close the capability gap and confirm resources before committing.",
        EvaluatorId::Causality => "sequence the steps and check each consequence before the next.",
        EvaluatorId::Equilibrium => "choose the option that holds the competing needs in balance.",
        EvaluatorId::Transformation => "proceed as a staged change with a review after each stage.",
        EvaluatorId::Simulation => "pick the path whose worst case you can live with.",
        EvaluatorId::Memory => "follow the precedent that worked and avoid the one that failed.",
        EvaluatorId::Synthesis => "act on the integrated view above.",
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: EvaluatorId, strength: f64) -> Perspective {
        let signals = if strength >= 0.3 {
            vec!["s".to_string()]
        } else {
            vec![]
        };
        let response = if strength >= 0.3 {
            format!("{} says hi\nsecond line", id.display_name())
        } else {
            String::new()
        };
        Perspective::new(
            response,
            ActivationRecord::new(id, strength, 0.3, signals, ContextSnapshot::new()).unwrap(),
        )
    }

    fn draft(strengths: [f64; 6]) -> TraceDraft {
        let mut draft = TraceDraft::new(1, "Should we?");
        for (id, strength) in EvaluatorId::PERSPECTIVES.into_iter().zip(strengths) {
            draft.record(record(id, strength));
        }
        draft
    }

    #[test]
    fn test_strongest_first_with_canonical_ties() {
        let draft = draft([0.75, 0.9, 0.1, 0.75, 0.45, 0.15]);
        let perspective = SynthesisEvaluator::new()
            .synthesize(draft.responses(), &draft)
            .unwrap();
        let text = &perspective.response;

        let causality = text.find("[1] Causality (0.90)").unwrap();
        let reality = text.find("[2] Reality (0.75)").unwrap();
        let transformation = text.find("[3] Transformation (0.75)").unwrap();
        assert!(causality < reality && reality < transformation);
        assert!(text.contains("    Causality says hi\n    second line"));
        assert!(text.contains("Supporting: Simulation (0.45)."));
        assert!(text.contains("Engagement: 4 of 6"));
        assert!(text.contains("sequence the steps"));

        assert_eq!(perspective.record.strength(), 1.0);
        assert_eq!(
            perspective.record.fired_signals(),
            ["integration", "decision_collapse", "presence_anchor"]
        );
    }

    #[test]
    fn test_degenerate_case_is_generic() {
        let draft = draft([0.2, 0.15, 0.1, 0.15, 0.2, 0.15]);
        let perspective = SynthesisEvaluator::new()
            .synthesize(draft.responses(), &draft)
            .unwrap();

        assert!(perspective.response.contains("No perspective engaged with \"Should we?\""));
        assert!(!perspective.response.contains("Engagement"));
        assert_eq!(
            perspective.record.fired_signals(),
            ["generic_completion", "presence_anchor"]
        );
    }

    #[test]
    fn test_reevaluation_is_mentioned() {
        let mut draft = draft([0.95, 0.9, 0.1, 0.9, 0.15, 0.1]);
        draft.set_conflict_score(0.74);
        draft.record(record(EvaluatorId::Equilibrium, 0.8));

        let perspective = SynthesisEvaluator::new()
            .synthesize(draft.responses(), &draft)
            .unwrap();
        assert!(perspective.response.contains("conflict 74%"));
        assert!(
            perspective
                .record
                .fired_signals()
                .contains(&"conflict_mediation".to_string())
        );
    }

    #[test]
    fn test_plain_activation_is_always_active() {
        let perspective = SynthesisEvaluator::new()
            .activate("", &DeliberationContext::default())
            .unwrap();
        assert_eq!(perspective.record.strength(), 1.0);
        assert!(perspective.record.is_active());
        assert!(perspective.response.contains("(no query text)"));
    }
}
