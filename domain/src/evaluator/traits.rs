//! The evaluator contract
//!
//! Every evaluator, Synthesis included, implements [`Evaluator`]. The provided
//! [`Evaluator::activate`] method is the activation protocol:
//!
//! ```text
//! query ──▶ QueryCues ──▶ ladder ──▶ strength
//!                                      │
//!                 strength < threshold │ strength >= threshold
//!                 ┌────────────────────┴───────────────────┐
//!              PASSIVE                                  ACTIVE
//!   empty response, no signals           signals fire, response is composed
//! ```
//!
//! Evaluators hold no per-call state; the only thing an instance carries is
//! its threshold.

use super::cues::QueryCues;
use super::rules::{LadderOutcome, RuleLadder, SignalRule, fired_signals};
use crate::activation::{ActivationRecord, ContextSnapshot, EvaluatorId, Perspective};
use crate::core::error::DomainError;
use crate::facts::DeliberationContext;

/// Snapshot key recording which ladder rule decided the strength
pub const MATCHED_RULE_KEY: &str = "matched_rule";

/// A stateless rule unit scoring one perspective on a query.
pub trait Evaluator: Send + Sync {
    fn id(&self) -> EvaluatorId;

    fn threshold(&self) -> f64;

    /// Priority-ordered activation rules
    fn ladder(&self) -> &RuleLadder;

    /// Signals that may fire once active
    fn signal_rules(&self) -> &[SignalRule];

    /// Compose the response of an active evaluator.
    ///
    /// Must not fail; missing facts degrade to generic guidance.
    fn deliberate(
        &self,
        cues: &QueryCues,
        context: &DeliberationContext,
        signals: &[String],
    ) -> String;

    /// The subset of facts this evaluator looked at, for audit.
    fn extract_context(&self, cues: &QueryCues, context: &DeliberationContext) -> ContextSnapshot;

    /// Score the query.
    ///
    /// Total: a ladder always yields either a rule strength or its fallback.
    fn compute_activation(&self, cues: &QueryCues, context: &DeliberationContext) -> LadderOutcome {
        self.ladder().evaluate(cues, context)
    }

    /// Run the activation protocol for one query.
    ///
    /// Never fails for a correctly implemented evaluator; an `Err` means the
    /// implementation broke its contract (strength out of range, or a signal
    /// set inconsistent with the threshold).
    fn activate(
        &self,
        query: &str,
        context: &DeliberationContext,
    ) -> Result<Perspective, DomainError> {
        let cues = QueryCues::new(query);
        let outcome = self.compute_activation(&cues, context);
        let threshold = self.threshold();

        let mut snapshot = self.extract_context(&cues, context);
        snapshot.insert(
            MATCHED_RULE_KEY.to_string(),
            serde_json::json!(outcome.rule.unwrap_or("fallback")),
        );

        if outcome.strength < threshold {
            let record =
                ActivationRecord::new(self.id(), outcome.strength, threshold, vec![], snapshot)?;
            return Ok(Perspective::new(String::new(), record));
        }

        let signals = fired_signals(self.signal_rules(), &cues, context);
        let record = ActivationRecord::new(
            self.id(),
            outcome.strength,
            threshold,
            signals.clone(),
            snapshot,
        )?;
        let response = self.deliberate(&cues, context, &signals);

        Ok(Perspective::new(response, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::rules::{ActivationRule, always};

    struct Fixed {
        threshold: f64,
        ladder: RuleLadder,
        signals: &'static [SignalRule],
    }

    impl Evaluator for Fixed {
        fn id(&self) -> EvaluatorId {
            EvaluatorId::Causality
        }
        fn threshold(&self) -> f64 {
            self.threshold
        }
        fn ladder(&self) -> &RuleLadder {
            &self.ladder
        }
        fn signal_rules(&self) -> &[SignalRule] {
            self.signals
        }
        fn deliberate(&self, _: &QueryCues, _: &DeliberationContext, signals: &[String]) -> String {
            format!("fired {}", signals.join(","))
        }
        fn extract_context(&self, cues: &QueryCues, _: &DeliberationContext) -> ContextSnapshot {
            let mut snapshot = ContextSnapshot::new();
            snapshot.insert("tokens".to_string(), serde_json::json!(cues.token_count()));
            snapshot
        }
    }

    const PRIMARY: &[SignalRule] = &[SignalRule {
        signal: "primary",
        applies: always,
    }];

    fn fixed(strength: f64, threshold: f64, signals: &'static [SignalRule]) -> Fixed {
        Fixed {
            threshold,
            ladder: RuleLadder {
                rules: &[],
                fallback: strength,
            },
            signals,
        }
    }

    #[test]
    fn test_active_path() {
        let perspective = fixed(0.8, 0.3, PRIMARY)
            .activate("a b c", &DeliberationContext::default())
            .unwrap();

        assert_eq!(perspective.response, "fired primary");
        assert_eq!(perspective.record.fired_signals(), ["primary"]);
        assert_eq!(
            perspective.record.context_snapshot()["tokens"],
            serde_json::json!(3)
        );
        assert_eq!(
            perspective.record.context_snapshot()[MATCHED_RULE_KEY],
            serde_json::json!("fallback")
        );
    }

    #[test]
    fn test_passive_path() {
        let perspective = fixed(0.1, 0.3, PRIMARY)
            .activate("", &DeliberationContext::default())
            .unwrap();

        assert!(perspective.response.is_empty());
        assert!(perspective.record.fired_signals().is_empty());
        assert_eq!(perspective.record.strength(), 0.1);
    }

    #[test]
    fn test_out_of_range_strength_is_contract_violation() {
        let result = fixed(1.4, 0.3, PRIMARY).activate("q", &DeliberationContext::default());
        assert!(matches!(
            result,
            Err(DomainError::StrengthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_active_without_signals_is_contract_violation() {
        let result = fixed(0.9, 0.3, &[]).activate("q", &DeliberationContext::default());
        assert!(matches!(result, Err(DomainError::MissingSignals { .. })));
    }

    #[test]
    fn test_matched_rule_recorded() {
        fn any(cues: &QueryCues, _: &DeliberationContext) -> bool {
            !cues.is_blank()
        }
        let evaluator = Fixed {
            threshold: 0.3,
            ladder: RuleLadder {
                rules: &[ActivationRule {
                    name: "non_blank",
                    strength: 0.7,
                    applies: any,
                }],
                fallback: 0.1,
            },
            signals: PRIMARY,
        };
        let perspective = evaluator
            .activate("hello", &DeliberationContext::default())
            .unwrap();
        assert_eq!(
            perspective.record.context_snapshot()[MATCHED_RULE_KEY],
            serde_json::json!("non_blank")
        );
    }
}
