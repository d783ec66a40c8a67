//! Data-driven activation and signal rules
//!
//! Each evaluator scores a query with a [`RuleLadder`]: an ordered list of
//! `(name, predicate, strength)` rules evaluated in priority order. The first
//! rule whose predicate holds decides the strength; if none holds the ladder
//! falls back to a low default so evaluators are never strictly silent.
//!
//! Which named signals fire once an evaluator is active is decided the same
//! way by a list of [`SignalRule`]s, all of which are checked.
//!
//! Predicates are plain `fn` pointers over the query cues and the context,
//! which keeps every rule a total function and independently testable.

use super::cues::QueryCues;
use crate::facts::DeliberationContext;

/// Predicate shared by activation and signal rules
pub type Predicate = fn(&QueryCues, &DeliberationContext) -> bool;

/// One rung of an activation ladder.
#[derive(Debug, Clone, Copy)]
pub struct ActivationRule {
    pub name: &'static str,
    pub strength: f64,
    pub applies: Predicate,
}

/// Priority-ordered activation rules with a fallback strength.
#[derive(Debug, Clone, Copy)]
pub struct RuleLadder {
    pub rules: &'static [ActivationRule],
    pub fallback: f64,
}

/// Result of scoring a query against a ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderOutcome {
    pub strength: f64,
    /// Name of the rule that decided the strength; `None` for the fallback
    pub rule: Option<&'static str>,
}

impl RuleLadder {
    /// Score the query; the first applicable rule wins.
    pub fn evaluate(&self, cues: &QueryCues, context: &DeliberationContext) -> LadderOutcome {
        self.rules
            .iter()
            .find(|rule| (rule.applies)(cues, context))
            .map(|rule| LadderOutcome {
                strength: rule.strength,
                rule: Some(rule.name),
            })
            .unwrap_or(LadderOutcome {
                strength: self.fallback,
                rule: None,
            })
    }

    /// Look up a rule by name
    pub fn rule(&self, name: &str) -> Option<&ActivationRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

/// A named signal and the condition under which it fires.
#[derive(Debug, Clone, Copy)]
pub struct SignalRule {
    pub signal: &'static str,
    pub applies: Predicate,
}

/// Names of every signal rule that applies, in declaration order.
pub fn fired_signals(
    rules: &[SignalRule],
    cues: &QueryCues,
    context: &DeliberationContext,
) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(cues, context))
        .map(|rule| rule.signal.to_string())
        .collect()
}

/// Predicate that always holds; used for an evaluator's primary signal.
pub fn always(_: &QueryCues, _: &DeliberationContext) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mentions_alpha(cues: &QueryCues, _: &DeliberationContext) -> bool {
        cues.normalized().contains("alpha")
    }

    fn mentions_beta(cues: &QueryCues, _: &DeliberationContext) -> bool {
        cues.normalized().contains("beta")
    }

    const LADDER: RuleLadder = RuleLadder {
        rules: &[
            ActivationRule {
                name: "alpha",
                strength: 0.9,
                applies: mentions_alpha,
            },
            ActivationRule {
                name: "beta",
                strength: 0.6,
                applies: mentions_beta,
            },
        ],
        fallback: 0.1,
    };

    #[test]
    fn test_first_matching_rule_wins() {
        let outcome = LADDER.evaluate(
            &QueryCues::new("beta then alpha"),
            &DeliberationContext::default(),
        );
        assert_eq!(outcome.strength, 0.9);
        assert_eq!(outcome.rule, Some("alpha"));
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let outcome = LADDER.evaluate(&QueryCues::new(""), &DeliberationContext::default());
        assert_eq!(outcome.strength, 0.1);
        assert_eq!(outcome.rule, None);
    }

    #[test]
    fn test_rule_lookup() {
        assert_eq!(LADDER.rule("beta").map(|r| r.strength), Some(0.6));
        assert!(LADDER.rule("gamma").is_none());
    }

    #[test]
    fn test_fired_signals_in_declaration_order() {
        let rules = [
            SignalRule {
                signal: "primary",
                applies: always,
            },
            SignalRule {
                signal: "beta_signal",
                applies: mentions_beta,
            },
            SignalRule {
                signal: "alpha_signal",
                applies: mentions_alpha,
            },
        ];
        let fired = fired_signals(
            &rules,
            &QueryCues::new("alpha beta"),
            &DeliberationContext::default(),
        );
        assert_eq!(fired, vec!["primary", "beta_signal", "alpha_signal"]);
    }
}
