//! Console output formatter for decision traces

use colored::Colorize;
use parliament_application::EvaluatorStatistics;
use parliament_domain::{DecisionTrace, EvaluatorId, OutputFormat};

/// Formats decision traces for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a trace in the requested format
    pub fn render(trace: &DecisionTrace, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(trace),
            OutputFormat::Decision => Self::format_decision_only(trace),
            OutputFormat::Json => Self::format_json(trace),
        }
    }

    /// Format the complete trace: every perspective, metrics and lineage
    pub fn format(trace: &DecisionTrace) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!(
            "Parliament Deliberation #{}",
            trace.sequence_number()
        )));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), trace.query()));
        output.push_str(&format!(
            "{} {}\n",
            "Trace:".cyan().bold(),
            trace.trace_id().dimmed()
        ));

        // Perspectives
        output.push_str(&Self::section_header("Perspectives"));
        for id in EvaluatorId::PERSPECTIVES {
            let Some(record) = trace.activation(id) else {
                continue;
            };
            let line = format!(
                "{:<15} {:.2} / {:.2}",
                id.display_name(),
                record.strength(),
                record.threshold()
            );
            if record.is_active() {
                output.push_str(&format!(
                    "{} {}  {}\n",
                    "●".green(),
                    line.bold(),
                    record.fired_signals().join(", ").dimmed()
                ));
            } else {
                output.push_str(&format!("{} {}\n", "○".dimmed(), line.dimmed()));
            }
        }
        if trace.equilibrium_reevaluated() {
            output.push_str(&format!(
                "{}\n",
                "Equilibrium was re-evaluated under conflict".yellow()
            ));
        }

        // Responses of active perspectives
        let active = trace.active_perspectives();
        if !active.is_empty() {
            output.push_str(&Self::section_header("Responses"));
            for id in active {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", id.display_name()).yellow().bold(),
                    trace.response(id)
                ));
            }
        }

        // Decision
        output.push_str(&Self::section_header("Decision"));
        output.push_str(&format!("\n{}\n", trace.decision_text()));

        // Metrics
        output.push_str(&Self::section_header("Metrics"));
        output.push_str(&format!(
            "  Confidence:       {}\n",
            Self::percent(trace.confidence())
        ));
        output.push_str(&format!(
            "  Alignment:        {}\n",
            Self::percent(trace.alignment_score())
        ));
        output.push_str(&format!(
            "  Sparsity:         {:.2}\n",
            trace.sparsity_ratio()
        ));
        output.push_str(&format!(
            "  Total activation: {:.2}\n",
            trace.total_activation()
        ));

        if !trace.pattern_flags().is_empty() {
            output.push_str(&format!("\n{}\n", "Pattern Flags:".yellow().bold()));
            for flag in trace.pattern_flags() {
                output.push_str(&format!("  ! {}\n", flag));
            }
        }

        if !trace.lineage().is_empty() {
            output.push_str(&format!("\n{}\n", "Lineage:".cyan().bold()));
            let steps: Vec<String> = trace
                .lineage()
                .iter()
                .map(|entry| format!("{}:{}", entry.evaluator, entry.signal))
                .collect();
            output.push_str(&Self::indent(&steps.join(" → "), "  "));
            output.push('\n');
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(trace: &DecisionTrace) -> String {
        serde_json::to_string_pretty(trace).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the decision only (concise output)
    pub fn format_decision_only(trace: &DecisionTrace) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), trace.query()));
        output.push_str(trace.decision_text());
        output.push_str("\n\n");
        output.push_str(&format!(
            "{} {}  {} {}\n",
            "Confidence:".dimmed(),
            Self::percent(trace.confidence()),
            "Alignment:".dimmed(),
            Self::percent(trace.alignment_score())
        ));

        output
    }

    /// Format per-evaluator statistics as a table
    pub fn format_statistics(stats: &[EvaluatorStatistics]) -> String {
        let mut output = Self::section_header("Evaluator Statistics");
        output.push_str(&format!(
            "{:<15} {:>6} {:>7} {:>9} {:>6}\n",
            "Evaluator", "Seen", "Active", "Strength", "Rate"
        ));
        for stat in stats {
            output.push_str(&format!(
                "{:<15} {:>6} {:>7} {:>9.2} {:>6}\n",
                stat.evaluator.display_name(),
                stat.observations,
                stat.active_count,
                stat.mean_strength,
                Self::percent(stat.activation_rate)
            ));
        }
        output
    }

    fn percent(value: f64) -> String {
        format!("{:.0}%", value * 100.0)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parliament_application::Parliament;
    use parliament_domain::DeliberationContext;
    use std::sync::Arc;

    fn trace(query: &str) -> Arc<DecisionTrace> {
        colored::control::set_override(false);
        let mut parliament = Parliament::default();
        parliament
            .deliberate(query, &DeliberationContext::new())
            .unwrap()
            .1
    }

    #[test]
    fn test_full_output_lists_every_perspective() {
        let trace = trace("Should we maybe transform the team, and what if we forecast the future impact after the pivot then?");
        let output = ConsoleFormatter::format(&trace);

        for id in EvaluatorId::PERSPECTIVES {
            assert!(output.contains(id.display_name()), "missing {id}");
        }
        assert!(output.contains("Parliament Deliberation #1"));
        assert!(output.contains("re-evaluated under conflict"));
        assert!(output.contains("OVERACTIVATION"));
        assert!(output.contains(trace.decision_text()));
    }

    #[test]
    fn test_decision_only_output() {
        let trace = trace("Should we migrate the billing service?");
        let output = ConsoleFormatter::render(&trace, OutputFormat::Decision);

        assert!(output.contains("Should we migrate the billing service?"));
        assert!(output.contains(trace.decision_text()));
        assert!(output.contains("Confidence:"));
        assert!(!output.contains("Lineage:"));
    }

    #[test]
    fn test_json_output_is_the_trace() {
        let trace = trace("What caused the outage?");
        let json = ConsoleFormatter::render(&trace, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["trace_id"], trace.trace_id());
        assert_eq!(parsed["query"], "What caused the outage?");
        assert_eq!(parsed["decision_text"], trace.decision_text());
        assert_eq!(parsed["activation_order"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_statistics_table() {
        colored::control::set_override(false);
        let mut parliament = Parliament::default();
        parliament
            .deliberate("Should we migrate?", &DeliberationContext::new())
            .unwrap();
        let output = ConsoleFormatter::format_statistics(&parliament.evaluator_statistics());

        assert!(output.contains("Evaluator Statistics"));
        assert_eq!(output.lines().filter(|l| l.starts_with("Synthesis")).count(), 1);
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
