//! Progress reporting for a running deliberation
//!
//! Written to stderr so JSON on stdout stays machine-readable.

use colored::Colorize;
use parliament_application::DeliberationObserver;
use parliament_domain::{ActivationRecord, DecisionTrace};

/// Simple text-based progress, one line per evaluator
pub struct ConsoleProgress;

impl ConsoleProgress {
    fn evaluator_line(record: &ActivationRecord) -> String {
        let id = record.evaluator_id();
        if record.is_active() {
            format!(
                "  {} {:<15} {:.2}",
                "v".green(),
                id.display_name(),
                record.strength()
            )
        } else {
            format!(
                "  {} {:<15} {:.2}",
                "-".dimmed(),
                id.display_name(),
                record.strength()
            )
            .dimmed()
            .to_string()
        }
    }
}

impl DeliberationObserver for ConsoleProgress {
    fn on_deliberation_start(&self, sequence_number: u64, query: &str) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            format!("Deliberation #{}", sequence_number).bold(),
            query.dimmed()
        );
    }

    fn on_evaluator_complete(&self, record: &ActivationRecord) {
        eprintln!("{}", Self::evaluator_line(record));
    }

    fn on_equilibrium_reevaluation(&self, conflict_score: f64) {
        eprintln!(
            "  {} conflict {:.0}%, consulting Equilibrium again",
            "!".yellow(),
            conflict_score * 100.0
        );
    }

    fn on_deliberation_complete(&self, trace: &DecisionTrace) {
        eprintln!(
            "  {} confidence {:.0}%\n",
            "=".cyan(),
            trace.confidence() * 100.0
        );
    }
}
