//! Pure functions computing the derived fields of a decision trace
//!
//! Everything here is a function of the activation records and the
//! invocation order, so each metric can be tested without running a
//! deliberation.

pub mod alignment;
pub mod lineage;
pub mod metrics;
pub mod patterns;

pub use alignment::{AlignmentRule, alignment_checks, alignment_score};
pub use lineage::extract_lineage;
pub use metrics::{
    CONFLICT_THRESHOLD, ConfidenceWeights, STRONG_ACTIVATION, confidence, conflict_score,
    mean_active_strength, sample_variance, sparsity_ratio, total_activation,
};
pub use patterns::detect_patterns;

use crate::activation::{ActivationRecord, EvaluatorId};
use std::collections::BTreeMap;

/// Activation records keyed by evaluator, as held by drafts and traces
pub type Activations = BTreeMap<EvaluatorId, ActivationRecord>;

/// Whether `id` has a record at or above its threshold
pub fn is_active(activations: &Activations, id: EvaluatorId) -> bool {
    activations.get(&id).is_some_and(ActivationRecord::is_active)
}
