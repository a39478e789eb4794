//! Advisory cataloguing, evaluation, and snapshot freshness.
//!
//! Submodules:
//! - `catalog` — the eleven advisory definitions and their predicates.
//! - `evaluator` — recomputes the active advisory set for a snapshot.
//! - `stalenesses` — flags snapshots too old to present as current.

pub mod catalog;
pub mod evaluator;
pub mod stalenesses;

pub use catalog::{ADVISORY_CATALOG, AdvisoryDefinition, AdvisoryKey};
pub use evaluator::{ActiveAdvisorySet, PrecautionTracker, RuleEvaluator};
