/// Rule evaluation: snapshot in, ordered active advisory set out.
///
/// Every call to `RuleEvaluator::evaluate` walks the whole catalog from
/// scratch. Nothing is carried over between calls, so the result depends only
/// on the threshold table and the snapshot passed in.

use serde::Serialize;

use crate::alert::catalog::{ADVISORY_CATALOG, AdvisoryDefinition, AdvisoryKey};
use crate::model::ReadingSnapshot;
use crate::thresholds::ThresholdTable;

// ---------------------------------------------------------------------------
// Active set
// ---------------------------------------------------------------------------

/// Advisories that applied to one snapshot, in catalog order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ActiveAdvisorySet {
    entries: Vec<&'static AdvisoryDefinition>,
}

impl ActiveAdvisorySet {
    pub fn iter(&self) -> impl Iterator<Item = &'static AdvisoryDefinition> + '_ {
        self.entries.iter().copied()
    }

    /// Keys of the active advisories, in catalog order.
    pub fn active_keys(&self) -> Vec<AdvisoryKey> {
        self.entries.iter().map(|a| a.key).collect()
    }

    pub fn is_active(&self, key: AdvisoryKey) -> bool {
        self.entries.iter().any(|a| a.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// An empty set is what the presentation layer shows as "no advisories".
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Definitions are unique statics, so membership by key is identity.
impl PartialEq for ActiveAdvisorySet {
    fn eq(&self, other: &Self) -> bool {
        self.active_keys() == other.active_keys()
    }
}

impl Eq for ActiveAdvisorySet {}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Evaluates snapshots against a fixed threshold table.
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator {
    thresholds: ThresholdTable,
}

impl RuleEvaluator {
    pub fn new(thresholds: ThresholdTable) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Returns every advisory whose predicate holds for `snapshot`.
    ///
    /// Total over all snapshots: absent channels simply fail their predicates.
    pub fn evaluate(&self, snapshot: &ReadingSnapshot) -> ActiveAdvisorySet {
        let entries = ADVISORY_CATALOG
            .iter()
            .filter(|advisory| advisory.applies_to(snapshot, &self.thresholds))
            .collect();
        ActiveAdvisorySet { entries }
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Holds the most recent active set for callers that poll between updates.
///
/// `update` builds the new set completely before swapping it in, so readers
/// never see a partially rebuilt set.
#[derive(Debug, Clone, Default)]
pub struct PrecautionTracker {
    evaluator: RuleEvaluator,
    current: ActiveAdvisorySet,
}

impl PrecautionTracker {
    /// Starts with an empty active set.
    pub fn new(evaluator: RuleEvaluator) -> Self {
        Self {
            evaluator,
            current: ActiveAdvisorySet::default(),
        }
    }

    /// Discards the previous set and replaces it with one for `snapshot`.
    pub fn update(&mut self, snapshot: &ReadingSnapshot) -> &ActiveAdvisorySet {
        let next = self.evaluator.evaluate(snapshot);
        self.current = next;
        &self.current
    }

    pub fn current(&self) -> &ActiveAdvisorySet {
        &self.current
    }

    pub fn active_keys(&self) -> Vec<AdvisoryKey> {
        self.current.active_keys()
    }

    pub fn is_active(&self, key: AdvisoryKey) -> bool {
        self.current.is_active(key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
