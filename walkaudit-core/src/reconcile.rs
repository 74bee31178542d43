//! Classification of audits against the town layer.

use serde::Serialize;

use crate::id::{RawId, TownKey};
use crate::index::TownIndex;
use crate::record::{AuditRecord, TownRecord};

/// Outcome of classifying a single audit. Exactly one applies per audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuditMatch {
    /// The floored identifier names a known town.
    ById {
        /// Matched town identifier.
        town_id: i64,
    },
    /// The identifier failed but the normalised name is indexed.
    ByName {
        /// Town key the name maps to.
        town_id: TownKey,
        /// Normalised audit name.
        name: String,
    },
    /// Neither strategy found a town.
    Unmatched {
        /// Floored identifier, if one was present.
        attempted_id: Option<i64>,
        /// Normalised audit name, possibly empty.
        name: String,
    },
}

/// A known city recovered by stripping an audit's neighbourhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighbourhoodHint {
    /// Neighbourhood text found in parentheses, trimmed.
    pub neighbourhood: String,
    /// Normalised city left after stripping.
    pub city: String,
    /// Town the stripped city maps to.
    pub town_id: TownKey,
}

/// Diagnostic for an audit that matched nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedAudit {
    /// Zero-based position of the audit in its collection.
    pub position: usize,
    /// `TOWN_ID` as found in the source; `None` when the key was missing.
    pub raw_id: Option<RawId>,
    /// Floored identifier, if one was present.
    pub attempted_id: Option<i64>,
    /// Normalised name that was looked up.
    pub name: String,
    /// Suggested town when the name carries a neighbourhood.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<NeighbourhoodHint>,
}

/// Counts produced by a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Town features read.
    pub towns: usize,
    /// Audit features read.
    pub audits: usize,
    /// Distinct town keys.
    pub unique_town_ids: usize,
    /// Towns whose key repeated an earlier one.
    pub duplicate_town_ids: usize,
    /// Distinct normalised town names.
    pub mapped_town_names: usize,
    /// Audits matched by identifier.
    pub matched_by_id: usize,
    /// Audits matched by name after the identifier failed.
    pub matched_by_name: usize,
    /// Audits that matched nothing.
    pub unmatched: usize,
    /// One diagnostic per unmatched audit, in input order.
    pub unmatched_audits: Vec<UnmatchedAudit>,
}

impl SummaryReport {
    /// Total audits accounted for by the three outcomes.
    #[must_use]
    pub const fn classified(&self) -> usize {
        self.matched_by_id + self.matched_by_name + self.unmatched
    }

    fn record(&mut self, position: usize, audit: &AuditRecord, index: &TownIndex) {
        match index.classify(audit) {
            AuditMatch::ById { .. } => self.matched_by_id += 1,
            AuditMatch::ByName { .. } => self.matched_by_name += 1,
            AuditMatch::Unmatched { attempted_id, name } => {
                self.unmatched += 1;
                let hint = index.neighbourhood_hint(&name);
                self.unmatched_audits.push(UnmatchedAudit {
                    position,
                    raw_id: audit.id.clone(),
                    attempted_id,
                    name,
                    hint,
                });
            }
        }
    }
}

/// Reconcile audits against towns.
///
/// Builds a [`TownIndex`] from `towns`, classifies every audit in order and
/// summarises the outcome. Irregular records never fail the run; they end up
/// unmatched.
///
/// # Examples
///
/// ```
/// use walkaudit_core::{AuditRecord, RawId, TownRecord, reconcile};
///
/// let towns = [TownRecord::new(1.0, "Arlington"), TownRecord::new(2.0, "Boston")];
/// let audits = [
///     AuditRecord { id: Some(RawId::Number(1.0)), ..AuditRecord::default() },
///     AuditRecord {
///         id: Some(RawId::Number(0.0)),
///         city_town: Some("Boston".into()),
///         ..AuditRecord::default()
///     },
/// ];
/// let report = reconcile(&towns, &audits);
/// assert_eq!(report.matched_by_id, 1);
/// assert_eq!(report.matched_by_name, 1);
/// assert_eq!(report.unmatched, 0);
/// ```
#[must_use]
pub fn reconcile(towns: &[TownRecord], audits: &[AuditRecord]) -> SummaryReport {
    let index = TownIndex::build(towns);
    let mut report = SummaryReport {
        towns: towns.len(),
        audits: audits.len(),
        unique_town_ids: index.unique_ids(),
        duplicate_town_ids: index.duplicate_ids(),
        mapped_town_names: index.mapped_names(),
        ..SummaryReport::default()
    };
    for (position, audit) in audits.iter().enumerate() {
        report.record(position, audit, &index);
    }
    report
}
