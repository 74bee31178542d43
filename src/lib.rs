//! Facade crate for reconciling walk audits against town boundaries.
//!
//! This crate re-exports the identifier model and reconciler from
//! `walkaudit-core` alongside the GeoJSON loaders from `walkaudit-data`, so a
//! caller can go from two files on disk to a [`SummaryReport`] with a single
//! dependency.

#![forbid(unsafe_code)]

use camino::Utf8Path;

pub use walkaudit_core::{
    AuditCollection, AuditMatch, AuditProperties, AuditRecord, AuditSample, CityTown,
    DatasetProfile, IdKind, IdRange, NeighbourhoodHint, RawId, SummaryReport, TownCollection,
    TownIndex, TownKey, TownProperties, TownRecord, UnmatchedAudit, normalise_name, reconcile,
};
pub use walkaudit_data::{Layer, Layers, LoadError, load_audits, load_layers, load_towns};

/// Load both layers from disk and reconcile the audits against the towns.
///
/// # Errors
///
/// Returns [`LoadError`] when either layer cannot be opened or parsed.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
///
/// let report = walkaudit::reconcile_files(
///     Utf8Path::new("public/data/towns.geojson"),
///     Utf8Path::new("public/data/audits.geojson"),
/// )?;
/// println!("unmatched audits: {}", report.unmatched);
/// # Ok::<(), walkaudit::LoadError>(())
/// ```
pub fn reconcile_files(towns: &Utf8Path, audits: &Utf8Path) -> Result<SummaryReport, LoadError> {
    let layers = load_layers(towns, audits)?;
    let town_records = layers.towns.town_records();
    let audit_records = layers.audits.audit_records();
    Ok(reconcile(&town_records, &audit_records))
}
