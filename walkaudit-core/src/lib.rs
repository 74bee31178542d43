//! Core domain types for walk audit verification.
//!
//! Shape types for the town boundary and walk audit GeoJSON layers, and the
//! reconciler that links each audit to a town by identifier or by
//! normalised name. Everything here is pure: callers load the layers and
//! decide how to present the results.

mod feature;
mod id;
mod index;
mod name;
mod profile;
mod properties;
mod reconcile;
mod record;

pub use feature::{Crs, CrsProperties, Feature, FeatureCollection, Geometry};
pub use id::{IdKind, RawId, TownKey};
pub use index::TownIndex;
pub use name::{CityTown, normalise_name};
pub use profile::{AuditSample, DatasetProfile, IdRange};
pub use properties::{AuditProperties, LooseText, TownProperties};
pub use reconcile::{AuditMatch, NeighbourhoodHint, SummaryReport, UnmatchedAudit, reconcile};
pub use record::{AuditCollection, AuditRecord, TownCollection, TownRecord};
