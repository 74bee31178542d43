//! Dataset diagnostics printed alongside the reconciliation summary.

use std::collections::BTreeSet;

use geo::Rect;
use serde::Serialize;

use crate::feature::include_bounds;
use crate::id::{IdKind, RawId};
use crate::record::{AuditCollection, AuditRecord, TownCollection};

/// Smallest and largest numeric town identifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdRange {
    /// Smallest identifier.
    pub min: f64,
    /// Largest identifier.
    pub max: f64,
}

impl IdRange {
    fn include(range: Option<Self>, value: f64) -> Option<Self> {
        if value.is_nan() {
            return range;
        }
        Some(range.map_or(
            Self {
                min: value,
                max: value,
            },
            |current| Self {
                min: current.min.min(value),
                max: current.max.max(value),
            },
        ))
    }
}

/// How one audit's raw identifier was interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditSample {
    /// Zero-based position of the audit.
    pub position: usize,
    /// Identifier as found in the source.
    pub raw_id: Option<RawId>,
    /// JSON kind of the raw identifier.
    pub raw_kind: IdKind,
    /// Identifier used for matching, if present.
    pub processed_id: Option<i64>,
}

/// Shape of the two input layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    /// JSON kinds seen for town identifiers.
    pub town_id_kinds: BTreeSet<IdKind>,
    /// Range of numeric town identifiers, fractional values included.
    pub town_id_range: Option<IdRange>,
    /// Bounding rectangle of all town geometries.
    pub town_extent: Option<Rect<f64>>,
    /// The first audits with their raw and processed identifiers.
    pub audit_samples: Vec<AuditSample>,
}

impl DatasetProfile {
    /// Profile both layers, sampling the first `sample_size` audits whatever
    /// their match outcome.
    #[must_use]
    pub fn build(towns: &TownCollection, audits: &AuditCollection, sample_size: usize) -> Self {
        let mut town_id_kinds = BTreeSet::new();
        let mut town_id_range = None;
        let mut town_extent = None;
        for feature in &towns.features {
            let raw = feature
                .properties
                .as_ref()
                .and_then(|properties| properties.town_id.as_ref());
            town_id_kinds.insert(IdKind::of(raw));
            if let Some(RawId::Number(value)) = raw {
                town_id_range = IdRange::include(town_id_range, *value);
            }
            if let Some(bounds) = feature.geometry.as_ref().and_then(|g| g.bounding_rect()) {
                town_extent = Some(include_bounds(town_extent, bounds));
            }
        }

        let audit_samples = audits
            .features
            .iter()
            .take(sample_size)
            .enumerate()
            .map(|(position, feature)| {
                let record = AuditRecord::from_feature(feature);
                AuditSample {
                    position,
                    raw_kind: IdKind::of(record.id.as_ref()),
                    processed_id: record.processed_id(),
                    raw_id: record.id,
                }
            })
            .collect();

        Self {
            town_id_kinds,
            town_id_range,
            town_extent,
            audit_samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;
    use serde_json::json;

    fn towns() -> TownCollection {
        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "properties": { "TOWN_ID": 3, "CITY": "A" },
                    "geometry": { "type": "Polygon", "coordinates": [[[-71.0, 42.0], [-70.5, 42.5]]] }
                },
                {
                    "properties": { "TOWN_ID": 351.5, "CITY": "B" },
                    "geometry": { "type": "Polygon", "coordinates": [[[-73.5, 41.2], [-72.0, 41.9]]] }
                },
                { "properties": { "TOWN_ID": "9", "CITY": "C" }, "geometry": null },
                { "properties": { "CITY": "D" } },
                { "properties": { "TOWN_ID": null, "CITY": "E" } }
            ]
        }))
        .expect("decode towns")
    }

    fn audits() -> AuditCollection {
        serde_json::from_value(json!({
            "features": [
                { "properties": { "TOWN_ID": 3.7 } },
                { "properties": { "TOWN_ID": 0 } },
                { "properties": { "TOWN_ID": "12" } },
                { "properties": {} }
            ]
        }))
        .expect("decode audits")
    }

    #[rstest]
    fn profiles_town_identifiers_and_extent() {
        let profile = DatasetProfile::build(&towns(), &audits(), 5);
        assert_eq!(
            profile.town_id_kinds,
            BTreeSet::from([
                IdKind::Number,
                IdKind::String,
                IdKind::Null,
                IdKind::Missing
            ])
        );
        assert_eq!(
            profile.town_id_range,
            Some(IdRange {
                min: 3.0,
                max: 351.5
            })
        );
        let extent = profile.town_extent.expect("extent");
        assert_eq!(extent.min(), Coord { x: -73.5, y: 41.2 });
        assert_eq!(extent.max(), Coord { x: -70.5, y: 42.5 });
    }

    #[rstest]
    #[case(2, 2)]
    #[case(5, 4)]
    #[case(0, 0)]
    fn samples_leading_audits(#[case] sample_size: usize, #[case] expected: usize) {
        let profile = DatasetProfile::build(&towns(), &audits(), sample_size);
        assert_eq!(profile.audit_samples.len(), expected);
    }

    #[rstest]
    fn samples_report_processed_identifiers() {
        let profile = DatasetProfile::build(&towns(), &audits(), 4);
        let processed: Vec<Option<i64>> = profile
            .audit_samples
            .iter()
            .map(|sample| sample.processed_id)
            .collect();
        assert_eq!(processed, vec![Some(3), None, Some(12), None]);
        let kinds: Vec<IdKind> = profile
            .audit_samples
            .iter()
            .map(|sample| sample.raw_kind)
            .collect();
        assert_eq!(
            kinds,
            vec![IdKind::Number, IdKind::Number, IdKind::String, IdKind::Missing]
        );
    }
}
