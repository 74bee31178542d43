//! GeoJSON feature collection shapes.
//!
//! Only the fields the reconciler and profile read are typed; everything
//! else is carried through untouched.

use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coordinate reference system declared by a collection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Crs {
    /// CRS kind, normally `name`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Named CRS parameters.
    #[serde(default)]
    pub properties: CrsProperties,
}

/// Parameters of a named [`Crs`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CrsProperties {
    /// CRS identifier, e.g. `urn:ogc:def:crs:OGC:1.3:CRS84`.
    #[serde(default)]
    pub name: String,
}

/// A GeoJSON `FeatureCollection` whose features carry properties `P`.
///
/// The `features` array is required; its absence is an input error.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureCollection<P> {
    /// Collection type, normally `FeatureCollection`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Layer name assigned by the exporting tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared coordinate reference system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<Crs>,
    /// Member features in document order.
    pub features: Vec<Feature<P>>,
}

impl<P> FeatureCollection<P> {
    /// Number of features in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Positions of features whose `properties` are `null` or missing.
    pub fn features_without_properties(&self) -> impl Iterator<Item = usize> + '_ {
        self.features
            .iter()
            .enumerate()
            .filter_map(|(position, feature)| feature.properties.is_none().then_some(position))
    }
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Feature<P> {
    /// Feature type, normally `Feature`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Attribute table row; `null` and a missing key are tolerated.
    pub properties: Option<P>,
    /// Boundary geometry; `null` is tolerated.
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// A GeoJSON geometry with arbitrarily nested coordinates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Geometry {
    /// Geometry type such as `Polygon` or `MultiPolygon`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Nested coordinate arrays; `null` entries are skipped.
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// Bounding rectangle of every finite position in the geometry.
    ///
    /// Coordinates are WGS84 with `x = longitude`, `y = latitude`. Returns
    /// `None` when no usable position is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use walkaudit_core::Geometry;
    ///
    /// let geometry = Geometry {
    ///     kind: "Polygon".into(),
    ///     coordinates: json!([[[-71.1, 42.3], [-71.0, 42.4], [-71.1, 42.3]]]),
    /// };
    /// let bounds = geometry.bounding_rect().expect("polygon has positions");
    /// assert_eq!(bounds.min().x, -71.1);
    /// assert_eq!(bounds.max().y, 42.4);
    /// ```
    #[must_use]
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        let mut bounds = None;
        collect_positions(&self.coordinates, &mut bounds);
        bounds
    }
}

fn collect_positions(value: &Value, bounds: &mut Option<Rect<f64>>) {
    let Value::Array(items) = value else {
        return;
    };
    if let Some(coordinate) = position(items) {
        let point = Rect::new(coordinate, coordinate);
        *bounds = Some(include_bounds(*bounds, point));
        return;
    }
    for item in items {
        collect_positions(item, bounds);
    }
}

fn position(items: &[Value]) -> Option<Coord<f64>> {
    let [x, y, ..] = items else {
        return None;
    };
    let (x, y) = (x.as_f64()?, y.as_f64()?);
    (x.is_finite() && y.is_finite()).then_some(Coord { x, y })
}

/// Grow `existing` to cover `bounds`.
pub(crate) fn include_bounds(existing: Option<Rect<f64>>, bounds: Rect<f64>) -> Rect<f64> {
    let Some(current) = existing else {
        return bounds;
    };
    let min = Coord {
        x: current.min().x.min(bounds.min().x),
        y: current.min().y.min(bounds.min().y),
    };
    let max = Coord {
        x: current.max().x.max(bounds.max().x),
        y: current.max().y.max(bounds.max().y),
    };
    Rect::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::TownProperties;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    struct Named {
        name: String,
    }

    #[rstest]
    fn multipolygon_bounds_cover_every_ring() {
        let geometry = Geometry {
            kind: "MultiPolygon".into(),
            coordinates: json!([
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                [[[-2.0, 3.0], [-1.0, 3.5], null, [-2.0, 3.0]]]
            ]),
        };
        let bounds = geometry.bounding_rect().expect("bounds");
        assert_eq!(bounds.min(), Coord { x: -2.0, y: 0.0 });
        assert_eq!(bounds.max(), Coord { x: 1.0, y: 3.5 });
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!([]))]
    #[case(json!([[null, null]]))]
    #[case(json!("not coordinates"))]
    fn geometries_without_positions_have_no_bounds(#[case] coordinates: Value) {
        let geometry = Geometry {
            kind: "Polygon".into(),
            coordinates,
        };
        assert!(geometry.bounding_rect().is_none());
    }

    #[rstest]
    fn collections_tolerate_null_properties_and_geometry() {
        let collection: FeatureCollection<Named> = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "a" }, "geometry": null },
                { "type": "Feature", "properties": null }
            ]
        }))
        .expect("decode collection");
        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.features_without_properties().collect::<Vec<_>>(),
            vec![1]
        );
    }

    #[rstest]
    fn town_features_may_omit_properties() {
        let collection: FeatureCollection<TownProperties> = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "TOWN_ID": 1, "CITY": "Arlington" } },
                { "type": "Feature", "geometry": null }
            ]
        }))
        .expect("decode towns");
        assert_eq!(
            collection.features_without_properties().collect::<Vec<_>>(),
            vec![1]
        );
        let first = collection
            .features
            .first()
            .and_then(|feature| feature.properties.as_ref())
            .expect("first town has properties");
        assert_eq!(first.city(), Some("Arlington"));
    }

    #[rstest]
    fn collections_require_features() {
        let result: Result<FeatureCollection<Named>, _> =
            serde_json::from_value(json!({ "type": "FeatureCollection" }));
        assert!(result.is_err());
    }
}
