//! Attribute tables of the town boundary and walk audit layers.
//!
//! Reconciliation fields are typed; the remaining columns are retained in
//! an attribute map and exposed through lenient accessors that return
//! `None` for missing or mistyped values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::{RawId, present_raw_id};

/// A text column that tolerates non-string JSON values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LooseText {
    /// A JSON string.
    Text(String),
    /// Any other JSON value; never used as a name.
    Other(Value),
}

impl LooseText {
    /// String contents, when the column held a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for LooseText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

fn text_of(field: Option<&LooseText>) -> Option<&str> {
    field.and_then(LooseText::as_str)
}

fn attribute_text<'a>(attributes: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    attributes.get(key).and_then(Value::as_str)
}

fn attribute_number(attributes: &Map<String, Value>, key: &str) -> Option<f64> {
    attributes.get(key).and_then(Value::as_f64)
}

/// Properties of a municipal boundary feature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TownProperties {
    /// Municipal identifier.
    #[serde(
        rename = "TOWN_ID",
        default,
        deserialize_with = "present_raw_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub town_id: Option<RawId>,
    /// Display name.
    #[serde(rename = "CITY", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<LooseText>,
    /// Alternative name column used by some exports.
    #[serde(rename = "TOWN", default, skip_serializing_if = "Option::is_none")]
    pub town: Option<LooseText>,
    /// Remaining columns, verbatim.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl TownProperties {
    /// Value of `CITY`, when it is a string.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        text_of(self.city.as_ref())
    }

    /// Value of `TOWN`, when it is a string.
    #[must_use]
    pub fn town(&self) -> Option<&str> {
        text_of(self.town.as_ref())
    }

    /// Municipality type, e.g. `C` for city or `T` for town.
    #[must_use]
    pub fn municipality_type(&self) -> Option<&str> {
        attribute_text(&self.attributes, "TYPE")
    }

    /// County name.
    #[must_use]
    pub fn county(&self) -> Option<&str> {
        attribute_text(&self.attributes, "COUNTY")
    }

    /// State and county FIPS code.
    #[must_use]
    pub fn fips_stco(&self) -> Option<f64> {
        attribute_number(&self.attributes, "FIPS_STCO")
    }

    /// Four-colour map index.
    #[must_use]
    pub fn four_colour(&self) -> Option<f64> {
        attribute_number(&self.attributes, "FOURCOLOR")
    }

    /// Census population for a decennial year (`POP1960` to `POP2020`).
    #[must_use]
    pub fn population(&self, year: u16) -> Option<f64> {
        attribute_number(&self.attributes, &format!("POP{year}"))
    }

    /// Population change between the 2010 and 2020 censuses.
    #[must_use]
    pub fn population_change_2010_2020(&self) -> Option<f64> {
        attribute_number(&self.attributes, "POPCH10_20")
    }

    /// Land area in acres.
    #[must_use]
    pub fn area_acres(&self) -> Option<f64> {
        attribute_number(&self.attributes, "AREA_ACRES")
    }

    /// Land area in square miles.
    #[must_use]
    pub fn area_sq_mi(&self) -> Option<f64> {
        attribute_number(&self.attributes, "AREA_SQMI")
    }

    /// Boundary perimeter in projection units.
    #[must_use]
    pub fn shape_length(&self) -> Option<f64> {
        attribute_number(&self.attributes, "SHAPE_Length")
    }

    /// Boundary area in projection units.
    #[must_use]
    pub fn shape_area(&self) -> Option<f64> {
        attribute_number(&self.attributes, "SHAPE_Area")
    }
}

/// Properties of a walk audit feature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AuditProperties {
    /// Identifier of the audited town, possibly fractional.
    #[serde(
        rename = "TOWN_ID",
        default,
        deserialize_with = "present_raw_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub town_id: Option<RawId>,
    /// Combined city and neighbourhood value, e.g. `Boston (Dorchester)`.
    #[serde(rename = "CITY/TOWN", default, skip_serializing_if = "Option::is_none")]
    pub city_town: Option<LooseText>,
    /// City name without the neighbourhood.
    #[serde(rename = "CITY", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<LooseText>,
    /// Remaining columns, verbatim.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl AuditProperties {
    /// Value of `CITY/TOWN`, when it is a string.
    #[must_use]
    pub fn city_town(&self) -> Option<&str> {
        text_of(self.city_town.as_ref())
    }

    /// Value of `CITY`, when it is a string.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        text_of(self.city.as_ref())
    }

    /// Year the audit took place.
    #[must_use]
    pub fn year(&self) -> Option<f64> {
        attribute_number(&self.attributes, "YEAR")
    }

    /// Free-text summary.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        attribute_text(&self.attributes, "SUMMARY")
    }

    /// Long-term recommendations.
    #[must_use]
    pub fn long_term_recommendations(&self) -> Option<&str> {
        attribute_text(&self.attributes, "LONG TERM RECOMMENDATIONS")
    }

    /// Short-term recommendations.
    #[must_use]
    pub fn short_term_recommendations(&self) -> Option<&str> {
        attribute_text(&self.attributes, "SHORT TERM RECOMMENDATIONS")
    }

    /// Streets, intersections and area covered. The column name keeps the
    /// upstream spelling.
    #[must_use]
    pub fn streets_covered(&self) -> Option<&str> {
        attribute_text(&self.attributes, "STREETS, INNTERSECTIONS + AREA COVERED")
    }

    /// Comma-separated audit themes.
    #[must_use]
    pub fn themes(&self) -> Option<&str> {
        attribute_text(&self.attributes, "THEMES")
    }

    /// Display text of the report link.
    #[must_use]
    pub fn view(&self) -> Option<&str> {
        attribute_text(&self.attributes, "VIEW")
    }

    /// Target of the report link.
    #[must_use]
    pub fn view_link(&self) -> Option<&str> {
        attribute_text(&self.attributes, "VIEW_link")
    }

    /// Facilitator or author credit.
    #[must_use]
    pub fn facilitator(&self) -> Option<&str> {
        attribute_text(&self.attributes, "FACILITATOR/AUTHOR")
    }

    /// Neighbourhood, when recorded separately.
    #[must_use]
    pub fn neighbourhood(&self) -> Option<&str> {
        attribute_text(&self.attributes, "NEIGHBORHOOD")
    }

    /// Municipality type joined from the town layer.
    #[must_use]
    pub fn municipality_type(&self) -> Option<&str> {
        attribute_text(&self.attributes, "TYPE")
    }

    /// County joined from the town layer.
    #[must_use]
    pub fn county(&self) -> Option<&str> {
        attribute_text(&self.attributes, "COUNTY")
    }
}
