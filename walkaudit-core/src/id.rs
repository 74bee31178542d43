//! Identifier handling for town and audit records.
//!
//! GeoJSON exports carry `TOWN_ID` as loosely typed JSON. Town keys keep
//! whatever the source held so duplicates are counted faithfully, whereas
//! audit identifiers only ever resolve to a non-zero integer or to nothing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lower bound (inclusive) of the `f64` range representable as `i64`.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
/// Upper bound (exclusive) of the `f64` range representable as `i64`.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// A `TOWN_ID` value exactly as it appeared in the source document.
///
/// A missing key is `Option::None` at the field level, while an explicit
/// `null` is kept as `RawId::Other(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawId {
    /// A JSON number, integral or fractional.
    Number(f64),
    /// A JSON string.
    Text(String),
    /// Any other JSON value (null, boolean, array or object).
    Other(Value),
}

/// Deserialise a field that is present in the document, keeping `null` as a
/// value so it stays distinct from a missing key.
pub(crate) fn present_raw_id<'de, D>(deserializer: D) -> Result<Option<RawId>, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(Some)
}

/// The JSON type of a raw identifier, used for dataset profiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    /// A JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON boolean.
    Boolean,
    /// An array or object.
    Object,
    /// An explicit `null`.
    Null,
    /// The key was not present.
    Missing,
}

impl IdKind {
    /// Classify an optional raw identifier.
    #[must_use]
    pub fn of(raw: Option<&RawId>) -> Self {
        match raw {
            None => Self::Missing,
            Some(RawId::Number(_)) => Self::Number,
            Some(RawId::Text(_)) => Self::String,
            Some(RawId::Other(Value::Bool(_))) => Self::Boolean,
            Some(RawId::Other(Value::Null)) => Self::Null,
            Some(RawId::Other(_)) => Self::Object,
        }
    }

    /// Lower-case label matching the serialised form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Null => "null",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RawId {
    /// Numeric interpretation of the raw value.
    ///
    /// Numbers are returned as-is and strings are parsed after trimming; an
    /// all-whitespace string reads as `0`. Booleans and compound values have
    /// no numeric reading, so `true` never stands in for `1`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse().ok()
                }
            }
            Self::Other(_) => None,
        }
    }

    /// Resolve the identifier an audit refers to.
    ///
    /// The value must have a numeric reading, is floored, and counts as
    /// present only when the floored value fits in `i64` and is non-zero.
    /// Zero, `NaN` and values flooring to zero are treated as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use walkaudit_core::RawId;
    ///
    /// assert_eq!(RawId::Number(42.9).floored_id(), Some(42));
    /// assert_eq!(RawId::Number(0.0).floored_id(), None);
    /// assert_eq!(RawId::Text(" 7 ".into()).floored_id(), Some(7));
    /// ```
    #[must_use]
    pub fn floored_id(&self) -> Option<i64> {
        self.as_number()
            .and_then(floor_to_i64)
            .filter(|id| *id != 0)
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Identity of a town inside the index.
///
/// Integral numbers become [`TownKey::Id`] and can be matched by audits.
/// Every other value is kept as a type-tagged opaque key so it still
/// participates in uniqueness and duplicate counting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum TownKey {
    /// The town carried no identifier.
    Absent,
    /// An integral identifier.
    Id(i64),
    /// A non-integral or non-numeric identifier, tagged with its JSON kind.
    Opaque(String),
}

impl TownKey {
    /// Derive the key for a town's raw identifier.
    #[must_use]
    pub fn from_raw(raw: Option<&RawId>) -> Self {
        let Some(value) = raw else {
            return Self::Absent;
        };
        match value {
            RawId::Number(number) => integral_to_i64(*number)
                .map_or_else(|| Self::Opaque(format!("number:{number}")), Self::Id),
            RawId::Text(text) => Self::Opaque(format!("string:{text}")),
            RawId::Other(Value::Null) => Self::Absent,
            RawId::Other(other) => {
                Self::Opaque(format!("{}:{other}", IdKind::of(Some(value))))
            }
        }
    }

    /// Integral identifier, when the key has one.
    #[must_use]
    pub const fn as_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Absent | Self::Opaque(_) => None,
        }
    }
}

impl fmt::Display for TownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("none"),
            Self::Id(id) => write!(f, "{id}"),
            Self::Opaque(raw) => f.write_str(raw),
        }
    }
}

fn floor_to_i64(value: f64) -> Option<i64> {
    let floored = value.floor();
    if !(I64_LOWER..I64_UPPER).contains(&floored) {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is integral and inside the i64 range"
    )]
    let id = floored as i64;
    Some(id)
}

#[expect(
    clippy::float_cmp,
    reason = "integral values have an exactly zero fractional part"
)]
fn integral_to_i64(value: f64) -> Option<i64> {
    if value.fract() != 0.0 {
        return None;
    }
    floor_to_i64(value)
}
