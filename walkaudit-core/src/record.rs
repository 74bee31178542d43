//! Reconciliation views of town and audit features.

use crate::feature::{Feature, FeatureCollection};
use crate::id::{RawId, TownKey};
use crate::name::{first_non_empty, normalise_name};
use crate::properties::{AuditProperties, TownProperties};

/// Town boundary layer.
pub type TownCollection = FeatureCollection<TownProperties>;

/// Walk audit layer.
pub type AuditCollection = FeatureCollection<AuditProperties>;

/// The fields of a town feature that take part in reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TownRecord {
    /// Raw `TOWN_ID`.
    pub id: Option<RawId>,
    /// Display name as found in the source, before normalisation.
    pub name: Option<String>,
}

impl TownRecord {
    /// Build a record from an identifier and name.
    ///
    /// # Examples
    ///
    /// ```
    /// use walkaudit_core::{TownKey, TownRecord};
    ///
    /// let town = TownRecord::new(1.0, " Arlington ");
    /// assert_eq!(town.key(), TownKey::Id(1));
    /// assert_eq!(town.normalised_name(), "ARLINGTON");
    /// ```
    #[must_use]
    pub fn new(id: f64, name: &str) -> Self {
        Self {
            id: Some(RawId::Number(id)),
            name: Some(name.to_owned()),
        }
    }

    /// Extract the record from a feature's properties, preferring `CITY`
    /// over `TOWN` for the name.
    #[must_use]
    pub fn from_properties(properties: &TownProperties) -> Self {
        Self {
            id: properties.town_id.clone(),
            name: first_non_empty([properties.city(), properties.town()]).map(str::to_owned),
        }
    }

    /// Index key for this town.
    #[must_use]
    pub fn key(&self) -> TownKey {
        TownKey::from_raw(self.id.as_ref())
    }

    /// Uppercased, trimmed name; empty when the town has none.
    #[must_use]
    pub fn normalised_name(&self) -> String {
        self.name.as_deref().map(normalise_name).unwrap_or_default()
    }
}

/// The fields of an audit feature that take part in reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditRecord {
    /// Raw `TOWN_ID`.
    pub id: Option<RawId>,
    /// Value of `CITY/TOWN`.
    pub city_town: Option<String>,
    /// Value of `CITY`.
    pub city: Option<String>,
}

impl AuditRecord {
    /// Extract the record from a feature's properties.
    #[must_use]
    pub fn from_properties(properties: &AuditProperties) -> Self {
        Self {
            id: properties.town_id.clone(),
            city_town: properties.city_town().map(str::to_owned),
            city: properties.city().map(str::to_owned),
        }
    }

    /// Extract the record from a feature; missing properties give an empty
    /// record.
    #[must_use]
    pub fn from_feature(feature: &Feature<AuditProperties>) -> Self {
        feature
            .properties
            .as_ref()
            .map(Self::from_properties)
            .unwrap_or_default()
    }

    /// Identifier used for ID matching, if the raw value counts as present.
    #[must_use]
    pub fn processed_id(&self) -> Option<i64> {
        self.id.as_ref().and_then(RawId::floored_id)
    }

    /// Uppercased, trimmed name from `CITY/TOWN`, falling back to `CITY`.
    #[must_use]
    pub fn normalised_name(&self) -> String {
        first_non_empty([self.city_town.as_deref(), self.city.as_deref()])
            .map(normalise_name)
            .unwrap_or_default()
    }
}

impl TownCollection {
    /// Reconciliation records for every feature, in document order.
    ///
    /// Features without properties yield an empty record rather than being
    /// dropped.
    #[must_use]
    pub fn town_records(&self) -> Vec<TownRecord> {
        self.features
            .iter()
            .map(|feature| {
                feature
                    .properties
                    .as_ref()
                    .map(TownRecord::from_properties)
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl AuditCollection {
    /// Reconciliation records for every feature, in document order.
    ///
    /// Features without properties yield an empty record rather than being
    /// dropped.
    #[must_use]
    pub fn audit_records(&self) -> Vec<AuditRecord> {
        self.features
            .iter()
            .map(AuditRecord::from_feature)
            .collect()
    }
}
