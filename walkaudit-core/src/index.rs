//! Lookup structure built once from the town layer.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::id::TownKey;
use crate::name::{CityTown, normalise_name};
use crate::reconcile::{AuditMatch, NeighbourhoodHint};
use crate::record::{AuditRecord, TownRecord};

/// Known town identifiers plus a name lookup.
///
/// Duplicate identifiers and colliding names are tolerated: duplicates are
/// counted, and a later town with the same normalised name replaces the
/// earlier mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TownIndex {
    known_ids: HashSet<TownKey>,
    name_to_id: HashMap<String, TownKey>,
    duplicate_ids: usize,
}

impl TownIndex {
    /// Index every town in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use walkaudit_core::{TownIndex, TownKey, TownRecord};
    ///
    /// let towns = [
    ///     TownRecord::new(1.0, "Arlington"),
    ///     TownRecord::new(1.0, "Boston"),
    /// ];
    /// let index = TownIndex::build(&towns);
    /// assert_eq!(index.unique_ids(), 1);
    /// assert_eq!(index.duplicate_ids(), 1);
    /// assert_eq!(index.lookup_name("BOSTON"), Some(&TownKey::Id(1)));
    /// ```
    #[must_use]
    pub fn build<'a>(towns: impl IntoIterator<Item = &'a TownRecord>) -> Self {
        let mut index = Self::default();
        for town in towns {
            index.insert(town);
        }
        index
    }

    fn insert(&mut self, town: &TownRecord) {
        let key = town.key();
        if !self.known_ids.insert(key.clone()) {
            self.duplicate_ids += 1;
            debug!("duplicate town id {key}");
        }

        let name = town.normalised_name();
        if name.is_empty() {
            return;
        }
        match self.name_to_id.entry(name) {
            Entry::Occupied(mut slot) => {
                debug!(
                    "town name {} remapped from id {} to id {key}",
                    slot.key(),
                    slot.get()
                );
                slot.insert(key);
            }
            Entry::Vacant(slot) => {
                slot.insert(key);
            }
        }
    }

    /// Whether a town with this integral identifier exists.
    #[must_use]
    pub fn contains_id(&self, id: i64) -> bool {
        self.known_ids.contains(&TownKey::Id(id))
    }

    /// Town key mapped to an already normalised name.
    #[must_use]
    pub fn lookup_name(&self, normalised: &str) -> Option<&TownKey> {
        self.name_to_id.get(normalised)
    }

    /// Number of distinct town keys, absent identifiers included.
    #[must_use]
    pub fn unique_ids(&self) -> usize {
        self.known_ids.len()
    }

    /// Number of towns whose key had already been seen.
    #[must_use]
    pub const fn duplicate_ids(&self) -> usize {
        self.duplicate_ids
    }

    /// Number of distinct normalised names.
    #[must_use]
    pub fn mapped_names(&self) -> usize {
        self.name_to_id.len()
    }

    /// Classify one audit against the index.
    ///
    /// ID matching is attempted first; the name is consulted only when the
    /// identifier is absent or unknown.
    #[must_use]
    pub fn classify(&self, audit: &AuditRecord) -> AuditMatch {
        let attempted_id = audit.processed_id();
        if let Some(town_id) = attempted_id.filter(|id| self.contains_id(*id)) {
            return AuditMatch::ById { town_id };
        }

        let name = audit.normalised_name();
        if !name.is_empty()
            && let Some(town_id) = self.lookup_name(&name)
        {
            return AuditMatch::ByName {
                town_id: town_id.clone(),
                name,
            };
        }

        AuditMatch::Unmatched { attempted_id, name }
    }

    /// Suggest a town for a name whose parenthesised neighbourhood kept it
    /// from matching, e.g. `BOSTON (DORCHESTER)`.
    #[must_use]
    pub fn neighbourhood_hint(&self, name: &str) -> Option<NeighbourhoodHint> {
        let parsed = CityTown::parse(name);
        if !parsed.has_neighbourhood() {
            return None;
        }
        let city = normalise_name(&parsed.city);
        if city.is_empty() {
            return None;
        }
        let town_id = self.lookup_name(&city)?.clone();
        Some(NeighbourhoodHint {
            neighbourhood: parsed.neighbourhood.unwrap_or_default().trim().to_owned(),
            city,
            town_id,
        })
    }
}
