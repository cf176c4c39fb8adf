//! Regions and the read-only registry that orders them.
//!
//! The `RegionRegistry` is the board: a fixed, ordered list of claimable
//! regions. Movement walks this order and wraps around the end. The
//! registry is supplied once at construction and never mutated.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::ConstructionError;

/// Fewest regions a board may have.
pub const MIN_REGIONS: usize = 2;

/// Region identifier (an opaque string such as `"facets"` or `"sec-3"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Create a new region ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One claimable region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier.
    pub id: RegionId,
    /// Display name.
    pub name: String,
    /// Short blurb for the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Region {
    /// Create a region without a description.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: RegionId::new(id),
            name: name.into(),
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered, immutable set of regions.
///
/// ## Example
///
/// ```
/// use region_conquest::core::{Region, RegionId, RegionRegistry};
///
/// let registry = RegionRegistry::new(vec![
///     Region::new("north", "North"),
///     Region::new("south", "South"),
/// ])
/// .unwrap();
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.index_of(&RegionId::new("south")), Some(1));
/// assert_eq!(registry.step(0, 3).id, RegionId::new("south"));
/// ```
#[derive(Clone, Debug)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    index: FxHashMap<RegionId, usize>,
}

impl RegionRegistry {
    /// Build a registry. Order of `regions` is the travel order.
    ///
    /// # Errors
    ///
    /// Fails on an empty list, fewer than [`MIN_REGIONS`] regions, or a
    /// repeated id.
    pub fn new(regions: Vec<Region>) -> Result<Self, ConstructionError> {
        if regions.is_empty() {
            return Err(ConstructionError::NoRegions);
        }
        if regions.len() < MIN_REGIONS {
            return Err(ConstructionError::TooFewRegions {
                min: MIN_REGIONS,
                got: regions.len(),
            });
        }

        let mut index = FxHashMap::default();
        for (i, region) in regions.iter().enumerate() {
            if index.insert(region.id.clone(), i).is_some() {
                return Err(ConstructionError::DuplicateRegion(region.id.clone()));
            }
        }

        Ok(Self { regions, index })
    }

    /// Build a registry of `count` generic sections named `<prefix>-1..=<prefix>-count`.
    ///
    /// # Errors
    ///
    /// Fails if `count` is below [`MIN_REGIONS`].
    pub fn numbered(prefix: &str, count: usize) -> Result<Self, ConstructionError> {
        Self::new(
            (1..=count)
                .map(|i| Region::new(format!("{prefix}-{i}"), format!("Section {i}")))
                .collect(),
        )
    }

    /// The built-in twelve-system board.
    #[must_use]
    pub fn systems() -> Self {
        let regions = SYSTEMS
            .iter()
            .map(|(id, name, description)| Region::new(*id, *name).with_description(*description))
            .collect::<Vec<_>>();
        let index = regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Self { regions, index }
    }

    /// Number of regions on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Always false for a constructed registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// First region in travel order (the starting square).
    #[must_use]
    pub fn first(&self) -> &Region {
        &self.regions[0]
    }

    /// Region at a travel-order index, wrapping around.
    #[must_use]
    pub fn at(&self, index: usize) -> &Region {
        &self.regions[index % self.regions.len()]
    }

    /// Region `steps` places after `from`, wrapping around the board.
    #[must_use]
    pub fn step(&self, from: usize, steps: usize) -> &Region {
        self.at(from + steps)
    }

    /// Get a region by ID.
    #[must_use]
    pub fn get(&self, id: &RegionId) -> Option<&Region> {
        self.index.get(id).map(|&i| &self.regions[i])
    }

    /// Travel-order index of a region.
    #[must_use]
    pub fn index_of(&self, id: &RegionId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Check if a region ID is on the board.
    #[must_use]
    pub fn contains(&self, id: &RegionId) -> bool {
        self.index.contains_key(id)
    }

    /// Display name of a region, falling back to its ID.
    #[must_use]
    pub fn name_of(&self, id: &RegionId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), |region| region.name.clone())
    }

    /// Iterate in travel order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }
}

/// The twelve systems advocates sign into during training.
const SYSTEMS: [(&str, &str, &str); 12] = [
    ("shieldlink", "ShieldLink", "Imaging and routing for Small Group submissions."),
    ("facets", "Facets", "Eligibility and enrollment history; confirms application status."),
    ("broker-connection", "Broker Connection", "Portal for forms, SCRs, and broker-facing resources."),
    ("salesforce", "Salesforce", "CRM for tracking broker interactions, cases, and follow-ups."),
    ("servicenow", "ServiceNow", "Ticketing and knowledge for operations and escalations."),
    ("onbase", "OnBase / ImageRight", "Document imaging and retrieval for group files."),
    ("documentum", "Documentum", "Legacy repository for historical documents."),
    ("outlook", "Outlook / Email", "Official communications and case handoffs."),
    ("nice", "NICE / Contact Center", "Telephony: call controls, recordings, and metrics."),
    ("workfront", "Workfront", "Project and task management and cross-team work queues."),
    ("broker-portal", "Broker Portal", "Broker self-service enrollment and quoting tools."),
    ("knowledge-base", "Knowledge Base", "Policies, procedures, and job aids."),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_fails() {
        assert_eq!(RegionRegistry::new(vec![]).unwrap_err(), ConstructionError::NoRegions);
    }

    #[test]
    fn test_single_region_fails() {
        let err = RegionRegistry::new(vec![Region::new("a", "A")]).unwrap_err();
        assert_eq!(err, ConstructionError::TooFewRegions { min: 2, got: 1 });
    }

    #[test]
    fn test_duplicate_id_fails() {
        let err = RegionRegistry::new(vec![
            Region::new("a", "A"),
            Region::new("b", "B"),
            Region::new("a", "Again"),
        ])
        .unwrap_err();
        assert_eq!(err, ConstructionError::DuplicateRegion(RegionId::new("a")));
    }

    #[test]
    fn test_numbered() {
        let registry = RegionRegistry::numbered("sec", 12).unwrap();

        assert_eq!(registry.len(), 12);
        assert_eq!(registry.first().id, RegionId::new("sec-1"));
        assert_eq!(registry.at(11).id, RegionId::new("sec-12"));
        assert_eq!(registry.name_of(&RegionId::new("sec-4")), "Section 4");
    }

    #[test]
    fn test_step_wraps() {
        let registry = RegionRegistry::numbered("sec", 12).unwrap();

        assert_eq!(registry.step(10, 3).id, RegionId::new("sec-2"));
        assert_eq!(registry.step(11, 1).id, RegionId::new("sec-1"));
        assert_eq!(registry.step(0, 4).id, RegionId::new("sec-5"));
    }

    #[test]
    fn test_lookup() {
        let registry = RegionRegistry::systems();

        assert_eq!(registry.len(), 12);
        assert_eq!(registry.index_of(&RegionId::new("facets")), Some(1));
        assert!(registry.contains(&RegionId::new("knowledge-base")));
        assert!(registry.get(&RegionId::new("nowhere")).is_none());
        assert_eq!(registry.name_of(&RegionId::new("nowhere")), "nowhere");
        assert!(registry.first().description.is_some());
    }

    #[test]
    fn test_systems_ids_unique() {
        let registry = RegionRegistry::systems();
        let rebuilt = RegionRegistry::new(registry.iter().cloned().collect());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_region_id_serializes_as_string() {
        let json = serde_json::to_string(&RegionId::new("facets")).unwrap();
        assert_eq!(json, "\"facets\"");
    }
}
