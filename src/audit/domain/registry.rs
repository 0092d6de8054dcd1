use super::resource::{Resource, ResourceCategory, ResourceId};
use std::collections::{BTreeSet, HashMap};

/// ResourceRegistry - the keyed store of every audited resource
///
/// Keys are lower-cased [`ResourceId`]s and unique; inserting a resource with
/// an existing id replaces the previous entry. Mutation outside this crate
/// goes through [`ResourceRegistry::set`]; slot updates during an enrichment
/// pass go through `get_mut`, which only the coordinator's apply step and the
/// alert-rule join use.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    entries: HashMap<ResourceId, Resource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut registry = Self::new();
        for resource in resources {
            registry.set(resource);
        }
        registry
    }

    /// Inserts or replaces a resource, keyed by its id
    ///
    /// # Returns
    /// The previously stored resource with the same id, if any
    pub fn set(&mut self, resource: Resource) -> Option<Resource> {
        self.entries.insert(resource.id().clone(), resource)
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &ResourceId) -> Option<&mut Resource> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResourceId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of every resource in `category` (the dispatch set of a lookup pass)
    pub fn ids_in(&self, category: ResourceCategory) -> BTreeSet<ResourceId> {
        self.entries
            .values()
            .filter(|r| r.category() == category)
            .map(|r| r.id().clone())
            .collect()
    }

    /// Resources of `category`, sorted by display name for stable rendering
    pub fn in_category(&self, category: ResourceCategory) -> Vec<&Resource> {
        let mut resources: Vec<&Resource> = self
            .entries
            .values()
            .filter(|r| r.category() == category)
            .collect();
        resources.sort_by(|a, b| {
            a.name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.id().cmp(b.id()))
        });
        resources
    }

    pub fn count_in(&self, category: ResourceCategory) -> usize {
        self.entries
            .values()
            .filter(|r| r.category() == category)
            .count()
    }
}
