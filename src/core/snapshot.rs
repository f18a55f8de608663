use crate::core::indexer::DestinationIndex;
use crate::models::Destination;
use std::collections::BTreeMap;

/// An immutable catalog together with the index built from it
///
/// Snapshots are shared behind `Arc` and replaced wholesale, so a reader never sees a catalog
/// and an index from different generations.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    destinations: BTreeMap<u32, Destination>,
    index: DestinationIndex,
}

impl CatalogSnapshot {
    pub fn new(catalog: Vec<Destination>) -> Self {
        let index = DestinationIndex::build(&catalog);
        let destinations = catalog.into_iter().map(|d| (d.id, d)).collect();
        Self { destinations, index }
    }

    pub fn get(&self, id: u32) -> Option<&Destination> {
        self.destinations.get(&id)
    }

    /// Destinations in ascending id order
    pub fn destinations(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.values()
    }

    pub fn index(&self) -> &DestinationIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[cfg(test)]
impl CatalogSnapshot {
    /// Pair a catalog with an index that may not match it
    pub(crate) fn from_parts(catalog: Vec<Destination>, index: DestinationIndex) -> Self {
        let destinations = catalog.into_iter().map(|d| (d.id, d)).collect();
        Self { destinations, index }
    }
}
