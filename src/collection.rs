//! Collection book
//!
//! Every breed at every level, in catalog order, marked discovered or not.

use serde::Serialize;

use crate::game::{Catalog, DiscoverySet};

/// A single collection cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionEntry {
    pub breed: String,
    pub name: String,
    pub visual: String,
    pub level: u8,
    pub discovered: bool,
}

/// Completion counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionProgress {
    pub discovered: usize,
    pub total: usize,
}

impl CollectionProgress {
    /// Fraction complete (0.0 - 1.0)
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.discovered as f32 / self.total as f32
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.discovered == self.total
    }
}

/// Build the full collection grid (breed-major, levels ascending)
pub fn collection(
    catalog: &Catalog,
    discovered: &DiscoverySet,
    max_level: u8,
) -> Vec<CollectionEntry> {
    catalog
        .iter()
        .flat_map(|breed| {
            (1..=max_level).map(move |level| CollectionEntry {
                breed: breed.id.clone(),
                name: breed.name.clone(),
                visual: breed.visual.clone(),
                level,
                discovered: discovered.contains(&breed.id, level),
            })
        })
        .collect()
}

/// Count discovered cells. Discoveries outside the catalog don't count.
pub fn progress(catalog: &Catalog, discovered: &DiscoverySet, max_level: u8) -> CollectionProgress {
    let total = catalog.len() * usize::from(max_level);
    let found = discovered
        .iter()
        .filter(|(breed, level)| catalog.contains(breed) && (1..=max_level).contains(level))
        .count();
    CollectionProgress {
        discovered: found,
        total,
    }
}
