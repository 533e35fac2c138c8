//! Breed catalog
//!
//! Fixed at startup, read-only afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A breed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    pub id: String,
    pub name: String,
    /// Sprite or emoji reference for the presentation layer
    pub visual: String,
}

impl Breed {
    pub fn new(id: &str, name: &str, visual: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            visual: visual.to_string(),
        }
    }
}

/// Ordered list of breeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    breeds: Vec<Breed>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Breed::new("corgi", "Corgi", "🐶"),
            Breed::new("pug", "Pug", "🐕"),
            Breed::new("husky", "Husky", "🐺"),
            Breed::new("labrador", "Labrador", "🦮"),
            Breed::new("dachshund", "Dachshund", "🌭"),
        ])
    }
}

impl Catalog {
    pub fn new(breeds: Vec<Breed>) -> Self {
        Self { breeds }
    }

    pub fn get(&self, id: &str) -> Option<&Breed> {
        self.breeds.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breed> {
        self.breeds.iter()
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }

    /// Pick a breed uniformly at random (None if the catalog is empty)
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&Breed> {
        if self.breeds.is_empty() {
            return None;
        }
        let i = rng.random_range(0..self.breeds.len());
        self.breeds.get(i)
    }
}
