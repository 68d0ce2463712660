//! Material registry: an insertion-ordered collection with unique ids.
//!
//! Seeded records keep their human-chosen ids. Submitted records get a short
//! id cut from a random UUID, re-drawn until it is free.

use log::debug;
use uuid::Uuid;

use super::{validate_strength, MaterialRecord, MaterialType, SEED_MATERIALS, UNKNOWN_CARBON};
use crate::errors::{NucleusError, NucleusResult};

/// Hex characters kept from a UUID for a generated id (32 bits)
pub const SHORT_ID_LEN: usize = 8;

/// Ordered collection of material records.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    records: Vec<MaterialRecord>,
}

impl MaterialRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        MaterialRegistry::default()
    }

    /// Create a registry holding the seed material set.
    pub fn seeded() -> Self {
        MaterialRegistry {
            records: (*SEED_MATERIALS).clone(),
        }
    }

    /// Find a material by id.
    ///
    /// Returns the first record whose id matches, or `NotFound`.
    pub fn lookup(&self, id: &str) -> NucleusResult<&MaterialRecord> {
        debug!("registry lookup: {}", id);
        self.get(id).ok_or_else(|| NucleusError::material_not_found(id))
    }

    /// Find a material by id, if present.
    pub fn get(&self, id: &str) -> Option<&MaterialRecord> {
        self.records.iter().find(|m| m.id == id)
    }

    /// Check whether an id is taken.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Append a community submission.
    ///
    /// The new record gets a fresh short id, `carbon = "unknown"` and
    /// `type = user_added`. It is added to the end of the collection. The
    /// feed is not touched here.
    pub fn append(
        &mut self,
        name: &str,
        strength: f64,
        contributor: &str,
    ) -> NucleusResult<&MaterialRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NucleusError::missing_field("name"));
        }
        let strength = validate_strength(strength)?;

        let record = MaterialRecord::new(
            self.generate_id(),
            name,
            strength,
            Some(UNKNOWN_CARBON),
            MaterialType::UserAdded,
            contributor.trim(),
        );
        debug!("registry append: {} -> {}", record.name, record.id);

        self.records.push(record);
        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[MaterialRecord] {
        &self.records
    }

    /// Records whose name contains `query` (case-insensitive), insertion order.
    ///
    /// A blank query matches every record.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&MaterialRecord> {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|m| needle.is_empty() || m.name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// The most recently added records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&MaterialRecord> {
        self.records.iter().rev().take(limit).collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn generate_id(&self) -> String {
        loop {
            let mut candidate = Uuid::new_v4().simple().to_string();
            candidate.truncate(SHORT_ID_LEN);
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_seed() {
        let registry = MaterialRegistry::seeded();
        let bamboo = registry.lookup("bamboo").unwrap();
        assert_eq!(bamboo.strength, 60.0);
        assert_eq!(bamboo.material_type, MaterialType::Eco);
    }

    #[test]
    fn test_lookup_missing() {
        let registry = MaterialRegistry::seeded();
        let err = registry.lookup("granite").unwrap_err();
        assert_eq!(err, NucleusError::material_not_found("granite"));
    }

    #[test]
    fn test_append_sets_user_defaults() {
        let mut registry = MaterialRegistry::seeded();
        let before = registry.len();

        let record = registry.append("Olive Wood", 55.0, "Lab_X").unwrap().clone();
        assert_eq!(record.material_type, MaterialType::UserAdded);
        assert_eq!(record.carbon.as_deref(), Some(UNKNOWN_CARBON));
        assert_eq!(record.contributor, "Lab_X");
        assert_eq!(record.id.len(), SHORT_ID_LEN);

        assert_eq!(registry.len(), before + 1);
        assert_eq!(registry.list().last().unwrap().id, record.id);
        assert_eq!(registry.lookup(&record.id).unwrap().name, "Olive Wood");
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut registry = MaterialRegistry::new();
        registry.append("First", 10.0, "a").unwrap();
        registry.append("Second", 20.0, "b").unwrap();
        registry.append("Third", 30.0, "c").unwrap();

        let names: Vec<_> = registry.list().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_append_ids_never_collide() {
        let mut registry = MaterialRegistry::seeded();
        for i in 0..500 {
            registry.append(&format!("Sample {}", i), 10.0, "bulk").unwrap();
        }
        let ids: HashSet<_> = registry.list().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn test_append_rejects_bad_input() {
        let mut registry = MaterialRegistry::new();
        assert!(matches!(
            registry.append("   ", 10.0, "x"),
            Err(NucleusError::MissingField { .. })
        ));
        assert!(matches!(
            registry.append("Clay", 0.0, "x"),
            Err(NucleusError::InvalidInput { .. })
        ));
        assert!(matches!(
            registry.append("Clay", f64::NAN, "x"),
            Err(NucleusError::InvalidInput { .. })
        ));
        assert!(matches!(
            registry.append("Dust", 5e-324, "x"),
            Err(NucleusError::InvalidInput { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_search_and_recent() {
        let mut registry = MaterialRegistry::seeded();
        registry.append("Olive Wood", 55.0, "Lab_X").unwrap();

        let hits = registry.search("WOOD", 10);
        let names: Vec<_> = hits.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Bamboo Wood", "Olive Wood"]);

        assert_eq!(registry.search("", 2).len(), 2);

        let recent = registry.recent(2);
        assert_eq!(recent[0].name, "Olive Wood");
        assert_eq!(recent[1].id, "palm");
    }
}
