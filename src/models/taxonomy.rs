// file: src/models/taxonomy.rs
// description: immutable ATT&CK technique and tactic lookup table
// reference: https://github.com/mitre/cti

use crate::models::attack_id::AttackId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Technique,
    Tactic,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Technique => "technique",
            EntryKind::Tactic => "tactic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
    /// Kill-chain phase short names (techniques only), e.g. "initial-access".
    pub tactics: Vec<String>,
    /// Phase short name of a tactic, e.g. "initial-access" for TA0001.
    pub shortname: Option<String>,
    pub revoked: bool,
    pub deprecated: bool,
}

impl TaxonomyEntry {
    pub fn technique(id: &str, name: &str, tactics: &[&str]) -> Self {
        Self {
            id: id.to_uppercase(),
            name: name.to_string(),
            kind: EntryKind::Technique,
            tactics: tactics.iter().map(|t| t.to_string()).collect(),
            shortname: None,
            revoked: false,
            deprecated: false,
        }
    }

    pub fn tactic(id: &str, name: &str, shortname: &str) -> Self {
        Self {
            id: id.to_uppercase(),
            name: name.to_string(),
            kind: EntryKind::Tactic,
            tactics: Vec::new(),
            shortname: Some(shortname.to_string()),
            revoked: false,
            deprecated: false,
        }
    }

    pub fn is_retired(&self) -> bool {
        self.revoked || self.deprecated
    }
}

/// ID-to-entry mapping for one ATT&CK release. Keys are uppercase and always
/// classify as a technique or tactic ID.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    version: String,
    entries: HashMap<String, TaxonomyEntry>,
}

impl Taxonomy {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            entries: HashMap::new(),
        }
    }

    pub fn from_entries(
        version: impl Into<String>,
        entries: impl IntoIterator<Item = TaxonomyEntry>,
    ) -> Self {
        let mut taxonomy = Self::new(version);
        for entry in entries {
            taxonomy.insert(entry);
        }
        taxonomy
    }

    /// Returns false when the entry was rejected or an existing entry was kept.
    pub fn insert(&mut self, mut entry: TaxonomyEntry) -> bool {
        let key = match (AttackId::parse(&entry.id), entry.kind) {
            (AttackId::Technique(id), EntryKind::Technique) => id,
            (AttackId::Tactic(id), EntryKind::Tactic) => id,
            _ => return false,
        };
        entry.id = key.clone();

        match self.entries.get(&key) {
            Some(existing) if !(existing.is_retired() && !entry.is_retired()) => false,
            _ => {
                self.entries.insert(key, entry);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&TaxonomyEntry> {
        self.entries.get(&id.trim().to_uppercase())
    }

    pub fn lookup(&self, id: &AttackId) -> Option<&TaxonomyEntry> {
        let entry = self.entries.get(id.as_str()?)?;
        match (id, entry.kind) {
            (AttackId::Technique(_), EntryKind::Technique) | (AttackId::Tactic(_), EntryKind::Tactic) => {
                Some(entry)
            }
            _ => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn technique_count(&self) -> usize {
        self.count_kind(EntryKind::Technique)
    }

    pub fn tactic_count(&self) -> usize {
        self.count_kind(EntryKind::Tactic)
    }

    fn count_kind(&self, kind: EntryKind) -> usize {
        self.entries.values().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Taxonomy {
        Taxonomy::from_entries(
            "17",
            vec![
                TaxonomyEntry::technique("T1566", "Phishing", &["initial-access"]),
                TaxonomyEntry::technique("t1566.001", "Spearphishing Attachment", &["initial-access"]),
                TaxonomyEntry::tactic("TA0001", "Initial Access", "initial-access"),
            ],
        )
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let taxonomy = sample();
        assert_eq!(taxonomy.get("t1566.001").unwrap().name, "Spearphishing Attachment");
        assert!(taxonomy.contains("TA0001"));
        assert!(!taxonomy.contains("T9999"));
        assert_eq!(taxonomy.technique_count(), 2);
        assert_eq!(taxonomy.tactic_count(), 1);
    }

    #[test]
    fn test_rejects_malformed_ids() {
        let mut taxonomy = Taxonomy::new("17");
        assert!(!taxonomy.insert(TaxonomyEntry::technique("T12", "Bogus", &[])));
        assert!(!taxonomy.insert(TaxonomyEntry::technique("TA0001", "Wrong kind", &[])));
        assert!(taxonomy.is_empty());
    }

    #[test]
    fn test_first_entry_wins_unless_retired() {
        let mut taxonomy = Taxonomy::new("17");
        let mut revoked = TaxonomyEntry::technique("T1000", "Old", &[]);
        revoked.revoked = true;

        assert!(taxonomy.insert(revoked));
        assert!(taxonomy.insert(TaxonomyEntry::technique("T1000", "Current", &[])));
        assert!(!taxonomy.insert(TaxonomyEntry::technique("T1000", "Duplicate", &[])));
        assert_eq!(taxonomy.get("T1000").unwrap().name, "Current");
        assert_eq!(taxonomy.len(), 1);
    }

    #[test]
    fn test_lookup_checks_kind() {
        let taxonomy = sample();
        assert!(taxonomy.lookup(&AttackId::parse("TA0001")).is_some());
        assert!(taxonomy.lookup(&AttackId::Invalid).is_none());
    }

    #[test]
    fn test_empty_taxonomy_supports_lookup() {
        let taxonomy = Taxonomy::new("99");
        assert!(taxonomy.get("T1566").is_none());
        assert_eq!(taxonomy.version(), "99");
    }
}
