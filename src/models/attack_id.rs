// file: src/models/attack_id.rs
// description: tagged ATT&CK identifier produced by a pure classifier
// reference: https://attack.mitre.org/resources/

use crate::extractor::patterns::{is_tactic_id, is_technique_id};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackId {
    Technique(String),
    Tactic(String),
    Invalid,
}

impl AttackId {
    /// Classifies a raw candidate. Case and surrounding whitespace are ignored;
    /// the canonical form is uppercase.
    pub fn parse(raw: &str) -> Self {
        let candidate = raw.trim().to_uppercase();

        if is_tactic_id(&candidate) {
            AttackId::Tactic(candidate)
        } else if is_technique_id(&candidate) {
            AttackId::Technique(candidate)
        } else {
            AttackId::Invalid
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttackId::Technique(id) | AttackId::Tactic(id) => Some(id),
            AttackId::Invalid => None,
        }
    }
}

impl fmt::Display for AttackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackId::Technique(id) | AttackId::Tactic(id) => f.write_str(id),
            AttackId::Invalid => f.write_str("<invalid>"),
        }
    }
}

/// A candidate found in scanned text, before taxonomy validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedId {
    pub raw: String,
    pub id: AttackId,
    /// Byte range within the string the candidate was scanned from.
    pub span: Range<usize>,
}

impl ExtractedId {
    pub fn new(raw: &str, span: Range<usize>) -> Self {
        Self {
            raw: raw.to_string(),
            id: AttackId::parse(raw),
            span,
        }
    }
}
