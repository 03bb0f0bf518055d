// file: src/taxonomy/stix.rs
// description: STIX 2.x bundle parsing into an ATT&CK taxonomy
// reference: https://github.com/mitre/cti/blob/master/USAGE.md

use crate::error::{Result, TtpError};
use crate::models::{EntryKind, Taxonomy, TaxonomyEntry};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

const ATTACK_SOURCE_NAMES: [&str; 3] = ["mitre-attack", "mitre-mobile-attack", "mitre-ics-attack"];

#[derive(Debug, Deserialize)]
struct StixObject {
    #[serde(rename = "type", default)]
    object_type: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    external_references: Vec<ExternalReference>,
    #[serde(default)]
    kill_chain_phases: Vec<KillChainPhase>,
    #[serde(default)]
    x_mitre_shortname: Option<String>,
    #[serde(default)]
    revoked: Option<bool>,
    #[serde(default)]
    x_mitre_deprecated: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ExternalReference {
    #[serde(default)]
    source_name: String,
    #[serde(default)]
    external_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KillChainPhase {
    #[serde(default)]
    phase_name: String,
}

impl StixObject {
    fn kind(&self) -> Option<EntryKind> {
        match self.object_type.as_str() {
            "attack-pattern" => Some(EntryKind::Technique),
            "x-mitre-tactic" => Some(EntryKind::Tactic),
            _ => None,
        }
    }

    fn attack_id(&self) -> Option<&str> {
        self.external_references
            .iter()
            .find(|r| ATTACK_SOURCE_NAMES.contains(&r.source_name.as_str()))
            .and_then(|r| r.external_id.as_deref())
    }

    fn into_entry(self) -> Option<TaxonomyEntry> {
        let kind = self.kind()?;
        let id = self.attack_id()?.to_string();

        Some(TaxonomyEntry {
            id,
            name: self.name.unwrap_or_else(|| "Unknown".to_string()),
            kind,
            tactics: self
                .kill_chain_phases
                .into_iter()
                .map(|p| p.phase_name)
                .filter(|p| !p.is_empty())
                .collect(),
            shortname: self.x_mitre_shortname,
            revoked: self.revoked.unwrap_or(false),
            deprecated: self.x_mitre_deprecated.unwrap_or(false),
        })
    }
}

/// Builds a taxonomy from a raw bundle body. A body without an `objects`
/// member yields an empty taxonomy; anything that is not a JSON object is a
/// data format error.
pub fn parse_bundle(body: &str, version: &str) -> Result<Taxonomy> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(100).collect();
        TtpError::DataFormat(format!(
            "ATT&CK v{} response is not valid JSON ({}); starts with: {:?}",
            version, e, preview
        ))
    })?;

    parse_bundle_value(value, version)
}

pub fn parse_bundle_value(value: Value, version: &str) -> Result<Taxonomy> {
    let Value::Object(mut root) = value else {
        return Err(TtpError::DataFormat(format!(
            "ATT&CK v{} response is not a STIX bundle object",
            version
        )));
    };

    let objects = match root.remove("objects") {
        Some(Value::Array(objects)) => objects,
        Some(_) => {
            return Err(TtpError::DataFormat(format!(
                "ATT&CK v{} bundle has a non-array \"objects\" member",
                version
            )));
        }
        None => {
            warn!("ATT&CK v{} bundle has no objects; taxonomy is empty", version);
            return Ok(Taxonomy::new(version));
        }
    };

    let mut taxonomy = Taxonomy::new(version);
    let mut skipped = 0usize;

    for object in objects {
        let parsed: StixObject = match serde_json::from_value(object) {
            Ok(parsed) => parsed,
            Err(e) => {
                skipped += 1;
                debug!("Skipping malformed STIX object: {}", e);
                continue;
            }
        };

        if let Some(entry) = parsed.into_entry() {
            let id = entry.id.clone();
            if !taxonomy.insert(entry) {
                debug!("Ignoring duplicate or non-conforming ATT&CK id {}", id);
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} malformed STIX objects", skipped);
    }

    Ok(taxonomy)
}
