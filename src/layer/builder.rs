// file: src/layer/builder.rs
// description: assembles ATT&CK Navigator layers from validated identifiers
// reference: https://github.com/mitre-attack/attack-navigator/blob/master/layers/LAYERFORMATv4_5.md

use crate::config::{LAYER_SCHEMA_VERSION, LayerConfig, NAVIGATOR_VERSION};
use crate::error::Result;
use crate::extractor::{ExtractionResult, ValidatedId};
use crate::models::{
    Gradient, LayerEntry, LayerFilters, LayerLayout, LayerLink, LayerVersions, MetadataItem,
    NavigatorLayer, Source,
};
use crate::utils::Validator;
use std::collections::BTreeSet;
use tracing::debug;

pub const SOURCE_METADATA: &str = "Source";
pub const RELATED_TACTICS_METADATA: &str = "Related Tactics";
pub const SOURCE_LINK_LABEL: &str = "Source Report";

pub struct LayerBuilder {
    domain: String,
    navigator_version: String,
    layer_version: String,
    platforms: Vec<String>,
    gradient_colors: Vec<String>,
}

impl LayerBuilder {
    pub fn new(config: &LayerConfig) -> Self {
        let gradient_colors = if config.gradient_colors.is_empty() {
            vec!["#ffffff".to_string(), "#ff6666".to_string()]
        } else {
            config.gradient_colors.clone()
        };

        Self {
            domain: config.domain.clone(),
            navigator_version: config.navigator_version.clone(),
            layer_version: config.layer_version.clone(),
            platforms: config.platforms.clone(),
            gradient_colors,
        }
    }

    pub fn build(
        &self,
        extraction: &ExtractionResult,
        score: i64,
        title: &str,
        source: &Source,
        attack_version: &str,
    ) -> Result<NavigatorLayer> {
        let score = Validator::validate_score(score)?;
        let reference = source.reference();

        let found_tactics: Vec<&str> = extraction
            .tactics
            .iter()
            .filter_map(|t| t.entry.shortname.as_deref())
            .collect();

        let techniques: Vec<LayerEntry> = extraction
            .techniques
            .iter()
            .map(|technique| self.entry_for(technique, score, &found_tactics))
            .collect();

        let mut metadata = vec![MetadataItem::new(SOURCE_METADATA, reference.clone())];
        if !extraction.tactics.is_empty() {
            let related: BTreeSet<&str> = extraction.tactics.iter().map(ValidatedId::id).collect();
            metadata.push(MetadataItem::new(
                RELATED_TACTICS_METADATA,
                related.into_iter().collect::<Vec<_>>().join(", "),
            ));
        }

        let links = source
            .url()
            .map(|url| {
                vec![LayerLink {
                    label: SOURCE_LINK_LABEL.to_string(),
                    url: url.to_string(),
                }]
            })
            .unwrap_or_default();

        debug!(
            "Built layer \"{}\" with {} technique entries",
            title,
            techniques.len()
        );

        Ok(NavigatorLayer {
            name: title.to_string(),
            versions: LayerVersions {
                attack: attack_version.to_string(),
                navigator: self.navigator_version.clone(),
                layer: self.layer_version.clone(),
            },
            domain: self.domain.clone(),
            description: format!("TTPs extracted from threat intelligence (source: {})", reference),
            filters: LayerFilters {
                platforms: self.platforms.clone(),
            },
            sorting: 0,
            layout: LayerLayout::default(),
            hide_disabled: false,
            techniques,
            gradient: Gradient {
                colors: self.gradient_colors.clone(),
                min_value: 0,
                max_value: 100,
            },
            legend_items: Vec::new(),
            metadata,
            links,
            show_tactic_row_background: false,
            tactic_row_background: "#dddddd".to_string(),
            select_techniques_across_tactics: true,
            select_subtechniques_with_parent: false,
        })
    }

    /// A technique is pinned to a tactic only when exactly one of its
    /// kill-chain phases was also mentioned as a tactic ID.
    fn entry_for(&self, technique: &ValidatedId, score: u8, found_tactics: &[&str]) -> LayerEntry {
        let mut matching = technique
            .entry
            .tactics
            .iter()
            .filter(|phase| found_tactics.contains(&phase.as_str()));

        let tactic = match (matching.next(), matching.next()) {
            (Some(phase), None) => Some(phase.clone()),
            _ => None,
        };

        LayerEntry {
            tactic,
            comment: Some(technique.name().to_string()),
            ..LayerEntry::new(technique.id(), score)
        }
    }
}

impl Default for LayerBuilder {
    fn default() -> Self {
        Self {
            domain: "enterprise-attack".to_string(),
            navigator_version: NAVIGATOR_VERSION.to_string(),
            layer_version: LAYER_SCHEMA_VERSION.to_string(),
            platforms: Vec::new(),
            gradient_colors: vec!["#ffffff".to_string(), "#ff6666".to_string()],
        }
    }
}
