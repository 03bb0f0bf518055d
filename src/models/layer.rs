// file: src/models/layer.rs
// description: ATT&CK Navigator layer document model
// reference: https://github.com/mitre-attack/attack-navigator/tree/master/layers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorLayer {
    pub name: String,
    pub versions: LayerVersions,
    pub domain: String,
    pub description: String,
    pub filters: LayerFilters,
    pub sorting: u8,
    pub layout: LayerLayout,
    pub hide_disabled: bool,
    pub techniques: Vec<LayerEntry>,
    pub gradient: Gradient,
    pub legend_items: Vec<LegendItem>,
    pub metadata: Vec<MetadataItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LayerLink>,
    pub show_tactic_row_background: bool,
    pub tactic_row_background: String,
    pub select_techniques_across_tactics: bool,
    pub select_subtechniques_with_parent: bool,
}

impl NavigatorLayer {
    pub fn technique_ids(&self) -> Vec<&str> {
        self.techniques.iter().map(|t| t.technique_id.as_str()).collect()
    }

    pub fn metadata_value(&self, name: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerVersions {
    pub attack: String,
    pub navigator: String,
    pub layer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFilters {
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerLayout {
    pub layout: String,
    pub aggregate_function: String,
    #[serde(rename = "showID")]
    pub show_id: bool,
    pub show_name: bool,
    pub show_aggregate_scores: bool,
    pub count_unscored: bool,
}

impl Default for LayerLayout {
    fn default() -> Self {
        Self {
            layout: "side".to_string(),
            aggregate_function: "average".to_string(),
            show_id: true,
            show_name: true,
            show_aggregate_scores: true,
            count_unscored: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub colors: Vec<String>,
    pub min_value: u8,
    pub max_value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

impl MetadataItem {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerEntry {
    #[serde(rename = "techniqueID")]
    pub technique_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactic: Option<String>,
    pub score: u8,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub enabled: bool,
    pub metadata: Vec<MetadataItem>,
    pub links: Vec<LayerLink>,
    pub show_subtechniques: bool,
}

impl LayerEntry {
    pub fn new(technique_id: impl Into<String>, score: u8) -> Self {
        Self {
            technique_id: technique_id.into(),
            tactic: None,
            score,
            color: String::new(),
            comment: None,
            enabled: true,
            metadata: Vec::new(),
            links: Vec::new(),
            show_subtechniques: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_field_names() {
        let mut entry = LayerEntry::new("T1566.001", 75);
        entry.tactic = Some("initial-access".to_string());

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["techniqueID"], json!("T1566.001"));
        assert_eq!(value["tactic"], json!("initial-access"));
        assert_eq!(value["score"], json!(75));
        assert_eq!(value["enabled"], json!(true));
        assert_eq!(value["color"], json!(""));
        assert_eq!(value["showSubtechniques"], json!(true));
        assert!(value.get("comment").is_none());
    }

    #[test]
    fn test_layout_field_names() {
        let value = serde_json::to_value(LayerLayout::default()).unwrap();
        assert_eq!(value["showID"], json!(true));
        assert_eq!(value["aggregateFunction"], json!("average"));
        assert_eq!(value["countUnscored"], json!(false));
    }
}
