// file: src/taxonomy/loader.rs
// description: fetches the versioned ATT&CK dataset and builds a taxonomy
// reference: https://github.com/mitre/cti

use crate::config::TaxonomyConfig;
use crate::error::{Result, TtpError};
use crate::models::Taxonomy;
use crate::taxonomy::stix;
use reqwest::Client;
use tracing::{debug, info};

/// Single-shot loader. No retry and no cache: each call performs one fetch.
pub struct TaxonomyLoader {
    client: Client,
    url_template: String,
}

impl TaxonomyLoader {
    pub fn new(config: &TaxonomyConfig, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| TtpError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url_template: config.url_template.clone(),
        })
    }

    pub fn dataset_url(&self, version: &str) -> String {
        self.url_template
            .replace("{version}", &expand_version(version))
    }

    pub async fn load(&self, version: &str) -> Result<Taxonomy> {
        let url = self.dataset_url(version);
        info!("Fetching MITRE ATT&CK v{} data", version);
        debug!("Taxonomy URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            TtpError::Network(format!("Failed to fetch ATT&CK data from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(TtpError::Network(format!(
                "Failed to fetch ATT&CK data from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let body = response.text().await.map_err(|e| {
            TtpError::Network(format!("Failed to read ATT&CK response body: {}", e))
        })?;

        debug!("Received {} bytes of ATT&CK data", body.len());

        let taxonomy = stix::parse_bundle(&body, version)?;

        info!(
            "Loaded ATT&CK v{}: {} techniques and {} tactics",
            version,
            taxonomy.technique_count(),
            taxonomy.tactic_count()
        );

        Ok(taxonomy)
    }
}

/// Release tags are `vMAJOR.MINOR`; a bare major version means `.0`.
pub fn expand_version(version: &str) -> String {
    let version = version.trim().trim_start_matches(['v', 'V']);
    if version.contains('.') {
        version.to_string()
    } else {
        format!("{}.0", version)
    }
}
