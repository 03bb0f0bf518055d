// file: src/source/fetcher.rs
// description: report acquisition from urls, local files and literal text
// reference: https://docs.rs/reqwest

use crate::config::FetchConfig;
use crate::error::{Result, TtpError};
use crate::models::{AcquiredContent, Source};
use crate::utils::Validator;
use reqwest::Client;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TtpError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub async fn acquire(&self, source: &Source) -> Result<AcquiredContent> {
        let body = match source {
            Source::Url(url) => self.fetch_url(url).await?,
            Source::File(path) => read_file(path)?,
            Source::Text(text) => text.clone(),
        };

        debug!(
            "Acquired {} bytes from {} source: {}",
            body.len(),
            source.kind(),
            Validator::truncate_text(&body, 80).replace('\n', " ")
        );

        Ok(AcquiredContent::new(source.clone(), body))
    }

    async fn fetch_url(&self, url: &str) -> Result<String> {
        Validator::validate_url(url)?;
        info!("Fetching content from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            TtpError::Network(format!("Could not fetch content from {}: {}", url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtpError::Network(format!(
                "Could not fetch content from {}: HTTP {}",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| TtpError::Network(format!("Failed to read body from {}: {}", url, e)))
    }
}

fn read_file(path: &Path) -> Result<String> {
    info!("Reading content from {}", path.display());
    fs::read_to_string(path).map_err(|source| TtpError::FileOperation {
        path: path.to_path_buf(),
        source,
    })
}
