// file: src/pipeline/orchestrator.rs
// description: linear run from input validation to a written navigator layer
// reference: taxonomy fetch, acquisition, extraction, layer assembly, export

use crate::config::Config;
use crate::error::Result;
use crate::exporter::LayerWriter;
use crate::extractor::{ExtractionResult, IdentifierExtractor, ModeSelector};
use crate::layer::{LayerBuilder, resolve_title};
use crate::models::{AcquiredContent, NavigatorLayer, Source, Taxonomy};
use crate::pipeline::progress::FetchSpinner;
use crate::source::SourceFetcher;
use crate::taxonomy::TaxonomyLoader;
use crate::utils::Validator;
use std::path::PathBuf;
use tracing::{info, warn};

/// One invocation's worth of user choices.
#[derive(Debug, Clone)]
pub struct LayerRequest {
    pub source: Source,
    pub title: Option<String>,
    pub score: i64,
    pub output: PathBuf,
    pub attack_version: String,
    pub force_html: bool,
    pub force_text: bool,
}

impl LayerRequest {
    /// Request with configured defaults for everything but the source.
    pub fn from_config(source: Source, config: &Config) -> Self {
        Self {
            source,
            title: None,
            score: config.layer.score,
            output: config.layer.output.clone(),
            attack_version: config.taxonomy.attack_version.clone(),
            force_html: false,
            force_text: false,
        }
    }

    /// Everything detectable without touching the network.
    pub fn validate(&self) -> Result<()> {
        ModeSelector::check_overrides(self.force_html, self.force_text)?;
        Validator::validate_score(self.score)?;
        Validator::validate_attack_version(&self.attack_version)?;
        Validator::validate_output_path(&self.output)?;

        match &self.source {
            Source::Url(url) => Validator::validate_url(url),
            Source::File(path) => Validator::validate_file_path(path),
            Source::Text(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub layer: NavigatorLayer,
    pub extraction: ExtractionResult,
    pub output_path: PathBuf,
    pub taxonomy_techniques: usize,
    pub taxonomy_tactics: usize,
}

pub struct LayerPipeline {
    loader: TaxonomyLoader,
    fetcher: SourceFetcher,
    builder: LayerBuilder,
    show_progress: bool,
}

impl LayerPipeline {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            loader: TaxonomyLoader::new(&config.taxonomy, &config.fetch.user_agent)?,
            fetcher: SourceFetcher::new(&config.fetch)?,
            builder: LayerBuilder::new(&config.layer),
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn run(&self, request: &LayerRequest) -> Result<PipelineReport> {
        request.validate()?;

        let taxonomy = {
            let _spinner = self.spinner(format!(
                "Fetching MITRE ATT&CK v{} data...",
                request.attack_version
            ));
            self.loader.load(&request.attack_version).await?
        };

        let content = {
            let _spinner = self.spinner(format!("Acquiring {} content...", request.source.kind()));
            self.fetcher.acquire(&request.source).await?
        };

        let (layer, extraction) = self.assemble(&content, &taxonomy, request)?;

        let writer = LayerWriter::new(&request.output)?;
        let output_path = writer.write(&layer)?.to_path_buf();

        Ok(PipelineReport {
            layer,
            extraction,
            output_path,
            taxonomy_techniques: taxonomy.technique_count(),
            taxonomy_tactics: taxonomy.tactic_count(),
        })
    }

    /// Mode selection, extraction, title resolution and layer assembly over
    /// already acquired content. Performs no I/O.
    pub fn assemble(
        &self,
        content: &AcquiredContent,
        taxonomy: &Taxonomy,
        request: &LayerRequest,
    ) -> Result<(NavigatorLayer, ExtractionResult)> {
        let mode = ModeSelector::select(
            &content.body,
            content.kind(),
            request.force_html,
            request.force_text,
        )?;
        info!("Parsing for MITRE ATT&CK identifiers ({} mode)", mode);

        let extraction = IdentifierExtractor::new(taxonomy).extract(&content.body, mode);
        if extraction.fallback_engaged {
            info!("No identifiers in hyperlinks; used plain text scanning");
        }
        if extraction.techniques.is_empty() {
            warn!("No techniques were found in the provided content");
        }

        let title = resolve_title(&content.body, &content.source, request.title.as_deref());
        info!("Layer title: {}", title);

        let layer = self.builder.build(
            &extraction,
            request.score,
            &title,
            &content.source,
            &request.attack_version,
        )?;

        Ok((layer, extraction))
    }

    fn spinner(&self, message: String) -> FetchSpinner {
        if self.show_progress {
            FetchSpinner::start(message, true)
        } else {
            FetchSpinner::hidden(message)
        }
    }
}
