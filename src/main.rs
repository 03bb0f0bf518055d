// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use ttp_navigator::utils::logging::{
    format_error, format_info, format_item, format_success, format_warning,
};
use ttp_navigator::{Config, LayerPipeline, LayerRequest, PipelineReport, Source, TtpError};

#[derive(Parser)]
#[command(name = "ttp_navigator")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(
    about = "Extract MITRE ATT&CK TTPs from threat intelligence and create an ATT&CK Navigator layer",
    long_about = None
)]
#[command(group(ArgGroup::new("input").required(true).multiple(false).args(["url", "file", "text"])))]
struct Cli {
    /// URL of the threat intelligence blog/post
    #[arg(long)]
    url: Option<String>,

    /// Local file containing threat intelligence
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Direct text input containing threat intelligence
    #[arg(long)]
    text: Option<String>,

    /// Score to assign to found techniques [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    score: Option<i64>,

    /// Custom title for the Navigator layer (overrides automatic title)
    #[arg(long)]
    title: Option<String>,

    /// Output file name [default: attack_navigator_layer.json]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// MITRE ATT&CK version to use [default: 17]
    #[arg(long, value_name = "VERSION")]
    attack_version: Option<String>,

    /// Parse the input as HTML regardless of its shape
    #[arg(long, action = ArgAction::SetTrue)]
    force_html_mode: bool,

    /// Scan the input as plain text regardless of its shape
    #[arg(long, action = ArgAction::SetTrue)]
    force_text_mode: bool,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    ttp_navigator::utils::logging::init_logger(cli.color, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&format!("{:#}", err)));
            if let Some(hint) = err.downcast_ref::<TtpError>().and_then(TtpError::hint) {
                eprintln!("{}", format_info(hint));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    let source = Source::from_inputs(cli.url, cli.file, cli.text)?;
    let mut request = LayerRequest::from_config(source, &config);
    request.title = cli.title;
    request.force_html = cli.force_html_mode;
    request.force_text = cli.force_text_mode;
    if let Some(score) = cli.score {
        request.score = score;
    }
    if let Some(output) = cli.output {
        request.output = output;
    }
    if let Some(version) = cli.attack_version {
        request.attack_version = version;
    }

    let pipeline = LayerPipeline::new(&config)?.with_progress(cli.color);
    let report = pipeline.run(&request).await?;

    print_summary(&report);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        return Config::load(Some(cli.config.as_path())).context("Failed to load configuration");
    }

    warn!(
        "Config file {} not found, using built-in defaults",
        cli.config.display()
    );
    Config::load(None).context("Failed to load configuration")
}

fn print_summary(report: &PipelineReport) {
    let extraction = &report.extraction;

    println!(
        "{}",
        format_info(&format!(
            "ATT&CK v{}: {} techniques and {} tactics available",
            report.layer.versions.attack, report.taxonomy_techniques, report.taxonomy_tactics
        ))
    );
    println!(
        "{}",
        format_success(&format!(
            "Navigator layer saved to {}",
            report.output_path.display()
        ))
    );

    if extraction.techniques.is_empty() {
        println!("\n{}", format_warning("No techniques were found in the provided content."));
    } else {
        println!("\nTechniques found:");
        let mut techniques: Vec<_> = extraction.techniques.iter().collect();
        techniques.sort_by(|a, b| a.id().cmp(b.id()));
        for technique in techniques {
            println!("{}", format_item(technique.id(), technique.name()));
        }
    }

    if extraction.tactics.is_empty() {
        println!("\n{}", format_warning("No tactics were found in the provided content."));
    } else {
        println!("\nTactics found:");
        let mut tactics: Vec<_> = extraction.tactics.iter().collect();
        tactics.sort_by(|a, b| a.id().cmp(b.id()));
        for tactic in tactics {
            println!("{}", format_item(tactic.id(), tactic.name()));
        }
    }
}
