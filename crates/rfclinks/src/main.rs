//! rfclinks CLI - render markdown with RFC and HTTP header autolinking.
//!
//! Reads a markdown file, applies the ietf-links extension, and prints the
//! rendered HTML to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ietf_links::{IetfLinkFilter, IetfLinksConfig, IetfLinksExtension};

/// Rewrite RFC and HTTP header references in markdown as links.
#[derive(Parser)]
#[command(name = "rfclinks", version, about)]
struct Cli {
    /// Markdown file to render.
    input: PathBuf,

    /// TOML configuration file for the extension.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Extension(#[from] ietf_links::ExtensionError),
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = match &cli.config {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => IetfLinksConfig::default(),
    };
    let extension = IetfLinksExtension::from_config(&config)?;

    let markdown = std::fs::read_to_string(&cli.input)?;
    let parser = pulldown_cmark::Parser::new(&markdown);
    let filter = IetfLinkFilter::new(parser, &extension);

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, filter);
    Ok(html)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(html) => {
            print!("{html}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
