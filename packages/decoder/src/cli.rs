//! Command-line interface for querying documents.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::config::{HttpConfig, HTML_KIND};
use crate::decode::Decoder;
use crate::error::{DecodeError, Result};

/// Markup Decoder - Extract values from documents with CSS selectors.
#[derive(Parser)]
#[command(name = "markup-decoder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a document and print the text matched by a selector.
    Query {
        /// Source URI (e.g., https://example.org)
        uri: String,

        /// Selector, optionally suffixed with /attribute (e.g., "div a/href")
        selector: String,

        /// Document kind used to parse the source
        #[arg(short, long, default_value = HTML_KIND)]
        kind: String,

        /// Print every match separately instead of the concatenated text
        #[arg(short, long)]
        all: bool,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Wrap printed text at this many columns
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// List registered source schemes and document kinds.
    List,
}

/// JSON output of the query command.
#[derive(Debug, Serialize)]
struct QueryOutput<'a> {
    uri: &'a str,
    selector: &'a str,
    matches: Vec<String>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let decoder = Decoder::with_http_config(&HttpConfig::from_env())?;

    match cli.command {
        Commands::Query {
            uri,
            selector,
            kind,
            all,
            json,
            width,
        } => query_command(&decoder, &uri, &selector, &kind, all, json, width),
        Commands::List => {
            list_command(&decoder);
            Ok(())
        }
    }
}

/// Execute the query command.
fn query_command(
    decoder: &Decoder,
    uri: &str,
    selector: &str,
    kind: &str,
    all: bool,
    json: bool,
    width: Option<usize>,
) -> Result<()> {
    // Resolve the parser before any network traffic
    if !decoder.parsers().has_kind(kind) {
        return Err(DecodeError::UnknownKind(kind.to_string()));
    }

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Fetching {uri}..."));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = decoder
        .load(uri, kind)
        .and_then(|document| document.filter(selector));
    pb.finish_and_clear();
    let matched = result?;

    let matches: Vec<String> = if all || json {
        matched.decompose().iter().map(|part| part.text()).collect()
    } else {
        vec![matched.text()]
    };

    if json {
        let output = QueryOutput {
            uri,
            selector,
            matches,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for text in &matches {
        match width {
            Some(width) => println!("{}", textwrap::fill(text, width)),
            None => println!("{text}"),
        }
    }

    if all {
        eprintln!(
            "{} {}",
            style(matches.len()).cyan().bold(),
            style("matches").dim()
        );
    }

    Ok(())
}

/// Execute the list command.
fn list_command(decoder: &Decoder) {
    println!("{}", style("Sources:").bold());
    for scheme in decoder.sources().schemes() {
        println!("  {}", style(scheme).cyan());
    }

    println!("{}", style("Kinds:").bold());
    for kind in decoder.parsers().kinds() {
        println!("  {}", style(kind).green());
    }
}
