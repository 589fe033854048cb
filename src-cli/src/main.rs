//! proposal-export - command line front end for the export pipeline

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "proposal-export")]
#[command(author, version)]
#[command(about = "Export research proposals to PDF and Word documents", long_about = None)]
struct Cli {
    /// Export settings file (settings.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the proposal content comes from
#[derive(clap::Args)]
pub struct InputArgs {
    /// HTML fragment or JSON content tree; the bundled template when omitted
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Read INPUT as a JSON content tree instead of HTML
    #[arg(long)]
    json: bool,
}

/// Document metadata overrides
#[derive(clap::Args)]
pub struct MetadataArgs {
    /// Proposal title
    #[arg(short, long)]
    title: Option<String>,

    /// Author written into document properties
    #[arg(long)]
    author: Option<String>,

    /// Proposal identifier shown in the PDF footer
    #[arg(long)]
    reference: Option<String>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the proposal to a paginated PDF
    Pdf {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        metadata: MetadataArgs,

        /// Letterhead logo (repeatable, at most five are drawn)
        #[arg(long = "logo", value_name = "SOURCE")]
        logos: Vec<String>,

        /// Footer logo (repeatable)
        #[arg(long = "footer-logo", value_name = "SOURCE")]
        footer_logos: Vec<String>,

        /// Directory relative logo and image paths resolve against
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
    },

    /// Export the proposal structure to a Word document
    Docx {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        metadata: MetadataArgs,
    },

    /// Print word and character counts
    Count {
        #[command(flatten)]
        input: InputArgs,

        /// Print counts as JSON
        #[arg(long = "as-json")]
        as_json: bool,
    },

    /// Write a settings file with default values
    InitSettings {
        /// Directory that receives settings.json
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = commands::load_settings(cli.settings.as_deref()).await?;

    match cli.command {
        Commands::Pdf {
            input,
            metadata,
            logos,
            footer_logos,
            base_dir,
        } => {
            let path = commands::export_pdf(settings, &input, &metadata, logos, footer_logos, base_dir).await?;
            println!("{}", path.display());
        }
        Commands::Docx { input, metadata } => {
            let path = commands::export_docx(settings, &input, &metadata).await?;
            println!("{}", path.display());
        }
        Commands::Count { input, as_json } => {
            let count = commands::count(&input).await?;
            if as_json {
                println!("{}", serde_json::to_string(&count)?);
            } else {
                println!("words: {}", count.words);
                println!("characters: {}", count.characters);
            }
        }
        Commands::InitSettings { dir } => {
            let path = commands::init_settings(dir).await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_names_project_authors() {
        let command = Cli::command();
        assert_eq!(command.get_author(), Some("Proposal Export Contributors"));
        assert_eq!(command.get_name(), "proposal-export");
    }

    #[test]
    fn test_count_arguments() {
        let cli = Cli::try_parse_from(["proposal-export", "count", "draft.html", "--as-json"]).unwrap();
        assert!(matches!(cli.command, Commands::Count { as_json: true, .. }));
    }
}
