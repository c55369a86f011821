use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use labfinder_cli::commands::{facets, search, sitemap};
use labfinder_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Lab directory utilities")]
struct Cli {
    /// Override the dataset directory or file path.
    #[arg(long, global = true, env = "LABFINDER_DATA_PATH")]
    data_path: Option<PathBuf>,

    /// Output format for search and facet results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the lab directory with the same parameters as `/labs-search`.
    Search(search::SearchArgs),
    /// List the distinct states, cities and disciplines in the dataset.
    Facets,
    /// Generate sitemap.xml for the public site.
    Sitemap(sitemap::SitemapArgs),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_path = cli.data_path.as_deref();
    match cli.command {
        Command::Search(args) => search::handle_search(data_path, &args, cli.format),
        Command::Facets => facets::handle_facets(data_path, cli.format),
        Command::Sitemap(args) => sitemap::handle_sitemap(&args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
