//! Sitemap command handler.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;

use labfinder_lib::{render_sitemap, SITE_ROUTES};

/// Arguments for the sitemap subcommand.
#[derive(Args, Debug, Clone)]
pub struct SitemapArgs {
    /// Public origin of the site, e.g. `https://labs.example.com`.
    #[arg(long, env = "SITE_BASE_URL")]
    pub base_url: String,

    /// Write to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// `lastmod` date for every entry (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub lastmod: Option<NaiveDate>,
}

/// Handle the sitemap subcommand.
pub fn handle_sitemap(args: &SitemapArgs) -> Result<()> {
    let base_url = args.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        anyhow::bail!("--base-url must start with http:// or https://, got {base_url:?}");
    }

    let lastmod = args.lastmod.unwrap_or_else(|| Local::now().date_naive());
    let xml = render_sitemap(base_url, SITE_ROUTES, lastmod);

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, &xml)
                .with_context(|| format!("failed to write sitemap to {}", path.display()))?;
            println!(
                "Sitemap with {} URLs written to {}",
                SITE_ROUTES.len(),
                path.display()
            );
        }
        None => {
            io::stdout()
                .write_all(xml.as_bytes())
                .context("failed to write sitemap to stdout")?;
        }
    }

    Ok(())
}
