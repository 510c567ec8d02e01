//! `wikidex build` command implementation.

use std::path::PathBuf;

use clap::Args;
use wikidex_config::{CliSettings, Config};
use wikidex_index::{BreadcrumbBuilder, IndexSummary, generate_index};
use wikidex_render::{GeneratedPage, SiteWriter, TemplateSet};
use wikidex_source::Scanner;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Directory of built pages to index (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for index pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Directory containing the index.html template (overrides config).
    #[arg(short, long)]
    template_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover wikidex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            template_dir: self.template_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let site = &config.site_resolved;
        output.info(&format!("Source: {}", site.source_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        match build_index(&config)? {
            Some((summary, _)) => output.success(&format!(
                "Generated {} index pages for {} documents in {}",
                summary.pages,
                summary.documents,
                site.output_dir.display()
            )),
            None => output.warning(&format!(
                "No index.html template in {}, index generation skipped",
                site.template_dir.display()
            )),
        }
        Ok(())
    }
}

/// Scan, gate, and generate index pages as configured.
///
/// Returns `None` when the template directory has no index template.
fn build_index(config: &Config) -> Result<Option<(IndexSummary, Vec<GeneratedPage>)>, CliError> {
    let site = &config.site_resolved;
    let nav = &config.navigation;

    let documents = Scanner::new(site.source_dir.clone())
        .with_extensions(site.extensions.iter().cloned())
        .exclude(&site.output_dir)
        .scan()?;
    tracing::info!(
        source_dir = %site.source_dir.display(),
        documents = documents.len(),
        "Collected documents"
    );

    let breadcrumbs = BreadcrumbBuilder::new()
        .with_home_label(&nav.breadcrumb_home)
        .with_site_root(&nav.site_root);
    let templates = TemplateSet::new(site.template_dir.clone(), breadcrumbs.clone());
    let mut writer = SiteWriter::new(&templates, site.output_dir.clone())
        .with_site_root(&nav.site_root)
        .with_home_title(&nav.home_title)
        .with_breadcrumbs(breadcrumbs);

    let summary = generate_index(&documents, &templates, &mut writer)?;
    Ok(summary.map(|s| (s, writer.into_pages())))
}
