//! `wikidex breadcrumb` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use wikidex_config::Config;
use wikidex_index::{Breadcrumb, BreadcrumbBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Output format of the trail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// `Home (/) > guide (/guide/)`
    #[default]
    Text,
    /// `<a href="/">Home</a> &gt; <a href="/guide/">guide</a>`
    Html,
    /// JSON array of `{label, href}` objects.
    Json,
}

/// Arguments for the breadcrumb command.
#[derive(Args)]
pub(crate) struct BreadcrumbArgs {
    /// Document path or URL (e.g. /guide/setup/install.html).
    path: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    /// Path to configuration file (default: auto-discover wikidex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BreadcrumbArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let trail = builder_from_config(&config).build(&self.path);
        Output::new().result(&render(&trail, self.format)?)?;
        Ok(())
    }
}

fn builder_from_config(config: &Config) -> BreadcrumbBuilder {
    BreadcrumbBuilder::new()
        .with_home_label(&config.navigation.breadcrumb_home)
        .with_site_root(&config.navigation.site_root)
}

fn render(trail: &Breadcrumb, format: Format) -> Result<String, CliError> {
    Ok(match format {
        Format::Text => trail.to_string(),
        Format::Html => trail.render_html(),
        Format::Json => serde_json::to_string(trail)?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wikidex_index::breadcrumb;

    use super::*;

    #[test]
    fn test_render_text() {
        let trail = breadcrumb("/a/b/c/page.html");

        assert_eq!(
            render(&trail, Format::Text).unwrap(),
            "Home (/) > a (/a/) > b (/a/b/) > c (/a/b/c/)"
        );
    }

    #[test]
    fn test_render_html() {
        let trail = breadcrumb("/a/page.html");

        assert_eq!(
            render(&trail, Format::Html).unwrap(),
            "<a href=\"/\">Home</a> &gt; <a href=\"/a/\">a</a>"
        );
    }

    #[test]
    fn test_render_json() {
        let trail = breadcrumb("/a/page.html");

        assert_eq!(
            render(&trail, Format::Json).unwrap(),
            r#"[{"label":"Home","href":"/"},{"label":"a","href":"/a/"}]"#
        );
    }

    #[test]
    fn test_builder_from_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("wikidex.toml");
        std::fs::write(
            &path,
            "[navigation]\nsite_root = \"/wiki/\"\nbreadcrumb_home = \"Wiki\"\n",
        )
        .unwrap();
        let config = Config::load(Some(&path), None).unwrap();

        let trail = builder_from_config(&config).build("/guide/page.html");

        assert_eq!(trail.to_string(), "Wiki (/wiki/) > guide (/wiki/guide/)");
    }
}
