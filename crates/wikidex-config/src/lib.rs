//! Configuration management for wikidex.
//!
//! Parses `wikidex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `navigation.site_root`
//! - `navigation.breadcrumb_home`
//! - `navigation.home_title`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override directory of built documents.
    pub source_dir: Option<PathBuf>,
    /// Override directory index pages are written to.
    pub output_dir: Option<PathBuf>,
    /// Override template directory.
    pub template_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wikidex.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site layout configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Navigation labels and link prefix.
    pub navigation: NavigationConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    template_dir: Option<String>,
    extensions: Option<Vec<String>>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Directory of built documents to index.
    pub source_dir: PathBuf,
    /// Directory index pages are written to.
    pub output_dir: PathBuf,
    /// Directory holding the `index.html` template.
    pub template_dir: PathBuf,
    /// File extensions treated as documents (without dot).
    pub extensions: Vec<String>,
}

/// Navigation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// URL prefix of the site (must start and end with `/`).
    pub site_root: String,
    /// Label of the first breadcrumb entry.
    pub breadcrumb_home: String,
    /// Display title of the root index page.
    pub home_title: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            site_root: "/".to_owned(),
            breadcrumb_home: "Home".to_owned(),
            home_title: "Home".to_owned(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_owned()]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`navigation.site_root`").
        field: String,
        /// Error message (e.g., "${`SITE_ROOT`} environment variable not found").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// True if both paths name the same directory.
///
/// Compared canonically when both exist, lexically otherwise.
fn same_dir(a: &Path, b: &Path) -> bool {
    if let (Ok(ca), Ok(cb)) = (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        return ca == cb;
    }
    a == b
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wikidex.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.site_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(template_dir) = &settings.template_dir {
            self.site_resolved.template_dir.clone_from(template_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(current)
    }

    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            navigation: NavigationConfig::default(),
            site_resolved: SiteConfig {
                source_dir: base.join("site"),
                output_dir: base.join("index"),
                template_dir: base.join("templates"),
                extensions: default_extensions(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_navigation()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;
        if same_dir(&site.source_dir, &site.output_dir) {
            return Err(ConfigError::Validation(format!(
                "site.output_dir must differ from site.source_dir, got '{}'",
                site.output_dir.display()
            )));
        }
        let extensions = &self.site_resolved.extensions;
        if extensions.is_empty() {
            return Err(ConfigError::Validation(
                "site.extensions cannot be empty".to_owned(),
            ));
        }
        if extensions.iter().any(|e| e.trim_start_matches('.').is_empty()) {
            return Err(ConfigError::Validation(
                "site.extensions cannot contain empty entries".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate navigation configuration.
    fn validate_navigation(&self) -> Result<(), ConfigError> {
        let site_root = &self.navigation.site_root;
        if !site_root.starts_with('/') || !site_root.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "navigation.site_root must start and end with '/', got '{site_root}'"
            )));
        }
        require_non_empty(&self.navigation.breadcrumb_home, "navigation.breadcrumb_home")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let nav = &mut self.navigation;
        nav.site_root = expand::expand_env(&nav.site_root, "navigation.site_root")?;
        nav.breadcrumb_home =
            expand::expand_env(&nav.breadcrumb_home, "navigation.breadcrumb_home")?;
        nav.home_title = expand::expand_env(&nav.home_title, "navigation.home_title")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let extensions = self
            .site
            .extensions
            .as_ref()
            .map_or_else(default_extensions, |exts| {
                exts.iter()
                    .map(|e| e.trim_start_matches('.').to_owned())
                    .collect()
            });

        self.site_resolved = SiteConfig {
            source_dir: resolve(self.site.source_dir.as_deref(), "site"),
            output_dir: resolve(self.site.output_dir.as_deref(), "index"),
            template_dir: resolve(self.site.template_dir.as_deref(), "templates"),
            extensions,
        };
    }
}
