//! Configuration management for tocnav.
//!
//! Parses `tocnav.toml` configuration files with serde and provides
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
//! - `toc.input`
//! - `toc.output`
//! - `outline.placeholder`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use tocnav_outline::{
    AnnotationScope, DEFAULT_MARKER, MissingFilenamePolicy, NestedEntryPolicy, OutlineOptions,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override table of contents input file.
    pub input: Option<PathBuf>,
    /// Override navigation output file.
    pub output: Option<PathBuf>,
    /// Override annotation search scope.
    pub annotation_scope: Option<AnnotationScope>,
    /// Override missing filename policy.
    pub missing_filename: Option<MissingFilenamePolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tocnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File locations (paths are relative strings from TOML).
    toc: TocConfigRaw,
    /// Outline derivation settings.
    pub outline: OutlineConfig,
    /// Cross-reference settings.
    pub xref: XrefConfig,
    /// List rendering settings.
    pub list: ListConfig,

    /// Resolved file locations (set after loading).
    #[serde(skip)]
    pub toc_resolved: TocConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw file configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TocConfigRaw {
    input: Option<String>,
    output: Option<String>,
}

/// Resolved input and output locations.
#[derive(Debug, Default)]
pub struct TocConfig {
    /// DocBook table of contents file.
    pub input: PathBuf,
    /// Antora navigation file to write.
    pub output: PathBuf,
}

/// Outline derivation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Element name that marks an entry.
    pub entry_tag: String,
    /// Processing instruction target carrying the filename.
    pub pi_target: String,
    /// Where to search for the filename annotation.
    pub annotation_scope: AnnotationScope,
    /// Fallback when an entry has no filename.
    pub missing_filename: MissingFilenamePolicy,
    /// Label used for entries without a filename.
    pub placeholder: String,
    /// Handling of entries nested below non-entry elements.
    pub nested_entries: NestedEntryPolicy,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        let defaults = OutlineOptions::default();
        Self {
            entry_tag: defaults.entry_tag,
            pi_target: defaults.pi_target,
            annotation_scope: defaults.annotation_scope,
            missing_filename: defaults.missing_filename,
            placeholder: defaults.placeholder,
            nested_entries: defaults.nested_entries,
        }
    }
}

/// Cross-reference settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct XrefConfig {
    /// Extension of the published pages named in annotations.
    pub source_extension: String,
    /// Extension of the Antora pages the xrefs point to.
    pub target_extension: String,
}

impl Default for XrefConfig {
    fn default() -> Self {
        Self {
            source_extension: ".html".to_owned(),
            target_extension: ".adoc".to_owned(),
        }
    }
}

/// List rendering settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Bullet marker, repeated once per nesting level.
    pub marker: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl ListConfig {
    /// Marker character; falls back to `*` if the string is empty.
    #[must_use]
    pub fn marker_char(&self) -> char {
        self.marker.chars().next().unwrap_or(DEFAULT_MARKER)
    }
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
        /// Config field path (e.g., "`toc.input`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
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

/// Require an extension field to look like `.ext`.
fn require_extension(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if !value.starts_with('.') || value.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "{field} must start with '.' and name an extension"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tocnav.toml` in current directory and parents.
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
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(input) = &settings.input {
            self.toc_resolved.input.clone_from(input);
        }
        if let Some(output) = &settings.output {
            self.toc_resolved.output.clone_from(output);
        }
        if let Some(scope) = settings.annotation_scope {
            self.outline.annotation_scope = scope;
        }
        if let Some(policy) = settings.missing_filename {
            self.outline.missing_filename = policy;
        }
    }

    /// Outline options assembled from the `[outline]` and `[xref]` sections.
    #[must_use]
    pub fn outline_options(&self) -> OutlineOptions {
        OutlineOptions {
            entry_tag: self.outline.entry_tag.clone(),
            pi_target: self.outline.pi_target.clone(),
            annotation_scope: self.outline.annotation_scope,
            missing_filename: self.outline.missing_filename,
            placeholder: self.outline.placeholder.clone(),
            nested_entries: self.outline.nested_entries,
            source_extension: self.xref.source_extension.clone(),
            target_extension: self.xref.target_extension.clone(),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
            toc: TocConfigRaw::default(),
            outline: OutlineConfig::default(),
            xref: XrefConfig::default(),
            list: ListConfig::default(),
            toc_resolved: TocConfig {
                input: base.join("toc.xml"),
                output: base.join("nav.adoc"),
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
        self.validate_outline()?;
        self.validate_xref()?;
        self.validate_list()?;
        Ok(())
    }

    fn validate_outline(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.outline.entry_tag, "outline.entry_tag")?;
        require_non_empty(&self.outline.pi_target, "outline.pi_target")?;
        require_non_empty(&self.outline.placeholder, "outline.placeholder")?;
        Ok(())
    }

    fn validate_xref(&self) -> Result<(), ConfigError> {
        require_extension(&self.xref.source_extension, "xref.source_extension")?;
        require_extension(&self.xref.target_extension, "xref.target_extension")?;
        Ok(())
    }

    fn validate_list(&self) -> Result<(), ConfigError> {
        let mut chars = self.list.marker.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(()),
            _ => Err(ConfigError::Validation(
                "list.marker must be a single non-whitespace character".to_owned(),
            )),
        }
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref input) = self.toc.input {
            self.toc.input = Some(expand::expand_env(input, "toc.input")?);
        }
        if let Some(ref output) = self.toc.output {
            self.toc.output = Some(expand::expand_env(output, "toc.output")?);
        }
        self.outline.placeholder =
            expand::expand_env(&self.outline.placeholder, "outline.placeholder")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.toc_resolved = TocConfig {
            input: resolve(self.toc.input.as_deref(), "toc.xml"),
            output: resolve(self.toc.output.as_deref(), "nav.adoc"),
        };
    }
}
