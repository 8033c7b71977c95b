//! Configuration management for mark.
//!
//! Parses `mark.toml` configuration files with serde and provides
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
//! - `site.root_dir`
//! - `templates.page`, `templates.amp`, `templates.meta`, `templates.archive`
//! - `assets.article_css`, `assets.pre_css`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site root directory.
    pub root_dir: Option<PathBuf>,
    /// Override block indentation.
    pub indent: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mark.toml";

/// Stylesheet files inlined into AMP pages, relative to the config directory.
const DEFAULT_AMP_STYLES: [&str; 6] = [
    "www.jxck.io/assets/css/body.css",
    "www.jxck.io/assets/css/header.css",
    "www.jxck.io/assets/css/main.css",
    "www.jxck.io/assets/css/article.css",
    "www.jxck.io/assets/css/pre.css",
    "www.jxck.io/assets/css/footer.css",
];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Template configuration (paths are relative strings from TOML).
    templates: TemplatesConfigRaw,
    /// Asset configuration (paths are relative strings from TOML).
    assets: AssetsConfigRaw,
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved template paths (set after loading).
    #[serde(skip)]
    pub templates_resolved: TemplatesConfig,
    /// Resolved assets (set after loading).
    #[serde(skip)]
    pub assets_resolved: AssetsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    root_dir: Option<String>,
}

/// Resolved site configuration.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Site root; entry URLs are relative to it.
    pub root_dir: PathBuf,
}

/// Raw template configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    page: Option<String>,
    amp: Option<String>,
    meta: Option<String>,
    archive: Option<String>,
}

/// Resolved template paths.
#[derive(Debug, Default)]
pub struct TemplatesConfig {
    /// Canonical page template.
    pub page: PathBuf,
    /// AMP page template.
    pub amp: PathBuf,
    /// Meta template shared by both pages.
    pub meta: PathBuf,
    /// Archive index template.
    pub archive: PathBuf,
}

/// Raw asset configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AssetsConfigRaw {
    article_css: Option<String>,
    pre_css: Option<String>,
    amp_styles: Option<Vec<String>>,
}

/// Resolved asset configuration.
#[derive(Debug, Default)]
pub struct AssetsConfig {
    /// Stylesheet URL linked before the article.
    pub article_css: String,
    /// Stylesheet URL linked before code blocks.
    pub pre_css: String,
    /// CSS files concatenated into the AMP page's inline style.
    pub amp_styles: Vec<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Indentation added per nesting level of block wrappers.
    pub indent: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_owned(),
        }
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
        /// Config field path (e.g., "`site.root_dir`").
        field: String,
        /// Error message (e.g., "${`BLOG_ROOT`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
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

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root_dir) = &settings.root_dir {
            self.site_resolved.root_dir.clone_from(root_dir);
        }
        if let Some(indent) = &settings.indent {
            self.render.indent.clone_from(indent);
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
        let mut config = Self {
            site: SiteConfigRaw::default(),
            templates: TemplatesConfigRaw::default(),
            assets: AssetsConfigRaw::default(),
            render: RenderConfig::default(),
            site_resolved: SiteConfig::default(),
            templates_resolved: TemplatesConfig::default(),
            assets_resolved: AssetsConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
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

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] once CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_assets()?;
        Ok(())
    }

    /// Validate rendering configuration.
    fn validate_render(&self) -> Result<(), ConfigError> {
        if self.render.indent.chars().any(|c| c != ' ' && c != '\t') {
            return Err(ConfigError::Validation(
                "render.indent may only contain spaces and tabs".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate asset configuration.
    fn validate_assets(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.assets_resolved.article_css, "assets.article_css")?;
        require_non_empty(&self.assets_resolved.pre_css, "assets.pre_css")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.site.root_dir, "site.root_dir")?;

        expand::expand_opt(&mut self.templates.page, "templates.page")?;
        expand::expand_opt(&mut self.templates.amp, "templates.amp")?;
        expand::expand_opt(&mut self.templates.meta, "templates.meta")?;
        expand::expand_opt(&mut self.templates.archive, "templates.archive")?;

        expand::expand_opt(&mut self.assets.article_css, "assets.article_css")?;
        expand::expand_opt(&mut self.assets.pre_css, "assets.pre_css")?;

        Ok(())
    }

    /// Resolve relative paths against the config directory and fill in defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            root_dir: resolve(self.site.root_dir.as_deref(), "blog.jxck.io"),
        };

        self.templates_resolved = TemplatesConfig {
            page: resolve(self.templates.page.as_deref(), ".template/simple.html"),
            amp: resolve(self.templates.amp.as_deref(), ".template/amp.html"),
            meta: resolve(self.templates.meta.as_deref(), ".template/meta.html"),
            archive: resolve(self.templates.archive.as_deref(), ".template/archive.html"),
        };

        let amp_styles = match &self.assets.amp_styles {
            Some(files) => files.iter().map(|f| config_dir.join(f)).collect(),
            None => DEFAULT_AMP_STYLES.iter().map(|f| config_dir.join(f)).collect(),
        };
        self.assets_resolved = AssetsConfig {
            article_css: self
                .assets
                .article_css
                .clone()
                .unwrap_or_else(|| "//www.jxck.io/assets/css/article.css".to_owned()),
            pre_css: self
                .assets
                .pre_css
                .clone()
                .unwrap_or_else(|| "//www.jxck.io/assets/css/pre.css".to_owned()),
            amp_styles,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.render.indent, "  ");
        assert_eq!(
            config.site_resolved.root_dir,
            PathBuf::from("/test/blog.jxck.io")
        );
        assert_eq!(
            config.templates_resolved.page,
            PathBuf::from("/test/.template/simple.html")
        );
        assert_eq!(
            config.templates_resolved.amp,
            PathBuf::from("/test/.template/amp.html")
        );
        assert_eq!(
            config.templates_resolved.meta,
            PathBuf::from("/test/.template/meta.html")
        );
        assert_eq!(
            config.assets_resolved.article_css,
            "//www.jxck.io/assets/css/article.css"
        );
        assert_eq!(config.assets_resolved.amp_styles.len(), 6);
        assert_eq!(
            config.assets_resolved.amp_styles[0],
            PathBuf::from("/test/www.jxck.io/assets/css/body.css")
        );
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.indent, "  ");
        assert!(config.site.root_dir.is_none());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
root_dir = "public"

[templates]
page = "tpl/page.html"

[assets]
pre_css = "/css/pre.css"
amp_styles = ["css/a.css", "css/b.css"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.site_resolved.root_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(
            config.templates_resolved.page,
            PathBuf::from("/project/tpl/page.html")
        );
        assert_eq!(
            config.templates_resolved.amp,
            PathBuf::from("/project/.template/amp.html")
        );
        assert_eq!(config.assets_resolved.pre_css, "/css/pre.css");
        assert_eq!(
            config.assets_resolved.amp_styles,
            vec![
                PathBuf::from("/project/css/a.css"),
                PathBuf::from("/project/css/b.css")
            ]
        );
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mark.toml");
        std::fs::write(&path, "[render]\nindent = \"\\t\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.render.indent, "\t");
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.site_resolved.root_dir,
            temp_dir.path().join("blog.jxck.io")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/mark.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mark.toml");
        std::fs::write(&path, "[render\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mark.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            root_dir: Some(PathBuf::from("/srv/blog")),
            indent: Some("    ".to_owned()),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.site_resolved.root_dir, PathBuf::from("/srv/blog"));
        assert_eq!(config.render.indent, "    ");
    }

    #[test]
    fn test_load_rejects_invalid_cli_indent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mark.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            indent: Some("--".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(
            config.site_resolved.root_dir,
            PathBuf::from("/test/blog.jxck.io")
        );
        assert_eq!(config.render.indent, "  ");
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("MARK_TEST_ROOT", "site");
            std::env::set_var("MARK_TEST_CDN", "//cdn.example.com");
        }

        let toml = r#"
[site]
root_dir = "${MARK_TEST_ROOT}"

[assets]
article_css = "${MARK_TEST_CDN}/article.css"
pre_css = "${MARK_TEST_PRE_UNSET:-/pre.css}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.root_dir, PathBuf::from("/project/site"));
        assert_eq!(
            config.assets_resolved.article_css,
            "//cdn.example.com/article.css"
        );
        assert_eq!(config.assets_resolved.pre_css, "/pre.css");

        unsafe {
            std::env::remove_var("MARK_TEST_ROOT");
            std::env::remove_var("MARK_TEST_CDN");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::remove_var("MARK_TEST_MISSING_TEMPLATE");
        }

        let toml = r#"
[templates]
meta = "${MARK_TEST_MISSING_TEMPLATE}/meta.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("templates.meta"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_indent() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.render.indent = "\t ".to_owned();
        assert!(config.validate().is_ok());

        config.render.indent = String::new();
        assert!(config.validate().is_ok());

        config.render.indent = "x".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.indent"));
    }

    #[test]
    fn test_validate_empty_css() {
        let toml = r#"
[assets]
article_css = ""
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("assets.article_css"));
    }
}
