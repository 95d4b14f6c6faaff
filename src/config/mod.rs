pub mod toml_config;

use crate::core::fetcher::DEFAULT_RAW_CONTENT_BASE;
use crate::core::navigation::NavigationOptions;
use crate::core::version::{VersionOrder, UNVERSIONED};
use crate::utils::error::{DocsError, Result};
use crate::utils::validation::{
    validate_path, validate_path_segment, validate_range, validate_url, Validate,
};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_DOCS_DIR: &str = "./test";
pub const DEFAULT_SUMMARY_FILE: &str = "./test/SUMMARY.md";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 4;

/// Everything a release build needs, resolved once at the entry point.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub modules_dir: PathBuf,
    pub docs_dir: PathBuf,
    pub summary_file: PathBuf,
    pub release_version: String,
    /// Root index template; the built-in one when `None`.
    pub template_file: Option<PathBuf>,
    pub navigation: NavigationOptions,
    pub gitbook_meta: bool,
    pub version_order: VersionOrder,
    pub raw_content_base: String,
    pub concurrent_requests: usize,
    pub request_timeout: Option<Duration>,
}

impl BuildConfig {
    pub fn new(
        modules_dir: impl Into<PathBuf>,
        docs_dir: impl Into<PathBuf>,
        summary_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            modules_dir: modules_dir.into(),
            docs_dir: docs_dir.into(),
            summary_file: summary_file.into(),
            release_version: UNVERSIONED.to_string(),
            template_file: None,
            navigation: NavigationOptions::default(),
            gitbook_meta: true,
            version_order: VersionOrder::default(),
            raw_content_base: DEFAULT_RAW_CONTENT_BASE.to_string(),
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            request_timeout: None,
        }
    }

    /// Applies the values present in a config file.
    pub fn merge_file(mut self, file: TomlConfig) -> Self {
        let render = file.render;
        if let Some(prefix) = render.summary_link_prefix {
            self.navigation.link_prefix = prefix;
        }
        if let Some(prefix) = render.module_label_prefix {
            self.navigation.module_label_prefix = prefix;
        }
        if let Some(meta) = render.gitbook_meta {
            self.gitbook_meta = meta;
        }
        if let Some(order) = render.version_order {
            self.version_order = order;
        }
        if render.template.is_some() {
            self.template_file = render.template;
        }

        let fetch = file.fetch;
        if let Some(base) = fetch.raw_content_base {
            self.raw_content_base = base;
        }
        if let Some(concurrent) = fetch.concurrent_requests {
            self.concurrent_requests = concurrent;
        }
        if let Some(seconds) = fetch.timeout_seconds {
            self.request_timeout = Some(Duration::from_secs(seconds));
        }
        self
    }

    pub fn release_dir(&self) -> PathBuf {
        self.docs_dir.join(&self.release_version)
    }
}

fn path_str(field: &str, path: &std::path::Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| DocsError::InvalidConfigValueError {
            field: field.to_string(),
            value: path.to_string_lossy().into_owned(),
            reason: "Path is not valid UTF-8".to_string(),
        })
}

impl Validate for BuildConfig {
    fn validate(&self) -> Result<()> {
        validate_path("modules_dir", &path_str("modules_dir", &self.modules_dir)?)?;
        validate_path("docs_dir", &path_str("docs_dir", &self.docs_dir)?)?;
        validate_path("summary_file", &path_str("summary_file", &self.summary_file)?)?;
        if let Some(template) = &self.template_file {
            validate_path("template", &path_str("template", template)?)?;
        }
        validate_path_segment("release_version", &self.release_version)?;
        validate_url("raw_content_base", &self.raw_content_base)?;
        validate_range("concurrent_requests", self.concurrent_requests, 1, 64)?;

        tracing::debug!("✅ Build configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "docs-gen")]
    #[command(about = "Generate the module documentation to be published")]
    pub struct CliConfig {
        /// The modules directory
        pub modules: PathBuf,

        #[arg(long, env = "DOCS_DIR", default_value = DEFAULT_DOCS_DIR)]
        pub docs_dir: PathBuf,

        #[arg(long, env = "GITBOOK_SUMMARY", default_value = DEFAULT_SUMMARY_FILE)]
        pub summary: PathBuf,

        #[arg(long, env = "RELEASE_VERSION", default_value = UNVERSIONED)]
        pub release_version: String,

        /// Optional TOML file with rendering and fetch settings
        #[arg(long, env = "DOCS_GEN_CONFIG")]
        pub config: Option<PathBuf>,

        /// Template for the root README, must contain {{ modules }}
        #[arg(long)]
        pub template: Option<PathBuf>,

        #[arg(long, value_enum)]
        pub version_order: Option<VersionOrder>,

        #[arg(long)]
        pub concurrent_requests: Option<usize>,

        /// Do not prepend GitBook front matter to generated pages
        #[arg(long)]
        pub no_gitbook_meta: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Print the build report as JSON")]
        pub json: bool,
    }

    impl CliConfig {
        /// Defaults, then the config file, then explicit flags.
        pub fn into_build_config(self) -> Result<BuildConfig> {
            let mut config = BuildConfig::new(self.modules, self.docs_dir, self.summary);
            config.release_version = self.release_version;

            if let Some(path) = &self.config {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                config = config.merge_file(TomlConfig::from_file(path)?);
            }

            if self.template.is_some() {
                config.template_file = self.template;
            }
            if let Some(order) = self.version_order {
                config.version_order = order;
            }
            if let Some(concurrent) = self.concurrent_requests {
                config.concurrent_requests = concurrent;
            }
            if self.no_gitbook_meta {
                config.gitbook_meta = false;
            }
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::new("x", "docs", "docs/SUMMARY.md");
        assert_eq!(config.release_version, "main");
        assert_eq!(config.release_dir(), PathBuf::from("docs/main"));
        assert!(config.gitbook_meta);
        assert_eq!(config.version_order, VersionOrder::Descending);
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_file_overrides_only_present_values() {
        let file = TomlConfig::from_toml_str(
            "[render]\ngitbook_meta = false\n[fetch]\ntimeout_seconds = 10\n",
        )
        .unwrap();

        let config = BuildConfig::new("x", "docs", "docs/SUMMARY.md").merge_file(file);

        assert!(!config.gitbook_meta);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.navigation, NavigationOptions::default());
        assert_eq!(config.concurrent_requests, DEFAULT_CONCURRENT_REQUESTS);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = BuildConfig::new("x", "docs", "docs/SUMMARY.md");
        config.release_version = "v1/../..".to_string();
        assert!(config.validate().is_err());

        let mut config = BuildConfig::new("x", "docs", "docs/SUMMARY.md");
        config.concurrent_requests = 0;
        assert!(config.validate().is_err());

        let mut config = BuildConfig::new("x", "docs", "docs/SUMMARY.md");
        config.raw_content_base = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_file() {
        use clap::Parser;

        let cli = CliConfig::try_parse_from([
            "docs-gen",
            "./x",
            "--docs-dir",
            "out",
            "--summary",
            "out/SUMMARY.md",
            "--release-version",
            "v1.2.0",
            "--version-order",
            "ascending",
            "--no-gitbook-meta",
        ])
        .unwrap();

        let config = cli.into_build_config().unwrap();

        assert_eq!(config.modules_dir, PathBuf::from("./x"));
        assert_eq!(config.release_dir(), PathBuf::from("out/v1.2.0"));
        assert_eq!(config.version_order, VersionOrder::Ascending);
        assert!(!config.gitbook_meta);
    }
}
