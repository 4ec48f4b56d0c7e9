//! Site configuration management for `prerender.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `[site]`     | Site identity (url, name, locale)                |
//! | `[build]`    | Output directory, base document, sitemap         |
//! | `[[routes]]` | Per-route title, description and preview image   |
//! | `[contact]`  | Email service used by the contact form           |
//!
//! The file is optional: without `prerender.toml` the built-in route table is
//! used. A file named with `--config` must exist.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://manidina.me"
//!
//! [build]
//! output = "dist"
//!
//! [[routes]]
//! path = "/contact"
//! title = "Contact | Manidina"
//! description = "Contactez Manidina pour vos projets numériques."
//! image = "https://manidina.me/logo.png"
//! ```

mod build;
mod contact;
pub mod defaults;
mod error;
mod route;
mod site;

pub use build::BuildConfig;
pub use contact::ContactConfig;
pub use error::ConfigError;
pub use route::{RouteMeta, is_absolute_url};
pub use site::SiteIdentity;

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing prerender.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity
    #[serde(default)]
    pub site: SiteIdentity,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Route metadata table, in generation order
    #[serde(default = "defaults::routes::table")]
    #[educe(Default = defaults::routes::table())]
    pub routes: Vec<RouteMeta>,

    /// Contact form relay
    #[serde(default)]
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, apply CLI overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(cli.config_file());

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else if cli.config.is_some() {
            bail!("Config file not found: {}", config_path.display());
        } else {
            debug!("config"; "{} not found, using built-in routes", config_path.display());
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        if let Commands::Build { build_args } = &cli.command {
            self.update_with_build_args(build_args);
        }

        let root = Self::normalize_path(&root);
        self.set_root(&root);
        self.config_path = Self::normalize_path(&root.join(cli.config_file()));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Apply `build` command overrides
    fn update_with_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.base, args.base.as_ref());
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.insert_missing, args.insert_missing.as_ref());
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        Self::update_option(&mut self.site.url, args.site_url.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate site identity and the route table
    pub fn validate(&self) -> Result<()> {
        if !is_absolute_url(&self.site.url) {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if self.routes.is_empty() {
            bail!(ConfigError::Validation(
                "[[routes]] must contain at least one route".into()
            ));
        }

        route::check_table(&self.routes).map_err(ConfigError::Validation)?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
