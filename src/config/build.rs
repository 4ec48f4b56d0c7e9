//! `[build]` section configuration.
//!
//! Where the bundled site lives and how route documents are generated.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in prerender.toml.
///
/// # Example
/// ```toml
/// [build]
/// output = "dist"          # Bundler output directory
/// base = "index.html"      # Base document, relative to output
/// minify = false
/// insert_missing = false
///
/// [build.sitemap]
/// enable = true
/// path = "sitemap.xml"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Bundler output directory. Route documents are written below it.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Base document produced by the bundler, relative to `output`.
    #[serde(default = "defaults::build::base")]
    #[educe(Default = defaults::build::base())]
    pub base: PathBuf,

    /// Minify generated route documents.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Append tags the base document lacks instead of skipping them.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub insert_missing: bool,

    /// Sitemap generation.
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// `[build.sitemap]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Write a sitemap after the route documents.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Sitemap file, relative to `output`.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

impl BuildConfig {
    /// Absolute path of the base document (after path normalization).
    pub fn base_path(&self) -> PathBuf {
        self.output.join(&self.base)
    }

    /// Absolute path of the sitemap (after path normalization).
    pub fn sitemap_path(&self) -> PathBuf {
        self.output.join(&self.sitemap.path)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.base, PathBuf::from("index.html"));
        assert!(!config.build.minify);
        assert!(!config.build.insert_missing);
        assert!(config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.path, PathBuf::from("sitemap.xml"));
    }

    #[test]
    fn test_build_paths() {
        let config = SiteConfig::from_str(
            r#"
            [build]
            output = "public"
            base = "app.html"

            [build.sitemap]
            path = "map.xml"
        "#,
        )
        .unwrap();
        assert_eq!(config.build.base_path(), PathBuf::from("public/app.html"));
        assert_eq!(config.build.sitemap_path(), PathBuf::from("public/map.xml"));
    }

    #[test]
    fn test_build_sitemap_disabled() {
        let config = SiteConfig::from_str(
            r#"
            [build.sitemap]
            enable = false
        "#,
        )
        .unwrap();
        assert!(!config.build.sitemap.enable);
    }
}
