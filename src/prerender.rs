//! Route document generation.
//!
//! # Architecture
//!
//! ```text
//! prerender_routes()
//!     │
//!     ├── read_base()              dist/index.html (fatal if missing)
//!     │
//!     └── for each route, in table order
//!             ├── seo::rewrite()          replace the route's tags
//!             ├── Head::insert_missing()  only with build.insert_missing
//!             ├── minify()                only with build.minify
//!             └── write_route()           dist/<route>/index.html
//! ```
//!
//! Each route is written independently. If a write fails, the routes before
//! it stay on disk and a rerun regenerates the rest.

use crate::{
    config::{RouteMeta, SiteConfig},
    debug, log,
    seo::{Head, MetaInjector, Rewrite, SeoProps, TagKey, rewrite},
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File name of a route's entry document.
const INDEX_FILE: &str = "index.html";

/// Outcome of one generated route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerenderedRoute {
    pub path: String,
    pub file: PathBuf,
    /// Tags the base document lacked (skipped, or inserted with `insert_missing`).
    pub missing: Vec<TagKey>,
}

/// Destination of a route: `<output>/<path without leading slash>/index.html`.
pub fn route_output_path(output: &Path, route: &RouteMeta) -> PathBuf {
    output.join(route.relative_dir()).join(INDEX_FILE)
}

/// Read the bundler's base document.
///
/// Nothing can be generated without it, so failure aborts the whole run.
pub fn read_base(config: &SiteConfig) -> Result<String> {
    let base = config.build.base_path();
    fs::read_to_string(&base).with_context(|| {
        format!(
            "Failed to read base document {} (run the site build first)",
            base.display()
        )
    })
}

/// Produce the document of one route from the base document.
///
/// Returns the document and the tags the base document lacked. With
/// `insert_missing`, those are every tag of the route's full head that had
/// to be inserted; otherwise the rewritten tags that were skipped.
pub fn render_route(base: &str, route: &RouteMeta, config: &SiteConfig) -> (String, Vec<TagKey>) {
    let Rewrite { html, missing } = rewrite(base, route, &config.site.url);

    let (html, missing) = if config.build.insert_missing {
        let head = route_head(route, config);
        let absent = head.missing_from(&html);
        (head.insert_missing(&html), absent)
    } else {
        (html, missing)
    };

    let html = minify(MinifyType::Html(html.as_bytes()), config);
    let html = String::from_utf8_lossy(&html).into_owned();
    (html, missing)
}

/// Head a client-side navigation to `route` would end up with.
fn route_head(route: &RouteMeta, config: &SiteConfig) -> Head {
    let mut injector = MetaInjector::new(config.site.clone());
    injector.sync(&SeoProps::from(route));
    injector.into_head()
}

/// Generate every route's document.
pub fn prerender_routes(config: &SiteConfig) -> Result<Vec<PrerenderedRoute>> {
    let base = read_base(config)?;
    let output = &config.build.output;
    log!("prerender"; "generating {} routes from {}", config.routes.len(), config.build.base.display());

    let mut generated = Vec::with_capacity(config.routes.len());
    for route in &config.routes {
        let (html, missing) = render_route(&base, route, config);
        let file = route_output_path(output, route);
        write_route(&file, &html)?;

        log!("route"; "{} → {}", route.path, display_rel(&file, output));
        debug!("route"; "title: {}", route.title);
        if !missing.is_empty() {
            let names: Vec<_> = missing.iter().map(ToString::to_string).collect();
            let action = if config.build.insert_missing { "inserted" } else { "skipped" };
            log!("warn"; "{}: base document has no {} ({action})", route.path, names.join(", "));
        }

        generated.push(PrerenderedRoute {
            path: route.path.clone(),
            file,
            missing,
        });
    }

    Ok(generated)
}

/// Create the route directory if needed and write (or overwrite) its document.
fn write_route(file: &Path, html: &str) -> Result<()> {
    if let Some(dir) = file.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    fs::write(file, html).with_context(|| format!("Failed to write {}", file.display()))
}

/// Path relative to the output directory, for log lines.
fn display_rel(file: &Path, output: &Path) -> String {
    file.strip_prefix(output)
        .unwrap_or(file)
        .display()
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================
