//! `[[routes]]` table: the per-route SEO metadata.
//!
//! Plain data. The rewriter and writer only read it, so a table can be
//! built in tests without touching the filesystem.

use serde::{Deserialize, Serialize};

/// SEO metadata for one navigable route of the single-page app.
///
/// # Example
/// ```toml
/// [[routes]]
/// path = "/contact"
/// title = "Contact | Manidina"
/// description = "Contactez Manidina pour vos projets numériques."
/// image = "https://manidina.me/logo.png"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteMeta {
    /// Absolute site-relative route, e.g. `/contact`.
    pub path: String,
    pub title: String,
    pub description: String,
    /// Absolute image URL for social previews.
    pub image: String,
}

impl RouteMeta {
    pub fn new(path: &str, title: &str, description: &str, image: &str) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            description: description.into(),
            image: image.into(),
        }
    }

    /// Route path relative to the output directory (`/a/b` → `a/b`).
    pub fn relative_dir(&self) -> &str {
        self.path.trim_start_matches('/')
    }

    /// Check the shape of a single entry, returning a description of the problem.
    pub fn check(&self) -> Result<(), String> {
        let fields = [
            ("path", &self.path),
            ("title", &self.title),
            ("description", &self.description),
            ("image", &self.image),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(format!("route `{}` has an empty `{field}`", self.path));
        }

        let path = &self.path;
        if !path.starts_with('/') {
            return Err(format!("route `{path}` must start with `/`"));
        }
        if path == "/" {
            return Err("route `/` is served by the base document itself".into());
        }
        if path.ends_with('/') {
            return Err(format!("route `{path}` must not end with `/`"));
        }
        if path[1..]
            .split('/')
            .any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return Err(format!("route `{path}` contains an empty or relative segment"));
        }
        if !is_absolute_url(&self.image) {
            return Err(format!("route `{path}` image must be an absolute URL"));
        }
        Ok(())
    }
}

/// Check a whole table: every entry well-formed, paths unique.
pub fn check_table(routes: &[RouteMeta]) -> Result<(), String> {
    for (i, route) in routes.iter().enumerate() {
        route.check()?;
        if routes[..i].iter().any(|r| r.path == route.path) {
            return Err(format!("duplicate route `{}`", route.path));
        }
    }
    Ok(())
}

/// `http://` or `https://` URL.
pub fn is_absolute_url(s: &str) -> bool {
    s.starts_with("https://") || s.starts_with("http://")
}
