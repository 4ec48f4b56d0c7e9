//! SEO tags of a page `<head>`.
//!
//! # Architecture
//!
//! ```text
//! TagKey ── selector + pattern + render
//!    │
//!    ├── rewrite::rewrite()   build time: base document text → route document
//!    │                        (replace-if-present, silent skip otherwise)
//!    │
//!    └── head::Head           keyed upsert map (get-or-create-then-set)
//!            ▲                synchronized onto text by Head::apply()
//!            │
//!        head::MetaInjector   re-syncs when title/description/url/image change
//! ```

pub mod head;
pub mod rewrite;

pub use head::{Head, MetaInjector, SeoProps};
pub use rewrite::{Rewrite, rewrite};

use crate::config::is_absolute_url;
use regex::Regex;
use std::{fmt, sync::LazyLock};

// ============================================================================
// Tag Identity
// ============================================================================

/// Identity of one managed tag in `<head>`.
///
/// A key maps to at most one element: the rewriter replaces the first match
/// and the head state holds one content per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKey {
    Title,
    Description,
    Canonical,
    OgTitle,
    OgDescription,
    OgUrl,
    OgImage,
    OgType,
    OgLocale,
    OgSiteName,
    TwitterCard,
    TwitterTitle,
    TwitterDescription,
    TwitterImage,
}

/// How a tag is located: by element, identifying attribute and value attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `<title>…</title>`
    Title,
    /// `<meta {attr}="{value}" content="…">`
    Meta {
        attr: &'static str,
        value: &'static str,
    },
    /// `<link rel="{rel}" href="…">`
    Link { rel: &'static str },
}

impl TagKey {
    /// Tags rewritten per route at build time.
    pub const REWRITTEN: [TagKey; 10] = [
        TagKey::Title,
        TagKey::Description,
        TagKey::Canonical,
        TagKey::OgTitle,
        TagKey::OgDescription,
        TagKey::OgUrl,
        TagKey::OgImage,
        TagKey::TwitterTitle,
        TagKey::TwitterDescription,
        TagKey::TwitterImage,
    ];

    /// Every managed tag, in head order.
    pub const ALL: [TagKey; 14] = [
        TagKey::Title,
        TagKey::Description,
        TagKey::Canonical,
        TagKey::OgTitle,
        TagKey::OgDescription,
        TagKey::OgUrl,
        TagKey::OgImage,
        TagKey::OgType,
        TagKey::OgLocale,
        TagKey::OgSiteName,
        TagKey::TwitterCard,
        TagKey::TwitterTitle,
        TagKey::TwitterDescription,
        TagKey::TwitterImage,
    ];

    pub const fn selector(self) -> Selector {
        const fn name(value: &'static str) -> Selector {
            Selector::Meta { attr: "name", value }
        }
        const fn property(value: &'static str) -> Selector {
            Selector::Meta { attr: "property", value }
        }

        match self {
            TagKey::Title => Selector::Title,
            TagKey::Description => name("description"),
            TagKey::Canonical => Selector::Link { rel: "canonical" },
            TagKey::OgTitle => property("og:title"),
            TagKey::OgDescription => property("og:description"),
            TagKey::OgUrl => property("og:url"),
            TagKey::OgImage => property("og:image"),
            TagKey::OgType => property("og:type"),
            TagKey::OgLocale => property("og:locale"),
            TagKey::OgSiteName => property("og:site_name"),
            TagKey::TwitterCard => name("twitter:card"),
            TagKey::TwitterTitle => name("twitter:title"),
            TagKey::TwitterDescription => name("twitter:description"),
            TagKey::TwitterImage => name("twitter:image"),
        }
    }

    /// Pattern matching this tag with any content.
    pub fn pattern(self) -> &'static Regex {
        static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
            TagKey::ALL
                .iter()
                .map(|key| Regex::new(&key.pattern_source()).unwrap())
                .collect()
        });
        &PATTERNS[self as usize]
    }

    fn pattern_source(self) -> String {
        match self.selector() {
            Selector::Title => r"<title>[^<]*</title>".into(),
            Selector::Meta { attr, value } => format!(
                r#"<meta {attr}="{}" content="[^"]*"\s*/?>"#,
                regex::escape(value)
            ),
            Selector::Link { rel } => {
                format!(r#"<link rel="{}" href="[^"]*"\s*/?>"#, regex::escape(rel))
            }
        }
    }

    /// Render the tag carrying `content`, inserted verbatim.
    pub fn render(self, content: &str) -> String {
        match self.selector() {
            Selector::Title => format!("<title>{content}</title>"),
            Selector::Meta { attr, value } => {
                format!(r#"<meta {attr}="{value}" content="{content}" />"#)
            }
            Selector::Link { rel } => format!(r#"<link rel="{rel}" href="{content}" />"#),
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selector() {
            Selector::Title => f.write_str("title"),
            Selector::Meta { value, .. } => f.write_str(value),
            Selector::Link { rel } => f.write_str(rel),
        }
    }
}

// ============================================================================
// URL Helpers
// ============================================================================

/// Canonical URL of a route: site URL without trailing `/`, then the path.
///
/// ```ignore
/// canonical_url("https://manidina.me/", "/contact") // → "https://manidina.me/contact"
/// canonical_url("https://manidina.me", "/")         // → "https://manidina.me/"
/// ```
pub fn canonical_url(site_url: &str, path: &str) -> String {
    let site = site_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{site}{path}")
    } else {
        format!("{site}/{path}")
    }
}

/// Absolute image URL: kept as is when absolute, otherwise joined to the site URL.
pub fn absolute_image(site_url: &str, image: &str) -> String {
    if is_absolute_url(image) {
        image.to_string()
    } else {
        canonical_url(site_url, image)
    }
}

// ============================================================================
// Tests
// ============================================================================
