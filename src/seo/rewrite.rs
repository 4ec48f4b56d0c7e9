//! Per-route rewriting of the base document's SEO tags.
//!
//! Each of [`TagKey::REWRITTEN`] is replaced independently at its first
//! occurrence. A tag that is absent is left alone and reported in
//! [`Rewrite::missing`]; nothing else in the document changes.
//!
//! Values are inserted verbatim: the route table is trusted input, so
//! quotes and angle brackets are not escaped.

use super::{TagKey, canonical_url};
use crate::config::RouteMeta;
use regex::NoExpand;

/// Result of rewriting one route's document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub html: String,
    /// Tags that had no match in the base document.
    pub missing: Vec<TagKey>,
}

/// Content a route assigns to a rewritten tag.
fn route_value<'a>(key: TagKey, route: &'a RouteMeta, url: &'a str) -> Option<&'a str> {
    match key {
        TagKey::Title | TagKey::OgTitle | TagKey::TwitterTitle => Some(route.title.as_str()),
        TagKey::Description | TagKey::OgDescription | TagKey::TwitterDescription => {
            Some(route.description.as_str())
        }
        TagKey::Canonical | TagKey::OgUrl => Some(url),
        TagKey::OgImage | TagKey::TwitterImage => Some(route.image.as_str()),
        TagKey::OgType | TagKey::OgLocale | TagKey::OgSiteName | TagKey::TwitterCard => None,
    }
}

/// Rewrite `document` for `route`, with canonical URLs rooted at `site_url`.
pub fn rewrite(document: &str, route: &RouteMeta, site_url: &str) -> Rewrite {
    let url = canonical_url(site_url, &route.path);
    let mut html = document.to_string();
    let mut missing = Vec::new();

    for key in TagKey::REWRITTEN {
        let Some(value) = route_value(key, route, &url) else {
            continue;
        };
        let pattern = key.pattern();
        if !pattern.is_match(&html) {
            missing.push(key);
            continue;
        }
        let tag = key.render(value);
        html = pattern.replace(&html, NoExpand(&tag)).into_owned();
    }

    Rewrite { html, missing }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults;

    const SITE: &str = "https://manidina.me";

    /// Head shape emitted by the bundler for the home page.
    const BASE: &str = r#"<!doctype html>
<html lang="fr">
  <head>
    <meta charset="UTF-8" />
    <title>Manidina | Solutions Numériques</title>
    <meta name="description" content="Accueil" />
    <link rel="canonical" href="https://manidina.me/" />
    <meta property="og:type" content="website" />
    <meta property="og:title" content="Manidina" />
    <meta property="og:description" content="Accueil" />
    <meta property="og:url" content="https://manidina.me/" />
    <meta property="og:image" content="https://manidina.me/logo.png" />
    <meta name="twitter:card" content="summary" />
    <meta name="twitter:title" content="Manidina" />
    <meta name="twitter:description" content="Accueil" />
    <meta name="twitter:image" content="https://manidina.me/logo.png" />
    <script type="module" crossorigin src="/assets/index.js"></script>
  </head>
  <body><div id="root"></div></body>
</html>
"#;

    fn contact() -> RouteMeta {
        RouteMeta::new("/contact", "Contact Page", "D", "https://ex/im.png")
    }

    #[test]
    fn test_rewrite_minimal_title() {
        let out = rewrite("<title>X</title>", &contact(), SITE);
        assert_eq!(out.html, "<title>Contact Page</title>");
        assert_eq!(out.missing.len(), 9);
        assert!(!out.missing.contains(&TagKey::Title));
    }

    #[test]
    fn test_rewrite_full_head() {
        let out = rewrite(BASE, &contact(), SITE);

        assert!(out.missing.is_empty());
        assert!(out.html.contains("<title>Contact Page</title>"));
        assert_eq!(out.html.matches("<title>").count(), 1);
        assert!(out.html.contains(r#"<link rel="canonical" href="https://manidina.me/contact" />"#));
        assert!(out.html.contains(r#"<meta name="description" content="D" />"#));
        assert!(out.html.contains(r#"<meta property="og:title" content="Contact Page" />"#));
        assert!(out.html.contains(r#"<meta property="og:description" content="D" />"#));
        assert!(out.html.contains(r#"<meta property="og:url" content="https://manidina.me/contact" />"#));
        assert!(out.html.contains(r#"<meta property="og:image" content="https://ex/im.png" />"#));
        assert!(out.html.contains(r#"<meta name="twitter:title" content="Contact Page" />"#));
        assert!(out.html.contains(r#"<meta name="twitter:description" content="D" />"#));
        assert!(out.html.contains(r#"<meta name="twitter:image" content="https://ex/im.png" />"#));
    }

    #[test]
    fn test_rewrite_leaves_other_content_untouched() {
        let out = rewrite(BASE, &contact(), SITE);
        assert!(out.html.starts_with("<!doctype html>\n<html lang=\"fr\">"));
        assert!(out.html.contains(r#"<meta property="og:type" content="website" />"#));
        assert!(out.html.contains(r#"<meta name="twitter:card" content="summary" />"#));
        assert!(out.html.contains(r#"<script type="module" crossorigin src="/assets/index.js"></script>"#));
        assert!(out.html.ends_with("<body><div id=\"root\"></div></body>\n</html>\n"));
        assert_eq!(out.html.lines().count(), BASE.lines().count());
    }

    #[test]
    fn test_rewrite_every_default_route() {
        for route in defaults::routes::table() {
            let out = rewrite(BASE, &route, SITE);
            let title = format!("<title>{}</title>", route.title);
            let canonical = format!(
                r#"<link rel="canonical" href="https://manidina.me{}" />"#,
                route.path
            );
            assert!(out.html.contains(&title), "{}", route.path);
            assert!(out.html.contains(&canonical), "{}", route.path);
            assert!(!out.html.contains("manidina.me//"));
        }
    }

    #[test]
    fn test_rewrite_site_url_trailing_slash() {
        let out = rewrite(BASE, &contact(), "https://manidina.me/");
        assert!(out.html.contains(r#"href="https://manidina.me/contact""#));
    }

    #[test]
    fn test_rewrite_without_canonical() {
        let base = BASE.replace("    <link rel=\"canonical\" href=\"https://manidina.me/\" />\n", "");
        let out = rewrite(&base, &contact(), SITE);

        assert_eq!(out.missing, vec![TagKey::Canonical]);
        assert!(!out.html.contains("rel=\"canonical\""));
        assert!(out.html.contains("<title>Contact Page</title>"));
        assert!(out.html.contains(r#"<meta property="og:url" content="https://manidina.me/contact" />"#));
    }

    #[test]
    fn test_rewrite_values_not_escaped_or_expanded() {
        let route = RouteMeta::new("/prix", "Tarifs $1 & <b>plus</b>", "Dès 10$ \"TTC\"", "https://ex/a.png");
        let out = rewrite(BASE, &route, SITE);
        assert!(out.html.contains("<title>Tarifs $1 & <b>plus</b></title>"));
        assert!(out.html.contains(r#"<meta name="description" content="Dès 10$ "TTC"" />"#));
    }

    #[test]
    fn test_rewrite_first_occurrence_only() {
        let base = "<title>A</title><title>B</title>";
        let out = rewrite(base, &contact(), SITE);
        assert_eq!(out.html, "<title>Contact Page</title><title>B</title>");
    }

    #[test]
    fn test_rewrite_is_pure() {
        let a = rewrite(BASE, &contact(), SITE);
        let b = rewrite(BASE, &contact(), SITE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rewrite_empty_document() {
        let out = rewrite("", &contact(), SITE);
        assert_eq!(out.html, "");
        assert_eq!(out.missing, TagKey::REWRITTEN.to_vec());
    }
}
