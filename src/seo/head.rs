//! Head state for client-side navigations.
//!
//! [`Head`] is a keyed upsert map from [`TagKey`] to content: setting a key
//! that exists overwrites its content, setting one that does not appends
//! it. A key therefore never holds more than one element.
//!
//! [`MetaInjector`] owns a head and re-synchronizes it whenever the page's
//! title, description, URL or image change, so a new route fully
//! supersedes the previous one's values.
//!
//! # Example
//!
//! ```ignore
//! let mut injector = MetaInjector::new(config.site.clone());
//! injector.sync(&SeoProps::new("Contact", "Écrivez-nous").with_path("/contact"));
//! let html = injector.head().apply(&document);
//! ```

use super::{TagKey, absolute_image, canonical_url};
use crate::config::{RouteMeta, SiteIdentity};
use regex::NoExpand;

// ============================================================================
// Head
// ============================================================================

/// Managed `<head>` tags, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
    tags: Vec<(TagKey, String)>,
}

impl Head {
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Set the content of `key`, creating the tag if absent.
    ///
    /// Returns `true` if the tag was created.
    pub fn upsert(&mut self, key: TagKey, content: impl Into<String>) -> bool {
        let content = content.into();
        match self.tags.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                *existing = content;
                false
            }
            None => {
                self.tags.push((key, content));
                true
            }
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.upsert(TagKey::Title, title);
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagKey, &str)> {
        self.tags.iter().map(|(k, c)| (*k, c.as_str()))
    }

    /// Serialize the managed tags, one per line.
    pub fn render(&self) -> String {
        self.iter()
            .map(|(key, content)| render_escaped(key, content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Keys of this head that `document` has no element for, in head order.
    pub fn missing_from(&self, document: &str) -> Vec<TagKey> {
        self.iter()
            .map(|(key, _)| key)
            .filter(|key| !key.pattern().is_match(document))
            .collect()
    }

    /// Insert only the tags the document lacks; present tags are untouched.
    pub fn insert_missing(&self, document: &str) -> String {
        self.sync_text(document, false)
    }

    fn sync_text(&self, document: &str, replace: bool) -> String {
        let mut html = document.to_string();
        let mut appended = String::new();

        for (key, content) in self.iter() {
            let tag = render_escaped(key, content);
            let pattern = key.pattern();
            if !pattern.is_match(&html) {
                appended.push_str(&tag);
                appended.push('\n');
            } else if replace {
                html = pattern.replace(&html, NoExpand(&tag)).into_owned();
            }
        }

        if !appended.is_empty()
            && let Some(pos) = html.find("</head>")
        {
            html.insert_str(pos, &appended);
        }
        html
    }
}

/// Lookups used when a head is read back rather than written out.
#[allow(unused)]
impl Head {
    pub fn title(&self) -> Option<&str> {
        self.get(TagKey::Title)
    }

    pub fn get(&self, key: TagKey) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, content)| content.as_str())
    }

    /// Number of elements held for `key` (0 or 1).
    pub fn count(&self, key: TagKey) -> usize {
        self.tags.iter().filter(|(k, _)| *k == key).count()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Synchronize onto document text: replace each present tag, insert
    /// absent ones before `</head>`.
    ///
    /// Applying the same head twice gives the same text as applying it once.
    /// Without a `</head>`, absent tags are dropped.
    pub fn apply(&self, document: &str) -> String {
        self.sync_text(document, true)
    }
}

/// Render a tag the way a DOM serializer would: markup characters escaped.
fn render_escaped(key: TagKey, content: &str) -> String {
    key.render(&escape_html(content))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ============================================================================
// Injector
// ============================================================================

/// Inputs of one page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoProps {
    pub title: String,
    pub description: String,
    /// Route path, `/` by default.
    pub path: String,
    /// Preview image, absolute or site-relative. `/logo.png` by default.
    pub image: String,
}

impl SeoProps {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            path: "/".into(),
            image: "/logo.png".into(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

impl From<&RouteMeta> for SeoProps {
    fn from(route: &RouteMeta) -> Self {
        Self::new(&route.title, &route.description)
            .with_path(&route.path)
            .with_image(&route.image)
    }
}

/// Values the injector re-runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Deps {
    title: String,
    description: String,
    url: String,
    image: String,
}

/// Keeps a [`Head`] in sync with the current page's [`SeoProps`].
#[derive(Debug, Clone)]
pub struct MetaInjector {
    site: SiteIdentity,
    head: Head,
    last: Option<Deps>,
}

impl MetaInjector {
    pub fn new(site: SiteIdentity) -> Self {
        Self::with_head(site, Head::new())
    }

    /// Manage an existing head (e.g. tags already parsed from the page).
    pub fn with_head(site: SiteIdentity, head: Head) -> Self {
        Self {
            site,
            head,
            last: None,
        }
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn into_head(self) -> Head {
        self.head
    }

    /// Re-synchronize the head if any input changed since the last run.
    ///
    /// Returns whether the head was written.
    pub fn sync(&mut self, props: &SeoProps) -> bool {
        let deps = Deps {
            title: props.title.clone(),
            description: props.description.clone(),
            url: canonical_url(&self.site.url, &props.path),
            image: absolute_image(&self.site.url, &props.image),
        };
        if self.last.as_ref() == Some(&deps) {
            return false;
        }

        let head = &mut self.head;
        head.set_title(&deps.title);
        head.upsert(TagKey::Description, &deps.description);
        head.upsert(TagKey::Canonical, &deps.url);

        head.upsert(TagKey::OgTitle, &deps.title);
        head.upsert(TagKey::OgDescription, &deps.description);
        head.upsert(TagKey::OgUrl, &deps.url);
        head.upsert(TagKey::OgImage, &deps.image);
        head.upsert(TagKey::OgType, "website");
        head.upsert(TagKey::OgLocale, &self.site.locale);
        head.upsert(TagKey::OgSiteName, &self.site.name);

        head.upsert(TagKey::TwitterCard, "summary");
        head.upsert(TagKey::TwitterTitle, &deps.title);
        head.upsert(TagKey::TwitterDescription, &deps.description);
        head.upsert(TagKey::TwitterImage, &deps.image);

        self.last = Some(deps);
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn injector() -> MetaInjector {
        MetaInjector::new(SiteIdentity::default())
    }

    fn contact() -> SeoProps {
        SeoProps::new("Contact", "Écrivez-nous").with_path("/contact")
    }

    #[test]
    fn test_upsert_creates_then_updates() {
        let mut head = Head::new();
        assert!(head.upsert(TagKey::OgTitle, "a"));
        assert!(!head.upsert(TagKey::OgTitle, "b"));
        assert_eq!(head.get(TagKey::OgTitle), Some("b"));
        assert_eq!(head.count(TagKey::OgTitle), 1);
        assert_eq!(head.len(), 1);
    }

    #[test]
    fn test_sync_sets_every_tag() {
        let mut injector = injector();
        assert!(injector.sync(&contact()));

        let head = injector.head();
        assert_eq!(head.len(), TagKey::ALL.len());
        assert_eq!(head.title(), Some("Contact"));
        assert_eq!(head.get(TagKey::Canonical), Some("https://manidina.me/contact"));
        assert_eq!(head.get(TagKey::OgUrl), Some("https://manidina.me/contact"));
        assert_eq!(head.get(TagKey::OgImage), Some("https://manidina.me/logo.png"));
        assert_eq!(head.get(TagKey::TwitterImage), Some("https://manidina.me/logo.png"));
        assert_eq!(head.get(TagKey::OgType), Some("website"));
        assert_eq!(head.get(TagKey::OgLocale), Some("fr_FR"));
        assert_eq!(head.get(TagKey::OgSiteName), Some("Manidina"));
        assert_eq!(head.get(TagKey::TwitterCard), Some("summary"));
    }

    #[test]
    fn test_sync_twice_no_duplicates() {
        let mut injector = injector();
        injector.sync(&contact());
        let first = injector.head().clone();

        assert!(!injector.sync(&contact()));
        assert_eq!(injector.head(), &first);
        for key in TagKey::ALL {
            assert_eq!(injector.head().count(key), 1, "{key}");
        }
    }

    #[test]
    fn test_sync_new_route_supersedes_previous() {
        let mut injector = injector();
        injector.sync(&contact());
        let projets = SeoProps::new("Projets", "Nos réalisations")
            .with_path("/projets")
            .with_image("https://manidina.me/express_sale_logo.jpg");
        assert!(injector.sync(&projets));

        let head = injector.head();
        assert_eq!(head.len(), TagKey::ALL.len());
        assert_eq!(head.title(), Some("Projets"));
        assert_eq!(head.get(TagKey::TwitterTitle), Some("Projets"));
        assert_eq!(head.get(TagKey::OgDescription), Some("Nos réalisations"));
        assert_eq!(head.get(TagKey::OgUrl), Some("https://manidina.me/projets"));
        assert_eq!(
            head.get(TagKey::OgImage),
            Some("https://manidina.me/express_sale_logo.jpg")
        );
        assert!(head.iter().all(|(_, c)| !c.contains("contact")));
    }

    #[test]
    fn test_sync_defaults_to_home() {
        let mut injector = injector();
        injector.sync(&SeoProps::new("Accueil", "Bienvenue"));
        assert_eq!(injector.head().get(TagKey::Canonical), Some("https://manidina.me/"));
    }

    #[test]
    fn test_props_from_route() {
        let route = RouteMeta::new("/contact", "C", "D", "https://manidina.me/logo.png");
        let props = SeoProps::from(&route);
        assert_eq!(props.path, "/contact");
        assert_eq!(props.image, "https://manidina.me/logo.png");
    }

    #[test]
    fn test_apply_replaces_and_inserts() {
        let mut injector = injector();
        injector.sync(&contact());
        let doc = "<html><head>\n<title>Old</title>\n<meta name=\"description\" content=\"old\">\n</head><body></body></html>";

        let html = injector.head().apply(doc);
        assert!(html.contains("<title>Contact</title>"));
        assert!(html.contains(r#"<meta name="description" content="Écrivez-nous" />"#));
        assert!(!html.contains("old"));
        assert!(html.contains(r#"<link rel="canonical" href="https://manidina.me/contact" />"#));
        assert_eq!(html.matches("<title>").count(), 1);
        assert!(html.ends_with("</head><body></body></html>"));
    }

    #[test]
    fn test_apply_idempotent() {
        let mut injector = injector();
        injector.sync(&SeoProps::new("A & \"B\" <c>", "d").with_path("/a"));
        let doc = "<head></head>";

        let once = injector.head().apply(doc);
        let twice = injector.head().apply(&once);
        assert_eq!(once, twice);
        assert_eq!(once.matches("<meta ").count(), TagKey::ALL.len() - 2);
        assert!(once.contains("<title>A &amp; &quot;B&quot; &lt;c&gt;</title>"));
    }

    #[test]
    fn test_apply_without_head_close() {
        let mut head = Head::new();
        head.set_title("T");
        head.upsert(TagKey::OgType, "website");
        assert_eq!(head.apply("<title>x</title>"), "<title>T</title>");
    }

    #[test]
    fn test_insert_missing_keeps_present_tags() {
        let mut head = Head::new();
        head.set_title("New");
        head.upsert(TagKey::OgType, "website");
        let html = head.insert_missing("<head><title>Kept</title></head>");
        assert_eq!(
            html,
            "<head><title>Kept</title><meta property=\"og:type\" content=\"website\" />\n</head>"
        );
    }

    #[test]
    fn test_missing_from_lists_absent_keys_in_head_order() {
        let mut injector = injector();
        injector.sync(&contact());
        let doc = "<head><title>x</title><meta property=\"og:type\" content=\"article\" /></head>";

        let missing = injector.head().missing_from(doc);
        assert_eq!(missing.len(), TagKey::ALL.len() - 2);
        assert!(!missing.contains(&TagKey::Title));
        assert!(!missing.contains(&TagKey::OgType));
        assert_eq!(missing[0], TagKey::Description);
        assert_eq!(missing.last(), Some(&TagKey::TwitterImage));
    }

    #[test]
    fn test_render() {
        let mut head = Head::new();
        head.set_title("T");
        head.upsert(TagKey::Canonical, "https://x.io/");
        assert_eq!(
            head.render(),
            "<title>T</title>\n<link rel=\"canonical\" href=\"https://x.io/\" />"
        );
    }
}
