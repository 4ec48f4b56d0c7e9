//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

/// Config file looked up in the root when `--config` is not given.
pub const CONFIG_FILE: &str = "prerender.toml";

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn url() -> String {
        "https://manidina.me".into()
    }

    pub fn name() -> String {
        "Manidina".into()
    }

    pub fn locale() -> String {
        "fr_FR".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn base() -> PathBuf {
        "index.html".into()
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }
}

// ============================================================================
// [[routes]] Defaults
// ============================================================================

pub mod routes {
    use super::super::RouteMeta;

    /// The route table shipped with the site.
    pub fn table() -> Vec<RouteMeta> {
        vec![
            RouteMeta::new(
                "/projets",
                "Projets | Manidina - Solutions Numériques Déployées",
                "Découvrez les projets réalisés par Manidina : Express Sale, Soaharilandy, et d'autres solutions numériques pour entreprises à Madagascar.",
                "https://manidina.me/express_sale_logo.jpg",
            ),
            RouteMeta::new(
                "/portfolio",
                "Portfolio | Christian HERIMANANTSOA - Développeur Full Stack & IA",
                "Portfolio de Christian HERIMANANTSOA : compétences en React, Python, IA, automatisation. Projets déployés en production à Madagascar.",
                "https://manidina.me/images/profile.jpeg",
            ),
            RouteMeta::new(
                "/contact",
                "Contact | Manidina - Christian HERIMANANTSOA",
                "Contactez Manidina pour vos projets numériques. Email : contact@manidina.me. Basé à Antananarivo, Madagascar.",
                "https://manidina.me/logo.png",
            ),
        ]
    }
}

// ============================================================================
// [contact] Section Defaults
// ============================================================================

pub mod contact {
    pub fn endpoint() -> String {
        "https://api.emailjs.com/api/v1.0/email/send".into()
    }

    pub fn service_id() -> String {
        "service_crkl0lk".into()
    }

    pub fn admin_template() -> String {
        "template_received".into()
    }

    pub fn reply_template() -> String {
        "template_reply".into()
    }

    pub fn public_key() -> String {
        "ALDptbdckCv1GcLKe".into()
    }
}
