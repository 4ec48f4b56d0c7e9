//! `[site]` section configuration.
//!
//! Identity of the deployed site: the domain canonical links point at, plus
//! the name and locale announced to Open Graph crawlers.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in prerender.toml.
///
/// # Example
/// ```toml
/// [site]
/// url = "https://manidina.me"
/// name = "Manidina"
/// locale = "fr_FR"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    /// Scheme and domain of the production site, without path.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: String,

    /// Value of `og:site_name`.
    #[serde(default = "defaults::site::name")]
    #[educe(Default = defaults::site::name())]
    pub name: String,

    /// Value of `og:locale`.
    #[serde(default = "defaults::site::locale")]
    #[educe(Default = defaults::site::locale())]
    pub locale: String,
}
