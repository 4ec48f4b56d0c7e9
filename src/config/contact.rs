//! `[contact]` section configuration.
//!
//! Identifiers of the transactional-email service the contact form relays
//! through. The public key is meant to ship to browsers, so it is not a secret.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[contact]` section in prerender.toml.
///
/// # Example
/// ```toml
/// [contact]
/// service_id = "service_crkl0lk"
/// admin_template = "template_received"
/// reply_template = "template_reply"
/// public_key = "ALDptbdckCv1GcLKe"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Send endpoint of the email service.
    #[serde(default = "defaults::contact::endpoint")]
    #[educe(Default = defaults::contact::endpoint())]
    pub endpoint: String,

    #[serde(default = "defaults::contact::service_id")]
    #[educe(Default = defaults::contact::service_id())]
    pub service_id: String,

    /// Template of the notification the site owner receives.
    #[serde(default = "defaults::contact::admin_template")]
    #[educe(Default = defaults::contact::admin_template())]
    pub admin_template: String,

    /// Template of the auto-reply the visitor receives.
    #[serde(default = "defaults::contact::reply_template")]
    #[educe(Default = defaults::contact::reply_template())]
    pub reply_template: String,

    #[serde(default = "defaults::contact::public_key")]
    #[educe(Default = defaults::contact::public_key())]
    pub public_key: String,
}
