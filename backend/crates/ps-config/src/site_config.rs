use crate::{DEFAULT_SITE_NAME, DEFAULT_SITE_URL};

use serde::Deserialize;

/// Site identity exposed to templates (`{{site_name}}`, `{{site_description}}`)
/// and stamped into session exports.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_SITE_NAME),
            description: String::new(),
            url: String::from(DEFAULT_SITE_URL),
        }
    }
}
