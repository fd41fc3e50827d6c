//! Provider configuration as persisted by the host.

use std::{collections::BTreeMap, path::Path, time::Duration};

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::prelude::*;

pub const TOKEN: &str = "token";
pub const ELEMENT_ID: &str = "elementid";
pub const ALGORITHM: &str = "algorithm";
pub const ITEM: &str = "item";

/// Valid values of the [`ALGORITHM`] configuration value, the empty one meaning «server default».
pub const ALGORITHMS: [&str; 3] = ["", "own-v1", "mosmix"];

#[must_use]
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct Setting {
    #[builder(into)]
    #[serde(default)]
    pub provider_host: String,

    #[builder(default = Setting::DEFAULT_PORT)]
    #[serde(default = "Setting::default_port")]
    pub provider_port: u16,

    #[builder(default = Setting::DEFAULT_READ_TIMEOUT)]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    #[serde(rename = "read_timeout_ms", default = "Setting::default_read_timeout")]
    pub read_timeout: Duration,

    /// Provider-specific values like [`TOKEN`] or [`ELEMENT_ID`].
    #[builder(default)]
    #[serde(default)]
    pub configuration: BTreeMap<String, String>,
}

impl Setting {
    pub const DEFAULT_PORT: u16 = 80;
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(5000);

    const fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    const fn default_read_timeout() -> Duration {
        Self::DEFAULT_READ_TIMEOUT
    }

    #[must_use]
    pub fn configuration_value(&self, name: &str) -> Option<&str> {
        self.configuration.get(name).map(String::as_str)
    }

    pub fn set_configuration_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.configuration.insert(name.into(), value.into());
    }

    pub fn with_configuration_value(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_configuration_value(name, value);
        self
    }

    /// Replace the values present in the overlay, and merge the configuration.
    pub fn overlay(mut self, overlay: SettingOverlay) -> Self {
        if let Some(provider_host) = overlay.provider_host {
            self.provider_host = provider_host;
        }
        if let Some(provider_port) = overlay.provider_port {
            self.provider_port = provider_port;
        }
        if let Some(read_timeout) = overlay.read_timeout {
            self.read_timeout = read_timeout;
        }
        self.configuration.extend(overlay.configuration);
        self
    }
}

/// Partial [`Setting`] as written in a settings file, every value optional.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SettingOverlay {
    pub provider_host: Option<String>,

    pub provider_port: Option<u16>,

    #[serde_as(as = "Option<serde_with::DurationMilliSeconds<u64>>")]
    #[serde(rename = "read_timeout_ms", default)]
    pub read_timeout: Option<Duration>,

    #[serde(default)]
    pub configuration: BTreeMap<String, String>,
}

impl SettingOverlay {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse `{}`", path.display()))
    }
}
