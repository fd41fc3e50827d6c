use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use solarprognose::{
    prelude::*,
    setting::{ALGORITHM, ELEMENT_ID, ITEM, Setting, SettingOverlay, TOKEN},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Algorithm {
    /// Let the server choose.
    ServerDefault,

    OwnV1,
    Mosmix,
}

impl Algorithm {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServerDefault => "",
            Self::OwnV1 => "own-v1",
            Self::Mosmix => "mosmix",
        }
    }
}

/// Provider setting: the plugin defaults, overlaid by the settings file, overlaid by the flags.
#[derive(Parser)]
pub struct SettingArgs {
    /// TOML file with the persisted setting.
    #[clap(long = "settings", env = "SOLARPROGNOSE_SETTINGS")]
    settings_path: Option<PathBuf>,

    #[clap(long = "host", env = "SOLARPROGNOSE_HOST")]
    provider_host: Option<String>,

    #[clap(long, env = "SOLARPROGNOSE_READ_TIMEOUT")]
    read_timeout: Option<humantime::Duration>,

    #[clap(long, env = "SOLARPROGNOSE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Plant, inverter, or module field ID.
    #[clap(long, env = "SOLARPROGNOSE_ELEMENT_ID")]
    element_id: Option<u64>,

    #[clap(long, env = "SOLARPROGNOSE_ALGORITHM", value_enum)]
    algorithm: Option<Algorithm>,

    #[clap(long, env = "SOLARPROGNOSE_ITEM")]
    item: Option<String>,
}

impl SettingArgs {
    pub fn resolve(&self, defaults: Setting) -> Result<Setting> {
        let mut setting = match &self.settings_path {
            Some(path) => defaults.overlay(SettingOverlay::read_from(path)?),
            None => defaults,
        };
        if let Some(host) = &self.provider_host {
            setting.provider_host.clone_from(host);
        }
        if let Some(read_timeout) = &self.read_timeout {
            setting.read_timeout = **read_timeout;
        }
        if let Some(token) = &self.token {
            setting.set_configuration_value(TOKEN, token);
        }
        if let Some(element_id) = self.element_id {
            setting.set_configuration_value(ELEMENT_ID, element_id.to_string());
        }
        if let Some(algorithm) = self.algorithm {
            setting.set_configuration_value(ALGORITHM, algorithm.as_str());
        }
        if let Some(item) = &self.item {
            setting.set_configuration_value(ITEM, item);
        }
        ensure!(!setting.provider_host.is_empty(), "the provider host is not set");
        Ok(setting)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[derive(Parser)]
    struct Args {
        #[clap(flatten)]
        setting: SettingArgs,
    }

    fn defaults() -> Setting {
        Setting::builder()
            .provider_host("www.solarprognose.de")
            .build()
            .with_configuration_value(ALGORITHM, "mosmix")
    }

    #[test]
    fn resolve_ok() -> Result {
        let args = Args::try_parse_from([
            "test",
            "--token",
            "12345",
            "--element-id",
            "815",
            "--algorithm",
            "server-default",
            "--read-timeout",
            "2s 500ms",
        ])?;
        let setting = args.setting.resolve(defaults())?;
        assert_eq!(setting.provider_host, "www.solarprognose.de");
        assert_eq!(setting.read_timeout, Duration::from_millis(2500));
        assert_eq!(setting.configuration_value(TOKEN), Some("12345"));
        assert_eq!(setting.configuration_value(ELEMENT_ID), Some("815"));
        assert_eq!(setting.configuration_value(ALGORITHM), Some(""));
        assert_eq!(setting.configuration_value(ITEM), None);
        Ok(())
    }

    #[test]
    fn settings_file_overlays_defaults() -> Result {
        let path = std::env::temp_dir()
            .join(format!("solarprognose-settings-{}.toml", std::process::id()));
        let args = Args::try_parse_from([
            "test",
            "--settings",
            path.to_str().context("non-UTF-8 temporary path")?,
            "--item",
            "inverter",
        ])?;
        std::fs::write(&path, "[configuration]\ntoken = \"12345\"\nelementid = \"0815\"\n")?;
        let setting = args.setting.resolve(defaults());
        std::fs::remove_file(&path)?;

        let setting = setting?;
        assert_eq!(setting.provider_host, "www.solarprognose.de");
        assert_eq!(setting.configuration_value(TOKEN), Some("12345"));
        assert_eq!(setting.configuration_value(ELEMENT_ID), Some("0815"));
        assert_eq!(setting.configuration_value(ALGORITHM), Some("mosmix"));
        assert_eq!(setting.configuration_value(ITEM), Some("inverter"));
        Ok(())
    }

    #[test]
    fn port_flag_is_rejected() {
        assert!(Args::try_parse_from(["test", "--port", "8080"]).is_err());
    }

    #[test]
    fn empty_host_fails() -> Result {
        let args = Args::try_parse_from(["test", "--host", ""])?;
        assert!(args.setting.resolve(defaults()).is_err());
        Ok(())
    }
}
