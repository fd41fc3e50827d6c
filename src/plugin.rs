//! Plugin surface towards the host.

use std::collections::BTreeMap;

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

use crate::{
    activity::Activity,
    dialog::UiElement,
    error::ProviderError,
    field::CommandProperty,
    prelude::*,
    request::ApiUrl,
    setting::Setting,
    table::Table,
    value::{ValueMap, Variables},
};

#[derive(Debug, Serialize, Deserialize, EnumSetType)]
#[enumset(serialize_repr = "list")]
pub enum SupportedInterface {
    Url,
    Serial,
    Tcp,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Protocol {
    Http,
    Modbus,
    Mqtt,
}

/// Optional provider behaviour the host may rely on.
#[derive(Debug, Serialize, Deserialize, EnumSetType)]
#[enumset(serialize_repr = "list")]
pub enum Capability {
    BuildRequest,
    TestConnection,
    HandleResponse,
}

/// Static plugin metadata.
#[derive(Debug, Serialize)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub url: &'static str,
    pub svg_image: &'static str,
    pub interfaces: EnumSet<SupportedInterface>,
    pub protocol: Protocol,

    /// Human-readable name of the supported device or service.
    pub supports: &'static str,

    pub capabilities: EnumSet<Capability>,
}

pub trait Provider {
    fn descriptor(&self) -> &'static PluginDescriptor;

    fn default_setting(&self) -> Setting;

    fn default_activity(&self) -> Activity {
        Activity::default()
    }

    fn dialog(&self) -> Vec<UiElement>;

    fn supported_properties(&self) -> Vec<CommandProperty>;

    fn default_tables(&self) -> Vec<Table>;

    /// Resolve the property's command into a request URL.
    fn build_request(
        &self,
        property: &CommandProperty,
        setting: &Setting,
    ) -> Result<ApiUrl, ProviderError>;

    /// Validate and transform the flattened response in place.
    fn handle_response(&self, values: &mut ValueMap) -> Result<(), ProviderError>;

    /// Check that the setting allows to reach the service, and return a localized message.
    fn test_connection(&self, setting: &Setting) -> Result<String, ProviderError>;

    /// Run one activity tick. The variables are left untouched on error.
    fn do_activity_work(
        &self,
        setting: &Setting,
        variables: &mut Variables,
    ) -> Result<(), ProviderError>;
}

/// Providers known to the host, by name.
#[derive(Default)]
pub struct PluginRegistry {
    providers: BTreeMap<&'static str, Box<dyn Provider>>,
}

impl PluginRegistry {
    pub fn register(&mut self, provider: Box<dyn Provider>) -> Result {
        let descriptor = provider.descriptor();
        ensure!(
            !self.providers.contains_key(descriptor.name),
            "plugin `{}` is already registered",
            descriptor.name,
        );
        info!(name = descriptor.name, version = descriptor.version, "registered");
        self.providers.insert(descriptor.name, provider);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Provider> {
        self.providers.get(name).map(|provider| &**provider)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &'static PluginDescriptor> {
        self.providers.values().map(|provider| provider.descriptor())
    }
}

#[cfg(test)]
mod tests {
    use enumset::enum_set;

    use super::*;

    static DUMMY: PluginDescriptor = PluginDescriptor {
        name: "Dummy",
        version: "0.0.0",
        author: "nobody",
        url: "https://example.com",
        svg_image: "dummy.svg",
        interfaces: enum_set!(SupportedInterface::Tcp),
        protocol: Protocol::Modbus,
        supports: "nothing",
        capabilities: EnumSet::empty(),
    };

    struct Dummy;

    impl Provider for Dummy {
        fn descriptor(&self) -> &'static PluginDescriptor {
            &DUMMY
        }

        fn default_setting(&self) -> Setting {
            Setting::builder().provider_host("localhost").build()
        }

        fn dialog(&self) -> Vec<UiElement> {
            Vec::new()
        }

        fn supported_properties(&self) -> Vec<CommandProperty> {
            Vec::new()
        }

        fn default_tables(&self) -> Vec<Table> {
            Vec::new()
        }

        fn build_request(&self, _: &CommandProperty, _: &Setting) -> Result<ApiUrl, ProviderError> {
            ApiUrl::parse("http://localhost/")
        }

        fn handle_response(&self, _: &mut ValueMap) -> Result<(), ProviderError> {
            Ok(())
        }

        fn test_connection(&self, _: &Setting) -> Result<String, ProviderError> {
            Ok("ok".to_owned())
        }

        fn do_activity_work(&self, _: &Setting, _: &mut Variables) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    #[test]
    fn register_ok() -> Result {
        let mut registry = PluginRegistry::default();
        registry.register(Box::new(Dummy))?;
        let provider = registry.get("Dummy").context("not registered")?;
        assert_eq!(provider.descriptor().protocol, Protocol::Modbus);
        assert_eq!(provider.default_activity(), Activity::default());
        assert_eq!(registry.descriptors().count(), 1);
        assert!(registry.get("Solarprognose").is_none());
        Ok(())
    }

    #[test]
    fn descriptor_sets_deserialize() -> Result {
        let capabilities: EnumSet<Capability> =
            serde_json::from_str(r#"["TestConnection", "BuildRequest"]"#)?;
        assert_eq!(capabilities, Capability::BuildRequest | Capability::TestConnection);
        let json = serde_json::to_string(&DUMMY.interfaces)?;
        let interfaces: EnumSet<SupportedInterface> = serde_json::from_str(&json)?;
        assert_eq!(interfaces, DUMMY.interfaces);
        Ok(())
    }

    #[test]
    fn register_twice_fails() -> Result {
        let mut registry = PluginRegistry::default();
        registry.register(Box::new(Dummy))?;
        assert!(registry.register(Box::new(Dummy)).is_err());
        Ok(())
    }
}
