//! [Solarprognose](https://www.solarprognose.de) hourly forecast provider.

use enumset::enum_set;

use crate::{
    clock::{Clock, SystemClock},
    connection::{ConnectionFactory, HttpConnection, UreqConnectionFactory},
    dialog::{UiElement, provider_dialog},
    error::ProviderError,
    extractor::{FieldExtractor, MapExtractor},
    field::{CommandProperty, hourly_forecast_fields},
    i18n::{Catalogue, Locale, MessageKey},
    mapper,
    plugin::{Capability, PluginDescriptor, PluginRegistry, Protocol, Provider, SupportedInterface},
    prelude::*,
    request::{ApiUrl, BASE_URL, build_api_url},
    setting::{ALGORITHM, ITEM, Setting},
    table::Table,
    value::{ValueMap, Variables},
};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    name: "Solarprognose",
    version: env!("CARGO_PKG_VERSION"),
    author: "Stefan Töngi",
    url: "https://github.com/solarreader-plugins/plugin-Solarprognose",
    svg_image: "solarprognose.svg",
    interfaces: enum_set!(SupportedInterface::Url),
    protocol: Protocol::Http,
    supports: "Solarprognose V1",
    capabilities: enum_set!(
        Capability::BuildRequest | Capability::TestConnection | Capability::HandleResponse
    ),
};

pub const DEFAULT_HOST: &str = "www.solarprognose.de";

/// Register the provider with the production transport and clock.
pub fn register(registry: &mut PluginRegistry, locale: Locale) -> Result {
    registry.register(Box::new(Solarprognose::new(locale)?))
}

pub struct Solarprognose<F = UreqConnectionFactory, C = SystemClock> {
    connection_factory: F,
    clock: C,
    extractor: Box<dyn FieldExtractor>,
    catalogue: Catalogue,
}

impl Solarprognose {
    pub fn new(locale: Locale) -> Result<Self> {
        Self::with_parts(UreqConnectionFactory, SystemClock, locale)
    }
}

impl<F, C> Solarprognose<F, C> {
    pub fn with_parts(connection_factory: F, clock: C, locale: Locale) -> Result<Self> {
        Ok(Self {
            connection_factory,
            clock,
            extractor: Box::new(MapExtractor),
            catalogue: Catalogue::new(locale)?,
        })
    }

    /// Replace the default [`MapExtractor`].
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl FieldExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }
}

impl<F: ConnectionFactory, C: Clock> Provider for Solarprognose<F, C> {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }

    fn default_setting(&self) -> Setting {
        Setting::builder()
            .provider_host(DEFAULT_HOST)
            .build()
            .with_configuration_value(ALGORITHM, "mosmix")
            .with_configuration_value(ITEM, "plant")
    }

    fn dialog(&self) -> Vec<UiElement> {
        provider_dialog(&self.catalogue)
    }

    fn supported_properties(&self) -> Vec<CommandProperty> {
        vec![CommandProperty {
            name: DESCRIPTOR.name,
            command: BASE_URL,
            fields: hourly_forecast_fields(),
        }]
    }

    fn default_tables(&self) -> Vec<Table> {
        vec![Table::forecast()]
    }

    fn build_request(
        &self,
        property: &CommandProperty,
        setting: &Setting,
    ) -> Result<ApiUrl, ProviderError> {
        build_api_url(property.command, setting, self.clock.now())
    }

    fn handle_response(&self, values: &mut ValueMap) -> Result<(), ProviderError> {
        mapper::handle_response(values)
    }

    #[instrument(skip_all, fields(host = %setting.provider_host))]
    fn test_connection(&self, setting: &Setting) -> Result<String, ProviderError> {
        let url = build_api_url(BASE_URL, setting, self.clock.now())?;
        self.connection_factory.create(setting).test(&url)?;
        Ok(self.catalogue.text(MessageKey::ConnectionSuccessful))
    }

    #[instrument(skip_all, fields(host = %setting.provider_host))]
    fn do_activity_work(
        &self,
        setting: &Setting,
        variables: &mut Variables,
    ) -> Result<(), ProviderError> {
        let connection = self.connection_factory.create(setting);
        let mut extracted = Variables::default();
        for property in self.supported_properties() {
            let url = self.build_request(&property, setting)?;
            let mut values = ValueMap::from_json_str(&connection.get_as_string(&url)?)?;
            self.handle_response(&mut values)?;
            self.extractor.extract(&values, &property.fields, &mut extracted);
        }
        info!(n_variables = extracted.len(), "done");
        variables.append(&mut extracted);
        Ok(())
    }
}
