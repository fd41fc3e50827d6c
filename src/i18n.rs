//! Message catalogue for the dialog and connection test texts.

use clap::ValueEnum;
use fluent_bundle::{FluentBundle, FluentResource};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::prelude::*;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::De];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    const fn resource(self) -> &'static str {
        match self {
            Self::En => include_str!("../locales/en/solarprognose.ftl"),
            Self::De => include_str!("../locales/de/solarprognose.ftl"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MessageKey {
    Title,
    TokenLabel,
    TokenTooltip,
    TokenError,
    ElementIdLabel,
    ElementIdTooltip,
    ElementIdError,
    AlgorithmLabel,
    AlgorithmTooltip,
    ItemLabel,
    ItemTooltip,
    ItemError,
    ConnectionSuccessful,
}

impl MessageKey {
    pub const ALL: [Self; 13] = [
        Self::Title,
        Self::TokenLabel,
        Self::TokenTooltip,
        Self::TokenError,
        Self::ElementIdLabel,
        Self::ElementIdTooltip,
        Self::ElementIdError,
        Self::AlgorithmLabel,
        Self::AlgorithmTooltip,
        Self::ItemLabel,
        Self::ItemTooltip,
        Self::ItemError,
        Self::ConnectionSuccessful,
    ];

    /// Message identifier in the `.ftl` resources.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TokenLabel => "token-label",
            Self::TokenTooltip => "token-tooltip",
            Self::TokenError => "token-error",
            Self::ElementIdLabel => "element-id-label",
            Self::ElementIdTooltip => "element-id-tooltip",
            Self::ElementIdError => "element-id-error",
            Self::AlgorithmLabel => "algorithm-label",
            Self::AlgorithmTooltip => "algorithm-tooltip",
            Self::ItemLabel => "item-label",
            Self::ItemTooltip => "item-tooltip",
            Self::ItemError => "item-error",
            Self::ConnectionSuccessful => "connection-successful",
        }
    }
}

/// Fluent bundle of a single locale.
pub struct Catalogue {
    locale: Locale,
    bundle: FluentBundle<FluentResource>,
}

impl Catalogue {
    pub fn new(locale: Locale) -> Result<Self> {
        let resource = FluentResource::try_new(locale.resource().to_owned()).map_err(
            |(_, errors)| anyhow!("failed to parse the `{}` messages: {errors:?}", locale.code()),
        )?;
        let language: LanguageIdentifier = locale.code().parse()?;
        let mut bundle = FluentBundle::new(vec![language]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            anyhow!("failed to add the `{}` messages: {errors:?}", locale.code())
        })?;
        Ok(Self { locale, bundle })
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up the message, falling back to its identifier.
    #[must_use]
    pub fn text(&self, key: MessageKey) -> String {
        self.try_text(key).unwrap_or_else(|| {
            warn!(locale = self.locale.code(), id = key.id(), "missing message");
            key.id().to_owned()
        })
    }

    fn try_text(&self, key: MessageKey) -> Option<String> {
        let pattern = self.bundle.get_message(key.id())?.value()?;
        let mut errors = Vec::new();
        let text = self.bundle.format_pattern(pattern, None, &mut errors);
        if !errors.is_empty() {
            warn!(locale = self.locale.code(), id = key.id(), ?errors, "failed to format");
        }
        Some(text.into_owned())
    }
}
