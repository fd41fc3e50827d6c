//! Configuration form declaration, rendered by the host.

use bon::Builder;
use serde::Serialize;

use crate::{
    i18n::{Catalogue, MessageKey},
    setting::{ALGORITHM, ALGORITHMS, ELEMENT_ID, ITEM, TOKEN},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Number,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    #[default]
    Full,
    Half,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Builder)]
pub struct InputElement {
    pub id: &'static str,
    pub name: &'static str,

    #[serde(rename = "type")]
    pub input_type: InputType,

    #[builder(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<&'static str>,

    #[builder(default)]
    pub width: ColumnWidth,

    pub label: String,
    pub placeholder: String,
    pub tooltip: String,
    pub invalid_feedback: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Builder)]
pub struct SelectElement {
    pub name: &'static str,

    #[builder(default)]
    pub width: ColumnWidth,

    pub label: String,
    pub tooltip: String,
    pub options: Vec<&'static str>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "element", rename_all = "lowercase")]
pub enum UiElement {
    Text { label: String },
    Input(InputElement),
    Select(SelectElement),
}

impl UiElement {
    /// Name of the configuration value the element edits.
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        match self {
            Self::Text { .. } => None,
            Self::Input(input) => Some(input.name),
            Self::Select(select) => Some(select.name),
        }
    }
}

/// Localized provider dialog.
#[must_use]
pub fn provider_dialog(catalogue: &Catalogue) -> Vec<UiElement> {
    let text = |key| catalogue.text(key);
    vec![
        UiElement::Text { label: text(MessageKey::Title) },
        UiElement::Input(
            InputElement::builder()
                .id("id-solarprognose-token")
                .name(TOKEN)
                .input_type(InputType::Text)
                .required(true)
                .width(ColumnWidth::Half)
                .label(text(MessageKey::TokenLabel))
                .placeholder(text(MessageKey::TokenLabel))
                .tooltip(text(MessageKey::TokenTooltip))
                .invalid_feedback(text(MessageKey::TokenError))
                .build(),
        ),
        UiElement::Input(
            InputElement::builder()
                .id("id-solarprognose-elementid")
                .name(ELEMENT_ID)
                .input_type(InputType::Number)
                .required(true)
                .step("any")
                .width(ColumnWidth::Half)
                .label(text(MessageKey::ElementIdLabel))
                .placeholder(text(MessageKey::ElementIdLabel))
                .tooltip(text(MessageKey::ElementIdTooltip))
                .invalid_feedback(text(MessageKey::ElementIdError))
                .build(),
        ),
        UiElement::Select(
            SelectElement::builder()
                .name(ALGORITHM)
                .width(ColumnWidth::Half)
                .label(text(MessageKey::AlgorithmLabel))
                .tooltip(text(MessageKey::AlgorithmTooltip))
                .options(ALGORITHMS.to_vec())
                .build(),
        ),
        UiElement::Input(
            InputElement::builder()
                .id("id-solarprognose-item")
                .name(ITEM)
                .input_type(InputType::Text)
                .required(true)
                .width(ColumnWidth::Half)
                .label(text(MessageKey::ItemLabel))
                .placeholder(text(MessageKey::ItemLabel))
                .tooltip(text(MessageKey::ItemTooltip))
                .invalid_feedback(text(MessageKey::ItemError))
                .build(),
        ),
    ]
}
