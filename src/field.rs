//! Output fields declared towards the host.

use serde::Serialize;

use crate::mapper::{ENERGY_SUFFIX, HOURS, POWER_SUFFIX, TIMESTAMP_SUFFIX, hourly_key};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Number,
    String,

    /// Unix seconds.
    Timestamp,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyField {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub unit: &'static str,

    /// Key looked up in the remapped response.
    pub index: String,

    pub note: String,
}

/// A request together with the fields extracted from its response.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct CommandProperty {
    pub name: &'static str,

    /// URL template, see [`crate::request::build_api_url`].
    pub command: &'static str,

    pub fields: Vec<PropertyField>,
}

/// Power, accumulated energy and timestamp fields for every hour of the day.
pub fn hourly_forecast_fields() -> Vec<PropertyField> {
    HOURS
        .flat_map(|hour| {
            [
                PropertyField {
                    name: format!("prognose_{hour}"),
                    field_type: FieldType::Number,
                    unit: "kw",
                    index: hourly_key(hour, POWER_SUFFIX),
                    note: format!("prognose for current date at hour {hour}"),
                },
                PropertyField {
                    name: format!("prognose_accumulated_{hour}"),
                    field_type: FieldType::Number,
                    unit: "kwh",
                    index: hourly_key(hour, ENERGY_SUFFIX),
                    note: format!("accumulated prognose for current date from hour 0 to hour {hour}"),
                },
                PropertyField {
                    name: format!("timestamp_{hour}"),
                    field_type: FieldType::Timestamp,
                    unit: "seconds",
                    index: hourly_key(hour, TIMESTAMP_SUFFIX),
                    note: format!("timestamp for hour {hour}"),
                },
            ]
        })
        .collect()
}
