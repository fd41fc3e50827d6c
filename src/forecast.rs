//! Typed view of the extracted forecast variables.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    mapper::HOURS,
    quantity::{KilowattHours, Kilowatts},
    value::Variables,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HourlyForecast {
    pub timestamp: DateTime<Utc>,

    /// Forecast power at the hour.
    pub power: Kilowatts,

    /// Forecast energy accumulated since midnight.
    pub accumulated_energy: KilowattHours,
}

impl HourlyForecast {
    /// Collect the hours with a complete forecast, ordered by time.
    #[must_use]
    pub fn collect_from(variables: &Variables) -> Vec<Self> {
        let mut forecast: Vec<Self> = HOURS
            .filter_map(|hour| {
                let timestamp = variables.get_or_null(&format!("timestamp_{hour}")).as_i64()?;
                Some(Self {
                    timestamp: DateTime::from_timestamp(timestamp, 0)?,
                    power: Kilowatts(variables.get_or_null(&format!("prognose_{hour}")).as_f64()?),
                    accumulated_energy: KilowattHours(
                        variables.get_or_null(&format!("prognose_accumulated_{hour}")).as_f64()?,
                    ),
                })
            })
            .collect();
        forecast.sort_by_key(|hourly| hourly.timestamp);
        forecast
    }

    /// Hour with the highest forecast power.
    #[must_use]
    pub fn peak(forecast: &[Self]) -> Option<&Self> {
        forecast.iter().max_by_key(|hourly| hourly.power)
    }
}
