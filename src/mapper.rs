//! Status check and hour-of-day remapping of the forecast response.
//!
//! Solarprognose keys its hourly samples by unix timestamp: `data_<timestamp>_0` holds the
//! forecast power in kilowatts, `data_<timestamp>_1` the forecast energy accumulated since
//! midnight. The declared fields, however, address samples by the UTC hour of the day, so every
//! sample is additionally stored as `data_<hour>_<suffix>` together with `data_<hour>_ts`.

use std::ops::Range;

use chrono::{DateTime, Timelike};

use crate::{
    error::ProviderError,
    prelude::*,
    value::{Value, ValueMap},
};

pub const POWER_SUFFIX: &str = "0";
pub const ENERGY_SUFFIX: &str = "1";
pub const TIMESTAMP_SUFFIX: &str = "ts";

/// Valid hours of the day.
pub const HOURS: Range<u32> = 0..24;

const DATA_PREFIX: &str = "data_";

/// Key of an hour-indexed sample, for example `data_14_ts`.
#[must_use]
pub fn hourly_key(hour: u32, suffix: &str) -> String {
    format!("{DATA_PREFIX}{hour}_{suffix}")
}

/// Validate the status and remap the samples onto hours of the day.
///
/// On error, the tick must be considered failed.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn handle_response(values: &mut ValueMap) -> Result<(), ProviderError> {
    check_status(values)?;
    remap_hours(values)
}

/// Fail with the reported code and message when `status` is negative.
pub fn check_status(values: &ValueMap) -> Result<(), ProviderError> {
    let status = match values.get_or_null("status") {
        Value::Null => 0,
        value => value.as_i64().ok_or_else(|| {
            ProviderError::malformed_data("status", format!("`{value}` is not an integer"))
        })?,
    };
    if status < 0 {
        let message = match values.get_or_null("message") {
            Value::Null => String::new(),
            value => value.to_string(),
        };
        error!(status, upstream_message = %message, "Solarprognose returned an error");
        return Err(ProviderError::Upstream { status, message });
    }
    Ok(())
}

/// Add `data_<hour>_<suffix>` and `data_<hour>_ts` for every non-null timestamp-keyed sample.
///
/// The original entries are kept. Samples falling onto the same hour overwrite each other
/// in key order. Keys whose token already is an hour of the day are skipped, so remapping
/// an already remapped map changes nothing.
pub fn remap_hours(values: &mut ValueMap) -> Result<(), ProviderError> {
    let mut remapped = Vec::new();
    for (key, value) in values.iter() {
        if value.is_null() {
            continue;
        }
        let Some(ForecastKey { token, suffix }) = ForecastKey::parse(key) else {
            continue;
        };
        let timestamp: i64 = token.parse().map_err(|_| {
            ProviderError::malformed_data(key, format!("`{token}` is not a unix timestamp"))
        })?;
        if u32::try_from(timestamp).is_ok_and(|hour| HOURS.contains(&hour)) {
            continue;
        }
        let hour = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| ProviderError::malformed_data(key, "timestamp is out of range"))?
            .hour();
        trace!(%key, hour, "remapping");
        remapped.push((hourly_key(hour, suffix), value.clone()));
        remapped.push((hourly_key(hour, TIMESTAMP_SUFFIX), Value::Timestamp(timestamp)));
    }
    debug!(n_entries = remapped.len(), "remapped");
    values.extend(remapped);
    Ok(())
}

/// `data_<token>_<suffix>` with exactly three parts.
struct ForecastKey<'a> {
    token: &'a str,
    suffix: &'a str,
}

impl<'a> ForecastKey<'a> {
    fn parse(key: &'a str) -> Option<Self> {
        let (token, suffix) = key.strip_prefix(DATA_PREFIX)?.split_once('_')?;
        (!suffix.is_empty() && !suffix.contains('_')).then_some(Self { token, suffix })
    }
}
