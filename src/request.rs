//! Request URL construction.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use chrono::{DateTime, TimeDelta, Utc};
use http::Uri;

use crate::{error::ProviderError, prelude::*, setting::Setting, template};

/// Solarprognose hourly forecast endpoint.
pub const BASE_URL: &str = "http://{provider_host}/web/solarprediction/api/v1?access-token={token}&item={item}&id={elementid}&type=hourly&_format=json&algorithm={algorithm}&project=solarreader&start_epoch_time={starttime}&end_epoch_time={endtime}";

/// Requested forecast window in unix seconds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub const LENGTH_SECONDS: i64 = 23 * 60 * 60;

    /// Window of [`Self::LENGTH_SECONDS`] starting at `now` truncated to seconds.
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        let start = now.timestamp();
        Self { start, end: start + Self::LENGTH_SECONDS }
    }

    #[must_use]
    pub fn length(self) -> TimeDelta {
        TimeDelta::seconds(self.end - self.start)
    }
}

/// Validated absolute request URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl(Uri);

impl ApiUrl {
    pub fn parse(url: &str) -> Result<Self, ProviderError> {
        let malformed =
            |reason: String| ProviderError::MalformedUrl { url: url.to_owned(), reason };
        let uri = url.parse::<Uri>().map_err(|error| malformed(error.to_string()))?;
        match uri.scheme_str() {
            Some("http" | "https") => {}
            Some(scheme) => return Err(malformed(format!("unsupported scheme `{scheme}`"))),
            None => return Err(malformed("the URL must be absolute".to_owned())),
        }
        if uri.host().is_none_or(str::is_empty) {
            return Err(malformed("the URL must contain host".to_owned()));
        }
        Ok(Self(uri))
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.0.query()
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.0.host()
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl Display for ApiUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Resolve the URL template against the setting and the time window starting at `now`.
///
/// Configuration values are substituted verbatim, without any percent-encoding.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn build_api_url(
    template: &str,
    setting: &Setting,
    now: DateTime<Utc>,
) -> Result<ApiUrl, ProviderError> {
    let window = TimeWindow::starting_at(now);
    let mut values: BTreeMap<&str, String> = setting
        .configuration
        .iter()
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect();
    values.insert("provider_host", setting.provider_host.clone());
    values.insert("provider_port", setting.provider_port.to_string());
    values.insert("starttime", window.start.to_string());
    values.insert("endtime", window.end.to_string());
    let url = template::replace_named_placeholders(template, &values)?;
    debug!(%url, "resolved");
    ApiUrl::parse(&url)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Deserialize;

    use super::*;
    use crate::setting::{ALGORITHM, ELEMENT_ID, ITEM, TOKEN};

    #[derive(Deserialize)]
    struct Query {
        #[serde(rename = "access-token")]
        token: String,
        item: String,
        id: String,
        #[serde(rename = "type")]
        kind: String,
        #[serde(rename = "_format")]
        format: String,
        algorithm: String,
        project: String,
        start_epoch_time: i64,
        end_epoch_time: i64,
    }

    fn setting() -> Setting {
        Setting::builder()
            .provider_host("www.solarprognose.de")
            .build()
            .with_configuration_value(TOKEN, "12345")
            .with_configuration_value(ITEM, "item")
            .with_configuration_value(ELEMENT_ID, "0815")
            .with_configuration_value(ALGORITHM, "mosmix")
    }

    #[test]
    fn time_window_ok() -> Result {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().context("invalid date")?;
        let window = TimeWindow::starting_at(now);
        assert_eq!(window.start, 1_735_689_600);
        assert_eq!(window.end, 1_735_772_400);
        assert_eq!(window.length(), TimeDelta::hours(23));
        Ok(())
    }

    #[test]
    fn time_window_truncates_to_seconds() -> Result {
        let now = Utc.timestamp_opt(1_735_689_600, 999_999_999).single().context("invalid")?;
        assert_eq!(TimeWindow::starting_at(now).start, 1_735_689_600);
        Ok(())
    }

    #[test]
    fn build_api_url_ok() -> Result {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().context("invalid date")?;
        let url = build_api_url(BASE_URL, &setting(), now)?;
        assert_eq!(url.host(), Some("www.solarprognose.de"));
        assert_eq!(url.path(), "/web/solarprediction/api/v1");

        let query: Query = serde_qs::from_str(url.query().context("no query")?)?;
        assert_eq!(query.token, "12345");
        assert_eq!(query.item, "item");
        assert_eq!(query.id, "0815");
        assert_eq!(query.kind, "hourly");
        assert_eq!(query.format, "json");
        assert_eq!(query.algorithm, "mosmix");
        assert_eq!(query.project, "solarreader");
        assert_eq!(query.start_epoch_time, 1_735_689_600);
        assert_eq!(query.end_epoch_time, 1_735_772_400);
        assert_eq!(query.end_epoch_time - query.start_epoch_time, 82800);
        Ok(())
    }

    #[test]
    fn empty_algorithm_ok() -> Result {
        let setting = setting().with_configuration_value(ALGORITHM, "");
        let url = build_api_url(BASE_URL, &setting, Utc::now())?;
        assert!(url.to_string().contains("&algorithm=&project=solarreader&"));
        Ok(())
    }

    #[test]
    fn missing_token_fails() {
        let mut setting = setting();
        setting.configuration.remove(TOKEN);
        assert!(matches!(
            build_api_url(BASE_URL, &setting, Utc::now()),
            Err(ProviderError::Configuration { placeholder }) if placeholder == "token"
        ));
    }

    #[test]
    fn unencoded_value_makes_url_malformed() {
        let setting = setting().with_configuration_value(TOKEN, "12 345");
        assert!(matches!(
            build_api_url(BASE_URL, &setting, Utc::now()),
            Err(ProviderError::MalformedUrl { .. })
        ));
    }

    #[test]
    fn empty_host_makes_url_malformed() {
        let mut setting = setting();
        setting.provider_host.clear();
        assert!(matches!(
            build_api_url(BASE_URL, &setting, Utc::now()),
            Err(ProviderError::MalformedUrl { .. })
        ));
    }

    #[test]
    fn parse_relative_fails() {
        assert!(ApiUrl::parse("/web/solarprediction/api/v1").is_err());
        assert!(ApiUrl::parse("ftp://example.com/").is_err());
        assert!(ApiUrl::parse("https://example.com:8080/api").is_ok());
    }
}
