use thiserror::Error;

/// Everything that can abort an activity tick.
///
/// Transport failures are reported as [`ProviderError::Network`] and [`ProviderError::Timeout`],
/// the rest originates in the provider itself.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A URL placeholder has no value in the setting.
    #[error("no configuration value for the `{{{placeholder}}}` placeholder")]
    Configuration { placeholder: String },

    #[error("`{url}` is not a valid absolute URL: {reason}")]
    MalformedUrl { url: String, reason: String },

    /// The API answered with a negative status code.
    #[error(r#"Solarprognose error {status} ("{message}")"#)]
    Upstream { status: i64, message: String },

    /// A forecast entry is present, but its key or value cannot be interpreted.
    #[error("malformed forecast entry `{key}`: {reason}")]
    MalformedData { key: String, reason: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("failed to call `{url}`: {reason}")]
    Network { url: String, reason: String },

    #[error("`{url}` did not respond in time")]
    Timeout { url: String },

    #[error("interrupted")]
    Interrupted,
}

impl ProviderError {
    pub(crate) fn malformed_data(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedData { key: key.into(), reason: reason.into() }
    }

    /// Whether the transport failed, so that the next tick may succeed unchanged.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedResponse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_names_placeholder() {
        let error = ProviderError::Configuration { placeholder: "token".to_owned() };
        assert_eq!(error.to_string(), "no configuration value for the `{token}` placeholder");
    }

    #[test]
    fn upstream_message_ok() {
        let error = ProviderError::Upstream { status: -2, message: "invalid token".to_owned() };
        assert_eq!(error.to_string(), r#"Solarprognose error -2 ("invalid token")"#);
        assert!(!error.is_transient());
        assert!(!ProviderError::Interrupted.is_transient());
    }

    #[test]
    fn transport_errors_are_transient() {
        assert!(ProviderError::Timeout { url: "http://localhost/".to_owned() }.is_transient());
        let error = ProviderError::Network {
            url: "http://localhost/".to_owned(),
            reason: "connection refused".to_owned(),
        };
        assert!(error.is_transient());
    }
}
