//! HTTP transport towards the forecast API.

use http::header::{ACCEPT, CONTENT_TYPE};
use ureq::Agent;

use crate::{error::ProviderError, prelude::*, request::ApiUrl, setting::Setting};

const JSON_CONTENT_TYPE: &str = "application/json";

pub trait HttpConnection {
    /// Perform a GET request and read the whole body.
    fn get_as_string(&self, url: &ApiUrl) -> Result<String, ProviderError>;

    /// Check that the URL answers with a successful status and a JSON body.
    fn test(&self, url: &ApiUrl) -> Result<(), ProviderError>;
}

pub trait ConnectionFactory {
    type Connection: HttpConnection;

    fn create(&self, setting: &Setting) -> Self::Connection;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct UreqConnectionFactory;

impl ConnectionFactory for UreqConnectionFactory {
    type Connection = UreqConnection;

    fn create(&self, setting: &Setting) -> Self::Connection {
        UreqConnection::new(setting)
    }
}

pub struct UreqConnection {
    agent: Agent,
}

impl UreqConnection {
    /// The setting's read timeout applies to receiving the response and its body.
    pub fn new(setting: &Setting) -> Self {
        let agent = Agent::config_builder()
            .timeout_recv_response(Some(setting.read_timeout))
            .timeout_recv_body(Some(setting.read_timeout))
            .build()
            .into();
        Self { agent }
    }

    fn call(&self, url: &ApiUrl) -> Result<http::Response<ureq::Body>, ProviderError> {
        self.agent
            .get(url.to_string())
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .call()
            .map_err(|error| transport_error(url, &error))
    }
}

impl HttpConnection for UreqConnection {
    #[instrument(skip_all, level = Level::DEBUG, fields(host = url.host()))]
    fn get_as_string(&self, url: &ApiUrl) -> Result<String, ProviderError> {
        let body = self
            .call(url)?
            .body_mut()
            .read_to_string()
            .map_err(|error| transport_error(url, &error))?;
        debug!(n_bytes = body.len(), "received");
        Ok(body)
    }

    #[instrument(skip_all, fields(host = url.host()))]
    fn test(&self, url: &ApiUrl) -> Result<(), ProviderError> {
        let response = self.call(url)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !content_type.starts_with(JSON_CONTENT_TYPE) {
            return Err(ProviderError::MalformedResponse(format!(
                "unexpected content type `{content_type}`"
            )));
        }
        info!(status = response.status().as_u16(), "reachable");
        Ok(())
    }
}

fn transport_error(url: &ApiUrl, error: &ureq::Error) -> ProviderError {
    match error {
        ureq::Error::Timeout(_) => ProviderError::Timeout { url: url.to_string() },
        _ => ProviderError::Network { url: url.to_string(), reason: error.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;

    const PATH: &str = "/web/solarprediction/api/v1";

    fn connection() -> UreqConnection {
        UreqConnectionFactory.create(&Setting::builder().provider_host("localhost").build())
    }

    fn url(server: &Server) -> Result<ApiUrl> {
        Ok(ApiUrl::parse(&format!("{}{PATH}?access-token=12345&_format=json", server.url()))?)
    }

    #[test]
    fn get_as_string_ok() -> Result {
        let mut server = Server::new();
        let mock = server
            .mock("GET", PATH)
            .match_query(Matcher::UrlEncoded("access-token".into(), "12345".into()))
            .match_header("accept", JSON_CONTENT_TYPE)
            .with_header("content-type", "application/json; charset=UTF-8")
            .with_body(r#"{"status":0,"data":{}}"#)
            .create();
        let body = connection().get_as_string(&url(&server)?)?;
        assert_eq!(body, r#"{"status":0,"data":{}}"#);
        mock.assert();
        Ok(())
    }

    #[test]
    fn error_status_fails() -> Result {
        let mut server = Server::new();
        let _mock = server.mock("GET", PATH).match_query(Matcher::Any).with_status(500).create();
        assert!(matches!(
            connection().get_as_string(&url(&server)?),
            Err(ProviderError::Network { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_ok() -> Result {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create();
        connection().test(&url(&server)?)?;
        Ok(())
    }

    #[test]
    fn test_html_fails() -> Result {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create();
        assert!(matches!(
            connection().test(&url(&server)?),
            Err(ProviderError::MalformedResponse(_))
        ));
        Ok(())
    }

    #[test]
    fn refused_connection_fails() -> Result {
        let url = ApiUrl::parse("http://127.0.0.1:1/")?;
        assert!(matches!(connection().get_as_string(&url), Err(ProviderError::Network { .. })));
        Ok(())
    }
}
