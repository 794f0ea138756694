//! Remote configuration adapter backed by a config API server.
//!
//! [`ConfigClient`] implements [`ConfigSource`] by translating every lookup into
//! one blocking GET request. HTTP 404 answers map to the not-found errors; any
//! other unexpected status or body is a protocol error. There are no retries.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::domain::envelope::{
    Defaults, Envelope, MESSAGE_NO_SUCH_OPTION, MESSAGE_NO_SUCH_SECTION, OptionData, RootData,
    SectionData,
};
use crate::domain::error::RestConfigError;
use crate::domain::url_path::{encode_path_segment, naive_url_path_join};
use crate::ports::config_source::ConfigSource;

pub struct ConfigClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
    headers: HeaderMap,
}

impl ConfigClient {
    pub fn new(base_url: &str) -> Result<Self, RestConfigError> {
        Ok(Self {
            http: Client::builder().build()?,
            base_url: base_url.trim().to_string(),
            username: String::new(),
            password: String::new(),
            headers: HeaderMap::new(),
        })
    }

    /// Send HTTP basic auth. Nothing is sent while both parts are empty.
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    /// Static headers sent with every request.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, RestConfigError> {
        let (name, value) = parse_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_provided(&self) -> bool {
        !(self.username.is_empty() && self.password.is_empty())
    }

    /// GET `sub_path` relative to the base URL. Per-call `headers` replace
    /// static headers of the same name.
    pub fn request(
        &self,
        sub_path: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<Response, RestConfigError> {
        let url = naive_url_path_join(&self.base_url, sub_path, &[]);
        let mut merged = self.headers.clone();
        if let Some(extra) = headers {
            merged.extend(extra.clone());
        }

        let mut request = self.http.get(&url).headers(merged);
        if self.auth_provided() {
            request = request.basic_auth(&self.username, Some(&self.password));
        }
        tracing::debug!(%url, "config API request");
        Ok(request.send()?)
    }

    /// Liveness check. True only when `GET /` answers 200 with a body holding
    /// `data.sections` and `data.default_section`. Never fails.
    pub fn working(&self) -> bool {
        let check = || -> Result<bool, RestConfigError> {
            let response = self.request("", None)?;
            if response.status() != StatusCode::OK {
                return Ok(false);
            }
            let body: serde_json::Value = serde_json::from_str(&response.text()?)
                .map_err(|e| RestConfigError::protocol(e.to_string()))?;
            let data = &body["data"];
            Ok(data.get("sections").is_some() && data.get("default_section").is_some())
        };
        match check() {
            Ok(alive) => alive,
            Err(e) => {
                tracing::debug!(base_url = %self.base_url, error = %e, "config API not working");
                false
            }
        }
    }

    fn root(&self) -> Result<RootData, RestConfigError> {
        let response = expect_ok(self.request("", None)?)?;
        Ok(read_envelope::<RootData>(response)?.data)
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), RestConfigError> {
    let invalid = || RestConfigError::InvalidHeader {
        name: name.to_string(),
    };
    let header_name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| invalid())?;
    let header_value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
    Ok((header_name, header_value))
}

fn expect_ok(response: Response) -> Result<Response, RestConfigError> {
    if response.status() == StatusCode::OK {
        return Ok(response);
    }
    Err(unexpected_status(response))
}

fn unexpected_status(response: Response) -> RestConfigError {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    tracing::warn!(%status, "unexpected config API response");
    RestConfigError::protocol(format!("received unexpected {status} response: {body}"))
}

fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, RestConfigError> {
    let status = response.status();
    let text = response.text()?;
    serde_json::from_str(&text)
        .map_err(|e| RestConfigError::protocol(format!("malformed {status} response: {e}")))
}

impl ConfigSource for ConfigClient {
    fn sections(&self) -> Result<Vec<String>, RestConfigError> {
        Ok(self.root()?.sections)
    }

    fn default_section(&self) -> Result<String, RestConfigError> {
        Ok(self.root()?.default_section)
    }

    fn has_section(&self, name: &str) -> Result<bool, RestConfigError> {
        let root = self.root()?;
        Ok(root.default_section == name || root.sections.iter().any(|s| s == name))
    }

    fn get_section(&self, name: &str) -> Result<Vec<String>, RestConfigError> {
        let response = self.request(&format!("/section/{}", encode_path_segment(name)), None)?;
        match response.status() {
            StatusCode::OK => Ok(read_envelope::<SectionData>(response)?.data.options),
            StatusCode::NOT_FOUND => Err(RestConfigError::NoSuchSection {
                section: name.to_string(),
            }),
            _ => Err(unexpected_status(response)),
        }
    }

    fn has_option(&self, section: &str, option: &str) -> Result<bool, RestConfigError> {
        match self.get_option(section, option) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn get_option(&self, section: &str, option: &str) -> Result<String, RestConfigError> {
        let path = format!(
            "/section/{}/option/{}",
            encode_path_segment(section),
            encode_path_segment(option)
        );
        let response = self.request(&path, None)?;
        match response.status() {
            StatusCode::OK => Ok(read_envelope::<OptionData>(response)?.data.option),
            StatusCode::NOT_FOUND => {
                let message = read_envelope::<serde_json::Value>(response)?.message;
                match message.as_str() {
                    MESSAGE_NO_SUCH_SECTION => Err(RestConfigError::NoSuchSection {
                        section: section.to_string(),
                    }),
                    MESSAGE_NO_SUCH_OPTION => Err(RestConfigError::NoSuchOption {
                        section: section.to_string(),
                        option: option.to_string(),
                    }),
                    other => Err(RestConfigError::protocol(format!(
                        "unexpected 404 message: {other}"
                    ))),
                }
            }
            _ => Err(unexpected_status(response)),
        }
    }

    fn defaults(&self) -> Result<Defaults, RestConfigError> {
        let response = expect_ok(self.request("/defaults", None)?)?;
        Ok(read_envelope::<Defaults>(response)?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_only_when_credentials_given() {
        let client = ConfigClient::new("http://localhost/config").unwrap();
        assert!(!client.auth_provided());
        let client = client.with_basic_auth("user", "");
        assert!(client.auth_provided());
        let client = client.with_basic_auth("", "");
        assert!(!client.auth_provided());
    }

    #[test]
    fn base_url_is_trimmed() {
        let client = ConfigClient::new("  http://localhost/config \n").unwrap();
        assert_eq!(client.base_url(), "http://localhost/config");
    }

    #[test]
    fn invalid_header_is_rejected() {
        let client = ConfigClient::new("http://localhost").unwrap();
        assert!(matches!(
            client.with_header("bad header", "x"),
            Err(RestConfigError::InvalidHeader { .. })
        ));
        let client = ConfigClient::new("http://localhost").unwrap();
        assert!(client.with_header("X-Token", "abc").is_ok());
    }
}
