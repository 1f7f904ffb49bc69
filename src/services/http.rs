use log::{debug, error};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::errors::ServiceError;

/// Form-encoded POST client shared by both services.
///
/// Both endpoints take the language pair as `src`/`tgt` query parameters and
/// answer with plain text.
#[derive(Debug, Clone)]
pub struct FormClient {
    /// Endpoint without the language query
    endpoint: Url,
    /// HTTP client carrying the transport timeout
    client: Client,
}

impl FormClient {
    /// Create a client for `endpoint` whose requests give up after `timeout`
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ServiceError::RequestFailed(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    /// URL for one call, with `src` and `tgt` appended to any existing query
    pub fn url_for(&self, source_language: &str, target_language: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("src", source_language)
            .append_pair("tgt", target_language);
        url
    }

    /// POST `fields` as a form and return the response body as text.
    ///
    /// Non-2xx statuses and bodies that are not UTF-8 are errors.
    pub async fn post_form(
        &self,
        source_language: &str,
        target_language: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, ServiceError> {
        let url = self.url_for(source_language, target_language);
        debug!("POST {}", url);

        let response = self.client
            .post(url.clone())
            .header(ACCEPT, "text/plain")
            .form(fields)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Service error from {} ({}): {}", url, status, error_text);
            return Err(ServiceError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.bytes().await?;
        String::from_utf8(body.to_vec())
            .map_err(|e| ServiceError::ParseError(format!("Response body is not valid UTF-8: {}", e)))
    }
}
