use async_trait::async_trait;

use crate::app_config::PrimaryServiceConfig;
use crate::errors::ServiceError;
use crate::model::{TranslationRequest, TranslationResult};
use crate::services::http::FormClient;
use crate::services::PrimaryTranslator;

/// Client for the LINDAT machine translation API
#[derive(Debug, Clone)]
pub struct LindatTranslator {
    http: FormClient,
    /// Form field carrying the input text
    input_field: String,
}

impl LindatTranslator {
    pub fn new(
        endpoint: &str,
        input_field: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            http: FormClient::new(endpoint, timeout)?,
            input_field: input_field.into(),
        })
    }

    pub fn from_config(config: &PrimaryServiceConfig) -> Result<Self, ServiceError> {
        Self::new(&config.endpoint, config.input_field.clone(), config.timeout())
    }
}

#[async_trait]
impl PrimaryTranslator for LindatTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ServiceError> {
        let primary_output = self.http
            .post_form(
                &request.source_language,
                &request.target_language,
                &[(self.input_field.as_str(), request.input_text.as_str())],
            )
            .await?;

        Ok(TranslationResult { primary_output })
    }
}
