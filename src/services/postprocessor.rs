use async_trait::async_trait;
use std::time::Duration;

use crate::app_config::PostprocessorConfig;
use crate::errors::ServiceError;
use crate::model::{PostprocessedResult, TranslationRequest, TranslationResult};
use crate::services::http::FormClient;
use crate::services::PostProcessor;

/// Client for the HTTP post-processing (fixer) service.
///
/// The service answers with the repaired translation, or with the translation
/// unchanged when there was nothing to fix.
#[derive(Debug, Clone)]
pub struct HttpPostProcessor {
    http: FormClient,
    source_field: String,
    target_field: String,
}

impl HttpPostProcessor {
    pub fn new(
        endpoint: &str,
        source_field: impl Into<String>,
        target_field: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            http: FormClient::new(endpoint, timeout)?,
            source_field: source_field.into(),
            target_field: target_field.into(),
        })
    }

    pub fn from_config(config: &PostprocessorConfig) -> Result<Self, ServiceError> {
        Self::new(
            &config.endpoint,
            config.source_field.clone(),
            config.target_field.clone(),
            config.timeout(),
        )
    }
}

#[async_trait]
impl PostProcessor for HttpPostProcessor {
    async fn postprocess(
        &self,
        request: &TranslationRequest,
        primary: &TranslationResult,
    ) -> Result<PostprocessedResult, ServiceError> {
        let fields = [
            (self.source_field.as_str(), request.input_text.as_str()),
            (self.target_field.as_str(), primary.primary_output.as_str()),
        ];

        let final_output = self.http
            .post_form(&request.source_language, &request.target_language, &fields)
            .await?;

        Ok(PostprocessedResult { final_output })
    }
}
