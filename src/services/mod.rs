/*!
 * Clients for the two remote services of the pipeline.
 *
 * - `lindat`: primary machine translation (LINDAT translation API)
 * - `postprocessor`: the fixer that repairs a translation given its source
 * - `mock`: in-process doubles used by tests
 *
 * The orchestrator only sees the traits below, so any client can be injected.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ServiceError;
use crate::model::{PostprocessedResult, TranslationRequest, TranslationResult};

/// First stage: turns the input text into a translation
#[async_trait]
pub trait PrimaryTranslator: Send + Sync + Debug {
    /// Translate `request.input_text`
    ///
    /// # Returns
    /// * `Result<TranslationResult, ServiceError>` - The response body verbatim, or the failure
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ServiceError>;
}

/// Second stage: refines a translation using both the source and the translated text
#[async_trait]
pub trait PostProcessor: Send + Sync + Debug {
    /// Post-process `primary` for the text in `request`
    ///
    /// # Returns
    /// * `Result<PostprocessedResult, ServiceError>` - The response body verbatim, or the failure
    async fn postprocess(
        &self,
        request: &TranslationRequest,
        primary: &TranslationResult,
    ) -> Result<PostprocessedResult, ServiceError>;
}

pub mod http;
pub mod lindat;
pub mod postprocessor;
pub mod mock;

pub use lindat::LindatTranslator;
pub use postprocessor::HttpPostProcessor;
