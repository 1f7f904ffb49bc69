/*!
 * Two-stage translation orchestration.
 *
 * One operation runs the primary translation and, only when it succeeds, the
 * post-processing of its result. Every step is reported to the injected
 * presenter; failures end at this boundary and are never returned as errors.
 */

use log::{debug, info, warn};
use std::sync::Arc;

use crate::errors::{ServiceError, StageError};
use crate::model::{OperationOutcome, PostprocessedResult, TranslationRequest, TranslationResult};
use crate::presentation::Presenter;
use crate::services::{PostProcessor, PrimaryTranslator};

// Where an operation stopped; a stage-2 failure keeps the shown primary result
enum StageFailure {
    Primary(ServiceError),
    Secondary(ServiceError, TranslationResult),
}

/// Runs translation operations against the two injected services
#[derive(Clone)]
pub struct TranslationOrchestrator {
    translator: Arc<dyn PrimaryTranslator>,
    postprocessor: Arc<dyn PostProcessor>,
    presenter: Arc<dyn Presenter>,
}

impl TranslationOrchestrator {
    pub fn new(
        translator: Arc<dyn PrimaryTranslator>,
        postprocessor: Arc<dyn PostProcessor>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self { translator, postprocessor, presenter }
    }

    /// Run one operation, reporting only through the presenter
    pub async fn execute(&self, request: TranslationRequest) {
        self.execute_with_outcome(request).await;
    }

    /// Same as [`execute`](Self::execute), also telling the caller how it ended.
    ///
    /// `on_start` fires before the first call is issued and `on_end` fires
    /// exactly once, after the last issued call has settled.
    pub async fn execute_with_outcome(&self, request: TranslationRequest) -> OperationOutcome {
        self.presenter.on_start();

        let outcome = match self.run_stages(&request).await {
            Ok((primary, postprocessed)) => {
                info!("[{}] Translation completed", request.operation_id);
                OperationOutcome::Completed { primary, postprocessed }
            }
            Err(StageFailure::Primary(cause)) => {
                warn!("[{}] {}", request.operation_id, StageError::PrimaryServiceUnavailable(cause));
                self.presenter.on_primary_error();
                OperationOutcome::PrimaryFailed
            }
            Err(StageFailure::Secondary(cause, primary)) => {
                warn!("[{}] {}", request.operation_id, StageError::SecondaryServiceUnavailable(cause));
                self.presenter.on_secondary_error();
                OperationOutcome::SecondaryFailed { primary }
            }
        };

        self.presenter.on_end();
        outcome
    }

    // Stage 2 only runs on stage-1 success
    async fn run_stages(
        &self,
        request: &TranslationRequest,
    ) -> Result<(TranslationResult, PostprocessedResult), StageFailure> {
        debug!(
            "[{}] Requesting translation {} -> {} ({} chars)",
            request.operation_id,
            request.source_language,
            request.target_language,
            request.input_text.chars().count()
        );

        let primary = self.translator
            .translate(request)
            .await
            .map_err(StageFailure::Primary)?;

        self.presenter.on_primary_result(&primary.primary_output);

        debug!("[{}] Requesting postprocessing", request.operation_id);
        match self.postprocessor.postprocess(request, &primary).await {
            Ok(postprocessed) => {
                self.presenter.on_final_result(&postprocessed.final_output);
                Ok((primary, postprocessed))
            }
            Err(e) => Err(StageFailure::Secondary(e, primary)),
        }
    }
}
