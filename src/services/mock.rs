/*!
 * Mock service implementations for testing.
 *
 * The mocks simulate the behaviors the orchestrator has to cope with:
 * - `MockBehavior::Respond` - Always succeeds with a fixed body
 * - `MockBehavior::Echo` - Succeeds with a body derived from the input
 * - `MockBehavior::Unreachable` - Fails like a refused connection
 * - `MockBehavior::HttpError` - Fails with a non-success status
 * - `MockBehavior::Slow` - Succeeds after a delay
 *
 * Every call is recorded so tests can assert what was (or was not) sent.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ServiceError;
use crate::model::{PostprocessedResult, TranslationRequest, TranslationResult};
use crate::services::{PostProcessor, PrimaryTranslator};

/// Behavior mode for a mock service
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always answer with this body
    Respond(String),
    /// Answer with `"[prefix] <last field>"`
    Echo { prefix: String },
    /// Fail as if the host refused the connection
    Unreachable,
    /// Fail with this HTTP status
    HttpError { status_code: u16 },
    /// Answer with the body after sleeping
    Slow { delay_ms: u64, body: String },
}

impl MockBehavior {
    async fn answer(&self, last_field: &str) -> Result<String, ServiceError> {
        match self {
            Self::Respond(body) => Ok(body.clone()),
            Self::Echo { prefix } => Ok(format!("[{}] {}", prefix, last_field)),
            Self::Unreachable => Err(ServiceError::ConnectionError("Simulated connection refused".to_string())),
            Self::HttpError { status_code } => Err(ServiceError::ApiError {
                status_code: *status_code,
                message: "Simulated service failure".to_string(),
            }),
            Self::Slow { delay_ms, body } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(body.clone())
            }
        }
    }
}

/// One recorded call to a mock service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub source_language: String,
    pub target_language: String,
    /// Form fields in the order they would be sent
    pub fields: Vec<(String, String)>,
}

type CallHook = Arc<dyn Fn(&RecordedCall) + Send + Sync>;

#[derive(Clone, Default)]
struct CallLog {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    hook: Option<CallHook>,
}

impl CallLog {
    fn record(&self, call: RecordedCall) {
        if let Some(hook) = &self.hook {
            hook(&call);
        }
        self.calls.lock().push(call);
    }

    fn snapshot(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

impl std::fmt::Debug for CallLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallLog")
            .field("calls", &self.calls.lock().len())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// Mock primary translator
#[derive(Debug, Clone)]
pub struct MockTranslator {
    behavior: MockBehavior,
    log: CallLog,
}

impl MockTranslator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self { behavior, log: CallLog::default() }
    }

    /// Translator that always answers `body`
    pub fn responding(body: impl Into<String>) -> Self {
        Self::new(MockBehavior::Respond(body.into()))
    }

    /// Translator whose host cannot be reached
    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    /// Run `hook` at the moment each call is issued
    pub fn with_call_hook(mut self, hook: impl Fn(&RecordedCall) + Send + Sync + 'static) -> Self {
        let hook: CallHook = Arc::new(hook);
        self.log.hook = Some(hook);
        self
    }

    /// Calls received so far; shared between clones
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.snapshot()
    }
}

#[async_trait]
impl PrimaryTranslator for MockTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ServiceError> {
        self.log.record(RecordedCall {
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
            fields: vec![("input_text".to_string(), request.input_text.clone())],
        });

        let primary_output = self.behavior.answer(&request.input_text).await?;
        Ok(TranslationResult { primary_output })
    }
}

/// Mock post-processor
#[derive(Debug, Clone)]
pub struct MockPostProcessor {
    behavior: MockBehavior,
    log: CallLog,
}

impl MockPostProcessor {
    pub fn new(behavior: MockBehavior) -> Self {
        Self { behavior, log: CallLog::default() }
    }

    /// Post-processor that always answers `body`
    pub fn responding(body: impl Into<String>) -> Self {
        Self::new(MockBehavior::Respond(body.into()))
    }

    /// Post-processor whose host cannot be reached
    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    /// Post-processor that hands the translation back untouched
    pub fn passthrough() -> Self {
        Self::new(MockBehavior::Echo { prefix: String::new() })
    }

    pub fn with_call_hook(mut self, hook: impl Fn(&RecordedCall) + Send + Sync + 'static) -> Self {
        let hook: CallHook = Arc::new(hook);
        self.log.hook = Some(hook);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.snapshot()
    }
}

#[async_trait]
impl PostProcessor for MockPostProcessor {
    async fn postprocess(
        &self,
        request: &TranslationRequest,
        primary: &TranslationResult,
    ) -> Result<PostprocessedResult, ServiceError> {
        self.log.record(RecordedCall {
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
            fields: vec![
                ("source_text".to_string(), request.input_text.clone()),
                ("target_text".to_string(), primary.primary_output.clone()),
            ],
        });

        // Passthrough hands back the translation without the echo prefix
        let final_output = match &self.behavior {
            MockBehavior::Echo { prefix } if prefix.is_empty() => primary.primary_output.clone(),
            behavior => behavior.answer(&primary.primary_output).await?,
        };
        Ok(PostprocessedResult { final_output })
    }
}
