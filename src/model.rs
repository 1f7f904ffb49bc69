/*!
 * Value objects passed through one translation operation.
 */

use uuid::Uuid;

/// One user-initiated translation.
///
/// Created when translation is triggered and dropped once the operation ends.
/// The text is forwarded as-is: it may be empty and is never trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Correlates log lines of a single operation
    pub operation_id: Uuid,
    /// Source language code sent as `src`
    pub source_language: String,
    /// Target language code sent as `tgt`
    pub target_language: String,
    /// Text entered by the user
    pub input_text: String,
}

impl TranslationRequest {
    pub fn new(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        input_text: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: Uuid::new_v4(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            input_text: input_text.into(),
        }
    }
}

/// Drop the single line ending a pipe adds after the text (`\n` or `\r\n`)
pub fn trim_piped_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Output of the primary translation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub primary_output: String,
}

/// Output of the post-processing service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostprocessedResult {
    pub final_output: String,
}

/// How an operation ended. Never carries an error onward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Both stages succeeded
    Completed {
        primary: TranslationResult,
        postprocessed: PostprocessedResult,
    },
    /// Stage 1 failed; stage 2 was never attempted
    PrimaryFailed,
    /// Stage 1 succeeded, stage 2 failed
    SecondaryFailed { primary: TranslationResult },
}

impl OperationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Process exit status: 0 only when both stages succeeded
    pub fn exit_status(&self) -> u8 {
        if self.is_completed() { 0 } else { 1 }
    }

    /// Whether post-processing changed the primary translation
    pub fn is_changed(&self) -> bool {
        match self {
            Self::Completed { primary, postprocessed } => {
                primary.primary_output != postprocessed.final_output
            }
            _ => false,
        }
    }
}
