/*!
 * Line-by-line translation of a text stream.
 *
 * Every non-blank line is one translation operation, run one after another.
 * Results are written as `source\tprimary\tfinal` and tallied in
 * `BatchStatistics`.
 */

use log::debug;
use std::fmt;
use std::io::{BufRead, Write};

use crate::errors::AppError;
use crate::model::{OperationOutcome, TranslationRequest};
use crate::orchestrator::TranslationOrchestrator;

/// Options of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub source_language: String,
    pub target_language: String,
    /// Only write lines whose post-processed output differs from the primary one
    pub changes_only: bool,
    /// Echo blank input lines as blank output lines instead of dropping them
    pub keep_blank: bool,
}

/// Counters of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStatistics {
    pub processed: usize,
    pub completed: usize,
    pub changed: usize,
    pub primary_failures: usize,
    pub secondary_failures: usize,
}

impl BatchStatistics {
    fn record(&mut self, outcome: &OperationOutcome) {
        self.processed += 1;
        match outcome {
            OperationOutcome::Completed { .. } => {
                self.completed += 1;
                if outcome.is_changed() {
                    self.changed += 1;
                }
            }
            OperationOutcome::PrimaryFailed => self.primary_failures += 1,
            OperationOutcome::SecondaryFailed { .. } => self.secondary_failures += 1,
        }
    }

    pub fn failures(&self) -> usize {
        self.primary_failures + self.secondary_failures
    }

    /// Process exit status: 0 only when every line completed
    pub fn exit_status(&self) -> u8 {
        if self.failures() == 0 { 0 } else { 1 }
    }
}

impl fmt::Display for BatchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("PROCESSED", self.processed),
            ("COMPLETED", self.completed),
            ("CHANGED", self.changed),
            ("PRIMARY_FAILED", self.primary_failures),
            ("SECONDARY_FAILED", self.secondary_failures),
        ];
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in rows {
            writeln!(f, "{:<width$}  {}", name, value, width = width)?;
        }
        Ok(())
    }
}

// Services answer with a trailing newline and may split sentences over lines
fn tsv_field(text: &str) -> String {
    text.trim_end_matches(['\r', '\n']).replace(['\t', '\r', '\n'], " ")
}

/// Translate every line of `input`, writing results to `output`
pub async fn run_batch<R, W>(
    orchestrator: &TranslationOrchestrator,
    options: &BatchOptions,
    input: R,
    mut output: W,
) -> Result<BatchStatistics, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut statistics = BatchStatistics::default();

    for line in input.lines() {
        let line = line?;
        let text = line.trim_end_matches('\r');

        if text.trim().is_empty() {
            if options.keep_blank && !options.changes_only {
                writeln!(output)?;
            }
            continue;
        }

        let request = TranslationRequest::new(
            options.source_language.clone(),
            options.target_language.clone(),
            text,
        );
        debug!("[{}] Batch line {}", request.operation_id, statistics.processed + 1);

        let outcome = orchestrator.execute_with_outcome(request).await;
        statistics.record(&outcome);

        if options.changes_only && !outcome.is_changed() {
            continue;
        }

        match &outcome {
            OperationOutcome::Completed { primary, postprocessed } => {
                writeln!(
                    output,
                    "{}\t{}\t{}",
                    tsv_field(text),
                    tsv_field(&primary.primary_output),
                    tsv_field(&postprocessed.final_output)
                )?;
            }
            OperationOutcome::SecondaryFailed { primary } => {
                writeln!(output, "{}\t{}\t", tsv_field(text), tsv_field(&primary.primary_output))?;
            }
            OperationOutcome::PrimaryFailed => {
                writeln!(output, "{}\t\t", tsv_field(text))?;
            }
        }
    }

    output.flush()?;
    Ok(statistics)
}
