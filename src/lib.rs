/*!
 * # transfix - machine translation with post-processing
 *
 * A Rust library that sends text to a machine translation service and then
 * hands the source text together with the translation to a post-processing
 * service that repairs it (numbers, units, names).
 *
 * ## Features
 *
 * - Two-stage pipeline: the post-processor only runs after a successful translation
 * - Progress and results reported through an injectable `Presenter`
 * - Distinct error notifications for each of the two services
 * - Configurable endpoints, form field names and transport timeouts
 * - Line-by-line batch mode with statistics
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `model`: Request and result value objects
 * - `orchestrator`: The two-stage translation operation
 * - `services`: Clients for the remote services:
 *   - `services::lindat`: Primary translation API client
 *   - `services::postprocessor`: Post-processing service client
 *   - `services::mock`: Test doubles
 * - `presentation`: The presenter seam plus terminal and recording presenters
 * - `batch`: Line-by-line processing of a text stream
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod batch;
pub mod errors;
pub mod language_utils;
pub mod model;
pub mod orchestrator;
pub mod presentation;
pub mod services;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ServiceError, StageError};
pub use model::{OperationOutcome, PostprocessedResult, TranslationRequest, TranslationResult};
pub use orchestrator::TranslationOrchestrator;
pub use presentation::Presenter;
