/*!
 * Presentation layer seam.
 *
 * The orchestrator reports every step of an operation through a `Presenter`.
 * Implementations:
 * - `terminal::TerminalPresenter`: spinner, labelled outputs and error banners for the CLI
 * - `recording::RecordingPresenter`: keeps the callbacks in order, for tests
 */

pub mod recording;
pub mod terminal;

pub use recording::{PresentationEvent, RecordingPresenter};
pub use terminal::TerminalPresenter;

/// Banner shown when the primary translation service fails
pub const PRIMARY_ERROR_MESSAGE: &str =
    "Cannot connect to LINDAT translation service. Please try it later.";

/// Banner shown when the post-processing service fails
pub const SECONDARY_ERROR_MESSAGE: &str = "Cannot connect to postprocessor. Please try it later.";

/// Receiver of the progress of translation operations.
///
/// Methods take `&self` so one presenter can be shared by overlapping
/// operations; updates from them may interleave.
pub trait Presenter: Send + Sync {
    /// An operation started; show the busy indicator
    fn on_start(&self);

    /// The primary translation arrived; it is never revised afterwards
    fn on_primary_result(&self, text: &str);

    /// The post-processed translation arrived
    fn on_final_result(&self, text: &str);

    /// The primary service failed
    fn on_primary_error(&self);

    /// The post-processing service failed
    fn on_secondary_error(&self);

    /// The operation is over; hide the busy indicator
    fn on_end(&self);
}
