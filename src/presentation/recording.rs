use parking_lot::Mutex;

use super::Presenter;

/// One presenter callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationEvent {
    Started,
    PrimaryResult(String),
    FinalResult(String),
    PrimaryError,
    SecondaryError,
    Ended,
}

/// Presenter that remembers every callback in arrival order
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresentationEvent>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far
    pub fn events(&self) -> Vec<PresentationEvent> {
        self.events.lock().clone()
    }

    /// Number of events equal to `event`
    pub fn count(&self, event: &PresentationEvent) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }

    fn push(&self, event: PresentationEvent) {
        self.events.lock().push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn on_start(&self) {
        self.push(PresentationEvent::Started);
    }

    fn on_primary_result(&self, text: &str) {
        self.push(PresentationEvent::PrimaryResult(text.to_string()));
    }

    fn on_final_result(&self, text: &str) {
        self.push(PresentationEvent::FinalResult(text.to_string()));
    }

    fn on_primary_error(&self) {
        self.push(PresentationEvent::PrimaryError);
    }

    fn on_secondary_error(&self) {
        self.push(PresentationEvent::SecondaryError);
    }

    fn on_end(&self) {
        self.push(PresentationEvent::Ended);
    }
}
