use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::time::Duration;

use super::{Presenter, PRIMARY_ERROR_MESSAGE, SECONDARY_ERROR_MESSAGE};

// @struct: Spinner shared by overlapping operations
#[derive(Default)]
struct BusyIndicator {
    active: usize,
    spinner: Option<ProgressBar>,
}

/// Presenter for the command line.
///
/// Shows a spinner while at least one operation is running, prints the two
/// translations on stdout and the error banners on stderr.
pub struct TerminalPresenter {
    busy: Mutex<BusyIndicator>,
    /// Print translations as they arrive (off in batch mode)
    show_results: bool,
    /// Draw the spinner at all
    show_spinner: bool,
}

// Write errors are logged at debug level and never propagated
fn write_line(out: &mut impl Write, line: fmt::Arguments<'_>) -> bool {
    match writeln!(out, "{}", line) {
        Ok(()) => true,
        Err(e) => {
            debug!("Failed to write terminal output: {}", e);
            false
        }
    }
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            busy: Mutex::new(BusyIndicator::default()),
            show_results: true,
            show_spinner: true,
        }
    }

    /// Presenter that only reports failures; the caller prints the results
    pub fn banners_only() -> Self {
        Self {
            show_results: false,
            ..Self::new()
        }
    }

    pub fn without_spinner(mut self) -> Self {
        self.show_spinner = false;
        self
    }

    fn new_spinner() -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message("Translating");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn print_result(&self, label: &str, text: &str) {
        if !self.show_results {
            return;
        }
        self.suspend(|| {
            write_line(&mut std::io::stdout(), format_args!("{}: {}", label, text));
        });
    }

    fn print_banner(&self, message: &str) {
        self.suspend(|| {
            write_line(&mut std::io::stderr(), format_args!("\x1B[1;31m{}\x1B[0m", message));
        });
    }

    // Write around the spinner so it is redrawn below the output
    fn suspend(&self, f: impl FnOnce()) {
        let busy = self.busy.lock();
        match &busy.spinner {
            Some(spinner) => spinner.suspend(f),
            None => f(),
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn on_start(&self) {
        let mut busy = self.busy.lock();
        busy.active += 1;
        if self.show_spinner && busy.spinner.is_none() {
            busy.spinner = Some(Self::new_spinner());
        }
    }

    fn on_primary_result(&self, text: &str) {
        self.print_result("Translation", text);
    }

    fn on_final_result(&self, text: &str) {
        self.print_result("After postprocessing", text);
    }

    fn on_primary_error(&self) {
        self.print_banner(PRIMARY_ERROR_MESSAGE);
    }

    fn on_secondary_error(&self) {
        self.print_banner(SECONDARY_ERROR_MESSAGE);
    }

    fn on_end(&self) {
        let mut busy = self.busy.lock();
        busy.active = busy.active.saturating_sub(1);
        if busy.active == 0 {
            if let Some(spinner) = busy.spinner.take() {
                spinner.finish_and_clear();
            }
        }
    }
}
