use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc;

mod worker;

pub use worker::worker_task;

// Re-export types from library crates
pub use pdf_unbooklet::{
    PosterOptions, ProgressSink, SampleBooklet, UnbookletOptions, UnbookletStatistics,
};

/// Commands sent to the worker
#[derive(Debug)]
pub enum PdfCommand {
    /// Reassemble `options.input_file` into single pages
    Unbooklet {
        options: UnbookletOptions,
        output_path: PathBuf,
    },
    /// Enlarge `options.input_file` into poster tiles
    Poster {
        options: PosterOptions,
        output_path: PathBuf,
    },
    CreateSample {
        sample: SampleBooklet,
        output_path: PathBuf,
    },
    LoadConfig {
        path: PathBuf,
    },
    CalculateStats {
        input_path: PathBuf,
    },
}

/// Updates sent from the worker
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    UnbookletComplete {
        path: PathBuf,
        page_count: usize,
    },
    PosterComplete {
        path: PathBuf,
        page_count: usize,
    },
    SampleComplete {
        path: PathBuf,
        page_count: usize,
    },
    ConfigLoaded {
        options: UnbookletOptions,
    },
    StatsCalculated {
        stats: UnbookletStatistics,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Default)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

/// Progress sink forwarding every change as a [`PdfUpdate::Progress`]
///
/// A receiver that has gone away is not an error; the run simply continues.
pub struct ChannelProgress {
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
    state: Mutex<ProgressState>,
}

impl ChannelProgress {
    pub fn new(update_tx: mpsc::UnboundedSender<PdfUpdate>) -> Self {
        Self {
            update_tx,
            state: Mutex::new(ProgressState::default()),
        }
    }

    fn with_state(&self, change: impl FnOnce(&mut ProgressState)) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        change(&mut state);
        let _ = self.update_tx.send(PdfUpdate::Progress {
            operation: state.operation.clone(),
            current: state.current,
            total: state.total,
        });
    }
}

impl ProgressSink for ChannelProgress {
    fn set_total(&self, total: usize) {
        self.with_state(|state| {
            state.total = total;
            state.current = 0;
        });
    }

    fn set_description(&self, description: &str) {
        self.with_state(|state| state.operation = description.to_string());
    }

    fn update(&self, steps: usize) {
        self.with_state(|state| state.current += steps);
    }
}
