//! Ticket export pipeline
//!
//! Captures the mounted ticket view as a 2x raster, composes a single-page
//! A4 document, and hands it to the sink as `Ticket-<registrationId>.pdf`.
//! A state flag guards against concurrent re-invocation and is released on
//! every exit path.

pub mod handle;
pub mod pdf;

pub use handle::ExportHandle;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::page::Page;
use crate::{ExportConfig, Rasterizer};

/// User-facing message shown when any stage of the export fails
pub const EXPORT_FAILED_MESSAGE: &str = "Failed to download ticket. Please try again.";

/// Transient export job state; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExportState {
    Idle = 0,
    InProgress = 1,
    Failed = 2,
}

/// Shared, atomically updated export state.
///
/// Not a lock: execution is effectively single-threaded and the cell only
/// prevents a second job from starting while one is active. The trigger
/// control is enabled whenever the state is not `InProgress`.
#[derive(Clone, Default)]
pub struct ExportStateCell(Arc<AtomicU8>);

impl ExportStateCell {
    pub fn get(&self) -> ExportState {
        match self.0.load(Ordering::Acquire) {
            1 => ExportState::InProgress,
            2 => ExportState::Failed,
            _ => ExportState::Idle,
        }
    }

    /// Whether the export control should accept a new job
    pub fn trigger_enabled(&self) -> bool {
        self.get() != ExportState::InProgress
    }

    // Entry check: moves to InProgress unless a job is already running
    fn try_begin(&self) -> bool {
        let current = self.0.load(Ordering::Acquire);
        if current == ExportState::InProgress as u8 {
            return false;
        }
        self.0
            .compare_exchange(
                current,
                ExportState::InProgress as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    fn finish(&self, outcome: ExportState) {
        self.0.store(outcome as u8, Ordering::Release);
    }
}

// Releases the InProgress flag on every exit path. Defaults to Failed so a
// panic or early return still re-enables the trigger.
struct InProgressGuard {
    cell: ExportStateCell,
    outcome: ExportState,
}

impl InProgressGuard {
    fn new(cell: ExportStateCell) -> Self {
        Self { cell, outcome: ExportState::Failed }
    }

    fn succeed(&mut self) {
        self.outcome = ExportState::Idle;
    }
}

impl Drop for InProgressGuard {
    fn drop(&mut self) {
        self.cell.finish(self.outcome);
    }
}

/// User-visible failure notifications (the alert surface)
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Default notifier: routes the user-facing text to the error log
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// Destination for finished documents (the browser-download surface)
pub trait TicketSink: Send {
    /// Persist `bytes` under `filename`. Atomic from the caller's view:
    /// either the document lands completely or not at all.
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<()>;
}

/// Sink that writes documents into a directory
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TicketSink for FsSink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)?;
        log::debug!("saved {}", path.display());
        Ok(())
    }
}

/// Filename for an exported ticket
pub fn ticket_filename(registration_id: &str) -> String {
    format!("Ticket-{}.pdf", registration_id)
}

/// The export pipeline. Owns the page's view registry, a rasterizer backend,
/// a sink, and the notifier.
pub struct Exporter<R: Rasterizer> {
    page: Page,
    rasterizer: R,
    sink: Box<dyn TicketSink>,
    notifier: Arc<dyn Notifier>,
    config: ExportConfig,
    state: ExportStateCell,
}

impl<R: Rasterizer> Exporter<R> {
    pub fn new(
        page: Page,
        rasterizer: R,
        sink: Box<dyn TicketSink>,
        notifier: Arc<dyn Notifier>,
        config: ExportConfig,
    ) -> Self {
        Self {
            page,
            rasterizer,
            sink,
            notifier,
            config,
            state: ExportStateCell::default(),
        }
    }

    /// Shared state cell; lets an embedding runtime observe the job state
    /// (and disable the trigger control) without going through the pipeline.
    pub fn state_cell(&self) -> ExportStateCell {
        self.state.clone()
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Export the mounted ticket view as a PDF.
    ///
    /// A missing element is a silent no-op: the view is always rendered
    /// alongside the trigger, so this precondition failure should not occur
    /// in normal operation. Re-invocation while a job is running is also a
    /// no-op. Failures are notified and logged here; the returned error is
    /// purely diagnostic.
    pub fn export_ticket(&mut self, element_id: &str, registration_id: &str) -> Result<()> {
        let Some(view) = self.page.view(element_id) else {
            log::debug!("ticket element '{}' not mounted; skipping export", element_id);
            return Ok(());
        };
        let view = view.clone();

        if !self.state.try_begin() {
            log::debug!("export already in progress; ignoring trigger");
            return Ok(());
        }
        let mut guard = InProgressGuard::new(self.state.clone());

        let result = (|| -> Result<()> {
            let shot = self.rasterizer.rasterize(&view, &self.config.raster)?;
            let document = pdf::compose_a4(&shot, &self.config, registration_id)?;
            self.sink.save(&ticket_filename(registration_id), &document)
        })();

        match result {
            Ok(()) => {
                guard.succeed();
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to generate PDF: {}", e);
                self.notifier.notify(EXPORT_FAILED_MESSAGE);
                Err(e)
            }
        }
    }
}
