//! Async-friendly export facade
//!
//! The pipeline itself is synchronous; a dedicated worker thread owns it and
//! executes commands sent from async tasks, so a UI runtime can await an
//! export while its loop stays responsive. The shared state cell is read
//! directly (not through the worker) so the trigger's disabled state is
//! observable while a job is running.

use std::sync::mpsc::{self, Sender};
use std::thread;

use tokio::sync::oneshot;

use super::{ExportState, ExportStateCell, Exporter};
use crate::error::{Error, Result};
use crate::page::Page;
use crate::ticket::TicketView;
use crate::Rasterizer;

enum Command {
    Export(String, String, oneshot::Sender<Result<()>>),
    Mount(String, TicketView, oneshot::Sender<()>),
    Unmount(String, oneshot::Sender<()>),
    Close(oneshot::Sender<()>),
}

/// Handle to an export pipeline running on its own worker thread
#[derive(Clone)]
pub struct ExportHandle {
    cmd_tx: Sender<Command>,
    state: ExportStateCell,
}

impl ExportHandle {
    /// Spawn a worker thread that owns the exporter
    pub fn spawn<R>(mut exporter: Exporter<R>) -> Self
    where
        R: Rasterizer + Send + 'static,
    {
        let state = exporter.state_cell();
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Export(element_id, registration_id, resp) => {
                        let res = exporter.export_ticket(&element_id, &registration_id);
                        let _ = resp.send(res);
                    }
                    Command::Mount(id, view, resp) => {
                        exporter.page_mut().mount(id, view);
                        let _ = resp.send(());
                    }
                    Command::Unmount(id, resp) => {
                        exporter.page_mut().unmount(&id);
                        let _ = resp.send(());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        Self { cmd_tx, state }
    }

    /// Current export job state
    pub fn state(&self) -> ExportState {
        self.state.get()
    }

    /// Whether the export control should accept a click
    pub fn trigger_enabled(&self) -> bool {
        self.state.trigger_enabled()
    }

    /// Export the mounted ticket. A trigger while a job is already running
    /// resolves immediately as a no-op without queueing a second job.
    pub async fn export(&self, element_id: &str, registration_id: &str) -> Result<()> {
        if !self.state.trigger_enabled() {
            log::debug!("export already in progress; ignoring trigger");
            return Ok(());
        }
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Export(
            element_id.to_string(),
            registration_id.to_string(),
            tx,
        ));
        rx.await
            .map_err(|e| Error::Other(format!("Export canceled: {}", e)))?
    }

    /// Mount a view on the worker-owned page
    pub async fn mount(&self, id: &str, view: TicketView) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Mount(id.to_string(), view, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Mount canceled: {}", e)))
    }

    /// Unmount a view from the worker-owned page
    pub async fn unmount(&self, id: &str) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Unmount(id.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("Unmount canceled: {}", e)))
    }

    /// Shut the worker down
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))
    }

    /// Convenience: spawn with an empty page and mount views afterwards
    pub fn spawn_empty<R>(
        rasterizer: R,
        sink: Box<dyn super::TicketSink>,
        notifier: std::sync::Arc<dyn super::Notifier>,
        config: crate::ExportConfig,
    ) -> Self
    where
        R: Rasterizer + Send + 'static,
    {
        Self::spawn(Exporter::new(Page::new(), rasterizer, sink, notifier, config))
    }
}
