//! Thread boundary between document loading and the UI.
//!
//! File reads and JSON decoding run on a worker thread so a large program
//! never stalls a frame. The UI holds a [`LoaderBridge`], sends
//! [`LoaderCommand`]s and drains [`LoaderMessage`]s once per frame. A failed
//! load is reported as a message and never touches the current session.

mod document;
mod source;
mod worker;

pub use document::parse_document;
pub use source::{FileSource, StructureSource};
pub use worker::LoaderWorker;

use crate::error::{P4LensError, Result};
use crate::program::ProgramStructure;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::PathBuf;
use std::thread::JoinHandle;

/// Commands sent from the UI thread to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderCommand {
    /// Read and decode a structure document.
    LoadFile(PathBuf),
    /// Stop the loader thread.
    Shutdown,
}

/// A successfully decoded document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub source: PathBuf,
    pub structure: ProgramStructure,
}

/// Messages sent from the loader to the UI thread.
#[derive(Debug, Clone)]
pub enum LoaderMessage {
    Loaded(LoadedDocument),
    Failed { source: PathBuf, error: String },
}

/// Channel capacity for commands (UI → loader).
const CMD_CHANNEL_CAPACITY: usize = 16;
/// Channel capacity for messages (loader → UI).
const MSG_CHANNEL_CAPACITY: usize = 16;

/// UI-side handle for communicating with the loader thread.
pub struct LoaderBridge {
    pub cmd_tx: Sender<LoaderCommand>,
    pub msg_rx: Receiver<LoaderMessage>,
}

impl LoaderBridge {
    /// Create a new bridge pair: `(bridge_for_ui, cmd_rx, msg_tx)`.
    ///
    /// The loader thread owns `cmd_rx` and `msg_tx`.
    pub fn new() -> (Self, Receiver<LoaderCommand>, Sender<LoaderMessage>) {
        let (cmd_tx, cmd_rx) = bounded(CMD_CHANNEL_CAPACITY);
        let (msg_tx, msg_rx) = bounded(MSG_CHANNEL_CAPACITY);
        (Self { cmd_tx, msg_rx }, cmd_rx, msg_tx)
    }

    /// Create a bridge and spawn a worker reading from `source`.
    pub fn spawn<S: StructureSource + 'static>(source: S) -> Result<(Self, JoinHandle<()>)> {
        let (bridge, cmd_rx, msg_tx) = Self::new();
        let worker = LoaderWorker::new(source, cmd_rx, msg_tx);
        let handle = std::thread::Builder::new()
            .name("p4lens-loader".to_string())
            .spawn(move || worker.run())?;
        Ok((bridge, handle))
    }

    /// Drain all pending messages.
    pub fn drain(&self) -> Vec<LoaderMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    /// Send a command to the worker. Fails once the worker has stopped.
    pub fn send_command(&self, cmd: LoaderCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|e| P4LensError::Channel(format!("loader is not running ({:?})", e.0)))
    }

    pub fn load_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        tracing::debug!("Requesting load of {:?}", path);
        self.send_command(LoaderCommand::LoadFile(path))
    }

    pub fn shutdown(&self) {
        if let Err(e) = self.send_command(LoaderCommand::Shutdown) {
            tracing::debug!("Loader already stopped: {}", e);
        }
    }
}
