//! Loader worker thread
//!
//! Blocks on the command channel, fetches each requested document through a
//! [`StructureSource`] and answers with exactly one [`LoaderMessage`] per
//! load. The loop ends on [`LoaderCommand::Shutdown`] or when either side of
//! the bridge is dropped.

use super::{parse_document, LoadedDocument, LoaderCommand, LoaderMessage, StructureSource};
use crate::error::Result;
use crate::program::ProgramStructure;
use crossbeam_channel::{Receiver, Sender};
use std::path::Path;

pub struct LoaderWorker<S: StructureSource> {
    source: S,
    command_rx: Receiver<LoaderCommand>,
    message_tx: Sender<LoaderMessage>,
}

impl<S: StructureSource> LoaderWorker<S> {
    pub fn new(
        source: S,
        command_rx: Receiver<LoaderCommand>,
        message_tx: Sender<LoaderMessage>,
    ) -> Self {
        Self {
            source,
            command_rx,
            message_tx,
        }
    }

    /// Run the worker loop until shutdown
    pub fn run(self) {
        tracing::info!("Loader worker started");

        while let Ok(cmd) = self.command_rx.recv() {
            match cmd {
                LoaderCommand::LoadFile(path) => {
                    let msg = self.handle_load(&path);
                    if self.message_tx.send(msg).is_err() {
                        tracing::debug!("UI side of the loader bridge is gone");
                        break;
                    }
                }
                LoaderCommand::Shutdown => break,
            }
        }

        tracing::info!("Loader worker stopped");
    }

    fn handle_load(&self, path: &Path) -> LoaderMessage {
        match self.load(path) {
            Ok(structure) => LoaderMessage::Loaded(LoadedDocument {
                source: path.to_path_buf(),
                structure,
            }),
            Err(e) => {
                tracing::warn!("Failed to load {:?}: {}", path, e);
                LoaderMessage::Failed {
                    source: path.to_path_buf(),
                    error: e.to_string(),
                }
            }
        }
    }

    fn load(&self, path: &Path) -> Result<ProgramStructure> {
        let text = self.source.fetch(path)?;
        let fallback = path.file_name().and_then(|n| n.to_str());
        parse_document(&text, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::P4LensError;
    use crate::loader::source::MockStructureSource;
    use crate::loader::LoaderBridge;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    fn run_single(source: MockStructureSource, path: &str) -> LoaderMessage {
        let (bridge, cmd_rx, msg_tx) = LoaderBridge::new();
        bridge.load_file(path).unwrap();
        bridge.shutdown();
        LoaderWorker::new(source, cmd_rx, msg_tx).run();
        let mut msgs = bridge.drain();
        assert_eq!(msgs.len(), 1);
        msgs.remove(0)
    }

    #[test]
    fn test_loaded_message() {
        let mut source = MockStructureSource::new();
        source
            .expect_fetch()
            .with(eq(PathBuf::from("/tmp/basic.json")))
            .times(1)
            .returning(|_| Ok(r#"{"c": {"type": "control"}, "p": {"type": "parser"}}"#.into()));

        match run_single(source, "/tmp/basic.json") {
            LoaderMessage::Loaded(doc) => {
                assert_eq!(doc.structure.stages.len(), 2);
                assert_eq!(doc.structure.filename.as_deref(), Some("basic.json"));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_fetch_failure_is_reported() {
        let mut source = MockStructureSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(P4LensError::Document("connection refused".into())));

        match run_single(source, "remote.json") {
            LoaderMessage::Failed { source, error } => {
                assert_eq!(source, PathBuf::from("remote.json"));
                assert!(error.contains("connection refused"));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let mut source = MockStructureSource::new();
        source.expect_fetch().returning(|_| Ok("{\"p\": ".into()));

        assert!(matches!(
            run_single(source, "broken.json"),
            LoaderMessage::Failed { .. }
        ));
    }

    #[test]
    fn test_stops_when_bridge_dropped() {
        let (bridge, cmd_rx, msg_tx) = LoaderBridge::new();
        drop(bridge);
        let mut source = MockStructureSource::new();
        source.expect_fetch().never();
        LoaderWorker::new(source, cmd_rx, msg_tx).run();
    }
}
