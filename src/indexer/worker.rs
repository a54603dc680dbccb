//! Background scan worker
//!
//! Runs the same walk as [`walk_defs`] on a dedicated thread and reports back over a
//! channel. Each root is walked into its own index, so the worker shares no mutable
//! state with the caller.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use super::builder::ScanProgress;
use super::definition_index::DefinitionIndex;
use super::walker::walk_defs;
use crate::models::ScanTarget;
use crate::parsers::ExtractMode;

/// Messages streamed from the worker, in order: for each root a `Definitions` batch
/// followed by its `Progress`, then a single `Complete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    Definitions(Vec<(String, Vec<String>)>),
    Progress(ScanProgress),
    Complete,
}

/// Handle to a running scan worker
pub struct ScanWorker {
    receiver: Receiver<WorkerMessage>,
    handle: JoinHandle<()>,
}

impl ScanWorker {
    /// Blocking iterator over worker messages; ends when the worker hangs up
    pub fn messages(&self) -> mpsc::Iter<'_, WorkerMessage> {
        self.receiver.iter()
    }

    /// Wait for the worker thread to exit
    pub fn join(self) -> thread::Result<()> {
        drop(self.receiver);
        self.handle.join()
    }
}

/// Start walking `targets` on a background thread
pub fn spawn_scan_worker(targets: Vec<ScanTarget>, mode: ExtractMode) -> io::Result<ScanWorker> {
    let (sender, receiver) = mpsc::channel();

    let handle = thread::Builder::new().name("rimcomplete-scan".to_string()).spawn(move || {
        let total = targets.len();
        for (i, target) in targets.into_iter().enumerate() {
            let mut index = DefinitionIndex::new();
            walk_defs(&target.path, &mut index, mode);

            let batch = WorkerMessage::Definitions(index.to_pairs());
            let progress =
                WorkerMessage::Progress(ScanProgress { current: i + 1, total, name: target.name });
            // Receiver gone means nobody wants the result any more
            if sender.send(batch).is_err() || sender.send(progress).is_err() {
                return;
            }
        }
        let _ = sender.send(WorkerMessage::Complete);
    })?;

    Ok(ScanWorker { receiver, handle })
}
