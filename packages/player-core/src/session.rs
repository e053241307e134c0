use serenade_timeline::Cue;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::debug;

use crate::player::CueFired;

/// The outstanding delayed actions of one playback session.
///
/// Every cue task is tracked in one collection so stop/teardown can cancel
/// them as a batch. A task that already fired before cancellation may still
/// have a message in flight; the engine discards those by generation.
pub(crate) struct CueSession {
    generation: u64,
    tasks: Vec<JoinHandle<()>>,
}

impl CueSession {
    pub(crate) fn spawn(
        generation: u64,
        cues: &[Cue],
        cue_sender: UnboundedSender<CueFired>,
    ) -> Self {
        let mut tasks = Vec::with_capacity(cues.len());
        for cue in cues {
            let cue = *cue;
            let sender = cue_sender.clone();
            tasks.push(tokio::spawn(async move {
                tokio::time::sleep(cue.offset).await;
                let _ = sender.send(CueFired {
                    generation,
                    action: cue.action,
                });
            }));
        }
        debug!("session {generation}: scheduled {} cues", tasks.len());
        Self { generation, tasks }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cancel(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for CueSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
