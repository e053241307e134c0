use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serenade_timeline::{CueAction, Timeline};
use tokio::sync::{
    RwLock as TokioRwLock,
    mpsc::{UnboundedReceiver, UnboundedSender},
};
use tracing::{debug, info, warn};

use crate::{
    PlayerEventReceiver, PlayerEventSender, PlayerMessageReceiver, PlayerMessageSender,
    audio::AudioOutput, session::CueSession,
};

/// The transient state one playback session derives from the timeline.
///
/// Reset to defaults on stop and on the final group's completion;
/// `group_count` is static and survives resets so renderers can draw the
/// progress indicator while idle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub is_playing: bool,
    pub active_group_id: Option<String>,
    pub active_group_index: Option<usize>,
    pub active_line_index: usize,
    pub group_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum PlayerMessage {
    Start,
    Stop,
    /// The single user-facing control: start when idle, stop when playing.
    Toggle,
    /// Ask the engine to re-emit the current state as a `SyncStatus` event.
    SyncStatus,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum PlayerEvent {
    StateChanged(PlaybackState),
    /// The final group's duration elapsed without an explicit stop.
    Finished,
    SyncStatus(PlaybackState),
}

/// A fired cue coming back from a session task. Cues from a cancelled
/// session are discarded by generation, so nothing scheduled before a stop
/// can mutate state after it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CueFired {
    pub(crate) generation: u64,
    pub(crate) action: CueAction,
}

pub struct PlayerConfig {
    pub timeline: Timeline,
}

pub struct Player {
    evt_sender: PlayerEventSender,
    evt_receiver: PlayerEventReceiver,
    msg_sender: PlayerMessageSender,
    msg_receiver: PlayerMessageReceiver,
    cue_sender: UnboundedSender<CueFired>,
    cue_receiver: UnboundedReceiver<CueFired>,
    timeline: Timeline,
    state: Arc<TokioRwLock<PlaybackState>>,
    audio: Option<Box<dyn AudioOutput>>,
    session: Option<CueSession>,
    next_generation: u64,
}

impl Player {
    pub fn new(config: PlayerConfig, audio: Option<Box<dyn AudioOutput>>) -> Self {
        let (evt_sender, evt_receiver) = tokio::sync::mpsc::unbounded_channel();
        let (msg_sender, msg_receiver) = tokio::sync::mpsc::unbounded_channel();
        let (cue_sender, cue_receiver) = tokio::sync::mpsc::unbounded_channel();

        let state = Arc::new(TokioRwLock::new(PlaybackState {
            group_count: config.timeline.len(),
            ..PlaybackState::default()
        }));

        if audio.is_none() {
            info!("no audio output attached, timeline will run silently");
        }

        Self {
            evt_sender,
            evt_receiver,
            msg_sender,
            msg_receiver,
            cue_sender,
            cue_receiver,
            timeline: config.timeline,
            state,
            audio,
            session: None,
            next_generation: 0,
        }
    }

    pub fn handler(&self) -> PlayerHandle {
        PlayerHandle::new(self.msg_sender.clone())
    }

    /// Read-only view of the playback state; the engine loop is the only
    /// writer.
    pub fn state_handle(&self) -> Arc<TokioRwLock<PlaybackState>> {
        self.state.clone()
    }

    fn emitter(&self) -> PlayerEventEmitter {
        PlayerEventEmitter::new(self.evt_sender.clone())
    }

    pub async fn run(mut self, on_event: impl Fn(PlayerEvent) + Send + 'static) {
        loop {
            tokio::select! {
                biased;
                msg = self.msg_receiver.recv() => {
                    match msg {
                        Some(PlayerMessage::Close) | None => break,
                        Some(msg) => {
                            if let Err(err) = self.process_message(msg).await {
                                warn!("failed to process player message: {err:?}");
                            }
                        }
                    }
                }
                cue = self.cue_receiver.recv() => {
                    // The engine holds a sender too, so this branch never closes.
                    if let Some(cue) = cue {
                        if let Err(err) = self.process_cue(cue).await {
                            warn!("failed to apply cue: {err:?}");
                        }
                    }
                }
                evt = self.evt_receiver.recv() => {
                    if let Some(evt) = evt {
                        on_event(evt);
                    } else {
                        break;
                    }
                }
            }
        }
    }

    pub async fn process_message(&mut self, msg: PlayerMessage) -> anyhow::Result<()> {
        match msg {
            PlayerMessage::Start => self.start().await?,
            PlayerMessage::Stop => self.stop().await?,
            PlayerMessage::Toggle => {
                let is_playing = self.state.read().await.is_playing;
                if is_playing {
                    self.stop().await?;
                } else {
                    self.start().await?;
                }
            }
            PlayerMessage::SyncStatus => {
                let snapshot = self.state.read().await.clone();
                self.emitter().emit(PlayerEvent::SyncStatus(snapshot))?;
            }
            PlayerMessage::Close => {}
        }
        Ok(())
    }

    /// Idle → Playing. Starting while already playing cancels the previous
    /// session's pending cues first, so no duplicate actions survive.
    async fn start(&mut self) -> anyhow::Result<()> {
        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        self.session = None;
        self.next_generation += 1;
        let generation = self.next_generation;

        if let Some(audio) = self.audio.as_mut() {
            audio.rewind();
            audio.play();
        }

        {
            let mut state = self.state.write().await;
            state.is_playing = true;
            state.active_group_id = None;
            state.active_group_index = None;
            state.active_line_index = 0;
        }

        let cues = self.timeline.cues();
        info!("session {generation}: starting playback, {} cues", cues.len());
        self.session = Some(CueSession::spawn(
            generation,
            &cues,
            self.cue_sender.clone(),
        ));

        self.emit_state().await
    }

    /// Playing → Idle. Cancels every pending cue before resetting, so no
    /// dangling action can mutate state afterwards.
    async fn stop(&mut self) -> anyhow::Result<()> {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }

        if let Some(audio) = self.audio.as_mut() {
            audio.pause();
            audio.rewind();
        }

        self.reset_state().await;
        info!("playback stopped");
        self.emit_state().await
    }

    async fn process_cue(&mut self, cue: CueFired) -> anyhow::Result<()> {
        let current = self.session.as_ref().map(CueSession::generation);
        if current != Some(cue.generation) {
            debug!("discarding stale cue from session {}", cue.generation);
            return Ok(());
        }

        match cue.action {
            CueAction::EnterGroup { group_index } => {
                let Some(group) = self.timeline.group(group_index) else {
                    return Ok(());
                };
                let mut state = self.state.write().await;
                state.active_group_id = Some(group.id.clone());
                state.active_group_index = Some(group_index);
                state.active_line_index = 0;
            }
            CueAction::SetLine {
                group_index,
                line_index,
            } => {
                debug!("session {}: group {group_index} line {line_index}", cue.generation);
                self.state.write().await.active_line_index = line_index;
            }
            CueAction::Finish => {
                // Natural completion; the audio is left to run out on its own.
                self.session = None;
                self.reset_state().await;
                info!("session {}: timeline finished", cue.generation);
                self.emit_state().await?;
                self.emitter().emit(PlayerEvent::Finished)?;
                return Ok(());
            }
        }

        self.emit_state().await
    }

    async fn reset_state(&mut self) {
        let mut state = self.state.write().await;
        state.is_playing = false;
        state.active_group_id = None;
        state.active_group_index = None;
        state.active_line_index = 0;
    }

    async fn emit_state(&self) -> anyhow::Result<()> {
        let snapshot = self.state.read().await.clone();
        self.emitter().emit(PlayerEvent::StateChanged(snapshot))
    }
}

#[derive(Debug, Clone)]
pub struct PlayerHandle {
    msg_sender: PlayerMessageSender,
}

impl PlayerHandle {
    pub(crate) fn new(msg_sender: PlayerMessageSender) -> Self {
        Self { msg_sender }
    }

    pub fn send(&self, msg: PlayerMessage) -> anyhow::Result<()> {
        self.msg_sender.send(msg)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PlayerEventEmitter {
    evt_sender: PlayerEventSender,
}

impl PlayerEventEmitter {
    pub(crate) fn new(evt_sender: PlayerEventSender) -> Self {
        Self { evt_sender }
    }

    pub(crate) fn emit(&self, evt: PlayerEvent) -> anyhow::Result<()> {
        self.evt_sender.send(evt)?;
        Ok(())
    }
}
