//! Playback engine for the serenade lyric-video player.
//!
//! The engine converts a static [`serenade_timeline::Timeline`] into a batch
//! of cancellable delayed actions, applies them to a single shared
//! [`PlaybackState`], and drives the audio output's play/pause/rewind. It is
//! controlled through messages and observed through events; the engine loop
//! is the only writer of the state.

pub mod audio;
mod player;
mod session;

pub use audio::{AudioOutput, RodioOutput};
pub use player::{
    PlaybackState, Player, PlayerConfig, PlayerEvent, PlayerHandle, PlayerMessage,
};

pub type PlayerMessageSender = tokio::sync::mpsc::UnboundedSender<PlayerMessage>;
pub type PlayerMessageReceiver = tokio::sync::mpsc::UnboundedReceiver<PlayerMessage>;
pub type PlayerEventSender = tokio::sync::mpsc::UnboundedSender<PlayerEvent>;
pub type PlayerEventReceiver = tokio::sync::mpsc::UnboundedReceiver<PlayerEvent>;
