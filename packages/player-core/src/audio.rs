//! Audio output seam.
//!
//! The engine only ever plays, pauses, or rewinds one preloaded track, so the
//! device-facing surface is kept behind a trait. Production uses rodio; tests
//! run the engine with no output attached.

use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context;
use rodio::{Decoder, OutputStream, Sink};
use tracing::warn;

pub trait AudioOutput: Send + Sync {
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek back to the beginning of the track.
    fn rewind(&mut self);
}

/// Rodio-backed output holding one decoded track in a paused sink.
pub struct RodioOutput {
    // Keeps the device stream alive for as long as the sink is in use.
    _stream: OutputStream,
    sink: Sink,
}

impl RodioOutput {
    pub fn new(stream: OutputStream, asset: &Path) -> anyhow::Result<Self> {
        let file = File::open(asset)
            .with_context(|| format!("failed to open audio asset {}", asset.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("failed to decode audio asset {}", asset.display()))?;

        let sink = Sink::connect_new(&stream.mixer());
        sink.pause();
        sink.append(source);

        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl AudioOutput for RodioOutput {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn rewind(&mut self) {
        if let Err(err) = self.sink.try_seek(Duration::ZERO) {
            warn!("failed to rewind audio sink: {err:?}");
        }
    }
}
