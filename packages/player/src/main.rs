use std::{io::BufRead, path::Path, thread};

use rodio::OutputStreamBuilder;
use serenade_player_core::{
    AudioOutput, Player, PlayerConfig, PlayerHandle, PlayerMessage, RodioOutput,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod assets;
mod render;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let timeline = assets::load_timeline();
    let audio = open_audio();

    let player = Player::new(
        PlayerConfig {
            timeline: timeline.clone(),
        },
        audio,
    );
    let handle = player.handler();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to create the player runtime");
        runtime.block_on(player.run(move |evt| render::on_event(&timeline, &evt)));
    });

    println!("{}", render::idle_hint());
    run_input_loop(&handle)
}

fn open_audio() -> Option<Box<dyn AudioOutput>> {
    let stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => stream,
        Err(err) => {
            warn!("no default audio output stream, playing silently: {err:?}");
            return None;
        }
    };
    match RodioOutput::new(stream, Path::new(assets::AUDIO_ASSET)) {
        Ok(output) => Some(Box::new(output)),
        Err(err) => {
            warn!("audio disabled: {err:?}");
            None
        }
    }
}

/// The single control surface: Enter toggles playback, `q` quits.
fn run_input_loop(handle: &PlayerHandle) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if line?.trim() == "q" {
            break;
        }
        handle.send(PlayerMessage::Toggle)?;
    }
    handle.send(PlayerMessage::Close).ok();
    info!("goodbye");
    Ok(())
}
