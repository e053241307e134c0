//! Pure rendering of `(timeline, state)` snapshots.
//!
//! Everything here is a function of the static timeline and the current
//! [`PlaybackState`]; no timing logic lives on this side. The image assets
//! are rendered as labeled overlays in the terminal.

use serenade_player_core::{PlaybackState, PlayerEvent};
use serenade_timeline::Timeline;

use crate::assets::{FIRST_IMAGE_ASSET, SECOND_IMAGE_ASSET};

pub fn on_event(timeline: &Timeline, evt: &PlayerEvent) {
    match evt {
        PlayerEvent::StateChanged(state) | PlayerEvent::SyncStatus(state) => {
            print!("{}", render_frame(timeline, state));
        }
        PlayerEvent::Finished => println!("(the song fades to silence)"),
    }
}

pub fn render_frame(timeline: &Timeline, state: &PlaybackState) -> String {
    if !state.is_playing && state.active_group_index.is_none() {
        return format!("{}\n", idle_hint());
    }

    let mut frame = String::new();
    for image in visible_images(state) {
        frame.push_str("[image ");
        frame.push_str(image);
        frame.push_str("]\n");
    }
    if heart_card_visible(state) {
        frame.push_str("[<3]\n");
    }
    if let Some(line) = active_line(timeline, state) {
        frame.push_str(line);
        frame.push('\n');
    }
    frame.push_str(&progress_dots(state));
    frame.push('\n');
    frame
}

/// The one lyric line currently on screen, if any.
pub fn active_line<'a>(timeline: &'a Timeline, state: &PlaybackState) -> Option<&'a str> {
    let group = timeline.group(state.active_group_index?)?;
    group.lyrics.get(state.active_line_index).map(String::as_str)
}

/// Background images layer up during the first group: the first from line
/// zero, the second on top of it from line one.
pub fn visible_images(state: &PlaybackState) -> Vec<&'static str> {
    let mut images = Vec::new();
    if state.active_group_index == Some(0) {
        images.push(FIRST_IMAGE_ASSET);
        if state.active_line_index >= 1 {
            images.push(SECOND_IMAGE_ASSET);
        }
    }
    images
}

/// The decorative heart card shows only during the second group.
pub fn heart_card_visible(state: &PlaybackState) -> bool {
    state.active_group_index == Some(1)
}

/// One dot per group, the active one filled.
pub fn progress_dots(state: &PlaybackState) -> String {
    (0..state.group_count)
        .map(|index| {
            if state.active_group_index == Some(index) {
                "●"
            } else {
                "○"
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn idle_hint() -> &'static str {
    "Press Enter to start the lyric experience, Enter again to stop, q to quit."
}
