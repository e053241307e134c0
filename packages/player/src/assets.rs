//! Fixed well-known media assets and the timeline data they accompany.
//!
//! There is no configuration surface: the audio track, the overlay images
//! and the optional timeline file all live at fixed paths next to the
//! binary's working directory. A missing or malformed timeline file falls
//! back to the built-in one.

use std::fs;

use serenade_timeline::{TimedGroup, Timeline};
use tracing::{info, warn};

pub const AUDIO_ASSET: &str = "assets/love.mp3";
pub const FIRST_IMAGE_ASSET: &str = "assets/1g1.png";
pub const SECOND_IMAGE_ASSET: &str = "assets/1g2.png";
pub const TIMELINE_ASSET: &str = "assets/timeline.json";

pub fn load_timeline() -> Timeline {
    if let Ok(json) = fs::read_to_string(TIMELINE_ASSET) {
        match serde_json::from_str(&json) {
            Ok(timeline) => {
                info!("loaded timeline from {TIMELINE_ASSET}");
                return timeline;
            }
            Err(err) => {
                warn!("ignoring malformed {TIMELINE_ASSET}, using the built-in timeline: {err}");
            }
        }
    }
    builtin_timeline()
}

/// Four contiguous eight-second verses.
pub fn builtin_timeline() -> Timeline {
    Timeline::new(vec![
        group(
            "groupA",
            &[
                "Placeholder line one of the song",
                "Another beautiful line here",
                "Third line with emotion",
                "Final line of first verse",
            ],
            0,
        ),
        group(
            "groupB",
            &[
                "Second verse placeholder text",
                "More meaningful words here",
                "Building up the chorus",
                "Emotional peak moment",
            ],
            8000,
        ),
        group(
            "groupC",
            &[
                "Bridge section placeholder",
                "Softer moment in the song",
                "Building back up again",
                "Preparing for the finale",
            ],
            16000,
        ),
        group(
            "groupD",
            &[
                "Final chorus placeholder",
                "Most powerful moment",
                "Climactic ending here",
                "Song fades to silence",
            ],
            24000,
        ),
    ])
    .expect("the built-in timeline is valid")
}

fn group(id: &str, lyrics: &[&str], start_time: u64) -> TimedGroup {
    TimedGroup {
        id: id.to_string(),
        lyrics: lyrics.iter().map(|line| line.to_string()).collect(),
        start_time,
        duration: 8000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_timeline_is_contiguous() {
        let timeline = builtin_timeline();
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline.total_duration(), 32_000);
        for pair in timeline.groups().windows(2) {
            assert_eq!(pair[1].start_time, pair[0].end_time());
        }
    }

    #[test]
    fn builtin_timeline_survives_the_asset_format() {
        let timeline = builtin_timeline();
        let json = serde_json::to_string_pretty(&timeline).unwrap();
        let parsed: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, timeline);
    }
}
