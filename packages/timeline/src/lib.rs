//! Timed lyric-group data model for the serenade player.
//!
//! A [`Timeline`] is a validated, ordered list of [`TimedGroup`]s. Playback
//! engines do not read it directly at runtime; instead they precompute the
//! flat list of [`Cue`]s and schedule those against a single origin instant.

pub mod cue;
mod timeline;

pub use cue::{Cue, CueAction};
pub use timeline::{TimedGroup, Timeline, TimelineError};
