use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A contiguous block of timed lyric lines sharing one on-screen treatment.
///
/// `start_time` and `duration` are milliseconds measured from the instant
/// playback was started. Groups may have no lyric lines at all; such groups
/// are still entered and left on schedule but display nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TimedGroup {
    pub id: String,
    pub lyrics: Vec<String>,
    pub start_time: u64,
    pub duration: u64,
}

impl TimedGroup {
    /// Milliseconds from the origin at which this group's interval ends.
    /// Exact for groups held by a validated [`Timeline`]; saturates for raw
    /// groups built with degenerate values.
    pub fn end_time(&self) -> u64 {
        self.start_time.saturating_add(self.duration)
    }

    /// Time each line stays on screen, or `None` for a group with no lines.
    pub fn line_interval(&self) -> Option<Duration> {
        let len = self.lyrics.len() as u64;
        if len == 0 {
            None
        } else {
            Some(Duration::from_millis(self.duration / len))
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("group `{id}` has a zero duration")]
    ZeroDuration { id: String },
    #[error("group `{id}` (index {index}) starts before the previous group")]
    UnsortedStart { id: String, index: usize },
    #[error("duplicate group id `{id}`")]
    DuplicateId { id: String },
    #[error("group `{id}`'s interval overflows the millisecond clock")]
    ClockOverflow { id: String },
}

/// A validated, immutable, ordered list of [`TimedGroup`]s.
///
/// Invariants established at construction: group starts are non-decreasing,
/// every duration is positive, every interval end fits the u64 millisecond
/// clock, ids are unique. A group's interval is allowed
/// to overlap the next group's start; in practice consecutive groups are
/// contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<TimedGroup>", into = "Vec<TimedGroup>")
)]
pub struct Timeline {
    groups: Vec<TimedGroup>,
}

impl Timeline {
    pub fn new(groups: Vec<TimedGroup>) -> Result<Self, TimelineError> {
        let mut prev_start = 0u64;
        for (index, group) in groups.iter().enumerate() {
            if group.duration == 0 {
                return Err(TimelineError::ZeroDuration {
                    id: group.id.clone(),
                });
            }
            if group.start_time < prev_start {
                return Err(TimelineError::UnsortedStart {
                    id: group.id.clone(),
                    index,
                });
            }
            prev_start = group.start_time;
            // Keeps end_time and every cue offset exact u64 milliseconds.
            if group.start_time.checked_add(group.duration).is_none() {
                return Err(TimelineError::ClockOverflow {
                    id: group.id.clone(),
                });
            }
            if groups[..index].iter().any(|g| g.id == group.id) {
                return Err(TimelineError::DuplicateId {
                    id: group.id.clone(),
                });
            }
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[TimedGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&TimedGroup> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Milliseconds from the origin at which the final group ends, or zero
    /// for an empty timeline.
    pub fn total_duration(&self) -> u64 {
        self.groups.last().map(TimedGroup::end_time).unwrap_or(0)
    }
}

impl TryFrom<Vec<TimedGroup>> for Timeline {
    type Error = TimelineError;

    fn try_from(groups: Vec<TimedGroup>) -> Result<Self, Self::Error> {
        Self::new(groups)
    }
}

impl From<Timeline> for Vec<TimedGroup> {
    fn from(timeline: Timeline) -> Self {
        timeline.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str, start_time: u64, duration: u64, lines: usize) -> TimedGroup {
        TimedGroup {
            id: id.to_string(),
            lyrics: (0..lines).map(|i| format!("{id} line {i}")).collect(),
            start_time,
            duration,
        }
    }

    #[test]
    fn accepts_contiguous_groups() {
        let timeline = Timeline::new(vec![
            group("groupA", 0, 8000, 4),
            group("groupB", 8000, 8000, 4),
        ])
        .unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.total_duration(), 16000);
    }

    #[test]
    fn accepts_overlapping_intervals() {
        // Only the starts must be ordered; overlap with the next start is fine.
        Timeline::new(vec![group("a", 0, 10000, 2), group("b", 4000, 4000, 2)]).unwrap();
    }

    #[test]
    fn rejects_zero_duration() {
        let err = Timeline::new(vec![group("a", 0, 0, 2)]).unwrap_err();
        assert_eq!(err, TimelineError::ZeroDuration { id: "a".into() });
    }

    #[test]
    fn rejects_unsorted_starts() {
        let err =
            Timeline::new(vec![group("a", 5000, 1000, 2), group("b", 0, 1000, 2)]).unwrap_err();
        assert_eq!(
            err,
            TimelineError::UnsortedStart {
                id: "b".into(),
                index: 1
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err =
            Timeline::new(vec![group("a", 0, 1000, 2), group("a", 1000, 1000, 2)]).unwrap_err();
        assert_eq!(err, TimelineError::DuplicateId { id: "a".into() });
    }

    #[test]
    fn line_interval_guards_empty_groups() {
        assert_eq!(group("a", 0, 8000, 0).line_interval(), None);
        assert_eq!(
            group("a", 0, 8000, 4).line_interval(),
            Some(Duration::from_millis(2000))
        );
    }

    #[test]
    fn rejects_intervals_past_the_clock_limit() {
        let err = Timeline::new(vec![group("a", u64::MAX - 10, 100, 1)]).unwrap_err();
        assert_eq!(err, TimelineError::ClockOverflow { id: "a".into() });
        // The raw group still answers without panicking.
        assert_eq!(group("a", u64::MAX - 10, 100, 1).end_time(), u64::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip() {
        let timeline = Timeline::new(vec![
            group("groupA", 0, 8000, 4),
            group("groupB", 8000, 8000, 4),
        ])
        .unwrap();
        let json = serde_json::to_string(&timeline).unwrap();
        assert!(json.contains("\"startTime\":8000"));
        let parsed: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, timeline);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_rejects_invalid_timelines() {
        let json = r#"[
            {"id": "a", "lyrics": [], "startTime": 5000, "duration": 1000},
            {"id": "b", "lyrics": [], "startTime": 0, "duration": 1000}
        ]"#;
        assert!(serde_json::from_str::<Timeline>(json).is_err());
    }
}
