//! Flat scheduling records derived from a [`Timeline`].
//!
//! Scheduling works off explicit `{offset, action}` records rather than
//! closures capturing loop state, so a playback engine can batch-schedule
//! and batch-cancel them without knowing anything about rendering.

use std::time::Duration;

use crate::Timeline;

/// A state mutation to apply when a cue's offset elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueAction {
    /// Activate the group: it becomes the visible one, at line zero.
    EnterGroup { group_index: usize },
    /// Advance the displayed line within the group entered at the same or an
    /// earlier offset.
    SetLine {
        group_index: usize,
        line_index: usize,
    },
    /// The final group's duration has elapsed; playback is over.
    Finish,
}

/// One precomputed delayed action, offset from the playback origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub offset: Duration,
    pub action: CueAction,
}

impl Cue {
    fn at(offset_ms: u64, action: CueAction) -> Self {
        Self {
            offset: Duration::from_millis(offset_ms),
            action,
        }
    }
}

impl Timeline {
    /// Builds the full cue list for one playback session, in non-decreasing
    /// offset order.
    ///
    /// Per group: one `EnterGroup` at its start, one `SetLine` per lyric line
    /// at `start + i * (duration / lines)`. A group with no lines gets no
    /// `SetLine` cues at all. A single `Finish` cue sits at the final group's
    /// end; an empty timeline yields no cues.
    pub fn cues(&self) -> Vec<Cue> {
        let mut cues = Vec::new();
        for (group_index, group) in self.groups().iter().enumerate() {
            cues.push(Cue::at(
                group.start_time,
                CueAction::EnterGroup { group_index },
            ));
            let Some(interval) = group.line_interval() else {
                continue;
            };
            let interval = interval.as_millis() as u64;
            for line_index in 0..group.lyrics.len() {
                cues.push(Cue::at(
                    group.start_time + line_index as u64 * interval,
                    CueAction::SetLine {
                        group_index,
                        line_index,
                    },
                ));
            }
        }
        if let Some(last) = self.groups().last() {
            cues.push(Cue::at(last.end_time(), CueAction::Finish));
        }
        // Stable, so EnterGroup stays ahead of the same group's line zero.
        cues.sort_by_key(|cue| cue.offset);
        cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimedGroup;

    fn group(id: &str, start_time: u64, duration: u64, lines: usize) -> TimedGroup {
        TimedGroup {
            id: id.to_string(),
            lyrics: (0..lines).map(|i| format!("{id} line {i}")).collect(),
            start_time,
            duration,
        }
    }

    fn offsets_of(cues: &[Cue], action: fn(&CueAction) -> bool) -> Vec<u64> {
        cues.iter()
            .filter(|c| action(&c.action))
            .map(|c| c.offset.as_millis() as u64)
            .collect()
    }

    #[test]
    fn two_group_cue_offsets() {
        let timeline = Timeline::new(vec![
            group("groupA", 0, 8000, 4),
            group("groupB", 8000, 8000, 4),
        ])
        .unwrap();
        let cues = timeline.cues();

        assert_eq!(
            offsets_of(&cues, |a| matches!(a, CueAction::EnterGroup { .. })),
            vec![0, 8000]
        );
        assert_eq!(
            offsets_of(&cues, |a| matches!(a, CueAction::SetLine { .. })),
            vec![0, 2000, 4000, 6000, 8000, 10000, 12000, 14000]
        );
        assert_eq!(
            offsets_of(&cues, |a| matches!(a, CueAction::Finish)),
            vec![16000]
        );
    }

    #[test]
    fn cues_are_ordered_and_enter_precedes_line_zero() {
        let timeline = Timeline::new(vec![
            group("a", 0, 9000, 3),
            group("b", 9000, 4000, 2),
        ])
        .unwrap();
        let cues = timeline.cues();

        let mut prev = Duration::ZERO;
        for cue in &cues {
            assert!(cue.offset >= prev);
            prev = cue.offset;
        }

        let enter_b = cues
            .iter()
            .position(|c| c.action == CueAction::EnterGroup { group_index: 1 })
            .unwrap();
        let line_b0 = cues
            .iter()
            .position(|c| {
                c.action
                    == CueAction::SetLine {
                        group_index: 1,
                        line_index: 0,
                    }
            })
            .unwrap();
        assert!(enter_b < line_b0);
    }

    #[test]
    fn empty_group_schedules_no_line_cues() {
        let timeline = Timeline::new(vec![group("a", 0, 4000, 0)]).unwrap();
        let cues = timeline.cues();
        assert!(
            cues.iter()
                .all(|c| !matches!(c.action, CueAction::SetLine { .. }))
        );
        // Still entered and finished on schedule.
        assert_eq!(cues.len(), 2);
    }

    #[test]
    fn empty_timeline_yields_no_cues() {
        assert!(Timeline::default().cues().is_empty());
    }
}
