//! Visibility-driven reel playback.
//!
//! Carousel playback follows one rule: the reel on screen plays with sound,
//! every other reel pauses and mutes. "On screen" means the viewport
//! intersection ratio reaches [`VISIBILITY_THRESHOLD`]. The tracker is fed
//! ratio snapshots by whatever observation mechanism the platform provides
//! and drives a [`PlaybackSink`]; it re-subscribes (resets) whenever the
//! listing generation changes, since indices from an old listing are
//! meaningless against a new one.

use serde::{Deserialize, Serialize};

/// Intersection ratio at which a reel counts as on screen.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Capability interface invoked as reels enter and leave the viewport.
pub trait PlaybackSink {
    /// The reel at `index` is on screen: play it with sound.
    fn on_visible(&mut self, index: usize);

    /// The reel at `index` is off screen: pause and mute it.
    fn on_hidden(&mut self, index: usize);
}

/// Tracks which reel of the current listing is audible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisibilityTracker {
    /// Listing generation the tracker is subscribed to.
    generation: u64,
    /// Index currently playing, if any.
    active: Option<usize>,
}

impl VisibilityTracker {
    /// A tracker subscribed to the given listing generation.
    #[must_use]
    pub const fn new(generation: u64) -> Self {
        Self {
            generation,
            active: None,
        }
    }

    /// The index currently playing, if any reel is sufficiently visible.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Feed one snapshot of per-reel intersection ratios.
    ///
    /// If `generation` differs from the subscribed one, the tracker resets
    /// to the new listing before applying the snapshot. The sink receives
    /// a verdict for every index in the snapshot.
    pub fn observe(
        &mut self,
        generation: u64,
        ratios: &[f32],
        sink: &mut impl PlaybackSink,
    ) {
        if generation != self.generation {
            self.generation = generation;
            self.active = None;
        }

        let mut visible = None;
        for (index, &ratio) in ratios.iter().enumerate() {
            if ratio >= VISIBILITY_THRESHOLD && visible.is_none() {
                visible = Some(index);
                sink.on_visible(index);
            } else {
                sink.on_hidden(index);
            }
        }
        self.active = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Commands {
        played: Vec<usize>,
        hidden: Vec<usize>,
    }

    impl PlaybackSink for Commands {
        fn on_visible(&mut self, index: usize) {
            self.played.push(index);
        }

        fn on_hidden(&mut self, index: usize) {
            self.hidden.push(index);
        }
    }

    #[test]
    fn the_reel_at_threshold_plays_and_the_rest_pause() {
        let mut tracker = VisibilityTracker::new(1);
        let mut sink = Commands::default();

        tracker.observe(1, &[0.1, 0.5, 0.9], &mut sink);

        assert_eq!(sink.played, vec![1]);
        assert_eq!(sink.hidden, vec![0, 2]);
        assert_eq!(tracker.active(), Some(1));
    }

    #[test]
    fn below_threshold_everything_pauses() {
        let mut tracker = VisibilityTracker::new(1);
        let mut sink = Commands::default();

        tracker.observe(1, &[0.2, 0.49], &mut sink);

        assert!(sink.played.is_empty());
        assert_eq!(sink.hidden, vec![0, 1]);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn a_generation_change_resets_the_tracker() {
        let mut tracker = VisibilityTracker::new(1);
        let mut sink = Commands::default();
        tracker.observe(1, &[1.0], &mut sink);
        assert_eq!(tracker.active(), Some(0));

        // New listing: the old active index no longer applies.
        let mut sink = Commands::default();
        tracker.observe(2, &[0.0, 0.0], &mut sink);
        assert_eq!(tracker.active(), None);
        assert_eq!(sink.hidden, vec![0, 1]);
    }

    #[test]
    fn only_the_first_qualifying_reel_plays() {
        let mut tracker = VisibilityTracker::new(3);
        let mut sink = Commands::default();

        // Two reels straddling the threshold: a single-item-visible
        // carousel plays exactly one.
        tracker.observe(3, &[0.6, 0.7], &mut sink);

        assert_eq!(sink.played, vec![0]);
        assert_eq!(sink.hidden, vec![1]);
    }
}
