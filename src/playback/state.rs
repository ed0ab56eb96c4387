//! Player state machine.
//!
//! `PlayerState::apply` takes one event, mutates the state and returns the side effects
//! the caller must carry out on the audio element and the session store. Nothing in
//! here touches the document, so every transition is testable on its own.

use rand::Rng;

use crate::db::PersistedState;

/// Identifies a play request so late resolutions of superseded requests can be dropped.
pub type PlayTicket = u64;

/// Result of asking the native element to start playback.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    Started,
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    TogglePlay,
    PrevTrack,
    NextTrack,
    ToggleShuffle,
    ToggleRepeat,
    /// A play request settled.
    PlayResolved {
        ticket: PlayTicket,
        outcome: PlayOutcome,
    },
    /// Native `play` notification.
    MediaPlaying,
    /// Native `pause` notification.
    MediaPaused,
    /// Native `timeupdate`; `duration` is the raw element value and may be NaN.
    TimeUpdate { position: f64, duration: f64 },
    MetadataLoaded { duration: f64 },
    Ended,
    /// Click on the progress bar at `fraction` of its width.
    Seek { fraction: f64 },
    DragStart,
    DragMove { fraction: f64 },
    DragEnd,
}

impl PlayerEvent {
    /// Whether the event comes straight from a user gesture on one of the controls.
    fn is_user_gesture(&self) -> bool {
        matches!(
            self,
            PlayerEvent::TogglePlay
                | PlayerEvent::PrevTrack
                | PlayerEvent::NextTrack
                | PlayerEvent::ToggleShuffle
                | PlayerEvent::ToggleRepeat
                | PlayerEvent::Seek { .. }
                | PlayerEvent::DragStart
        )
    }
}

/// Side effects requested by a transition, in the order they must run.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Point the audio element at the track's source.
    LoadTrack(usize),
    Play(PlayTicket),
    Pause,
    /// Set the native playback position in seconds.
    SetPosition(f64),
    Persist(PersistedState),
}

/// What the progress bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub position: f64,
    pub duration: Option<f64>,
    /// Filled share of the bar, `0.0..=1.0`.
    pub fraction: f64,
}

/// Treats NaN, infinite and non-positive durations as not loaded yet.
pub fn known_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    track_count: usize,
    current_index: usize,
    pub is_playing: bool,
    pub is_shuffle: bool,
    pub is_repeat: bool,
    pub is_dragging: bool,
    pub has_user_gesture: bool,
    pub progress: Progress,
    play_ticket: PlayTicket,
}

impl PlayerState {
    /// Fresh state over a catalog of `track_count` tracks, seeded from the saved subset.
    pub fn restore(track_count: usize, saved: PersistedState) -> Self {
        let track_count = track_count.max(1);
        Self {
            track_count,
            current_index: saved.current_index % track_count,
            is_playing: false,
            is_shuffle: saved.is_shuffle,
            is_repeat: saved.is_repeat,
            is_dragging: false,
            has_user_gesture: false,
            progress: Progress::default(),
            play_ticket: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    /// Latest play request issued.
    pub fn play_ticket(&self) -> PlayTicket {
        self.play_ticket
    }

    pub fn prev_index(&self) -> usize {
        (self.current_index + self.track_count - 1) % self.track_count
    }

    pub fn next_index(&self) -> usize {
        (self.current_index + 1) % self.track_count
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            current_index: self.current_index,
            is_shuffle: self.is_shuffle,
            is_repeat: self.is_repeat,
        }
    }

    pub fn apply<R: Rng + ?Sized>(&mut self, event: PlayerEvent, rng: &mut R) -> Vec<Effect> {
        if event.is_user_gesture() {
            self.has_user_gesture = true;
        }

        match event {
            PlayerEvent::TogglePlay => {
                if self.is_playing {
                    self.is_playing = false;
                    // a play request still in flight must not flip this back
                    self.issue_ticket();
                    vec![Effect::Pause]
                } else {
                    self.is_playing = true;
                    vec![Effect::Play(self.issue_ticket())]
                }
            }
            PlayerEvent::PrevTrack => {
                let wants_play = self.is_playing;
                self.load(self.prev_index(), wants_play)
            }
            PlayerEvent::NextTrack => {
                let wants_play = self.is_playing;
                let index = self.advance_index(rng);
                self.load(index, wants_play)
            }
            PlayerEvent::ToggleShuffle => {
                self.is_shuffle = !self.is_shuffle;
                vec![Effect::Persist(self.persisted())]
            }
            PlayerEvent::ToggleRepeat => {
                self.is_repeat = !self.is_repeat;
                vec![Effect::Persist(self.persisted())]
            }
            PlayerEvent::PlayResolved { ticket, outcome } => {
                if ticket == self.play_ticket {
                    self.is_playing = outcome == PlayOutcome::Started;
                }
                Vec::new()
            }
            PlayerEvent::MediaPlaying => {
                self.is_playing = true;
                Vec::new()
            }
            PlayerEvent::MediaPaused => {
                self.is_playing = false;
                Vec::new()
            }
            PlayerEvent::TimeUpdate { position, duration } => {
                if !self.is_dragging {
                    if let Some(duration) = known_duration(duration) {
                        self.progress = Progress {
                            position,
                            duration: Some(duration),
                            fraction: (position / duration).clamp(0.0, 1.0),
                        };
                    }
                }
                Vec::new()
            }
            PlayerEvent::MetadataLoaded { duration } => {
                self.progress.duration = known_duration(duration);
                if self.progress.duration.is_none() {
                    self.progress.fraction = 0.0;
                }
                Vec::new()
            }
            PlayerEvent::Ended => {
                if self.is_repeat {
                    self.progress.position = 0.0;
                    self.progress.fraction = 0.0;
                    self.is_playing = true;
                    vec![Effect::SetPosition(0.0), Effect::Play(self.issue_ticket())]
                } else {
                    let index = self.advance_index(rng);
                    self.load(index, true)
                }
            }
            PlayerEvent::Seek { fraction } => self.seek(fraction),
            PlayerEvent::DragStart => {
                self.is_dragging = true;
                Vec::new()
            }
            PlayerEvent::DragMove { fraction } => {
                if self.is_dragging {
                    self.seek(fraction)
                } else {
                    Vec::new()
                }
            }
            PlayerEvent::DragEnd => {
                self.is_dragging = false;
                Vec::new()
            }
        }
    }

    fn issue_ticket(&mut self) -> PlayTicket {
        self.play_ticket += 1;
        self.play_ticket
    }

    /// Next index honoring shuffle. Shuffle redraws until it leaves the current track,
    /// unless there is only one track to choose from.
    fn advance_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if !self.is_shuffle {
            return self.next_index();
        }
        loop {
            let candidate = rng.gen_range(0..self.track_count);
            if candidate != self.current_index || self.track_count <= 1 {
                return candidate;
            }
        }
    }

    fn load(&mut self, index: usize, wants_play: bool) -> Vec<Effect> {
        self.current_index = index % self.track_count;
        self.progress = Progress::default();

        let mut effects = vec![
            Effect::LoadTrack(self.current_index),
            Effect::Persist(self.persisted()),
        ];
        if wants_play && self.has_user_gesture {
            self.is_playing = true;
            effects.push(Effect::Play(self.issue_ticket()));
        } else {
            self.is_playing = false;
        }
        effects
    }

    /// Seeks against the duration reported by the element; until metadata has
    /// arrived there is nothing to seek within.
    fn seek(&mut self, fraction: f64) -> Vec<Effect> {
        if !fraction.is_finite() {
            return Vec::new();
        }
        let Some(duration) = self.progress.duration else {
            return Vec::new();
        };
        let fraction = fraction.clamp(0.0, 1.0);
        let position = fraction * duration;
        self.progress = Progress {
            position,
            duration: Some(duration),
            fraction,
        };
        vec![Effect::SetPosition(position)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn state(track_count: usize, current_index: usize) -> PlayerState {
        PlayerState::restore(
            track_count,
            PersistedState {
                current_index,
                ..Default::default()
            },
        )
    }

    fn playing(track_count: usize, current_index: usize) -> PlayerState {
        let mut s = state(track_count, current_index);
        s.apply(PlayerEvent::TogglePlay, &mut rng());
        s.apply(PlayerEvent::MediaPlaying, &mut rng());
        s
    }

    #[test]
    fn next_without_shuffle_loads_following_track() {
        let mut s = state(3, 0);
        let effects = s.apply(PlayerEvent::NextTrack, &mut rng());
        assert_eq!(s.current_index(), 1);
        assert_eq!(
            effects,
            vec![
                Effect::LoadTrack(1),
                Effect::Persist(PersistedState {
                    current_index: 1,
                    is_shuffle: false,
                    is_repeat: false,
                }),
            ]
        );
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut s = state(3, 2);
        s.apply(PlayerEvent::NextTrack, &mut rng());
        assert_eq!(s.current_index(), 0);
        s.apply(PlayerEvent::PrevTrack, &mut rng());
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn navigation_keeps_playing_intent() {
        let mut s = playing(4, 1);
        let ticket_before = s.play_ticket();
        let effects = s.apply(PlayerEvent::PrevTrack, &mut rng());
        assert_eq!(s.current_index(), 0);
        assert_eq!(effects.last(), Some(&Effect::Play(ticket_before + 1)));
    }

    #[test]
    fn navigation_while_paused_does_not_autoplay() {
        let mut s = state(4, 1);
        let effects = s.apply(PlayerEvent::NextTrack, &mut rng());
        assert!(!effects.iter().any(|e| matches!(e, Effect::Play(_))));
        assert!(s.has_user_gesture);
    }

    #[test]
    fn autoplay_requires_a_prior_gesture() {
        let mut s = state(3, 0);
        s.apply(PlayerEvent::MediaPlaying, &mut rng());
        assert!(!s.has_user_gesture);
        // track ran out before anyone touched the controls
        let effects = s.apply(PlayerEvent::Ended, &mut rng());
        assert_eq!(s.current_index(), 1);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Play(_))));
    }

    #[test]
    fn toggle_play_issues_play_then_pause() {
        let mut s = state(3, 0);
        assert_eq!(s.apply(PlayerEvent::TogglePlay, &mut rng()), vec![Effect::Play(1)]);
        assert!(s.is_playing);
        assert!(s.has_user_gesture);
        assert_eq!(s.apply(PlayerEvent::TogglePlay, &mut rng()), vec![Effect::Pause]);
        assert!(!s.is_playing);
    }

    #[test]
    fn rejected_play_reverts_intent() {
        let mut s = state(3, 0);
        s.apply(PlayerEvent::TogglePlay, &mut rng());
        s.apply(
            PlayerEvent::PlayResolved {
                ticket: 1,
                outcome: PlayOutcome::Rejected("NotAllowedError".into()),
            },
            &mut rng(),
        );
        assert!(!s.is_playing);
    }

    #[test]
    fn stale_play_resolution_is_ignored() {
        let mut s = playing(3, 0);
        s.apply(PlayerEvent::NextTrack, &mut rng());
        let latest = s.play_ticket();
        s.apply(
            PlayerEvent::PlayResolved {
                ticket: latest - 1,
                outcome: PlayOutcome::Rejected("AbortError".into()),
            },
            &mut rng(),
        );
        assert!(s.is_playing);
        s.apply(
            PlayerEvent::PlayResolved {
                ticket: latest,
                outcome: PlayOutcome::Started,
            },
            &mut rng(),
        );
        assert!(s.is_playing);
    }

    #[test]
    fn pause_supersedes_pending_play() {
        let mut s = state(3, 0);
        s.apply(PlayerEvent::TogglePlay, &mut rng());
        s.apply(PlayerEvent::TogglePlay, &mut rng());
        s.apply(
            PlayerEvent::PlayResolved {
                ticket: 1,
                outcome: PlayOutcome::Started,
            },
            &mut rng(),
        );
        assert!(!s.is_playing);
    }

    #[test]
    fn native_status_events_drive_playing_flag() {
        let mut s = state(2, 0);
        s.apply(PlayerEvent::MediaPlaying, &mut rng());
        assert!(s.is_playing);
        s.apply(PlayerEvent::MediaPaused, &mut rng());
        assert!(!s.is_playing);
    }

    #[test]
    fn toggles_persist_immediately() {
        let mut s = state(3, 2);
        let effects = s.apply(PlayerEvent::ToggleShuffle, &mut rng());
        assert_eq!(
            effects,
            vec![Effect::Persist(PersistedState {
                current_index: 2,
                is_shuffle: true,
                is_repeat: false,
            })]
        );
        let effects = s.apply(PlayerEvent::ToggleRepeat, &mut rng());
        assert_eq!(
            effects,
            vec![Effect::Persist(PersistedState {
                current_index: 2,
                is_shuffle: true,
                is_repeat: true,
            })]
        );
        s.apply(PlayerEvent::ToggleShuffle, &mut rng());
        assert!(!s.is_shuffle);
    }

    #[test]
    fn restore_round_trips_persisted_subset() {
        let mut s = state(5, 3);
        s.apply(PlayerEvent::ToggleShuffle, &mut rng());
        s.apply(PlayerEvent::ToggleRepeat, &mut rng());
        let restored = PlayerState::restore(5, s.persisted());
        assert_eq!(restored.persisted(), s.persisted());
        assert!(!restored.is_playing);
        assert!(!restored.has_user_gesture);
    }

    #[test]
    fn shuffle_never_repeats_current_track() {
        let mut s = state(5, 0);
        s.is_shuffle = true;
        let mut rng = rng();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let before = s.current_index();
            s.apply(PlayerEvent::NextTrack, &mut rng);
            assert_ne!(s.current_index(), before);
            assert!(s.current_index() < 5);
            seen.insert(s.current_index());
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn shuffle_with_single_track_stays_put() {
        let mut s = state(1, 0);
        s.is_shuffle = true;
        s.apply(PlayerEvent::NextTrack, &mut rng());
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn shuffle_with_two_tracks_alternates() {
        let mut s = state(2, 0);
        s.is_shuffle = true;
        let mut rng = rng();
        for expected in [1, 0, 1, 0] {
            s.apply(PlayerEvent::NextTrack, &mut rng);
            assert_eq!(s.current_index(), expected);
        }
    }

    #[test]
    fn ended_with_repeat_rewinds_same_track() {
        let mut s = playing(3, 1);
        s.is_repeat = true;
        s.progress.position = 200.0;
        let effects = s.apply(PlayerEvent::Ended, &mut rng());
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.progress.position, 0.0);
        assert_eq!(
            effects,
            vec![Effect::SetPosition(0.0), Effect::Play(s.play_ticket())]
        );
    }

    #[test]
    fn ended_without_repeat_advances_and_keeps_playing() {
        let mut s = playing(3, 2);
        s.apply(PlayerEvent::MediaPaused, &mut rng());
        let effects = s.apply(PlayerEvent::Ended, &mut rng());
        assert_eq!(s.current_index(), 0);
        assert_eq!(effects[0], Effect::LoadTrack(0));
        assert!(matches!(effects.last(), Some(Effect::Play(_))));
    }

    #[test]
    fn ended_respects_shuffle() {
        let mut s = playing(6, 3);
        s.is_shuffle = true;
        let mut rng = rng();
        for _ in 0..50 {
            let before = s.current_index();
            s.apply(PlayerEvent::Ended, &mut rng);
            assert_ne!(s.current_index(), before);
        }
    }

    fn with_duration(duration: f64) -> PlayerState {
        let mut s = state(3, 0);
        s.apply(PlayerEvent::MetadataLoaded { duration }, &mut rng());
        s
    }

    #[test]
    fn seek_maps_fraction_onto_duration() {
        for (fraction, expected) in [(0.0, 0.0), (0.5, 90.0), (1.0, 180.0)] {
            let mut s = with_duration(180.0);
            let effects = s.apply(PlayerEvent::Seek { fraction }, &mut rng());
            let [Effect::SetPosition(position)] = effects.as_slice() else {
                panic!("expected a single position update, got {effects:?}");
            };
            assert!((position - expected).abs() < 1e-9);
            assert!((s.progress.fraction - fraction).abs() < 1e-9);
        }
    }

    #[test]
    fn seek_clamps_out_of_bounds_fraction() {
        let mut s = with_duration(100.0);
        s.apply(PlayerEvent::Seek { fraction: 1.7 }, &mut rng());
        assert_eq!(s.progress.position, 100.0);
        s.apply(PlayerEvent::Seek { fraction: -0.2 }, &mut rng());
        assert_eq!(s.progress.position, 0.0);
    }

    #[test]
    fn seek_without_duration_is_a_no_op() {
        for duration in [f64::NAN, 0.0, f64::INFINITY] {
            let mut s = with_duration(duration);
            let effects = s.apply(PlayerEvent::Seek { fraction: 0.5 }, &mut rng());
            assert!(effects.is_empty());
            assert_eq!(s.progress, Progress::default());
        }
    }

    #[test]
    fn time_updates_are_ignored_while_dragging() {
        let mut s = with_duration(200.0);
        s.apply(PlayerEvent::DragStart, &mut rng());
        s.apply(PlayerEvent::DragMove { fraction: 0.25 }, &mut rng());
        s.apply(PlayerEvent::TimeUpdate { position: 150.0, duration: 200.0 }, &mut rng());
        assert_eq!(s.progress.fraction, 0.25);

        s.apply(PlayerEvent::DragEnd, &mut rng());
        s.apply(PlayerEvent::TimeUpdate { position: 150.0, duration: 200.0 }, &mut rng());
        assert_eq!(s.progress.fraction, 0.75);
    }

    #[test]
    fn drag_move_without_drag_does_nothing() {
        let mut s = with_duration(60.0);
        let effects = s.apply(PlayerEvent::DragMove { fraction: 0.5 }, &mut rng());
        assert!(effects.is_empty());
    }

    #[test]
    fn time_update_before_metadata_keeps_display() {
        let mut s = state(3, 0);
        s.apply(PlayerEvent::TimeUpdate { position: 4.0, duration: f64::NAN }, &mut rng());
        assert_eq!(s.progress, Progress::default());
        s.apply(PlayerEvent::MetadataLoaded { duration: 240.0 }, &mut rng());
        assert_eq!(s.progress.duration, Some(240.0));
    }

    #[test]
    fn track_change_resets_progress() {
        let mut s = state(3, 0);
        s.apply(PlayerEvent::TimeUpdate { position: 30.0, duration: 60.0 }, &mut rng());
        s.apply(PlayerEvent::NextTrack, &mut rng());
        assert_eq!(s.progress, Progress::default());
    }

    proptest! {
        #[test]
        fn prev_then_next_returns_to_start(n in 1usize..64, start in 0usize..64) {
            let start = start % n;
            let mut s = state(n, start);
            let mut rng = rng();
            s.apply(PlayerEvent::PrevTrack, &mut rng);
            s.apply(PlayerEvent::NextTrack, &mut rng);
            prop_assert_eq!(s.current_index(), start);
        }

        #[test]
        fn next_index_stays_in_range(n in 1usize..64, start in 0usize..64, shuffle: bool, seed: u64) {
            let mut s = state(n, start % n);
            s.is_shuffle = shuffle;
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..8 {
                let before = s.current_index();
                s.apply(PlayerEvent::NextTrack, &mut rng);
                prop_assert!(s.current_index() < n);
                if shuffle && n > 1 {
                    prop_assert_ne!(s.current_index(), before);
                }
            }
        }

        #[test]
        fn neighbours_wrap(n in 1usize..64, start in 0usize..64) {
            let s = state(n, start % n);
            prop_assert!(s.prev_index() < n);
            prop_assert!(s.next_index() < n);
            prop_assert_eq!((s.prev_index() + 1) % n, s.current_index());
        }
    }
}
