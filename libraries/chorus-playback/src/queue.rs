//! Ordered track queue with a play cursor
//!
//! The queue never distinguishes "how it will be traversed" from "what it
//! contains": mode policy only affects [`PlayQueue::select_next`].

use chorus_core::{PlayMode, Track};
use rand::Rng;

/// Ordered sequence of tracks with a current-position cursor
///
/// Invariants:
/// - The cursor is either unset (no active track) or indexes a valid
///   element.
/// - `unplayed` holds the indices not yet visited in the current random
///   pass; it is kept consistent across inserts so switching modes
///   mid-pass stays well-defined.
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    label: String,
    cursor: Option<usize>,
    unplayed: Vec<usize>,
}

impl PlayQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale with up to `limit` tracks (0 = unlimited)
    ///
    /// Resets the cursor to "before first" and starts a fresh random pass.
    pub fn set_playlist(&mut self, label: impl Into<String>, mut tracks: Vec<Track>, limit: usize) {
        if limit > 0 && tracks.len() > limit {
            tracks.truncate(limit);
        }
        self.tracks = tracks;
        self.label = label.into();
        self.cursor = None;
        self.unplayed = (0..self.tracks.len()).collect();
    }

    /// Extend the queue at the tail with up to `limit` tracks (0 = unlimited)
    ///
    /// Never replaces existing contents. Returns the number of tracks added.
    pub fn add_playlist(&mut self, mut tracks: Vec<Track>, limit: usize) -> usize {
        if limit > 0 && tracks.len() > limit {
            tracks.truncate(limit);
        }
        let start = self.tracks.len();
        let added = tracks.len();
        self.tracks.extend(tracks);
        self.unplayed.extend(start..start + added);
        added
    }

    /// Insert a single track
    ///
    /// With `as_next`, the track goes immediately after the cursor and
    /// becomes the next sequential pick; otherwise it goes to the tail.
    pub fn add_music(&mut self, track: Track, as_next: bool) {
        let position = if as_next {
            self.cursor.map_or(0, |c| c + 1)
        } else {
            self.tracks.len()
        };
        self.tracks.insert(position, track);

        // Shift bookkeeping for everything at or after the insert point.
        if let Some(cursor) = self.cursor {
            if position <= cursor {
                self.cursor = Some(cursor + 1);
            }
        }
        for index in &mut self.unplayed {
            if *index >= position {
                *index += 1;
            }
        }
        self.unplayed.push(position);
    }

    /// Empty the queue and reset the cursor
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.label.clear();
        self.cursor = None;
        self.unplayed.clear();
    }

    /// Select the next track index per `mode`, advancing the cursor
    ///
    /// Returns `None` when nothing remains under the mode's termination
    /// rule; callers treat that as an explicit empty status, not an error.
    pub fn select_next(&mut self, mode: PlayMode) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        match mode {
            PlayMode::Sequential => {
                let next = self.cursor.map_or(0, |c| c + 1);
                if next >= self.tracks.len() {
                    return None;
                }
                self.visit(next);
                Some(next)
            }
            PlayMode::SequentialLoop => {
                let next = self.cursor.map_or(0, |c| (c + 1) % self.tracks.len());
                self.visit(next);
                Some(next)
            }
            PlayMode::Random => {
                if self.unplayed.is_empty() {
                    return None;
                }
                Some(self.draw_random())
            }
            PlayMode::RandomLoop => {
                if self.unplayed.is_empty() {
                    self.unplayed = (0..self.tracks.len()).collect();
                }
                Some(self.draw_random())
            }
        }
    }

    fn visit(&mut self, index: usize) {
        self.cursor = Some(index);
        self.unplayed.retain(|&i| i != index);
    }

    fn draw_random(&mut self) -> usize {
        let mut rng = rand::thread_rng();
        let pick = rng.gen_range(0..self.unplayed.len());
        let index = self.unplayed.swap_remove(pick);
        self.cursor = Some(index);
        index
    }

    /// Track at `index`
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// The track under the cursor, if any
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|c| self.tracks.get(c))
    }

    /// Up to `n` tracks after the cursor, in queue order
    pub fn upcoming(&self, n: usize) -> Vec<Track> {
        let start = self.cursor.map_or(0, |c| c + 1);
        self.tracks.iter().skip(start).take(n).cloned().collect()
    }

    /// Display name of the queue's source
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Numbered listing for chat display, capped at `max_lines` entries
    ///
    /// The cursor row is marked with `>`.
    pub fn summary_text(&self, max_lines: usize) -> String {
        if self.tracks.is_empty() {
            return "The queue is empty".to_string();
        }
        let mut out = String::new();
        if !self.label.is_empty() {
            out.push_str(&format!("{} [{}]\n", self.label, self.tracks.len()));
        }
        for (i, track) in self.tracks.iter().take(max_lines).enumerate() {
            let marker = if self.cursor == Some(i) { ">" } else { " " };
            out.push_str(&format!(
                "{} {}. {} - {}\n",
                marker,
                i + 1,
                track.title,
                track.artist
            ));
        }
        if self.tracks.len() > max_lines {
            out.push_str(&format!("... and {} more\n", self.tracks.len() - max_lines));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::ProviderTag;
    use std::collections::HashSet;

    fn create_test_track(id: &str, title: &str) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Test Artist".to_string(),
            provider: ProviderTag::new("test"),
        }
    }

    fn three_tracks() -> Vec<Track> {
        vec![
            create_test_track("a", "Track A"),
            create_test_track("b", "Track B"),
            create_test_track("c", "Track C"),
        ]
    }

    #[test]
    fn create_empty_queue() {
        let queue = PlayQueue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }

    #[test]
    fn set_playlist_resets_cursor() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);
        assert_eq!(queue.select_next(PlayMode::Sequential), Some(0));

        queue.set_playlist("Other", three_tracks(), 0);
        assert!(queue.current().is_none());
        assert_eq!(queue.select_next(PlayMode::Sequential), Some(0));
    }

    #[test]
    fn set_playlist_applies_limit() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 2);
        assert_eq!(queue.len(), 2);

        // 0 means unlimited
        queue.set_playlist("List", three_tracks(), 0);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn add_playlist_appends_only() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);
        queue.select_next(PlayMode::Sequential);

        let added = queue.add_playlist(vec![create_test_track("d", "Track D")], 0);
        assert_eq!(added, 1);
        assert_eq!(queue.len(), 4);
        // Cursor untouched
        assert_eq!(queue.current().unwrap().id, "a");
    }

    #[test]
    fn sequential_stops_at_end() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);

        assert_eq!(queue.select_next(PlayMode::Sequential), Some(0));
        assert_eq!(queue.select_next(PlayMode::Sequential), Some(1));
        assert_eq!(queue.select_next(PlayMode::Sequential), Some(2));
        assert_eq!(queue.select_next(PlayMode::Sequential), None);
    }

    #[test]
    fn sequential_loop_wraps() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);

        let order: Vec<String> = (0..4)
            .map(|_| {
                let i = queue.select_next(PlayMode::SequentialLoop).unwrap();
                queue.track(i).unwrap().id.clone()
            })
            .collect();
        assert_eq!(order, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn random_visits_each_track_once() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);

        let mut seen = HashSet::new();
        for _ in 0..3 {
            let i = queue.select_next(PlayMode::Random).unwrap();
            seen.insert(queue.track(i).unwrap().id.clone());
        }
        assert_eq!(seen.len(), 3);
        // Pass exhausted
        assert_eq!(queue.select_next(PlayMode::Random), None);
    }

    #[test]
    fn random_loop_reshuffles_exhausted_pool() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);

        let mut seen = HashSet::new();
        for _ in 0..3 {
            let i = queue.select_next(PlayMode::RandomLoop).unwrap();
            seen.insert(i);
        }
        assert_eq!(seen.len(), 3);

        // Never reports empty while tracks exist
        for _ in 0..6 {
            assert!(queue.select_next(PlayMode::RandomLoop).is_some());
        }
    }

    #[test]
    fn add_music_as_next_plays_next() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);
        queue.select_next(PlayMode::Sequential);

        queue.add_music(create_test_track("x", "Inserted"), true);

        let i = queue.select_next(PlayMode::Sequential).unwrap();
        assert_eq!(queue.track(i).unwrap().id, "x");
        // Original order continues afterwards
        let i = queue.select_next(PlayMode::Sequential).unwrap();
        assert_eq!(queue.track(i).unwrap().id, "b");
    }

    #[test]
    fn add_music_as_next_on_fresh_queue_goes_first() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);

        queue.add_music(create_test_track("x", "Inserted"), true);
        let i = queue.select_next(PlayMode::Sequential).unwrap();
        assert_eq!(queue.track(i).unwrap().id, "x");
    }

    #[test]
    fn add_music_at_tail() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);
        queue.add_music(create_test_track("x", "Tail"), false);
        assert_eq!(queue.track(3).unwrap().id, "x");
    }

    #[test]
    fn inserted_track_joins_random_pass() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);
        queue.select_next(PlayMode::Random);

        queue.add_music(create_test_track("x", "Inserted"), true);

        // Remaining pass must cover the two untouched tracks plus the insert.
        let mut seen = HashSet::new();
        for _ in 0..3 {
            let i = queue.select_next(PlayMode::Random).unwrap();
            seen.insert(queue.track(i).unwrap().id.clone());
        }
        assert!(seen.contains("x"));
        assert_eq!(queue.select_next(PlayMode::Random), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);
        queue.select_next(PlayMode::Sequential);

        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
        assert_eq!(queue.select_next(PlayMode::SequentialLoop), None);
    }

    #[test]
    fn upcoming_lists_from_cursor() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("List", three_tracks(), 0);
        queue.select_next(PlayMode::Sequential);

        let next: Vec<String> = queue.upcoming(10).into_iter().map(|t| t.id).collect();
        assert_eq!(next, vec!["b", "c"]);
        assert_eq!(queue.upcoming(1).len(), 1);
    }

    #[test]
    fn summary_marks_current() {
        let mut queue = PlayQueue::new();
        queue.set_playlist("My List", three_tracks(), 0);
        queue.select_next(PlayMode::Sequential);

        let text = queue.summary_text(10);
        assert!(text.contains("My List [3]"));
        assert!(text.contains("> 1. Track A"));
        assert!(text.contains("  2. Track B"));
    }

    #[test]
    fn summary_caps_lines() {
        let mut queue = PlayQueue::new();
        let tracks: Vec<Track> = (0..30)
            .map(|i| create_test_track(&format!("t{i}"), &format!("Track {i}")))
            .collect();
        queue.set_playlist("Big", tracks, 0);

        let text = queue.summary_text(5);
        assert!(text.contains("... and 25 more"));
    }
}
