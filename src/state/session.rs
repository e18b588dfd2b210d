use crate::constants::{DEFAULT_VOLUME, HISTORY_CAP};
use crate::models::{Mood, Track};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Single source of truth for playback state: current track, queue, bounded
/// history, transport flags and the selected mood. Owned by the app struct and
/// passed explicitly to screens; all mutation goes through the methods below.
///
/// Invariants:
/// - the queue never contains the current track
/// - history holds at most `HISTORY_CAP` entries, most recent first, no
///   duplicate ids
/// - volume stays in [0, 1], progress in [0, 100]
/// - `advance` is the only operation that moves queue -> current -> history
pub struct Session {
    pub current_track: Option<Track>,
    queue: VecDeque<Track>,
    history: VecDeque<Track>,
    pub is_playing: bool,
    volume: f32,
    progress: f32,
    pub selected_mood: Option<Mood>,
    pub theme: Theme,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current_track: None,
            queue: VecDeque::new(),
            history: VecDeque::new(),
            is_playing: false,
            volume: DEFAULT_VOLUME,
            progress: 0.0,
            selected_mood: None,
            theme: Theme::Dark,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the mood only. Fetching matching tracks is the catalog layer's
    /// job, triggered by the app shell.
    pub fn select_mood(&mut self, mood: Option<Mood>) {
        self.selected_mood = mood;
    }

    /// Replace the current track unconditionally. Queue and history are not
    /// touched.
    pub fn set_current_track(&mut self, track: Option<Track>) {
        self.current_track = track;
        self.progress = 0.0;
    }

    /// Append to the queue tail. A track may be queued more than once.
    pub fn enqueue(&mut self, track: Track) {
        self.queue.push_back(track);
    }

    /// Remove the first queue entry with a matching id; no-op otherwise.
    pub fn dequeue_by_id(&mut self, id: &str) {
        if let Some(pos) = self.queue.iter().position(|t| t.id == id) {
            self.queue.remove(pos);
        }
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Move to the next track: queue head becomes current, the prior current
    /// track (if any) goes to history head. With an empty queue the current
    /// track retires to history and playback stops.
    pub fn advance(&mut self) {
        if let Some(next) = self.queue.pop_front() {
            if let Some(prev) = self.current_track.take() {
                self.push_history(prev);
            }
            self.set_current_track(Some(next));
            self.is_playing = true;
        } else if let Some(prev) = self.current_track.take() {
            self.push_history(prev);
            self.set_current_track(None);
            self.is_playing = false;
        }
    }

    /// Step back: the most recent history entry becomes current and the
    /// displaced current track returns to the queue head, so it plays next.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.history.pop_front() {
            if let Some(cur) = self.current_track.take() {
                self.queue.push_front(cur);
            }
            self.set_current_track(Some(prev));
            self.is_playing = true;
        }
    }

    /// Flip play/pause. No-op without a current track; the playback surface
    /// renders nothing in that state.
    pub fn toggle_play_pause(&mut self) {
        if self.current_track.is_some() {
            self.is_playing = !self.is_playing;
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Store playback progress in percent. The authoritative value comes from
    /// the audio controller's position feed, not from local computation.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 100.0);
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    pub fn queue(&self) -> &VecDeque<Track> {
        &self.queue
    }

    pub fn history(&self) -> &VecDeque<Track> {
        &self.history
    }

    pub fn peek_next(&self) -> Option<&Track> {
        self.queue.front()
    }

    // History insert with dedup by id and the recency cap. Most recent first.
    fn push_history(&mut self, track: Track) {
        self.history.retain(|t| t.id != track.id);
        self.history.push_front(track);
        self.history.truncate(HISTORY_CAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {}", id),
            artist: "Artist".to_string(),
            artwork_url: None,
            duration: 180.0,
            audio_url: Some(format!("https://example.com/{}.mp3", id)),
            mood: None,
        }
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut session = Session::new();
        session.enqueue(track("a"));
        session.enqueue(track("b"));
        session.enqueue(track("c"));
        assert_eq!(session.queue().len(), 3);

        session.advance();
        assert_eq!(session.current_track.as_ref().unwrap().id, "a");
        session.advance();
        assert_eq!(session.current_track.as_ref().unwrap().id, "b");
        session.advance();
        assert_eq!(session.current_track.as_ref().unwrap().id, "c");
        assert!(session.queue().is_empty());
    }

    #[test]
    fn test_enqueue_allows_duplicates_and_dequeue_removes_first() {
        let mut session = Session::new();
        session.enqueue(track("a"));
        session.enqueue(track("b"));
        session.enqueue(track("a"));
        assert_eq!(session.queue().len(), 3);

        session.dequeue_by_id("a");
        let ids: Vec<&str> = session.queue().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        // Unknown id is a no-op
        session.dequeue_by_id("zzz");
        assert_eq!(session.queue().len(), 2);
    }

    #[test]
    fn test_advance_drains_queue_into_history() {
        // Queue = [A, B], current = X, history = []
        let mut session = Session::new();
        session.set_current_track(Some(track("x")));
        session.enqueue(track("a"));
        session.enqueue(track("b"));

        session.advance();
        assert_eq!(session.current_track.as_ref().unwrap().id, "a");
        assert_eq!(session.queue().len(), 1);
        assert_eq!(session.history().front().unwrap().id, "x");
        assert!(session.is_playing);

        session.advance();
        assert_eq!(session.current_track.as_ref().unwrap().id, "b");
        assert!(session.queue().is_empty());
        let ids: Vec<&str> = session.history().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "x"]);

        session.advance();
        assert!(session.current_track.is_none());
        assert!(session.queue().is_empty());
        let ids: Vec<&str> = session.history().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "x"]);
        assert!(!session.is_playing);

        // Fully drained: advance is now a no-op
        session.advance();
        assert!(session.current_track.is_none());
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn test_retreat_then_advance_round_trips() {
        let mut session = Session::new();
        session.set_current_track(Some(track("a")));
        session.enqueue(track("b"));
        // Simulate "x" having played before "a"
        session.push_history(track("x"));

        session.retreat();
        assert_eq!(session.current_track.as_ref().unwrap().id, "x");
        let ids: Vec<&str> = session.queue().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(session.history().is_empty());

        session.advance();
        assert_eq!(session.current_track.as_ref().unwrap().id, "a");
        let ids: Vec<&str> = session.queue().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        let ids: Vec<&str> = session.history().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["x"]);
    }

    #[test]
    fn test_retreat_with_empty_history_is_noop() {
        let mut session = Session::new();
        session.set_current_track(Some(track("a")));
        session.retreat();
        assert_eq!(session.current_track.as_ref().unwrap().id, "a");
        assert!(session.queue().is_empty());
    }

    #[test]
    fn test_history_caps_at_twenty() {
        let mut session = Session::new();
        for i in 0..25 {
            session.set_current_track(Some(track(&i.to_string())));
            session.advance(); // empty queue: current retires to history
        }
        assert_eq!(session.history().len(), HISTORY_CAP);
        // Most recent at the head
        assert_eq!(session.history().front().unwrap().id, "24");
        // Oldest five fell off
        assert!(!session.history().iter().any(|t| t.id == "4"));
    }

    #[test]
    fn test_history_dedups_by_id() {
        let mut session = Session::new();
        session.set_current_track(Some(track("a")));
        session.advance();
        session.set_current_track(Some(track("b")));
        session.advance();
        session.set_current_track(Some(track("a")));
        session.advance();

        let ids: Vec<&str> = session.history().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_toggle_play_pause_requires_current_track() {
        let mut session = Session::new();
        session.toggle_play_pause();
        assert!(!session.is_playing);

        session.set_current_track(Some(track("a")));
        session.toggle_play_pause();
        assert!(session.is_playing);
        session.toggle_play_pause();
        assert!(!session.is_playing);
    }

    #[test]
    fn test_volume_clamps() {
        let mut session = Session::new();
        session.set_volume(-1.0);
        assert_eq!(session.volume(), 0.0);
        session.set_volume(2.0);
        assert_eq!(session.volume(), 1.0);
        session.set_volume(0.35);
        assert_eq!(session.volume(), 0.35);
    }

    #[test]
    fn test_progress_clamps() {
        let mut session = Session::new();
        session.set_progress(-5.0);
        assert_eq!(session.progress(), 0.0);
        session.set_progress(150.0);
        assert_eq!(session.progress(), 100.0);
    }

    #[test]
    fn test_set_current_track_resets_progress() {
        let mut session = Session::new();
        session.set_current_track(Some(track("a")));
        session.set_progress(60.0);
        session.set_current_track(Some(track("b")));
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_theme_toggles() {
        let mut session = Session::new();
        assert_eq!(session.theme, Theme::Dark);
        session.toggle_theme();
        assert_eq!(session.theme, Theme::Light);
    }
}
