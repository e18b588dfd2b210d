use crate::models::{Mood, Track};
use egui::ColorImage;
use std::sync::mpsc::Receiver;

/// Receivers for in-flight background work, polled once per frame. Catalog
/// receivers carry the request generation for staleness checks.
#[derive(Default)]
pub struct BackgroundTasks {
    // Catalog fetches
    pub mood_tracks_rx: Option<Receiver<(u64, Vec<Track>)>>,
    pub search_rx: Option<Receiver<(u64, Vec<Track>)>>,

    // Lyrics for the current track
    pub lyrics_rx: Option<Receiver<Option<String>>>,

    // Mood detection results
    pub detect_rx: Option<Receiver<Option<Mood>>>,

    // Current track artwork
    pub artwork_rx: Option<Receiver<ColorImage>>,
}

impl BackgroundTasks {
    /// Check if any background task is active
    pub fn has_active_tasks(&self) -> bool {
        self.mood_tracks_rx.is_some()
            || self.search_rx.is_some()
            || self.lyrics_rx.is_some()
            || self.detect_rx.is_some()
            || self.artwork_rx.is_some()
    }

    /// Clear all task receivers (for cleanup)
    pub fn clear_all(&mut self) {
        self.mood_tracks_rx = None;
        self.search_rx = None;
        self.lyrics_rx = None;
        self.detect_rx = None;
        self.artwork_rx = None;
    }
}
