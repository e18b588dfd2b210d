use eframe::egui;
use std::sync::mpsc::{channel, TryRecvError};
use std::time::Duration;

use crate::api;
use crate::constants::*;
use crate::data::fallback;
use crate::models::{Mood, Track};
use crate::mood::{random_mood, CameraFeed, StillImageSource};
use crate::state::{BackgroundTasks, ContentState, Session, Theme, UIState};
use crate::utils::async_helper::spawn_and_send;
use crate::utils::AudioController;

// Re-export UI enums for convenience
pub use crate::state::ui_state::{CameraPermission, MainTab};

/// Environment variable pointing at a still image to use as the capture
/// source. Without it, detection falls back to the delayed random pick.
const CAMERA_IMAGE_ENV: &str = "MOODTUNE_CAMERA_IMAGE";

pub struct MoodPlayerApp {
    // Session state (current track, queue, history, transport, mood, theme)
    pub session: Session,

    // UI state (navigation, toasts, detection status, artwork, seeking)
    pub ui: UIState,

    // Content state (mood tracks, search, lyrics, request generations)
    pub content: ContentState,

    // Background tasks (receivers for async operations)
    pub tasks: BackgroundTasks,

    // Audio thread handle
    pub audio: AudioController,

    // Active capture feed; at most one at a time
    camera: Option<CameraFeed>,
}

impl Default for MoodPlayerApp {
    fn default() -> Self {
        Self {
            session: Session::new(),
            ui: UIState::default(),
            content: ContentState::default(),
            tasks: BackgroundTasks::default(),
            audio: AudioController::new(),
            camera: None,
        }
    }
}

impl MoodPlayerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    // === Mood selection & catalog ===

    /// Select a mood and kick off the matching catalog fetch.
    pub fn select_mood(&mut self, mood: Mood) {
        self.session.select_mood(Some(mood));
        self.request_mood_tracks(mood);
    }

    pub fn request_mood_tracks(&mut self, mood: Mood) {
        let generation = self.content.next_mood_generation();
        self.content.mood_loading = true;
        self.content.used_fallback = false;

        let (tx, rx) = channel();
        self.tasks.mood_tracks_rx = Some(rx);
        spawn_and_send(
            move || {
                Box::pin(async move {
                    let tracks = api::catalog::tracks_by_mood(mood).await;
                    (generation, tracks)
                })
            },
            tx,
        );
    }

    pub fn submit_search(&mut self) {
        let query = self.content.search_query.trim().to_string();
        if query.is_empty() {
            return;
        }

        let generation = self.content.next_search_generation();
        self.content.search_loading = true;

        let (tx, rx) = channel();
        self.tasks.search_rx = Some(rx);
        spawn_and_send(
            move || {
                Box::pin(async move {
                    let tracks = api::catalog::search(&query).await;
                    (generation, tracks)
                })
            },
            tx,
        );
    }

    // === Playback ===

    /// Make a track current and start streaming it. Tracks without a stream
    /// URL stay current (the UI still shows their details) but produce a
    /// notice instead of audio.
    pub fn play_track(&mut self, track: Track) {
        log::info!("[Play] {} by {}", track.title, track.artist);
        self.ui.last_playback_error = None;
        self.session.set_current_track(Some(track.clone()));
        self.session.is_playing = true;

        self.start_stream(&track);
        self.request_artwork(&track);
        self.request_lyrics(&track);
    }

    pub fn enqueue_track(&mut self, track: Track) {
        self.ui.push_toast(format!("Added \"{}\" to queue", track.title));
        self.session.enqueue(track);
    }

    /// Skip to the next queued track and keep the audio thread in step.
    pub fn advance_track(&mut self) {
        self.session.advance();
        self.sync_transport();
    }

    /// Step back through history and keep the audio thread in step.
    pub fn retreat_track(&mut self) {
        self.session.retreat();
        self.sync_transport();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.session.current_track.is_none() {
            return;
        }
        self.session.toggle_play_pause();
        if self.session.is_playing {
            self.audio.resume();
        } else {
            self.audio.pause();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.session.set_volume(volume);
        self.audio.set_volume(self.session.volume());
    }

    /// Commit a seek from the progress slider, given in percent.
    pub fn seek_to_pct(&mut self, pct: f32) {
        if let Some(track) = &self.session.current_track {
            let duration = self
                .audio
                .get_duration()
                .map(|d| d.as_secs_f32())
                .unwrap_or(track.duration)
                .max(0.0);
            let target = Duration::from_secs_f32(duration * (pct.clamp(0.0, 100.0) / 100.0));
            self.audio.seek(target);
            self.session.set_progress(pct);
        }
    }

    /// Nudge the play position by a signed number of seconds.
    pub fn seek_relative(&mut self, delta_secs: f32) {
        if self.session.current_track.is_none() {
            return;
        }
        let duration = self.playback_duration_secs();
        if duration <= 0.0 {
            return;
        }
        let target = (self.playback_position_secs() + delta_secs).clamp(0.0, duration);
        self.audio.seek(Duration::from_secs_f32(target));
        self.session.set_progress(target / duration * 100.0);
    }

    // Start or stop streaming to match the session's current track after an
    // advance/retreat. A current track without a stream URL leaves the
    // finished flag set, so playback skips over it on the next frame.
    fn sync_transport(&mut self) {
        match self.session.current_track.clone() {
            Some(track) => {
                self.start_stream(&track);
                self.request_artwork(&track);
                self.request_lyrics(&track);
            }
            None => {
                self.audio.stop();
                self.ui.artwork_texture = None;
                self.content.lyrics = None;
                self.content.lyrics_loading = false;
            }
        }
    }

    fn start_stream(&mut self, track: &Track) {
        match &track.audio_url {
            Some(url) => {
                let hint = if track.duration.is_finite() && track.duration > 0.0 {
                    Some(Duration::from_secs_f32(track.duration))
                } else {
                    None
                };
                self.audio.play(url.clone(), hint);
                self.audio.set_volume(self.session.volume());
            }
            None => {
                log::warn!("[Play] \"{}\" has no stream URL", track.title);
                self.ui
                    .push_toast(format!("\"{}\" has no playable stream", track.title));
                self.audio.stop();
            }
        }
    }

    fn request_artwork(&mut self, track: &Track) {
        self.ui.artwork_texture = None;
        match &track.artwork_url {
            Some(url) => {
                self.ui.artwork_loading = true;
                self.tasks.artwork_rx = Some(crate::utils::artwork::fetch_artwork(url.clone()));
            }
            None => {
                self.ui.artwork_loading = false;
                self.tasks.artwork_rx = None;
            }
        }
    }

    fn request_lyrics(&mut self, track: &Track) {
        self.content.lyrics = None;
        self.content.lyrics_loading = true;

        let artist = track.artist.clone();
        let title = track.title.clone();
        let (tx, rx) = channel();
        self.tasks.lyrics_rx = Some(rx);
        spawn_and_send(
            move || Box::pin(async move { api::lyrics::lyrics(&artist, &title).await }),
            tx,
        );
    }

    // === Mood detection ===

    /// Start a detection pass. With a configured capture image the real
    /// detector runs against it; otherwise a stub thread picks a random
    /// detectable mood after a short delay.
    pub fn start_detection(&mut self) {
        if self.ui.detecting {
            return;
        }
        self.ui.detecting = true;
        self.ui.detect_notice = None;
        self.ui.detect_empty_frames = 0;

        match std::env::var(CAMERA_IMAGE_ENV) {
            Ok(path) => match StillImageSource::open(&path) {
                Ok(source) => {
                    self.ui.camera_permission = CameraPermission::Granted;
                    let (feed, rx) = CameraFeed::start(
                        Box::new(source),
                        Duration::from_millis(DETECT_FRAME_INTERVAL_MILLIS),
                    );
                    self.camera = Some(feed);
                    self.tasks.detect_rx = Some(rx);
                }
                Err(e) => {
                    log::warn!("[Camera] Could not open capture source: {}", e);
                    self.ui.camera_permission = CameraPermission::Denied;
                    self.ui.detecting = false;
                    self.ui.detect_notice = Some(
                        "Camera unavailable. Check permissions and try again, or pick a mood manually.".to_string(),
                    );
                }
            },
            Err(_) => {
                // No capture source configured: delayed random pick
                let (tx, rx) = channel();
                self.tasks.detect_rx = Some(rx);
                std::thread::spawn(move || {
                    std::thread::sleep(Duration::from_millis(DETECT_STUB_DELAY_MILLIS));
                    let _ = tx.send(Some(random_mood()));
                });
            }
        }
    }

    /// Stop detection and release the capture source.
    pub fn stop_detection(&mut self) {
        self.ui.detecting = false;
        self.tasks.detect_rx = None;
        if let Some(mut feed) = self.camera.take() {
            feed.stop();
        }
    }

    // === Background task polling ===

    pub fn poll_background(&mut self, ctx: &egui::Context) {
        self.poll_mood_tracks();
        self.poll_search();
        self.poll_lyrics();
        self.poll_detection();
        self.poll_artwork(ctx);
    }

    fn poll_mood_tracks(&mut self) {
        if let Some(rx) = self.tasks.mood_tracks_rx.take() {
            match rx.try_recv() {
                Ok((generation, tracks)) => {
                    if !self.content.is_current_mood(generation) {
                        log::debug!(
                            "[Catalog] Discarding stale mood response (generation {})",
                            generation
                        );
                        self.content.mood_loading = false;
                        return;
                    }
                    self.content.mood_loading = false;
                    if tracks.is_empty() {
                        if let Some(mood) = self.session.selected_mood {
                            self.content.mood_tracks = fallback::fallback_tracks(mood);
                            self.content.used_fallback = true;
                            self.ui
                                .push_toast("Catalog unavailable - showing local samples");
                            return;
                        }
                    }
                    self.content.mood_tracks = tracks;
                }
                Err(TryRecvError::Empty) => self.tasks.mood_tracks_rx = Some(rx),
                Err(TryRecvError::Disconnected) => self.content.mood_loading = false,
            }
        }
    }

    fn poll_search(&mut self) {
        if let Some(rx) = self.tasks.search_rx.take() {
            match rx.try_recv() {
                Ok((generation, tracks)) => {
                    if !self.content.is_current_search(generation) {
                        log::debug!(
                            "[Catalog] Discarding stale search response (generation {})",
                            generation
                        );
                        self.content.search_loading = false;
                        return;
                    }
                    self.content.search_loading = false;
                    self.content.search_results = tracks;
                }
                Err(TryRecvError::Empty) => self.tasks.search_rx = Some(rx),
                Err(TryRecvError::Disconnected) => self.content.search_loading = false,
            }
        }
    }

    fn poll_lyrics(&mut self) {
        if let Some(rx) = self.tasks.lyrics_rx.take() {
            match rx.try_recv() {
                Ok(lyrics) => {
                    self.content.lyrics = lyrics;
                    self.content.lyrics_loading = false;
                }
                Err(TryRecvError::Empty) => self.tasks.lyrics_rx = Some(rx),
                Err(TryRecvError::Disconnected) => self.content.lyrics_loading = false,
            }
        }
    }

    fn poll_detection(&mut self) {
        if let Some(rx) = self.tasks.detect_rx.take() {
            match rx.try_recv() {
                Ok(Some(mood)) => {
                    self.stop_detection();
                    self.ui
                        .push_toast(format!("Detected mood: {} {}", mood.label(), mood.emoji()));
                    self.select_mood(mood);
                }
                Ok(None) => {
                    self.ui.detect_empty_frames += 1;
                    if self.ui.detect_empty_frames >= DETECT_MAX_EMPTY_FRAMES {
                        self.stop_detection();
                        self.ui.detect_notice =
                            Some("No face detected - pick your mood manually".to_string());
                    } else {
                        self.tasks.detect_rx = Some(rx);
                    }
                }
                Err(TryRecvError::Empty) => self.tasks.detect_rx = Some(rx),
                Err(TryRecvError::Disconnected) => {
                    // Feed ended on its own (capture error)
                    self.stop_detection();
                    self.ui.detect_notice =
                        Some("Camera stopped - pick your mood manually".to_string());
                }
            }
        }
    }

    fn poll_artwork(&mut self, ctx: &egui::Context) {
        if let Some(rx) = self.tasks.artwork_rx.take() {
            match rx.try_recv() {
                Ok(img) => {
                    self.ui.artwork_texture =
                        Some(ctx.load_texture("artwork", img, egui::TextureOptions::LINEAR));
                    self.ui.artwork_loading = false;
                }
                Err(TryRecvError::Empty) => self.tasks.artwork_rx = Some(rx),
                Err(TryRecvError::Disconnected) => self.ui.artwork_loading = false,
            }
        }
    }

    /// Global transport shortcuts, inactive while a text field has focus.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_play_pause();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            self.seek_relative(SEEK_STEP_SECS as f32);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            self.seek_relative(-(SEEK_STEP_SECS as f32));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) {
            self.set_volume(self.session.volume() + VOLUME_STEP);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) {
            self.set_volume(self.session.volume() - VOLUME_STEP);
        }
    }

    // === Per-frame playback sync ===

    /// Surface playback errors, auto-advance on track end and feed the
    /// controller's position into the session progress.
    fn sync_playback(&mut self) {
        if let Some(error) = self.audio.take_last_error() {
            log::error!("[Play] Playback failed: {}", error);
            self.ui.push_toast(format!("Playback failed: {}", error));
            self.ui.last_playback_error = Some(error);
            self.session.is_playing = false;
            return;
        }

        if self.session.current_track.is_none() {
            return;
        }

        if self.session.is_playing && self.audio.is_finished() {
            self.advance_track();
            return;
        }

        if !self.ui.is_seeking {
            let duration = self
                .audio
                .get_duration()
                .map(|d| d.as_secs_f32())
                .or_else(|| self.session.current_track.as_ref().map(|t| t.duration))
                .filter(|d| *d > 0.0);
            if let Some(duration) = duration {
                let position = self.audio.get_position().as_secs_f32();
                self.session.set_progress(position / duration * 100.0);
            }
        }
    }

    /// Elapsed seconds into the current track, for the transport readout.
    pub fn playback_position_secs(&self) -> f32 {
        self.audio.get_position().as_secs_f32()
    }

    /// Best known total length of the current track in seconds.
    pub fn playback_duration_secs(&self) -> f32 {
        self.audio
            .get_duration()
            .map(|d| d.as_secs_f32())
            .or_else(|| self.session.current_track.as_ref().map(|t| t.duration))
            .unwrap_or(0.0)
    }
}

impl eframe::App for MoodPlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.session.theme {
            Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
            Theme::Light => ctx.set_visuals(egui::Visuals::light()),
        }

        self.ui.prune_toasts();
        self.poll_background(ctx);
        self.sync_playback();
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            crate::screens::render_nav_bar(self, ui);
        });

        egui::TopBottomPanel::bottom("player_bar").show(ctx, |ui| {
            crate::screens::render_player_bar(self, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.ui.selected_tab {
            MainTab::Home => crate::screens::home::render_home_view(self, ui),
            MainTab::Search => crate::screens::search::render_search_view(self, ui),
            MainTab::Library => crate::screens::library::render_library_view(self, ui),
            MainTab::NowPlaying => crate::screens::now_playing::render_now_playing_view(self, ui),
        });

        crate::screens::render_toasts(self, ctx);

        // Repaint fast while anything is moving, slower when idle
        let active = self.session.is_playing
            || self.ui.detecting
            || self.ui.has_active_toasts()
            || self.tasks.has_active_tasks();
        let interval = if active {
            REPAINT_INTERVAL_ACTIVE_MILLIS
        } else {
            REPAINT_INTERVAL_IDLE_MILLIS
        };
        ctx.request_repaint_after(Duration::from_millis(interval));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("[Shutdown] Stopping playback and background work");
        self.audio.stop();
        self.stop_detection();
        self.tasks.clear_all();
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
    fn test_empty_mood_result_substitutes_fallback() {
        let mut app = MoodPlayerApp::default();
        app.session.select_mood(Some(Mood::Happy));
        let generation = app.content.next_mood_generation();
        app.content.mood_loading = true;

        let (tx, rx) = channel();
        app.tasks.mood_tracks_rx = Some(rx);
        tx.send((generation, Vec::new())).unwrap();

        app.poll_mood_tracks();

        assert!(!app.content.mood_loading);
        assert!(app.content.used_fallback);
        assert_eq!(
            app.content.mood_tracks,
            fallback::fallback_tracks(Mood::Happy)
        );
        assert!(app.ui.has_active_toasts());
    }

    #[test]
    fn test_search_does_not_starve_inflight_mood_fetch() {
        let mut app = MoodPlayerApp::default();
        app.session.select_mood(Some(Mood::Sad));
        let generation = app.content.next_mood_generation();
        app.content.mood_loading = true;

        // A search dispatched while the mood fetch is still in flight must
        // not make that fetch's response stale
        app.content.next_search_generation();
        app.content.search_loading = true;

        let tracks = vec![track("a"), track("b")];
        let (tx, rx) = channel();
        app.tasks.mood_tracks_rx = Some(rx);
        tx.send((generation, tracks.clone())).unwrap();

        app.poll_mood_tracks();

        assert!(!app.content.mood_loading);
        assert!(!app.content.used_fallback);
        assert_eq!(app.content.mood_tracks, tracks);
    }

    #[test]
    fn test_mood_fetch_does_not_starve_inflight_search() {
        let mut app = MoodPlayerApp::default();
        let generation = app.content.next_search_generation();
        app.content.search_loading = true;

        app.content.next_mood_generation();

        let tracks = vec![track("s")];
        let (tx, rx) = channel();
        app.tasks.search_rx = Some(rx);
        tx.send((generation, tracks.clone())).unwrap();

        app.poll_search();

        assert!(!app.content.search_loading);
        assert_eq!(app.content.search_results, tracks);
    }

    #[test]
    fn test_stale_mood_response_is_discarded_and_loading_cleared() {
        let mut app = MoodPlayerApp::default();
        app.session.select_mood(Some(Mood::Happy));
        let stale = app.content.next_mood_generation();
        let _fresh = app.content.next_mood_generation();
        app.content.mood_loading = true;

        let (tx, rx) = channel();
        app.tasks.mood_tracks_rx = Some(rx);
        tx.send((stale, vec![track("old")])).unwrap();

        app.poll_mood_tracks();

        // Newest generation wins: the stale result never lands, and the
        // spinner is not left running
        assert!(app.content.mood_tracks.is_empty());
        assert!(!app.content.mood_loading);
    }
}
