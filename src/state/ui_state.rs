use crate::constants::TOAST_DURATION_SECS;
use egui::TextureHandle;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MainTab {
    Home,
    Search,
    Library,
    NowPlaying,
}

/// Camera permission as last observed. `Denied` renders guidance text and a
/// retry button instead of the detect control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraPermission {
    Prompt,
    Granted,
    Denied,
}

pub struct Toast {
    pub message: String,
    pub created: Instant,
}

pub struct UIState {
    // Navigation
    pub selected_tab: MainTab,

    // Toast notifications
    pub toasts: Vec<Toast>,

    // Mood detection
    pub camera_permission: CameraPermission,
    pub detecting: bool,
    pub detect_notice: Option<String>,
    pub detect_empty_frames: u32,

    // Current track artwork
    pub artwork_texture: Option<TextureHandle>,
    pub artwork_loading: bool,

    // Playback error display
    pub last_playback_error: Option<String>,

    // Transport controls
    pub is_seeking: bool,
    pub seek_target_pct: f32,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            selected_tab: MainTab::Home,
            toasts: Vec::new(),
            camera_permission: CameraPermission::Prompt,
            detecting: false,
            detect_notice: None,
            detect_empty_frames: 0,
            artwork_texture: None,
            artwork_loading: false,
            last_playback_error: None,
            is_seeking: false,
            seek_target_pct: 0.0,
        }
    }
}

impl UIState {
    pub fn push_toast(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast {
            message: message.into(),
            created: Instant::now(),
        });
    }

    /// Drop toasts past their display window. Called once per frame.
    pub fn prune_toasts(&mut self) {
        let ttl = Duration::from_secs(TOAST_DURATION_SECS);
        self.toasts.retain(|t| t.created.elapsed() < ttl);
    }

    pub fn has_active_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }
}
