//! Application constants and tuning values

// === UI & Layout ===
pub const MOOD_GRID_COLUMNS: usize = 4;
pub const REPAINT_INTERVAL_ACTIVE_MILLIS: u64 = 100;
pub const REPAINT_INTERVAL_IDLE_MILLIS: u64 = 250;
pub const TOAST_DURATION_SECS: u64 = 3;

// === Playback ===
pub const DEFAULT_VOLUME: f32 = 0.8;
pub const VOLUME_STEP: f32 = 0.1;
pub const SEEK_STEP_SECS: u64 = 10;

// === Session ===
pub const HISTORY_CAP: usize = 20;

// === Catalog & Lyrics APIs ===
pub const CATALOG_BASE_URL: &str = "https://api.jamendo.com/v3.0";
pub const LYRICS_BASE_URL: &str = "https://api.lyrics.ovh/v1";
pub const CATALOG_PAGE_LIMIT: usize = 20;

// === Mood Detection ===
pub const DETECT_FRAME_INTERVAL_MILLIS: u64 = 500;
pub const DETECT_MAX_EMPTY_FRAMES: u32 = 10;
pub const DETECT_STUB_DELAY_MILLIS: u64 = 2000;
