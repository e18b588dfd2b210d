// Mood resolution: manual selection is handled by the UI directly; this
// module covers the detection path (camera feed + frame heuristic).

pub mod camera;
pub mod detector;

pub use camera::{CameraError, CameraFeed, FrameSource, StillImageSource};
pub use detector::{detect_mood, random_mood};
