// Domain models and Jamendo API wire types

pub mod mood;
pub mod responses;
pub mod track;

// Re-export commonly used types
pub use mood::Mood;
pub use responses::{CatalogTrack, LyricsResponse, TracksResponse};
pub use track::Track;
