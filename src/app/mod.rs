pub mod player_app;

pub use player_app::MoodPlayerApp;
