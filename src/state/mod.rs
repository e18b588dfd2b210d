pub mod background_tasks;
pub mod content_state;
pub mod session;
pub mod ui_state;

pub use background_tasks::BackgroundTasks;
pub use content_state::ContentState;
pub use session::{Session, Theme};
pub use ui_state::UIState;
