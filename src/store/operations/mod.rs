pub mod bookmarks;
pub mod notes;
pub mod progress;
