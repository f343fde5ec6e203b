pub const PROGRESS: &str = "progress";
pub const NOTES: &str = "notes";
pub const BOOKMARKS: &str = "bookmarks";

// Secondary index trees
pub const NOTES_BY_CLASS: &str = "notes_by_class";
pub const BOOKMARKS_BY_ANCHOR: &str = "bookmarks_by_anchor";

// Schema version and id sequences
pub const META: &str = "meta";
