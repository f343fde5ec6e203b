//! Key builders for the user-data trees. All keys are built so that
//! sled's lexicographic iteration order matches the query order the
//! API needs (ascending class id, notes grouped per class).

/// Separator for composite keys. U+001F is not valid in trimmed user
/// input fields, so section keys containing ':' cannot produce two
/// composites that collide.
const SEP: char = '\u{1f}';

pub fn progress_key(class_id: u32) -> String {
    format!("{:02}", class_id)
}

pub fn note_key(note_id: u64) -> String {
    format!("{:020}", note_id)
}

pub fn note_class_index_key(class_id: u32, note_id: u64) -> String {
    format!("{:02}{}{:020}", class_id, SEP, note_id)
}

pub fn note_class_prefix(class_id: u32) -> String {
    format!("{:02}{}", class_id, SEP)
}

pub fn bookmark_key(bookmark_id: u64) -> String {
    format!("{:020}", bookmark_id)
}

/// Uniqueness key for a bookmark: one entry per (classId, sectionKey,
/// anchorId). Claimed atomically with compare_and_swap on insert.
pub fn bookmark_anchor_key(class_id: u32, section_key: &str, anchor_id: &str) -> String {
    format!("{:02}{}{}{}{}", class_id, SEP, section_key, SEP, anchor_id)
}

pub const SCHEMA_VERSION_KEY: &str = "schema_version";
pub const NOTE_SEQ_KEY: &str = "seq:notes";
pub const BOOKMARK_SEQ_KEY: &str = "seq:bookmarks";
