//! 公共验证函数模块
//! 输入验证规则集中在这里，供内容和用户数据路由共用。

use crate::constants::{MAX_CLASS_ID, MAX_NOTE_CHARS, MIN_CLASS_ID};

/// Parses a class id from a path segment or request field.
/// Accepts only integers in [1, 24]; anything else (non-numeric,
/// zero, negative, out of range) is rejected.
pub fn parse_class_id(raw: &str) -> Option<u32> {
    let id = raw.trim().parse::<u32>().ok()?;
    if !(MIN_CLASS_ID..=MAX_CLASS_ID).contains(&id) {
        return None;
    }
    Some(id)
}

/// Parses a row id (note or bookmark) from a path segment.
/// Row ids are positive; 0 is never assigned.
pub fn parse_row_id(raw: &str) -> Option<u64> {
    let id = raw.trim().parse::<u64>().ok()?;
    if id == 0 {
        return None;
    }
    Some(id)
}

/// Trims a free-text field and rejects it when empty after trimming.
pub fn required_trimmed(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Validates note text: trimmed, non-empty, at most 4000 characters.
/// Length is counted in characters, not bytes, so multi-byte text
/// gets the same limit as ASCII.
pub fn validate_note_text(raw: &str) -> Result<String, NoteTextError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NoteTextError::Empty);
    }
    if trimmed.chars().count() > MAX_NOTE_CHARS {
        return Err(NoteTextError::TooLong);
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, PartialEq, Eq)]
pub enum NoteTextError {
    Empty,
    TooLong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_id_in_range_accepted() {
        assert_eq!(parse_class_id("1"), Some(1));
        assert_eq!(parse_class_id("24"), Some(24));
        assert_eq!(parse_class_id(" 7 "), Some(7));
    }

    #[test]
    fn class_id_out_of_range_rejected() {
        assert_eq!(parse_class_id("0"), None);
        assert_eq!(parse_class_id("25"), None);
        assert_eq!(parse_class_id("-3"), None);
    }

    #[test]
    fn class_id_non_numeric_rejected() {
        assert_eq!(parse_class_id("abc"), None);
        assert_eq!(parse_class_id(""), None);
        assert_eq!(parse_class_id("3.5"), None);
    }

    #[test]
    fn row_id_zero_rejected() {
        assert_eq!(parse_row_id("0"), None);
        assert_eq!(parse_row_id("1"), Some(1));
    }

    #[test]
    fn required_trimmed_strips_whitespace() {
        assert_eq!(required_trimmed("  concepts "), Some("concepts".to_string()));
        assert_eq!(required_trimmed("   "), None);
        assert_eq!(required_trimmed(""), None);
    }

    #[test]
    fn note_text_boundary_at_4000_chars() {
        let exactly = "x".repeat(4000);
        assert_eq!(validate_note_text(&exactly), Ok(exactly));

        let over = "x".repeat(4001);
        assert_eq!(validate_note_text(&over), Err(NoteTextError::TooLong));
    }

    #[test]
    fn note_text_trims_before_length_check() {
        let padded = format!("  {}  ", "x".repeat(4000));
        assert!(validate_note_text(&padded).is_ok());
    }

    #[test]
    fn note_text_counts_chars_not_bytes() {
        let cjk = "字".repeat(4000);
        assert!(validate_note_text(&cjk).is_ok());
    }

    #[test]
    fn whitespace_only_note_rejected() {
        assert_eq!(validate_note_text(" \n\t "), Err(NoteTextError::Empty));
    }
}
