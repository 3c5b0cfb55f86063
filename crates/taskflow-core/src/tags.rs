//! Tag string validation and extraction.
//!
//! The tags field travels as a single comma-joined string. Validation
//! enforces the token charset (`[A-Za-z0-9_]+`) and the per-task cap;
//! extraction runs only on strings that pass validation. The graph builder
//! deliberately bypasses this module and splits the raw string (see
//! [`crate::graph`]), so a stored string that would fail validation still
//! participates in the graph as literal tokens.

use smallvec::SmallVec;

use crate::error::ValidationError;

/// Maximum number of tag tokens a task may carry.
pub const MAX_TAGS: usize = 3;

/// Token lists are at most [`MAX_TAGS`] long in the validated path.
pub type TagList = SmallVec<[String; MAX_TAGS]>;

/// Whether a tags string is well formed: one or more `[A-Za-z0-9_]+`
/// tokens joined by single commas. The empty string is *not* well formed;
/// callers treat it as "no tags" before consulting this check.
pub fn is_valid_tag_format(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.split(',').all(|token| {
        !token.is_empty()
            && token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    })
}

/// Split a tags string into tokens, validating first.
///
/// An empty input yields an empty list (no tags). A malformed input is an
/// error, never a silently-normalized token list; whitespace around commas
/// fails the charset check rather than being trimmed away.
pub fn extract_tags(s: &str) -> Result<TagList, ValidationError> {
    if s.is_empty() {
        return Ok(TagList::new());
    }
    if !is_valid_tag_format(s) {
        return Err(ValidationError::InvalidTagFormat);
    }
    let tags: TagList = s.split(',').map(str::to_owned).collect();
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooManyTags { count: tags.len() });
    }
    Ok(tags)
}
