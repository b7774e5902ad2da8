//! Plain text search used by the Find dialog.

use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindDirection {
    #[default]
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    #[serde(default)]
    pub match_case: bool,
    #[serde(default)]
    pub whole_word: bool,
    #[serde(default)]
    pub direction: FindDirection,
    #[serde(default = "default_true")]
    pub wrap_around: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            match_case: false,
            whole_word: false,
            direction: FindDirection::Down,
            wrap_around: true,
        }
    }
}

/// Find the next occurrence of `needle` starting at byte offset `from`.
///
/// Searching down considers matches starting at or after `from`; searching up
/// considers matches starting before `from`. Returns the byte range of the
/// match. An empty needle never matches.
pub fn find_next(text: &str, needle: &str, from: usize, options: &FindOptions) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let from = floor_char_boundary(text, from);
    let mut starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();

    let (first, second): (Vec<usize>, Vec<usize>) = match options.direction {
        FindDirection::Down => starts.iter().partition(|&&i| i >= from),
        FindDirection::Up => {
            starts.reverse();
            starts.iter().partition(|&&i| i < from)
        }
    };

    let candidates = if options.wrap_around {
        first.into_iter().chain(second).collect::<Vec<_>>()
    } else {
        first
    };

    candidates
        .into_iter()
        .find_map(|start| match_at(text, start, needle, options).map(|end| start..end))
}

fn match_at(text: &str, start: usize, needle: &str, options: &FindOptions) -> Option<usize> {
    let mut hay = text[start..].char_indices();
    let mut end = start;
    for n in needle.chars() {
        let (offset, h) = hay.next()?;
        if !chars_equal(h, n, options.match_case) {
            return None;
        }
        end = start + offset + h.len_utf8();
    }

    if options.whole_word {
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
            return None;
        }
    }
    Some(end)
}

fn chars_equal(a: char, b: char, match_case: bool) -> bool {
    if match_case {
        a == b
    } else {
        a == b || a.to_lowercase().eq(b.to_lowercase())
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

pub(crate) fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
