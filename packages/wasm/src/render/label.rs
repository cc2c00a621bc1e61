//! Label truncation.

use std::borrow::Cow;

/// Labels longer than this many characters are truncated.
pub const MAX_LABEL_CHARS: usize = 15;

/// Appended to truncated labels.
pub const ELLIPSIS: char = '…';

/// Truncate `text` to [`MAX_LABEL_CHARS`] characters plus [`ELLIPSIS`].
///
/// Counts Unicode scalar values, so multi-byte text is never split inside a
/// character.
pub fn truncate_label(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_LABEL_CHARS) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            let mut label = String::with_capacity(cut + ELLIPSIS.len_utf8());
            label.push_str(&text[..cut]);
            label.push(ELLIPSIS);
            Cow::Owned(label)
        }
    }
}
