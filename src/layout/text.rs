/// Label shown for a node whose source text is empty after trimming.
pub const EMPTY_LABEL: &str = "(empty)";
/// Display label for blank text.
pub const BLANK_DISPLAY: &str = "-";
pub const MAX_DISPLAY_CHARS: usize = 28;
const ELLIPSIS: char = '…';

/// String hash used for every deterministic jitter, color and curvature
/// choice in the layout.
///
/// `h = h * 31 + code` over each char, wrapped to a signed 32-bit integer at
/// every step, returning the absolute value. The result must stay bit-for-bit
/// stable across releases: stored layouts and tests depend on it.
pub fn hash_string(text: &str) -> u32 {
    let mut h: i32 = 0;
    for ch in text.chars() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(ch as i32);
    }
    h.unsigned_abs()
}

/// Cuts `text` to at most `max` chars, marking the cut with an ellipsis.
pub fn truncate_label(text: &str, max: usize) -> String {
    if text.trim().is_empty() {
        return BLANK_DISPLAY.to_string();
    }
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

/// Trims `text`, substituting the placeholder when nothing is left.
pub(crate) fn normalize_label(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        EMPTY_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}
