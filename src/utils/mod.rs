/// Display width of a string in terminal cells. ASCII characters count as
/// one cell, everything else as two.
#[must_use]
pub fn display_width(s: &str) -> usize {
    s.chars().fold(0, |acc, c| acc + if c.is_ascii() { 1 } else { 2 })
}

/// Truncates `content` to fit in `width` display cells, appending `…` when
/// anything was cut.
#[must_use]
pub fn truncate_to_width(content: &str, width: usize) -> String {
    if display_width(content) <= width {
        return content.to_string();
    }

    let mut result = String::with_capacity(width);
    let mut current_width = 0;

    for c in content.chars() {
        let char_width = if c.is_ascii() { 1 } else { 2 };
        if current_width + char_width < width {
            result.push(c);
            current_width += char_width;
        } else {
            break;
        }
    }

    if !content.is_empty() && result.len() < content.len() {
        result.push('…');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_counts_one_cell_others_two() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("a日"), 3);
    }

    #[test]
    fn short_content_is_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn long_content_gets_ellipsis() {
        let truncated = truncate_to_width("hello world", 6);
        assert!(truncated.ends_with('…'));
        assert!(truncated.len() < "hello world".len());
    }
}
