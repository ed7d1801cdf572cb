/// Normalize one line of corpus text before segmentation.
///
/// Surrounding whitespace (including the line terminator) is trimmed, every
/// `-` is removed, and a single space is appended in place of the newline.
/// The ASCII file/group/record/unit separators count as whitespace here.
pub fn normalize(line: &str) -> String {
    let mut out: String = line
        .trim_matches(is_trimmed)
        .chars()
        .filter(|&c| c != '-')
        .collect();
    out.push(' ');
    out
}

/// A normalized line carries content only if it is not all whitespace.
pub fn is_blank(normalized: &str) -> bool {
    normalized.trim_matches(is_trimmed).is_empty()
}

fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
