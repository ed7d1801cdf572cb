//! Fixed-shape page/line grid over normalized corpus text.
//!
//! The grid is built by a [`Segmenter`] and doubles as the reverse index used
//! for decryption: `grid[page][line][position]` is the character at that
//! address.

use crate::address::Address;
use crate::error::{CipherError, Result};
use crate::normalize::{is_blank, normalize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Characters per full line.
pub const LINE_WIDTH: usize = 128;

/// Lines per full page.
pub const PAGE_LINES: usize = 64;

/// Byte order mark some corpus files start with.
const BOM: char = '\u{feff}';

/// What happens to a partially filled line/page at the end of each corpus file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlushPolicy {
    /// All files form one stream; only the end of the last file is flushed.
    #[default]
    Continuous,
    /// Every file ends its own line and page. Page numbers keep counting up.
    PerBook,
}

impl std::str::FromStr for FlushPolicy {
    type Err = CipherError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "continuous" => Ok(Self::Continuous),
            "per-book" | "perbook" => Ok(Self::PerBook),
            _ => Err(CipherError::InvalidConfig(format!("flush policy: {}", s))),
        }
    }
}

/// Shape of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub line_width: usize,
    pub page_lines: usize,
    pub flush: FlushPolicy,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            line_width: LINE_WIDTH,
            page_lines: PAGE_LINES,
            flush: FlushPolicy::default(),
        }
    }
}

impl GridLayout {
    pub fn validate(&self) -> Result<()> {
        if self.line_width == 0 {
            return Err(CipherError::InvalidConfig("line width must be at least 1".into()));
        }
        if self.page_lines == 0 {
            return Err(CipherError::InvalidConfig("page must hold at least 1 line".into()));
        }
        // Positions and line numbers are stored as u32 in addresses
        if self.line_width > u32::MAX as usize {
            return Err(CipherError::InvalidConfig(format!(
                "line width {} exceeds {}",
                self.line_width,
                u32::MAX
            )));
        }
        if self.page_lines > u32::MAX as usize {
            return Err(CipherError::InvalidConfig(format!(
                "page height {} exceeds {}",
                self.page_lines,
                u32::MAX
            )));
        }
        Ok(())
    }
}

/// page number -> line number -> line content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    pages: BTreeMap<u32, BTreeMap<u32, String>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &BTreeMap<u32, BTreeMap<u32, String>> {
        &self.pages
    }

    pub fn page(&self, page: u32) -> Option<&BTreeMap<u32, String>> {
        self.pages.get(&page)
    }

    pub fn line(&self, page: u32, line: u32) -> Option<&str> {
        self.pages.get(&page)?.get(&line).map(String::as_str)
    }

    /// Look up the character stored at `address`.
    pub fn resolve(&self, address: &Address) -> Result<char> {
        self.line(address.page, address.line)
            .and_then(|line| line.chars().nth(address.position as usize))
            .ok_or_else(|| CipherError::AddressResolution(address.to_string()))
    }

    /// Every `(address, char)` in page, line, position order.
    pub fn cells(&self) -> impl Iterator<Item = (Address, char)> + '_ {
        self.pages.iter().flat_map(|(&page, lines)| {
            lines.iter().flat_map(move |(&line, content)| {
                content
                    .chars()
                    .enumerate()
                    .map(move |(pos, c)| (Address::new(page, line, pos as u32), c))
            })
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.values().map(BTreeMap::len).sum()
    }

    pub fn char_count(&self) -> usize {
        self.pages
            .values()
            .flat_map(BTreeMap::values)
            .map(|line| line.chars().count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// One segmentation session.
///
/// Owns the line and page accumulators and both counters. Page numbers run
/// across every file fed into the same session.
#[derive(Debug)]
pub struct Segmenter {
    layout: GridLayout,
    current_line: String,
    current_line_len: usize,
    current_page: BTreeMap<u32, String>,
    line_number: u32,
    page_number: u32,
    grid: Grid,
}

impl Segmenter {
    pub fn new(layout: GridLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            current_line: String::with_capacity(layout.line_width.min(LINE_WIDTH)),
            current_line_len: 0,
            current_page: BTreeMap::new(),
            line_number: 0,
            page_number: 0,
            grid: Grid::new(),
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Append one character, closing the line when it is full.
    pub fn feed(&mut self, c: char) {
        self.current_line.push(c);
        self.current_line_len += 1;
        if self.current_line_len == self.layout.line_width {
            self.finish_line();
        }
    }

    /// Normalize a raw corpus line and feed it. Blank lines contribute nothing.
    pub fn feed_line(&mut self, raw: &str) {
        let line = normalize(raw);
        if is_blank(&line) {
            return;
        }
        for c in line.chars() {
            self.feed(c);
        }
    }

    /// Feed the full text of one corpus file.
    ///
    /// A leading byte order mark is dropped. `\n`, `\r\n` and bare `\r` all
    /// end a line; the empty pieces between `\r` and `\n` are blank and skipped.
    pub fn feed_text(&mut self, text: &str) {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        for raw in text.split(['\n', '\r']) {
            self.feed_line(raw);
        }
    }

    /// Mark the end of one corpus file.
    pub fn end_book(&mut self) {
        if self.layout.flush == FlushPolicy::PerBook {
            self.flush();
        }
    }

    /// Flush the trailing partial line and page and return the grid.
    pub fn finish(mut self) -> Grid {
        self.flush();
        self.grid
    }

    fn flush(&mut self) {
        if self.current_line_len > 0 {
            self.finish_line();
        }
        if !self.current_page.is_empty() {
            self.finish_page();
        }
    }

    fn finish_line(&mut self) {
        self.line_number += 1;
        let content = std::mem::take(&mut self.current_line);
        self.current_line_len = 0;
        self.current_page.insert(self.line_number, content);
        if self.current_page.len() == self.layout.page_lines {
            self.finish_page();
        }
    }

    fn finish_page(&mut self) {
        self.page_number += 1;
        let lines = std::mem::take(&mut self.current_page);
        self.grid.pages.insert(self.page_number, lines);
        self.line_number = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segment(text: &str, layout: GridLayout) -> Grid {
        let mut seg = Segmenter::new(layout).unwrap();
        seg.feed_text(text);
        seg.end_book();
        seg.finish()
    }

    fn small(line_width: usize, page_lines: usize) -> GridLayout {
        GridLayout {
            line_width,
            page_lines,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_short_line() {
        let grid = segment("ab", GridLayout::default());
        assert_eq!(grid.page_count(), 1);
        assert_eq!(grid.line(1, 1), Some("ab "));
        assert_eq!(serde_json::to_string(&grid).unwrap(), r#"{"1":{"1":"ab "}}"#);
    }

    #[test]
    fn test_lines_wrap_at_width() {
        let grid = segment("abcdefg", small(3, 64));
        // "abcdefg " is 8 chars
        assert_eq!(grid.line(1, 1), Some("abc"));
        assert_eq!(grid.line(1, 2), Some("def"));
        assert_eq!(grid.line(1, 3), Some("g "));
        assert_eq!(grid.line_count(), 3);
    }

    #[test]
    fn test_pages_wrap_and_line_numbers_reset() {
        let grid = segment("abcdefghi", small(2, 2));
        // "abcdefghi " -> 5 lines of 2 -> pages of 2, 2, 1
        assert_eq!(grid.page_count(), 3);
        assert_eq!(grid.line(1, 1), Some("ab"));
        assert_eq!(grid.line(1, 2), Some("cd"));
        assert_eq!(grid.line(2, 1), Some("ef"));
        assert_eq!(grid.line(2, 2), Some("gh"));
        assert_eq!(grid.line(3, 1), Some("i "));
        assert_eq!(grid.page(3).unwrap().len(), 1);
    }

    #[test]
    fn test_exact_fill_creates_no_empty_entries() {
        // "abc " is exactly 2 lines of 2 = 1 page
        let grid = segment("abc", small(2, 2));
        assert_eq!(grid.page_count(), 1);
        assert_eq!(grid.line_count(), 2);
        assert!(grid.page(2).is_none());
    }

    #[test]
    fn test_empty_input_gives_empty_grid() {
        let grid = segment("\n\n   \n-\n", GridLayout::default());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_blank_lines_skipped_and_hyphens_joined() {
        let grid = segment("\u{feff}co-\r\n\r\noperate\n", GridLayout::default());
        assert_eq!(grid.line(1, 1), Some("co operate "));
    }

    #[test]
    fn test_continuous_stream_spans_books() {
        let mut seg = Segmenter::new(small(4, 64)).unwrap();
        seg.feed_text("ab");
        seg.end_book();
        seg.feed_text("cd");
        seg.end_book();
        let grid = seg.finish();
        assert_eq!(grid.line(1, 1), Some("ab c"));
        assert_eq!(grid.line(1, 2), Some("d "));
        assert_eq!(grid.page_count(), 1);
    }

    #[test]
    fn test_per_book_flush_starts_new_page() {
        let layout = GridLayout {
            flush: FlushPolicy::PerBook,
            ..small(4, 64)
        };
        let mut seg = Segmenter::new(layout).unwrap();
        seg.feed_text("ab");
        seg.end_book();
        seg.feed_text("cd");
        seg.end_book();
        let grid = seg.finish();
        assert_eq!(grid.line(1, 1), Some("ab "));
        assert_eq!(grid.line(2, 1), Some("cd "));
        assert_eq!(grid.page_count(), 2);
    }

    #[test]
    fn test_resolve() {
        let grid = segment("ab", GridLayout::default());
        assert_eq!(grid.resolve(&Address::new(1, 1, 0)).unwrap(), 'a');
        assert_eq!(grid.resolve(&Address::new(1, 1, 2)).unwrap(), ' ');
        for missing in [Address::new(1, 1, 3), Address::new(1, 2, 0), Address::new(2, 1, 0)] {
            assert!(matches!(
                grid.resolve(&missing),
                Err(CipherError::AddressResolution(s)) if s == missing.to_string()
            ));
        }
    }

    #[test]
    fn test_resolve_counts_chars_not_bytes() {
        let grid = segment("héllo", GridLayout::default());
        assert_eq!(grid.resolve(&Address::new(1, 1, 2)).unwrap(), 'l');
    }

    #[test]
    fn test_reverse_index_json_roundtrip() {
        let grid = segment("the quick brown fox", small(5, 2));
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }

    #[test]
    fn test_zero_layout_rejected() {
        assert!(Segmenter::new(small(0, 1)).is_err());
        assert!(Segmenter::new(small(1, 0)).is_err());
    }

    #[test]
    fn test_oversized_layout_rejected() {
        let layout: GridLayout =
            serde_json::from_str(r#"{"line_width": 18446744073709551615}"#).unwrap();
        assert!(matches!(layout.validate(), Err(CipherError::InvalidConfig(_))));
        assert!(matches!(Segmenter::new(layout), Err(CipherError::InvalidConfig(_))));

        let too_tall = small(1, u32::MAX as usize + 1);
        assert!(Segmenter::new(too_tall).is_err());

        let widest = small(u32::MAX as usize, 1);
        assert!(Segmenter::new(widest).is_ok());
    }

    proptest! {
        #[test]
        fn prop_segmentation_shape(n in 0usize..20_000) {
            let layout = GridLayout::default();
            let mut seg = Segmenter::new(layout).unwrap();
            for i in 0..n {
                seg.feed(char::from(b'a' + (i % 26) as u8));
            }
            let grid = seg.finish();

            let lines = n.div_ceil(LINE_WIDTH);
            prop_assert_eq!(grid.line_count(), lines);
            prop_assert_eq!(grid.page_count(), lines.div_ceil(PAGE_LINES));
            prop_assert_eq!(grid.char_count(), n);

            let all: Vec<&String> = grid.pages().values().flat_map(BTreeMap::values).collect();
            if let Some((last, rest)) = all.split_last() {
                for line in rest {
                    prop_assert_eq!(line.chars().count(), LINE_WIDTH);
                }
                let expected_last = if n % LINE_WIDTH == 0 { LINE_WIDTH } else { n % LINE_WIDTH };
                prop_assert_eq!(last.chars().count(), expected_last);
            }
            for (i, (&page, lines)) in grid.pages().iter().enumerate() {
                prop_assert_eq!(page as usize, i + 1);
                prop_assert!(lines.len() <= PAGE_LINES);
                for (j, &line) in lines.keys().enumerate() {
                    prop_assert_eq!(line as usize, j + 1);
                }
            }
        }
    }
}
