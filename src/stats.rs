use crate::codebook::Codebook;
use crate::grid::Grid;
use std::fmt;

/// Size of a corpus grid and how its characters are spread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    pub pages: usize,
    pub lines: usize,
    pub chars: usize,
    pub symbols: usize,
    /// Least frequent characters, rarest first. These run out first when one
    /// codebook is reused.
    pub rarest: Vec<(char, usize)>,
}

impl CorpusStats {
    pub fn collect(grid: &Grid, codebook: &Codebook, rarest: usize) -> Self {
        let mut counts: Vec<(char, usize)> = codebook
            .symbols()
            .map(|(c, list)| (c, list.len()))
            .collect();
        counts.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        counts.truncate(rarest);

        Self {
            pages: grid.page_count(),
            lines: grid.line_count(),
            chars: grid.char_count(),
            symbols: codebook.symbol_count(),
            rarest: counts,
        }
    }
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pages: {}", self.pages)?;
        writeln!(f, "Lines: {}", self.lines)?;
        writeln!(f, "Characters: {}", self.chars)?;
        writeln!(f, "Distinct characters: {}", self.symbols)?;
        if !self.rarest.is_empty() {
            writeln!(f, "Rarest characters:")?;
            for (c, count) in &self.rarest {
                writeln!(f, "  {:?}: {}", c, count)?;
            }
        }
        Ok(())
    }
}
