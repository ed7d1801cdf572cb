use crate::error::{CipherError, Result};
use crate::grid::{Grid, GridLayout, Segmenter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read one corpus file as UTF-8 text.
pub fn read_corpus_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CipherError::CorpusRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Segment every file in order into a single grid.
pub fn segment_corpus(paths: &[PathBuf], layout: GridLayout) -> Result<Grid> {
    let mut segmenter = Segmenter::new(layout)?;
    for path in paths {
        let text = read_corpus_file(path)?;
        debug!(path = %path.display(), bytes = text.len(), "segmenting corpus file");
        segmenter.feed_text(&text);
        segmenter.end_book();
    }
    Ok(segmenter.finish())
}
