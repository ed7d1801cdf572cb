//! Cached codebook and reverse index files.
//!
//! A cache file is trusted as-is when it exists; it is not checked against the
//! corpus it was built from. Point each corpus set at its own cache paths.

use crate::codebook::Codebook;
use crate::corpus::segment_corpus;
use crate::error::Result;
use crate::grid::{Grid, GridLayout};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Result of a mode-switched [`CodebookStore::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredIndex {
    Forward(Codebook),
    Reverse(Grid),
}

/// Builds indices from a corpus on a cache miss and persists them as JSON.
#[derive(Debug, Clone)]
pub struct CodebookStore {
    corpus: Vec<PathBuf>,
    layout: GridLayout,
}

impl CodebookStore {
    pub fn new(corpus: Vec<PathBuf>, layout: GridLayout) -> Self {
        Self { corpus, layout }
    }

    pub fn corpus(&self) -> &[PathBuf] {
        &self.corpus
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Segment the corpus into a fresh grid, ignoring any cache.
    pub fn build_grid(&self) -> Result<Grid> {
        let grid = segment_corpus(&self.corpus, self.layout)?;
        info!(
            files = self.corpus.len(),
            pages = grid.page_count(),
            lines = grid.line_count(),
            chars = grid.char_count(),
            "segmented corpus"
        );
        Ok(grid)
    }

    /// Load the forward codebook from `path`, building and saving it first
    /// if the file does not exist.
    pub fn load_codebook(&self, path: &Path) -> Result<Codebook> {
        self.load_or_build(path, || {
            let codebook = Codebook::build(&self.build_grid()?);
            info!(symbols = codebook.symbol_count(), "built codebook");
            Ok(codebook)
        })
    }

    /// Load the reverse index (the raw grid) from `path`, building and
    /// saving it first if the file does not exist.
    pub fn load_reverse_index(&self, path: &Path) -> Result<Grid> {
        self.load_or_build(path, || self.build_grid())
    }

    pub fn load(&self, path: &Path, reverse: bool) -> Result<StoredIndex> {
        if reverse {
            self.load_reverse_index(path).map(StoredIndex::Reverse)
        } else {
            self.load_codebook(path).map(StoredIndex::Forward)
        }
    }

    /// Build both indices from one segmentation pass and overwrite both files.
    pub fn rebuild(&self, codebook_path: &Path, reverse_path: &Path) -> Result<(Codebook, Grid)> {
        let grid = self.build_grid()?;
        let codebook = Codebook::build(&grid);
        save(codebook_path, &codebook)?;
        save(reverse_path, &grid)?;
        info!(
            codebook = %codebook_path.display(),
            reverse = %reverse_path.display(),
            "rebuilt cache files"
        );
        Ok((codebook, grid))
    }

    fn load_or_build<T, F>(&self, path: &Path, build: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        if path.exists() {
            debug!(path = %path.display(), "cache hit");
            return read(path);
        }
        info!(path = %path.display(), "cache miss, building from corpus");
        let data = build()?;
        save(path, &data)?;
        Ok(data)
    }
}

/// Deserialize a cache file.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Serialize `data` to `path`, replacing any existing file atomically.
///
/// The JSON is written to a temporary file beside the target and renamed
/// over it, so readers never see a half-written cache.
pub fn save<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer(&mut writer, data)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), "saved cache file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::error::CipherError;
    use std::fs;
    use tempfile::tempdir;

    fn store_with(dir: &Path, text: &str) -> CodebookStore {
        let book = dir.join("book.txt");
        fs::write(&book, text).unwrap();
        CodebookStore::new(vec![book], GridLayout::default())
    }

    #[test]
    fn test_miss_builds_and_writes_forward_index() {
        let dir = tempdir().unwrap();
        let store = store_with(dir.path(), "ab\n");
        let path = dir.path().join("code_books").join("book.json");

        let codebook = store.load_codebook(&path).unwrap();
        assert_eq!(codebook.addresses('a').unwrap(), &[Address::new(1, 1, 0)]);

        let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            serde_json::json!({ "a": ["1-1-0"], "b": ["1-1-1"], " ": ["1-1-2"] })
        );
    }

    #[test]
    fn test_miss_builds_and_writes_reverse_index() {
        let dir = tempdir().unwrap();
        let store = store_with(dir.path(), "ab\n");
        let path = dir.path().join("book_r.json");

        let grid = store.load_reverse_index(&path).unwrap();
        assert_eq!(grid.line(1, 1), Some("ab "));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"1":{"1":"ab "}}"#);
    }

    #[test]
    fn test_hit_does_not_touch_corpus() {
        let dir = tempdir().unwrap();
        let store = store_with(dir.path(), "hello world\n");
        let path = dir.path().join("book.json");

        let first = store.load(&path, false).unwrap();
        let bytes = fs::read(&path).unwrap();
        fs::remove_file(&store.corpus()[0]).unwrap();

        let second = store.load(&path, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_hit_is_trusted_verbatim() {
        let dir = tempdir().unwrap();
        let store = store_with(dir.path(), "abc\n");
        let path = dir.path().join("book_r.json");
        fs::write(&path, r#"{"7":{"3":"xyz"}}"#).unwrap();

        match store.load(&path, true).unwrap() {
            StoredIndex::Reverse(grid) => assert_eq!(grid.line(7, 3), Some("xyz")),
            other => panic!("expected reverse index, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_corpus_leaves_no_cache() {
        let dir = tempdir().unwrap();
        let store = CodebookStore::new(vec![dir.path().join("absent.txt")], GridLayout::default());
        let path = dir.path().join("book.json");

        let err = store.load_codebook(&path).unwrap_err();
        assert!(matches!(err, CipherError::CorpusRead { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_wrong_shape_cache_is_json_error() {
        let dir = tempdir().unwrap();
        let store = store_with(dir.path(), "abc\n");
        let path = dir.path().join("book.json");
        fs::write(&path, r#"{"1":{"1":"abc "}}"#).unwrap();

        assert!(matches!(store.load_codebook(&path), Err(CipherError::Json(_))));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        save(&path, &vec![1, 2, 3]).unwrap();
        save(&path, &vec![4]).unwrap();
        let back: Vec<i32> = read(&path).unwrap();
        assert_eq!(back, vec![4]);
    }

    #[test]
    fn test_rebuild_replaces_both_files() {
        let dir = tempdir().unwrap();
        let store = store_with(dir.path(), "fresh text\n");
        let forward = dir.path().join("book.json");
        let reverse = dir.path().join("book_r.json");
        fs::write(&forward, "{}").unwrap();
        fs::write(&reverse, "{}").unwrap();

        let (codebook, grid) = store.rebuild(&forward, &reverse).unwrap();
        assert_eq!(read::<Codebook>(&forward).unwrap(), codebook);
        assert_eq!(read::<Grid>(&reverse).unwrap(), grid);
        assert!(codebook.contains('f'));
    }
}
