use crate::error::{CipherError, Result};
use crate::grid::GridLayout;
use crate::store::CodebookStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the corpus and cache files live, and how the corpus is segmented.
///
/// Read from a JSON file; any field left out takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    pub codebook_path: PathBuf,
    pub reverse_path: PathBuf,
    pub corpus: Vec<PathBuf>,
    pub layout: GridLayout,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            codebook_path: PathBuf::from("code_books/book2.json"),
            reverse_path: PathBuf::from("code_books/book2_r.json"),
            corpus: [
                "books/Gullivers_Travels.txt",
                "books/shakespeare.txt",
                "books/tess.txt",
                "books/GreatGatsby.txt",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            layout: GridLayout::default(),
        }
    }
}

impl CipherConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        if self.corpus.is_empty() {
            return Err(CipherError::InvalidConfig("no corpus files given".into()));
        }
        if self.codebook_path == self.reverse_path {
            return Err(CipherError::InvalidConfig(
                "codebook and reverse index must use different files".into(),
            ));
        }
        Ok(())
    }

    pub fn store(&self) -> CodebookStore {
        CodebookStore::new(self.corpus.clone(), self.layout)
    }
}
