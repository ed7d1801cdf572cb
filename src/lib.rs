//! Bookcipher - a running-key book cipher
//!
//! Plaintext characters are replaced by the coordinates of a matching
//! character somewhere in a fixed corpus of reference text. Decryption looks
//! the coordinates back up.
//!
//! ## Pipeline
//!
//! ```text
//! corpus files → normalize → segment (pages × lines × positions) → grid
//!                                                         ├─→ codebook (char → addresses)
//!                                                         └─→ reverse index (the grid itself)
//! ```
//!
//! - **Normalize**: trim each line, drop hyphens, append one space
//! - **Segment**: 128 characters per line, 64 lines per page, numbered from 1
//! - **Codebook**: every address of every character, in corpus order
//! - **Encrypt**: draw a random unused address per character, join with `-`
//! - **Decrypt**: read every `page-line-position` triple and resolve it
//!
//! Encryption consumes the addresses it uses. The same message encrypts
//! differently each time, and a codebook that has been used is smaller than
//! a fresh one.
//!
//! This is a classical substitution scheme. Anyone holding the corpus can
//! decrypt, and it does not resist known-plaintext attacks.
//!
//! ## Example
//!
//! ```no_run
//! use bookcipher::{decrypt, encrypt, CodebookStore, GridLayout};
//! use std::path::{Path, PathBuf};
//!
//! let store = CodebookStore::new(vec![PathBuf::from("books/tess.txt")], GridLayout::default());
//! let mut codebook = store.load_codebook(Path::new("code_books/tess.json")).unwrap();
//! let reverse = store.load_reverse_index(Path::new("code_books/tess_r.json")).unwrap();
//!
//! let ciphertext = encrypt(&mut codebook, "meet at noon").unwrap();
//! assert_eq!(decrypt(&reverse, &ciphertext).unwrap(), "meet at noon");
//! ```

pub mod address;
pub mod cipher;
pub mod cli;
pub mod codebook;
pub mod config;
pub mod corpus;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod stats;
pub mod store;

pub use address::{parse_ciphertext, Address, AddressTokens};
pub use cipher::{decrypt, encrypt, encrypt_with_rng};
pub use codebook::Codebook;
pub use config::CipherConfig;
pub use error::{CipherError, Result};
pub use grid::{FlushPolicy, Grid, GridLayout, Segmenter};
pub use normalize::normalize;
pub use store::{CodebookStore, StoredIndex};
