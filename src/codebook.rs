//! Forward index: character -> every address where it occurs.

use crate::address::Address;
use crate::error::{CipherError, Result};
use crate::grid::Grid;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The codebook used for encryption.
///
/// Address lists are in corpus order (page, line, position). Drawing an
/// address removes it, so a codebook is a consumable resource: clone it or
/// reload it for each independent encryption session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Codebook {
    entries: BTreeMap<char, Vec<Address>>,
}

impl Codebook {
    /// Walk the grid in page, line, position order and record each address
    /// under its character.
    pub fn build(grid: &Grid) -> Self {
        let mut entries: BTreeMap<char, Vec<Address>> = BTreeMap::new();
        for (address, c) in grid.cells() {
            entries.entry(c).or_default().push(address);
        }
        Self { entries }
    }

    /// Remaining addresses for `c`, or `None` if `c` never occurs in the corpus.
    pub fn addresses(&self, c: char) -> Option<&[Address]> {
        self.entries.get(&c).map(Vec::as_slice)
    }

    pub fn remaining(&self, c: char) -> usize {
        self.entries.get(&c).map_or(0, Vec::len)
    }

    pub fn contains(&self, c: char) -> bool {
        self.entries.contains_key(&c)
    }

    /// Remove and return a uniformly random address for `c`.
    ///
    /// The key stays in the codebook once its list is empty, which is how an
    /// exhausted character is told apart from one the corpus never had.
    pub fn draw_random_address<R: Rng + ?Sized>(&mut self, c: char, rng: &mut R) -> Result<Address> {
        let list = self
            .entries
            .get_mut(&c)
            .ok_or(CipherError::CharacterNotInCorpus(c))?;
        if list.is_empty() {
            return Err(CipherError::AddressListExhausted(c));
        }
        let index = rng.gen_range(0..list.len());
        Ok(list.remove(index))
    }

    pub fn symbols(&self) -> impl Iterator<Item = (char, &[Address])> + '_ {
        self.entries.iter().map(|(&c, list)| (c, list.as_slice()))
    }

    /// Number of distinct characters.
    pub fn symbol_count(&self) -> usize {
        self.entries.len()
    }

    /// Total addresses left across all characters.
    pub fn occurrence_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
