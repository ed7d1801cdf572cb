use crate::address::parse_ciphertext;
use crate::codebook::Codebook;
use crate::error::Result;
use crate::grid::Grid;
use rand::Rng;

/// Encrypt `message` with the thread-local RNG.
///
/// Every address used is removed from `codebook`. On error the addresses
/// drawn for earlier characters stay removed.
pub fn encrypt(codebook: &mut Codebook, message: &str) -> Result<String> {
    encrypt_with_rng(codebook, message, &mut rand::thread_rng())
}

/// Encrypt `message`, drawing one random address per character from `rng`.
pub fn encrypt_with_rng<R: Rng + ?Sized>(
    codebook: &mut Codebook,
    message: &str,
    rng: &mut R,
) -> Result<String> {
    let addresses = message
        .chars()
        .map(|c| codebook.draw_random_address(c, rng).map(|a| a.to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(addresses.join("-"))
}

/// Decrypt `ciphertext` against the reverse index.
///
/// Only substrings of the form `digits-digits-digits` are read; everything
/// else is skipped.
pub fn decrypt(reverse_index: &Grid, ciphertext: &str) -> Result<String> {
    parse_ciphertext(ciphertext)?
        .iter()
        .map(|address| reverse_index.resolve(address))
        .collect()
}
