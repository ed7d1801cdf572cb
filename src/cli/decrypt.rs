use crate::cipher::decrypt;
use crate::config::CipherConfig;
use crate::error::Result;

/// Decrypt a ciphertext against the cached reverse index.
pub fn decrypt_message(config: &CipherConfig, ciphertext: &str) -> Result<String> {
    let reverse_index = config.store().load_reverse_index(&config.reverse_path)?;
    decrypt(&reverse_index, ciphertext)
}
