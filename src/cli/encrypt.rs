use crate::cipher::encrypt;
use crate::config::CipherConfig;
use crate::error::Result;
use tracing::debug;

/// Encrypt a message against the cached codebook.
///
/// The codebook is read from its cache file on every call, so each message
/// starts from the full set of addresses.
pub fn encrypt_message(config: &CipherConfig, message: &str) -> Result<String> {
    let mut codebook = config.store().load_codebook(&config.codebook_path)?;
    debug!(chars = message.chars().count(), "encrypting");
    encrypt(&mut codebook, message)
}
