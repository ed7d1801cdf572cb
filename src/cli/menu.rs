use crate::cli::decrypt::decrypt_message;
use crate::cli::encrypt::encrypt_message;
use crate::config::CipherConfig;
use crate::error::{CipherError, Result};
use std::io::{BufRead, Write};
use tracing::warn;

const MENU: &str = "1). Encrypt\n2). Decrypt\n3). Quit\n";

/// A choice from the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Encrypt,
    Decrypt,
    Quit,
}

impl std::str::FromStr for MenuChoice {
    type Err = CipherError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<i64>() {
            Ok(1) => Ok(Self::Encrypt),
            Ok(2) => Ok(Self::Decrypt),
            Ok(3) => Ok(Self::Quit),
            _ => Err(CipherError::InvalidSelection(s.trim().to_string())),
        }
    }
}

/// Run the interactive encrypt/decrypt loop until the user quits or input
/// ends.
///
/// A bad selection prints `Improper selection.` and shows the menu again. A
/// failed encrypt or decrypt prints the error and returns to the menu.
pub fn run_menu<R: BufRead, W: Write>(config: &CipherConfig, input: &mut R, output: &mut W) -> Result<()> {
    loop {
        writeln!(output, "{}", MENU)?;
        let Some(selection) = prompt(input, output, "Make a selection [1,2,3]: ")? else {
            return Ok(());
        };

        let choice = match selection.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(_) => {
                writeln!(output, "Improper selection.")?;
                continue;
            }
        };

        let result = match choice {
            MenuChoice::Quit => return Ok(()),
            MenuChoice::Encrypt => {
                let Some(message) = prompt(input, output, "Please enter your secret message: ")? else {
                    return Ok(());
                };
                encrypt_message(config, &message)
            }
            MenuChoice::Decrypt => {
                let Some(ciphertext) = prompt(input, output, "Please enter your cipher text: ")? else {
                    return Ok(());
                };
                decrypt_message(config, &ciphertext)
            }
        };

        match result {
            Ok(text) => writeln!(output, "{}", text)?,
            Err(e) => {
                warn!(error = %e, "menu operation failed");
                writeln!(output, "Error: {}", e)?;
            }
        }
    }
}

/// Print `label` and read one line without its terminator. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(Some(trimmed.to_string()))
}
