//! Corpus coordinates and the ciphertext tokenizer.
//!
//! An [`Address`] is written `page-line-position`. Ciphertext joins addresses
//! with the same `-` separator, so it cannot be split on `-`; instead
//! [`AddressTokens`] scans for the leftmost non-overlapping runs matching
//!
//! ```text
//! token := digits '-' digits '-' digits
//! digits := [0-9]+
//! ```
//!
//! Anything between matches is skipped without error. Malformed segments are
//! tolerated on purpose so that arbitrary separators between triples still
//! decode.

use crate::error::{CipherError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Location of one character occurrence in the corpus grid.
///
/// `page` and `line` are 1-based, `position` is a 0-based character index
/// into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    pub page: u32,
    pub line: u32,
    pub position: u32,
}

impl Address {
    pub fn new(page: u32, line: u32, position: u32) -> Self {
        Self {
            page,
            line,
            position,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.page, self.line, self.position)
    }
}

impl FromStr for Address {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self> {
        match match_triple(s.as_bytes(), 0) {
            Some(end) if end == s.len() => parse_triple(s),
            _ => Err(CipherError::InvalidAddress(s.to_string())),
        }
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Iterator over the address-shaped substrings of a ciphertext, in order.
///
/// Yields the raw matched text; numeric conversion is left to the caller so
/// that an out-of-range number can be reported with the text it came from.
pub struct AddressTokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> AddressTokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for AddressTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let start = self.pos;
            match match_triple(bytes, start) {
                Some(end) => {
                    self.pos = end;
                    // Matches only span ASCII, so these are char boundaries
                    return Some(&self.text[start..end]);
                }
                None => self.pos += 1,
            }
        }
        None
    }
}

/// Tokenize a ciphertext into addresses.
///
/// Tokens whose numbers overflow are reported as unresolvable addresses,
/// since no grid can contain them.
pub fn parse_ciphertext(ciphertext: &str) -> Result<Vec<Address>> {
    AddressTokens::new(ciphertext)
        .map(|token| {
            parse_triple(token).map_err(|_| CipherError::AddressResolution(token.to_string()))
        })
        .collect()
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Try to match `digits-digits-digits` at `start`; returns the end offset.
fn match_triple(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    for field in 0..3 {
        if field > 0 {
            if bytes.get(pos) != Some(&b'-') {
                return None;
            }
            pos += 1;
        }
        let run = digit_run(bytes, pos);
        if run == 0 {
            return None;
        }
        pos += run;
    }
    Some(pos)
}

/// Parse text already known to match the triple grammar.
fn parse_triple(s: &str) -> Result<Address> {
    let invalid = || CipherError::InvalidAddress(s.to_string());
    let mut fields = s.splitn(3, '-');
    let mut field = || -> Result<u32> {
        fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(invalid)
    };
    let page = field()?;
    let line = field()?;
    let position = field()?;
    Ok(Address::new(page, line, position))
}
