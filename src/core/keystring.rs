// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/keystring.rs
//!
//! Key-string markup parser
//!
//! Keyboard bindings in the binding table are stored as key-string markup:
//! - `{DikLControl}{DikA}` (braced tokens, one per key of the chord)
//! - `DikSpace` or `a` (a single bare key)
//!
//! The `Dik` marker prefixes scan-code key names and is not part of the
//! human-readable key name.
//!
//! # Architecture
//! The parser uses nom combinators. It only structures data; turning a
//! chord into OS events is the synthesizer's job.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{all_consuming, map},
    multi::many1,
    sequence::delimited,
    IResult, Parser,
};
use std::fmt;
use thiserror::Error;

/// Literal prefix carried by scan-code key names
pub const KEY_MARKER: &str = "Dik";

/// Key-string parse errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyStringError {
    #[error("Key string is empty")]
    Empty,

    #[error("Invalid key string '{input}': {message}")]
    InvalidSyntax { input: String, message: String },
}

/// A single key of a chord
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyToken {
    /// Token text as written, marker included
    pub raw: String,

    /// Key name with the marker removed
    pub name: String,
}

impl KeyToken {
    fn from_raw(raw: &str) -> Self {
        let name = raw.strip_prefix(KEY_MARKER).unwrap_or(raw);
        Self {
            raw: raw.to_string(),
            name: name.to_string(),
        }
    }

    /// True if the token carried the scan-code marker
    pub fn is_marked(&self) -> bool {
        self.raw.starts_with(KEY_MARKER)
    }
}

/// Ordered set of keys pressed together
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyChord {
    pub keys: Vec<String>,
}

impl KeyChord {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keys.join("+"))
    }
}

/// Parse key-string markup into tokens
///
/// # Example
/// ```ignore
/// let tokens = parse_key_string("{DikLControl}{DikA}")?;
/// assert_eq!(tokens[1].name, "A");
/// ```
pub fn parse_key_string(input: &str) -> Result<Vec<KeyToken>, KeyStringError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(KeyStringError::Empty);
    }

    match all_consuming(key_string).parse(trimmed) {
        Ok((_, raw_tokens)) => Ok(raw_tokens.into_iter().map(KeyToken::from_raw).collect()),
        Err(e) => Err(KeyStringError::InvalidSyntax {
            input: trimmed.to_string(),
            message: format!("{:?}", e),
        }),
    }
}

/// Convert key-string markup into a chord of marker-free key names
pub fn convert_key_string(input: &str) -> Result<KeyChord, KeyStringError> {
    let keys = parse_key_string(input)?
        .into_iter()
        .map(|token| token.name)
        .collect();

    Ok(KeyChord { keys })
}

/// Either a run of braced tokens or one bare token
fn key_string(input: &str) -> IResult<&str, Vec<&str>> {
    alt((many1(braced_token), map(bare_token, |token| vec![token]))).parse(input)
}

/// Parse `{Name}`
fn braced_token(input: &str) -> IResult<&str, &str> {
    delimited(
        char('{'),
        take_while1(|c: char| c != '{' && c != '}'),
        char('}'),
    )
    .parse(input)
}

fn bare_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '{' && c != '}' && !c.is_whitespace()).parse(input)
}
