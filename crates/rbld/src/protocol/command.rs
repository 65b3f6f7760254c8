//! Request line parsing.
//!
//! A raw line is lower-cased, percent-decoded as a URL query component, split
//! on its verb prefix, and finally stripped of NUL, LF, CR and space padding.
//! Decoding runs before the verb is matched, so `%67et target` is a `get`.
//!
//! Bytes that are not UTF-8, whether sent raw or produced by an escape such
//! as `%ff`, become U+FFFD rather than failing the request. Only a broken
//! escape makes a line malformed.

use percent_encoding::percent_decode_str;

use super::errors::ParseError;

/// Requested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `get`: look the target up.
    Read,
    /// `put`: report the target. Accepted but not served.
    Write,
}

// Matched in order; the first prefix that fits wins.
const VERBS: [(&str, Verb); 2] = [("get ", Verb::Read), ("put ", Verb::Write)];

const PADDING: [char; 4] = ['\0', '\n', '\r', ' '];

/// Parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: Verb,
    target: String,
}

impl Command {
    /// Parses one raw request line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] when the line holds a broken percent
    /// escape, and [`ParseError::UnknownAction`] when it does not start with
    /// `get ` or `put `.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        let lowered = String::from_utf8_lossy(raw).to_lowercase();
        let decoded = query_unescape(&lowered)?;

        let (verb, rest) = VERBS
            .iter()
            .find_map(|(prefix, verb)| decoded.strip_prefix(prefix).map(|rest| (*verb, rest)))
            .ok_or(ParseError::UnknownAction)?;

        Ok(Self {
            verb,
            target: strip_padding(rest).to_owned(),
        })
    }

    /// Requested action.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Normalised identifier the client asked about. May be empty.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Decodes `+` as space and `%XX` escapes, rejecting malformed escapes.
fn query_unescape(input: &str) -> Result<String, ParseError> {
    validate_escapes(input)?;
    let spaced = input.replace('+', " ");
    Ok(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

fn validate_escapes(input: &str) -> Result<(), ParseError> {
    let mut bytes = input.bytes().enumerate();
    while let Some((offset, byte)) = bytes.next() {
        if byte != b'%' {
            continue;
        }
        let high = bytes.next().map(|(_, digit)| digit);
        let low = bytes.next().map(|(_, digit)| digit);
        match (high, low) {
            (Some(high), Some(low)) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit() => {}
            _ => return Err(ParseError::invalid_escape(offset)),
        }
    }
    Ok(())
}

/// Strips padding characters from both ends until neither end holds one.
///
/// Every pass either removes at least one byte or returns, so the loop runs at
/// most `value.len() + 1` times and ends on empty or all-padding input.
fn strip_padding(mut value: &str) -> &str {
    loop {
        let front = value.strip_prefix(PADDING).unwrap_or(value);
        let both = front.strip_suffix(PADDING).unwrap_or(front);
        if both.len() == value.len() {
            return both;
        }
        value = both;
    }
}
