//! BinaryXML Tokenizer - State machine for token extraction
//!
//! Walks a byte buffer and emits one token per call:
//! - Comments, open tags, end tags and text in the outermost grammar
//! - Attributes and the attribute-list terminator after each open tag
//! - End of document
//!
//! String payloads are views into the buffer. The buffer's lifetime is
//! carried by every token, so a token can never outlive the bytes it
//! points at.

use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::attributes::Attribute;
use super::error::DecodeError;
use super::scanner::Scanner;

/// Tag bytes of the wire format
pub mod tag {
    /// Outermost: comment, one string follows
    pub const COMMENT: u8 = 0x00;
    /// Outermost: open tag, one string follows, then an attribute list
    pub const OPEN_TAG: u8 = 0x01;
    /// Outermost: end tag, one string follows
    pub const END_TAG: u8 = 0x02;
    /// Outermost: text, one string follows
    pub const TEXT: u8 = 0x03;
    /// Outermost: end of document
    pub const EOF: u8 = 0xFF;

    /// Attributes: end of the attribute list
    pub const ATTRIBUTE_END: u8 = 0x00;
    /// Attributes: key and value strings follow
    pub const ATTRIBUTE: u8 = 0x01;
}

/// Active sub-grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No byte has been decoded yet
    #[default]
    Uninitialized,
    /// Top-level token grammar
    Outermost,
    /// Attribute list following an open tag
    Attributes,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Uninitialized => "uninitialized",
            Mode::Outermost => "outermost",
            Mode::Attributes => "attributes",
        };
        f.write_str(name)
    }
}

/// Whether the session can still produce tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Open,
    /// `Eof` has been returned
    Finished,
    /// A decode error has been returned
    Failed,
}

/// Snapshot of a session, detached from its buffer
///
/// Lets an owner of the bytes park a session between calls and pick it
/// up again with [`Tokenizer::resume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub cursor: usize,
    pub mode: Mode,
    pub status: Status,
}

/// Tokenizer options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Keep answering `Eof` after the end of the document instead of
    /// reporting misuse
    pub repeat_eof: bool,
}

/// A decoded token, borrowing its payload from the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Comment(&'a [u8]),
    OpenTag(&'a [u8]),
    EndTag(&'a [u8]),
    Text(&'a [u8]),
    /// Only produced in attribute mode
    Attribute(Attribute<'a>),
    /// Only produced in attribute mode
    AttributeEnd,
    Eof,
}

impl<'a> Token<'a> {
    /// Copy the token out of the buffer
    pub fn to_owned_token(&self) -> OwnedToken {
        match *self {
            Token::Comment(text) => OwnedToken::Comment(text.to_vec()),
            Token::OpenTag(name) => OwnedToken::OpenTag(name.to_vec()),
            Token::EndTag(name) => OwnedToken::EndTag(name.to_vec()),
            Token::Text(text) => OwnedToken::Text(text.to_vec()),
            Token::Attribute(attr) => {
                let (key, value) = attr.to_owned_pair();
                OwnedToken::Attribute { key, value }
            }
            Token::AttributeEnd => OwnedToken::AttributeEnd,
            Token::Eof => OwnedToken::Eof,
        }
    }

    /// Short name of the token kind, for logging
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Comment(_) => "comment",
            Token::OpenTag(_) => "open_tag",
            Token::EndTag(_) => "end_tag",
            Token::Text(_) => "text",
            Token::Attribute(_) => "attribute",
            Token::AttributeEnd => "attribute_end",
            Token::Eof => "eof",
        }
    }
}

/// Owned version of [`Token`] for storage past the buffer's lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedToken {
    Comment(Vec<u8>),
    OpenTag(Vec<u8>),
    EndTag(Vec<u8>),
    Text(Vec<u8>),
    Attribute { key: Vec<u8>, value: Vec<u8> },
    AttributeEnd,
    Eof,
}

impl OwnedToken {
    /// Borrow the token back as a [`Token`]
    pub fn as_token(&self) -> Token<'_> {
        match self {
            OwnedToken::Comment(text) => Token::Comment(text),
            OwnedToken::OpenTag(name) => Token::OpenTag(name),
            OwnedToken::EndTag(name) => Token::EndTag(name),
            OwnedToken::Text(text) => Token::Text(text),
            OwnedToken::Attribute { key, value } => Token::Attribute(Attribute::new(key, value)),
            OwnedToken::AttributeEnd => Token::AttributeEnd,
            OwnedToken::Eof => Token::Eof,
        }
    }
}

/// BinaryXML tokenizer implementing a pull-parser pattern
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    mode: Mode,
    status: Status,
    options: Options,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, Options::default())
    }

    /// Create a new tokenizer with explicit options
    pub fn with_options(input: &'a [u8], options: Options) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            mode: Mode::Uninitialized,
            status: Status::Open,
            options,
        }
    }

    /// Rebuild a session over `input` from a saved state
    ///
    /// `input` must be the buffer the state was taken from. A cursor past
    /// the end of `input` is clamped and the session comes back failed.
    pub fn resume(input: &'a [u8], state: SessionState, options: Options) -> Self {
        let (cursor, status) = if state.cursor > input.len() {
            debug!(cursor = state.cursor, len = input.len(), "resumed cursor out of range");
            (input.len(), Status::Failed)
        } else {
            (state.cursor, state.status)
        };
        Tokenizer {
            scanner: Scanner::at(input, cursor),
            mode: state.mode,
            status,
            options,
        }
    }

    /// Current read offset
    #[inline]
    pub fn cursor(&self) -> usize {
        self.scanner.position()
    }

    /// Active sub-grammar
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// True once `Eof` has been returned
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// Snapshot of cursor, mode and status
    pub fn state(&self) -> SessionState {
        SessionState {
            cursor: self.cursor(),
            mode: self.mode,
            status: self.status,
        }
    }

    /// Decode the next token
    pub fn next_token(&mut self) -> Result<Token<'a>, DecodeError> {
        match self.status {
            Status::Open => {}
            Status::Finished if self.options.repeat_eof => return Ok(Token::Eof),
            Status::Finished => return Err(self.misuse("read past end of document")),
            Status::Failed => return Err(self.misuse("read after a decode error")),
        }

        let result = match self.mode {
            Mode::Attributes => self.next_attribute(),
            Mode::Outermost => self.next_outermost(),
            Mode::Uninitialized if self.cursor() == 0 => {
                self.mode = Mode::Outermost;
                self.next_outermost()
            }
            Mode::Uninitialized => Err(self.misuse("session resumed before initialization")),
        };

        match &result {
            Ok(Token::Eof) => {
                self.status = Status::Finished;
                trace!(position = self.cursor(), "end of document");
            }
            Ok(token) => {
                trace!(kind = token.kind_name(), position = self.cursor(), "decoded token");
            }
            Err(err) => {
                self.status = Status::Failed;
                debug!(error = %err, "binxml session failed");
            }
        }

        result
    }

    fn next_outermost(&mut self) -> Result<Token<'a>, DecodeError> {
        let position = self.cursor();
        let byte = self.scanner.next_byte().ok_or(DecodeError::Truncated {
            position,
            expected: "tag byte",
        })?;

        match byte {
            tag::COMMENT => Ok(Token::Comment(self.read_string()?)),
            tag::OPEN_TAG => {
                let name = self.read_string()?;
                self.mode = Mode::Attributes;
                Ok(Token::OpenTag(name))
            }
            tag::END_TAG => Ok(Token::EndTag(self.read_string()?)),
            tag::TEXT => Ok(Token::Text(self.read_string()?)),
            tag::EOF => Ok(Token::Eof),
            byte => Err(DecodeError::Malformed {
                byte,
                position,
                mode: Mode::Outermost,
            }),
        }
    }

    fn next_attribute(&mut self) -> Result<Token<'a>, DecodeError> {
        let position = self.cursor();
        let byte = self.scanner.next_byte().ok_or(DecodeError::Truncated {
            position,
            expected: "attribute byte",
        })?;

        match byte {
            tag::ATTRIBUTE_END => {
                self.mode = Mode::Outermost;
                Ok(Token::AttributeEnd)
            }
            tag::ATTRIBUTE => {
                let key = self.read_string()?;
                let value = self.read_string()?;
                Ok(Token::Attribute(Attribute::new(key, value)))
            }
            byte => Err(DecodeError::Malformed {
                byte,
                position,
                mode: Mode::Attributes,
            }),
        }
    }

    /// Read a NUL-terminated string, failing rather than reading past the end
    #[inline]
    fn read_string(&mut self) -> Result<&'a [u8], DecodeError> {
        let position = self.cursor();
        self.scanner.read_cstr().ok_or(DecodeError::Truncated {
            position,
            expected: "NUL terminator",
        })
    }

    fn misuse(&self, reason: &'static str) -> DecodeError {
        DecodeError::Misuse {
            position: self.cursor(),
            reason,
        }
    }
}

/// Yields every token before `Eof`, then stops. An error is yielded once.
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.status != Status::Open {
            return None;
        }
        match self.next_token() {
            Ok(Token::Eof) => None,
            other => Some(other),
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Decode a whole buffer into owned tokens (without the trailing `Eof`)
pub fn decode_all(input: &[u8]) -> Result<Vec<OwnedToken>, DecodeError> {
    Tokenizer::new(input)
        .map(|token| token.map(|t| t.to_owned_token()))
        .collect()
}
