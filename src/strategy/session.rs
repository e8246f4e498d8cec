//! Owned Decoding Session
//!
//! Holds a document buffer together with a parked [`SessionState`], so a
//! pull session can outlive a single call (e.g. across NIF invocations).
//! Each read rebuilds a borrowed tokenizer over the buffer, decodes, and
//! stores the new state.

use crate::core::tokenizer::{Options, SessionState, Tokenizer};

pub struct Session {
    buffer: Vec<u8>,
    state: SessionState,
    options: Options,
}

impl Session {
    pub fn new(buffer: Vec<u8>) -> Self {
        Self::with_options(buffer, Options::default())
    }

    pub fn with_options(buffer: Vec<u8>, options: Options) -> Self {
        Session {
            buffer,
            state: SessionState::default(),
            options,
        }
    }

    /// Run `f` against the live tokenizer, then park its state again
    pub fn with_tokenizer<F, R>(&mut self, f: F) -> R
    where
        F: for<'b> FnOnce(&mut Tokenizer<'b>) -> R,
    {
        let mut tokenizer = Tokenizer::resume(&self.buffer, self.state, self.options);
        let result = f(&mut tokenizer);
        self.state = tokenizer.state();
        result
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current read offset
    pub fn position(&self) -> usize {
        self.state.cursor
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::{OwnedToken, Status, Token};

    fn next_owned(session: &mut Session) -> Result<OwnedToken, crate::core::error::DecodeError> {
        session.with_tokenizer(|tok| tok.next_token().map(|t| t.to_owned_token()))
    }

    #[test]
    fn test_state_survives_between_calls() {
        let mut session = Session::new(b"\x01a\0\x01k\0v\0\x00\xff".to_vec());

        assert_eq!(next_owned(&mut session), Ok(OwnedToken::OpenTag(b"a".to_vec())));
        assert_eq!(session.position(), 3);
        assert_eq!(
            next_owned(&mut session),
            Ok(OwnedToken::Attribute {
                key: b"k".to_vec(),
                value: b"v".to_vec(),
            })
        );
        assert_eq!(next_owned(&mut session), Ok(OwnedToken::AttributeEnd));
        assert_eq!(session.buffer(), b"\x01a\0\x01k\0v\0\x00\xff");
        assert_eq!(next_owned(&mut session), Ok(OwnedToken::Eof));
        assert_eq!(session.state().status, Status::Finished);
        assert!(next_owned(&mut session).unwrap_err().is_misuse());
    }

    #[test]
    fn test_repeat_eof_session() {
        let mut session = Session::with_options(b"\xff".to_vec(), Options { repeat_eof: true });
        for _ in 0..3 {
            let token = session.with_tokenizer(|tok| tok.next_token().map(|t| t == Token::Eof));
            assert_eq!(token, Ok(true));
        }
    }
}
