//! Elixir Term Conversion Utilities
//!
//! Converts decoded tokens and errors to Elixir terms.

use rustler::types::atom::Atom;
use rustler::{Encoder, Env, NewBinary, NifResult, Term};

use crate::core::error::DecodeError;
use crate::core::tokenizer::{OwnedToken, Token};

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    ok,
    error,
}

/// Atom name and binary payloads of the term a token maps to
///
/// `{:comment, bin}`, `{:open_tag, bin}`, `{:end_tag, bin}`, `{:text, bin}`,
/// `{:attribute, key, value}`, `:attribute_end`, `:eof`.
pub(crate) fn token_shape<'t>(
    token: &Token<'t>,
) -> (&'static str, Option<&'t [u8]>, Option<&'t [u8]>) {
    let tag = token.kind_name();
    match *token {
        Token::Comment(s) | Token::OpenTag(s) | Token::EndTag(s) | Token::Text(s) => {
            (tag, Some(s), None)
        }
        Token::Attribute(attr) => (tag, Some(attr.key), Some(attr.value)),
        Token::AttributeEnd | Token::Eof => (tag, None, None),
    }
}

/// Convert a single token to an Elixir term
///
/// Payloads are copied into fresh binaries; the term does not reference
/// the document buffer.
pub fn token_to_term<'a>(env: Env<'a>, token: &Token<'_>) -> NifResult<Term<'a>> {
    let (tag, first, second) = token_shape(token);
    let tag = Atom::from_str(env, tag)?;
    let term = match (first, second) {
        (Some(first), Some(second)) => (
            tag,
            bytes_to_binary(env, first),
            bytes_to_binary(env, second),
        )
            .encode(env),
        (Some(first), None) => (tag, bytes_to_binary(env, first)).encode(env),
        _ => tag.encode(env),
    };
    Ok(term)
}

/// Convert a token list to an Elixir list
pub fn tokens_to_term<'a>(env: Env<'a>, tokens: &[Token<'_>]) -> NifResult<Term<'a>> {
    let mut list = Term::list_new_empty(env);
    for token in tokens.iter().rev() {
        list = list.list_prepend(token_to_term(env, token)?);
    }
    Ok(list)
}

/// Convert owned tokens to an Elixir list
pub fn owned_tokens_to_term<'a>(env: Env<'a>, tokens: &[OwnedToken]) -> NifResult<Term<'a>> {
    let mut list = Term::list_new_empty(env);
    for token in tokens.iter().rev() {
        list = list.list_prepend(token_to_term(env, &token.as_token())?);
    }
    Ok(list)
}

/// `{:error, message}`
pub fn error_to_term<'a>(env: Env<'a>, err: &dyn std::error::Error) -> Term<'a> {
    (error(), err.to_string()).encode(env)
}

/// `{:ok, tokens}` or `{:error, message}`
pub fn decode_result_to_term<'a>(
    env: Env<'a>,
    result: &Result<Vec<Token<'_>>, DecodeError>,
) -> NifResult<Term<'a>> {
    match result {
        Ok(tokens) => Ok((ok(), tokens_to_term(env, tokens)?).encode(env)),
        Err(err) => Ok(error_to_term(env, err)),
    }
}

/// Create a binary from bytes
pub fn bytes_to_binary<'a>(env: Env<'a>, bytes: &[u8]) -> Term<'a> {
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
