//! BinXml - Streaming reader for the BinaryXML encoding
//!
//! A BinaryXML document is a flat run of tagged tokens (comments, open
//! tags, end tags, text) with NUL-terminated payloads, where every open tag
//! is followed by an attribute list in a second grammar, and `0xFF` ends
//! the document.
//!
//! Layers:
//! - Tokenizer: zero-copy pull tokenizer (`core::tokenizer`)
//! - SliceReader: element-level events with folded attributes (`reader`)
//! - Document: owned buffers from memory or files (`reader::loader`)
//! - Parallel / Session: batch decoding and parked sessions (`strategy`)
//! - NIFs: Elixir bindings (`BinXml.Native`)

pub mod core;
pub mod reader;
mod resource;
pub mod strategy;
mod term;

use rustler::{Binary, Encoder, Env, NifResult, ResourceArc, Term};

use resource::{SessionRef, SessionResource};

pub use crate::core::attributes::Attribute;
pub use crate::core::error::{DecodeError, Error, LoadError};
pub use crate::core::tokenizer::{
    decode_all, Mode, Options, OwnedToken, SessionState, Status, Token, Tokenizer,
};
pub use crate::reader::{BxEvent, Document, LoaderOptions, SliceReader};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Whole-Document Decoding
// ============================================================================

fn decode_bytes<'a>(env: Env<'a>, bytes: &[u8]) -> NifResult<Term<'a>> {
    let result: Result<Vec<Token<'_>>, DecodeError> = Tokenizer::new(bytes).collect();
    term::decode_result_to_term(env, &result)
}

/// Decode a binary into `{:ok, tokens}` or `{:error, reason}`
#[rustler::nif]
fn decode<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    decode_bytes(env, input.as_slice())
}

/// Load a file and decode it
#[rustler::nif(schedule = "DirtyIo")]
fn decode_file<'a>(env: Env<'a>, path: String) -> NifResult<Term<'a>> {
    match Document::open(&path) {
        Ok(doc) => decode_bytes(env, doc.as_bytes()),
        Err(err) => Ok(term::error_to_term(env, &err)),
    }
}

/// Decode many binaries in parallel, one result per input
#[rustler::nif(schedule = "DirtyCpu")]
fn decode_many<'a>(env: Env<'a>, inputs: Vec<Binary<'a>>) -> NifResult<Term<'a>> {
    let slices: Vec<&[u8]> = inputs.iter().map(|b| b.as_slice()).collect();
    let results = strategy::decode_parallel(&slices);

    let mut list = Term::list_new_empty(env);
    for result in results.iter().rev() {
        let item = match result {
            Ok(tokens) => (term::ok(), term::owned_tokens_to_term(env, tokens)?).encode(env),
            Err(err) => term::error_to_term(env, err),
        };
        list = list.list_prepend(item);
    }
    Ok(list)
}

// ============================================================================
// Pull Sessions
// ============================================================================

/// Create a session over a copy of the binary
#[rustler::nif]
fn session_new(input: Binary) -> SessionRef {
    ResourceArc::new(SessionResource::new(input.as_slice().to_vec()))
}

/// Decode the next token: a token term or `{:error, reason}`
#[rustler::nif]
fn session_next<'a>(env: Env<'a>, session: SessionRef) -> NifResult<Term<'a>> {
    session
        .with_session(|inner| {
            inner.with_tokenizer(|tok| match tok.next_token() {
                Ok(token) => term::token_to_term(env, &token),
                Err(err) => Ok(term::error_to_term(env, &err)),
            })
        })
        .map_err(rustler::Error::RaiseAtom)?
}

/// Current read offset of a session
#[rustler::nif]
fn session_position(session: SessionRef) -> NifResult<usize> {
    session
        .with_session(|inner| inner.position())
        .map_err(rustler::Error::RaiseAtom)
}

// ============================================================================
// NIF Initialization
// ============================================================================

// SessionResource is registered through #[rustler::resource_impl]
rustler::init!("Elixir.BinXml.Native");
