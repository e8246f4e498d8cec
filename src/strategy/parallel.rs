//! Parallel Batch Decoding
//!
//! Uses Rayon to decode many documents at once. Each document gets its own
//! session; buffers are only ever read.

use rayon::prelude::*;

use crate::core::error::DecodeError;
use crate::core::tokenizer::{decode_all, OwnedToken, Tokenizer};

/// Decode every buffer into owned tokens, preserving input order
pub fn decode_parallel<B>(inputs: &[B]) -> Vec<Result<Vec<OwnedToken>, DecodeError>>
where
    B: AsRef<[u8]> + Sync,
{
    inputs
        .par_iter()
        .map(|input| decode_all(input.as_ref()))
        .collect()
}

/// Count the tokens of every buffer (excluding `Eof`)
pub fn count_parallel<B>(inputs: &[B]) -> Vec<Result<usize, DecodeError>>
where
    B: AsRef<[u8]> + Sync,
{
    inputs
        .par_iter()
        .map(|input| {
            Tokenizer::new(input.as_ref()).try_fold(0usize, |count, token| token.map(|_| count + 1))
        })
        .collect()
}
