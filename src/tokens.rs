//! Token estimation for the end-of-run summary.
//!
//! Uses tiktoken's cl100k_base encoding when available, with a
//! ~4-characters-per-token heuristic as fallback.

use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

// Cached tokenizer - built once per process.
static CL100K: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn tokenizer() -> Option<&'static CoreBPE> {
    CL100K
        .get_or_init(|| tiktoken_rs::cl100k_base().ok())
        .as_ref()
}

/// Fallback heuristic: ~4 characters per token.
fn fallback_count(text: &str) -> usize {
    (text.len() + 3) / 4
}

/// Estimate the token count of a text.
///
/// Never fails - falls back to the character heuristic if the tokenizer
/// cannot be constructed.
///
/// # Examples
///
/// ```
/// use codescribe::tokens::count_tokens;
///
/// assert!(count_tokens("fn main() {}") > 0);
/// ```
pub fn count_tokens(text: &str) -> usize {
    match tokenizer() {
        Some(bpe) => bpe.encode_ordinary(text).len(),
        None => fallback_count(text),
    }
}
