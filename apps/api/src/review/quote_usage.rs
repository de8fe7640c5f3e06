//! Quotation-Usage Extractor — works out which pool quotations the model echoed.
//!
//! Matching goes through the `QuoteMatcher` trait so a stronger strategy can be
//! dropped in without touching the generation pipeline. `AppState` carries an
//! `Arc<dyn QuoteMatcher>`; the default is `PrefixQuoteMatcher`.

use crate::models::quote::Quote;

/// Number of leading characters of a quotation that must appear verbatim.
pub const DEFAULT_PREFIX_CHARS: usize = 20;

pub trait QuoteMatcher: Send + Sync {
    fn matches(&self, text: &str, quote: &Quote) -> bool;
}

/// Literal substring test on the first `prefix_chars` characters of the quote.
///
/// Quotes shorter than the prefix are matched on their full text. Two quotes
/// that agree on the prefix are indistinguishable. An empty quote never matches.
#[derive(Debug, Clone, Copy)]
pub struct PrefixQuoteMatcher {
    pub prefix_chars: usize,
}

impl Default for PrefixQuoteMatcher {
    fn default() -> Self {
        Self {
            prefix_chars: DEFAULT_PREFIX_CHARS,
        }
    }
}

impl QuoteMatcher for PrefixQuoteMatcher {
    fn matches(&self, text: &str, quote: &Quote) -> bool {
        let needle = char_prefix(&quote.text, self.prefix_chars);
        !needle.is_empty() && text.contains(needle)
    }
}

/// Returns the quotations found in `text`, in pool order.
pub fn extract_used_quotes<'a>(
    text: &str,
    pool: &'a [Quote],
    matcher: &dyn QuoteMatcher,
) -> Vec<&'a Quote> {
    pool.iter().filter(|q| matcher.matches(text, q)).collect()
}

/// First `n` characters of `s` (by `char`, not byte).
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
