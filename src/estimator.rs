/*!
 * Approximate prompt-token counting for the assembled digest
 */

use once_cell::sync::Lazy;
use tiktoken_rs::CoreBPE;

// Built once; construction only fails if the embedded vocabulary is broken,
// in which case estimation degrades to a per-byte approximation.
static ENCODER: Lazy<Option<CoreBPE>> = Lazy::new(|| tiktoken_rs::cl100k_base().ok());

/// Bytes per token assumed by the fallback estimate
const FALLBACK_BYTES_PER_TOKEN: usize = 4;

/// Deterministic token estimator over the content text
pub struct TokenEstimator;

impl TokenEstimator {
    /// Estimate prompt tokens for the given text
    ///
    /// Stable for a fixed input and never fails on arbitrary Unicode.
    pub fn estimate(text: &str) -> usize {
        match ENCODER.as_ref() {
            Some(bpe) => bpe.encode_ordinary(text).len(),
            None => text.len().div_ceil(FALLBACK_BYTES_PER_TOKEN),
        }
    }

    /// Humanize a token count: 1.2k, 3.4M
    pub fn humanize(tokens: usize) -> String {
        if tokens >= 1_000_000 {
            format!("{:.1}M", tokens as f64 / 1_000_000.0)
        } else if tokens >= 1_000 {
            format!("{:.1}k", tokens as f64 / 1_000.0)
        } else {
            tokens.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_is_deterministic() {
        let text = "fn main() { println!(\"hello\"); }\n";
        assert_eq!(TokenEstimator::estimate(text), TokenEstimator::estimate(text));
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert_eq!(TokenEstimator::estimate(""), 0);
    }

    #[test]
    fn arbitrary_unicode_does_not_panic() {
        let text = "héllo wörld \u{1F600} \u{FFFD} 中文テキスト";
        assert!(TokenEstimator::estimate(text) > 0);
    }

    #[test]
    fn humanize_thresholds() {
        assert_eq!(TokenEstimator::humanize(0), "0");
        assert_eq!(TokenEstimator::humanize(999), "999");
        assert_eq!(TokenEstimator::humanize(1_500), "1.5k");
        assert_eq!(TokenEstimator::humanize(2_400_000), "2.4M");
    }
}
