use anyhow::Result;
use tiktoken_rs::cl100k_base;

/// Raw documents above this size are estimated instead of tokenized.
const ACCURATE_LIMIT_BYTES: usize = 4 * 1024 * 1024;

/// Fast token estimation using heuristic (~4 chars per token for JSON)
/// Use this for filtering/selection where speed matters more than precision
pub fn estimate_tokens(text: &str) -> usize {
    let char_estimate = text.len() / 4;

    // Also consider whitespace-delimited words as a floor
    let word_estimate = text.split_whitespace().count();

    char_estimate.max(word_estimate)
}

/// Accurate token count using tiktoken (slower but precise)
pub fn count_tokens(text: &str) -> Result<usize> {
    let bpe = cl100k_base()?;
    let tokens = bpe.encode_with_special_tokens(text);
    Ok(tokens.len())
}

/// Smart token counting: estimate for speed, accurate when needed
pub fn count_tokens_smart(text: &str, need_accuracy: bool) -> usize {
    if need_accuracy {
        count_tokens(text).unwrap_or_else(|_| estimate_tokens(text))
    } else {
        estimate_tokens(text)
    }
}

/// Token cost of a document before and after compression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenReport {
    pub raw: usize,
    pub compact: usize,
}

impl TokenReport {
    pub fn measure(raw_json: &str, compact_json: &str) -> Self {
        Self {
            raw: count_tokens_smart(raw_json, raw_json.len() <= ACCURATE_LIMIT_BYTES),
            compact: count_tokens_smart(compact_json, true),
        }
    }

    pub fn saved(&self) -> usize {
        self.raw.saturating_sub(self.compact)
    }

    /// Fraction of raw tokens removed, in `[0, 1]`.
    pub fn savings_ratio(&self) -> f64 {
        if self.raw == 0 {
            return 0.0;
        }
        self.saved() as f64 / self.raw as f64
    }

    pub fn exceeds(&self, budget: Option<usize>) -> bool {
        budget.is_some_and(|b| self.compact > b)
    }
}

impl std::ops::AddAssign for TokenReport {
    fn add_assign(&mut self, other: Self) {
        self.raw += other.raw;
        self.compact += other.compact;
    }
}

impl std::fmt::Display for TokenReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} tokens ({:.1}% saved)",
            self.raw,
            self.compact,
            self.savings_ratio() * 100.0
        )
    }
}
