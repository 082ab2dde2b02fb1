//! Parser limits.
//!
//! The defaults suit interactive and test use. Callers that feed
//! untrusted text should lower `max_depth` and bound the input size
//! themselves; the parser does not limit how much it reads.

use serde::{Deserialize, Serialize};

/// Largest modulus handled with word-sized arithmetic (2^31 - 1).
pub const DEFAULT_WORD_MODULUS_LIMIT: u64 = 2_147_483_647;

/// Deepest nesting of parentheses or braces accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum nesting of parenthesised sub-expressions and forced
    /// coefficient braces.
    pub max_depth: usize,
    /// Moduli strictly below this value select word-sized modular
    /// arithmetic; larger moduli use arbitrary precision.
    pub word_modulus_limit: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            word_modulus_limit: DEFAULT_WORD_MODULUS_LIMIT,
        }
    }
}

impl ParserConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = ParserConfig::from_json(r#"{ "max_depth": 8 }"#).unwrap();
        assert_eq!(cfg.max_depth, 8);
        assert_eq!(cfg.word_modulus_limit, DEFAULT_WORD_MODULUS_LIMIT);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ParserConfig::from_json("{}").unwrap(), ParserConfig::default());
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(ParserConfig::from_json(r#"{ "max_depth": "deep" }"#).is_err());
    }
}
