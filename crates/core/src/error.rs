use serde::Serialize;

/// A parse failure. Every variant aborts the enclosing top-level call.
///
/// `line` is the 1-based line of the character source the scanner was on
/// when the failure was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    /// Structural problem in the token stream: unbalanced braces, an
    /// unterminated forced coefficient, a bad exponent or nesting that is
    /// too deep.
    #[error("line {line}: malformed expression: {message}")]
    MalformedExpression { line: u32, message: String },

    /// A symbol that is neither a declared variable nor a literal of the
    /// active coefficient ring.
    #[error("line {line}: unknown variable or literal '{symbol}': {reason}")]
    UnknownLiteral {
        line: u32,
        symbol: String,
        reason: String,
    },

    /// An unsupported or incomplete coefficient ring, variable list or
    /// term order.
    #[error("line {line}: invalid ring descriptor: {message}")]
    InvalidRingDescriptor { line: u32, message: String },

    /// The active coefficient ring rejected a numeral or forced coefficient.
    #[error("line {line}: not a number '{literal}': {reason}")]
    LiteralParseFailure {
        line: u32,
        literal: String,
        reason: String,
    },

    /// The underlying reader failed.
    #[error("read failure on line {line}: {message}")]
    StreamFailure { line: u32, message: String },
}

impl ParseError {
    pub fn malformed(line: u32, message: impl Into<String>) -> Self {
        ParseError::MalformedExpression {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_ring(line: u32, message: impl Into<String>) -> Self {
        ParseError::InvalidRingDescriptor {
            line,
            message: message.into(),
        }
    }

    pub fn stream(line: u32, err: &std::io::Error) -> Self {
        ParseError::StreamFailure {
            line,
            message: err.to_string(),
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            ParseError::MalformedExpression { line, .. }
            | ParseError::UnknownLiteral { line, .. }
            | ParseError::InvalidRingDescriptor { line, .. }
            | ParseError::LiteralParseFailure { line, .. }
            | ParseError::StreamFailure { line, .. } => *line,
        }
    }

    /// Serialize to a JSON object with a `kind` discriminator and the
    /// variant's fields.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
