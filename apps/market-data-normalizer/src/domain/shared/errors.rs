//! Translation errors.

/// How a caller should react to a [`NormalizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The single message is rejected; processing continues with the next one.
    PerMessage,
    /// The translator met a capability it was never built for. Silently
    /// dropping would corrupt downstream aggregation, so the process should stop.
    DesignTime,
}

impl ErrorCategory {
    /// Get the category name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PerMessage => "per_message",
            Self::DesignTime => "design_time",
        }
    }
}

/// Failure to translate one wire message into a canonical record.
///
/// A translator either returns a fully built record or one of these.
/// Partially constructed output is never produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// A required wire key is absent.
    #[error("missing required field `{field}` in {message} message")]
    MissingField {
        /// Wire message kind (e.g. "trade").
        message: &'static str,
        /// Wire key or positional index.
        field: String,
    },

    /// A price, size or volume literal cannot be represented exactly.
    #[error("invalid numeric literal {literal:?}: {reason}")]
    InvalidNumericLiteral {
        /// The literal as received.
        literal: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A time field is outside the accepted range.
    #[error("invalid timestamp {value}: {reason}")]
    InvalidTimestamp {
        /// The millisecond value as received.
        value: i64,
        /// Why it was rejected.
        reason: String,
    },

    /// The bid/ask level structure of a depth update has the wrong shape.
    #[error("malformed depth message: {0}")]
    MalformedDepthMessage(String),

    /// An interval code has no positive leading step.
    #[error("invalid interval code {interval:?}: {reason}")]
    InvalidIntervalCode {
        /// The interval code as received.
        interval: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An interval code uses a time unit this layer does not recognise.
    #[error("unsupported aggregation unit {unit:?} in interval code {interval:?}")]
    UnsupportedAggregationUnit {
        /// The interval code as received.
        interval: String,
        /// The trailing unit code.
        unit: String,
    },

    /// A present key carries a value of the wrong JSON type.
    #[error("{message} message has a field of the wrong type: {reason}")]
    InvalidFieldType {
        /// Wire message kind.
        message: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },
}

impl NormalizeError {
    /// Shorthand for a [`NormalizeError::MissingField`].
    #[must_use]
    pub fn missing(message: &'static str, field: impl Into<String>) -> Self {
        Self::MissingField {
            message,
            field: field.into(),
        }
    }

    /// Shorthand for a [`NormalizeError::MalformedDepthMessage`].
    #[must_use]
    pub fn malformed_depth(reason: impl Into<String>) -> Self {
        Self::MalformedDepthMessage(reason.into())
    }

    /// Classify this error for the caller's drop-or-crash decision.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedAggregationUnit { .. } => ErrorCategory::DesignTime,
            Self::MissingField { .. }
            | Self::InvalidNumericLiteral { .. }
            | Self::InvalidTimestamp { .. }
            | Self::MalformedDepthMessage(_)
            | Self::InvalidIntervalCode { .. }
            | Self::InvalidFieldType { .. } => ErrorCategory::PerMessage,
        }
    }

    /// Returns true if the process should stop rather than drop the message.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.category(), ErrorCategory::DesignTime)
    }
}
