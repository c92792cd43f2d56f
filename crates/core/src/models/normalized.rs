/// Why a raw record produced no canonical record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The record kind is not one the adapter maps (e.g. not a transfer).
    UnsupportedType(String),

    /// The record kind is supported but a field could not be decoded.
    Malformed(String),
}

/// Outcome of normalizing a single raw record.
///
/// A skipped record is never an error: callers filter it out and move on.
#[derive(Clone, Debug, PartialEq)]
pub enum Normalized<T> {
    Record(T),
    Skipped(SkipReason),
}

impl<T> Normalized<T> {
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Skipped(SkipReason::UnsupportedType(kind.into()))
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Skipped(SkipReason::Malformed(detail.into()))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub fn record(self) -> Option<T> {
        match self {
            Self::Record(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Record(_) => None,
            Self::Skipped(reason) => Some(reason),
        }
    }
}
