use thiserror::Error;

/// Failure kinds surfaced by catalog store operations.
///
/// Each kind stays distinguishable so the caller decides whether to degrade
/// (e.g. render an empty page when the store is unreachable) or to surface it.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    #[error("catalog query failed: {0}")]
    QueryExecution(#[source] sqlx::Error),

    #[error("failed to decode column `{column}`: {reason}")]
    Decode { column: &'static str, reason: String },

    #[error("unparseable catalog timestamp {raw:?}")]
    TimestampParse { raw: String },
}

impl CatalogError {
    pub(crate) fn decode(column: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            column,
            reason: reason.to_string(),
        }
    }

    /// Stable, machine-readable code used in API error payloads and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::QueryExecution(_) => "query_execution_failure",
            Self::Decode { .. } => "decode_failure",
            Self::TimestampParse { .. } => "timestamp_parse_failure",
        }
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
