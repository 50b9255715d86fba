use thiserror::Error;

/// Errors surfaced to users by the search and comparison pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Could not find location for {0}")]
    LocationNotFound(String),

    #[error("School not found: {0}")]
    SchoolNotFound(u32),

    #[error("Cannot compare {requested} schools, the maximum is {max}")]
    ComparisonLimitExceeded { requested: usize, max: usize },
}

impl LookupError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::InvalidQuery(_) => "invalid_query",
            LookupError::LocationNotFound(_) => "location_not_found",
            LookupError::SchoolNotFound(_) => "school_not_found",
            LookupError::ComparisonLimitExceeded { .. } => "comparison_limit_exceeded",
        }
    }
}
