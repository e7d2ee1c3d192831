//! optimization::errors — error surface for bounded black-box search.
//!
//! Configuration problems (malformed bounds) are the only failures the
//! search layer reports. A search that exhausts its generation budget
//! without converging is *not* an error: the best candidate found so far
//! is always returned.

pub type SearchResult<T> = Result<T, SearchError>;

/// SearchError — invalid search-space configuration.
///
/// Variants
/// --------
/// - `EmptyBounds`
///   A search space needs at least one tunable dimension.
/// - `NonFiniteBound { index, value }`
///   A bound endpoint is NaN or ±∞.
/// - `InvertedBound { index, min, max }`
///   A pair violates `min ≤ max`.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    EmptyBounds,
    NonFiniteBound { index: usize, value: f64 },
    InvertedBound { index: usize, min: f64, max: f64 },
}

impl std::error::Error for SearchError {}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::EmptyBounds => {
                write!(f, "Search space must have at least one dimension.")
            }
            SearchError::NonFiniteBound { index, value } => {
                write!(
                    f,
                    "Bound endpoint at dimension {index} is {value}. Must be finite."
                )
            }
            SearchError::InvertedBound { index, min, max } => {
                write!(
                    f,
                    "Bounds at dimension {index} are inverted: min = {min} > max = {max}."
                )
            }
        }
    }
}
