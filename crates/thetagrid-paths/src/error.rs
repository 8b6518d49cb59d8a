use thiserror::Error;

use crate::queue::EmptyQueueError;

/// Errors raised by [`PathFinder::find_path`](crate::PathFinder::find_path).
///
/// Not finding a path is not an error: it yields an empty [`Path`](crate::Path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The open list was dequeued while empty. Indicates a bug in the search loop.
    #[error(transparent)]
    EmptyQueue(#[from] EmptyQueueError),

    /// The configured expansion budget ran out before the start was reached.
    #[error("search budget exhausted after expanding {expanded} vertices")]
    BudgetExhausted { expanded: usize },
}

pub type SearchResult<T> = Result<T, SearchError>;
