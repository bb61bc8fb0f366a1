mod json_catalog;
mod matching;
mod sample_catalog;

pub use json_catalog::JsonCatalog;
pub use matching::{
    record_matches,
    select_records,
    ANY_OPTION,
};
pub use sample_catalog::SampleCatalog;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    category::CategoryId,
    core::{
        Record,
        SearchCriteria,
    },
};

/// Produces the records for a search.
///
/// Implementations must return the same records for the same criteria and
/// category. A search with no hits, or a backend that cannot be reached,
/// yields an empty vec; failures are logged, never returned.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, criteria: &SearchCriteria, category: CategoryId) -> Vec<Record>;
}

/// How a catalog applies search criteria to its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Every record of the category, criteria ignored.
    ReturnAll,
    /// Only records satisfying every criterion.
    #[default]
    Filter,
}

impl MatchMode {
    pub fn label(self) -> &'static str {
        match self {
            MatchMode::ReturnAll => "Show all records",
            MatchMode::Filter => "Filter by form",
        }
    }
}
