use std::path::PathBuf;

use crate::category::SearchOutcome;

#[derive(Debug, Clone)]
pub enum TaskResult {
    SearchCompleted(SearchOutcome),
    /// Total record count of a catalog file the user picked, or why it
    /// could not be read.
    CatalogChecked { path: PathBuf, result: Result<usize, String> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::SearchCompleted(_) => "search",
            TaskResult::CatalogChecked { .. } => "catalog_check",
        }
    }
}
