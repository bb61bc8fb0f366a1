use std::{
    collections::HashMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use tracing::warn;

use super::{
    select_records,
    MatchMode,
    QueryExecutor,
};
use crate::{
    category::CategoryId,
    core::{
        CompareError,
        Record,
        SearchCriteria,
    },
};

/// Records read from a JSON file of the form
/// `{ "<category key>": [ { "<attribute>": "<value>", ... }, ... ] }`.
///
/// The file is re-read on every search so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
    mode: MatchMode,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>, mode: MatchMode) -> Self {
        Self { path: path.into(), mode }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unknown category keys are skipped with a warning.
    pub fn load(&self) -> Result<HashMap<CategoryId, Vec<Record>>, CompareError> {
        let json = fs::read_to_string(&self.path)?;
        let raw: HashMap<String, Vec<Record>> = serde_json::from_str(&json)?;

        let mut catalog = HashMap::new();
        for (key, records) in raw {
            match key.parse::<CategoryId>() {
                Ok(id) => {
                    catalog.insert(id, records);
                }
                Err(e) => warn!(path = %self.path.display(), "Skipping catalog section: {e}"),
            }
        }
        Ok(catalog)
    }
}

impl QueryExecutor for JsonCatalog {
    fn execute(&self, criteria: &SearchCriteria, category: CategoryId) -> Vec<Record> {
        match self.load() {
            Ok(catalog) => catalog
                .get(&category)
                .map(|records| select_records(records, criteria, self.mode))
                .unwrap_or_default(),
            Err(e) => {
                warn!(path = %self.path.display(), "Catalog unavailable, showing no results: {e}");
                Vec::new()
            }
        }
    }
}
