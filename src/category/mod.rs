mod controller;
mod registry;

use std::{
    fmt,
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
};

pub use controller::{
    CategoryController,
    PendingSearch,
    SearchOutcome,
};
pub use registry::{
    CategoryDefinition,
    CategoryRegistry,
};

use crate::core::CompareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryId {
    ByName,
    BySpecification,
}

impl CategoryId {
    pub const ALL: [CategoryId; 2] = [CategoryId::ByName, CategoryId::BySpecification];

    /// Stable key used in settings and catalog files.
    pub fn key(self) -> &'static str {
        match self {
            CategoryId::ByName => "cpu_by_name",
            CategoryId::BySpecification => "cpu_by_spec",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryId::ByName => "CPU by name",
            CategoryId::BySpecification => "CPU by specification",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryId {
    type Err = CompareError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        CategoryId::ALL
            .into_iter()
            .find(|id| id.key() == key)
            .ok_or_else(|| CompareError::UnknownCategory(key.to_string()))
    }
}
