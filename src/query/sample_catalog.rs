use std::collections::HashMap;

use super::{
    select_records,
    MatchMode,
    QueryExecutor,
};
use crate::{
    category::CategoryId,
    core::{
        Record,
        SearchCriteria,
    },
};

// Model, Manufacturer, Cores, Threads, Base Clock, Boost Clock, TDP, Socket,
// Architecture, Unlocked, Integrated Graphics
#[rustfmt::skip]
const SAMPLE_CPUS: &[[&str; 11]] = &[
    ["Core i9-13900K", "Intel", "24", "32", "3.0GHz", "5.8GHz", "125W", "LGA1700", "Raptor Lake", "Yes", "Yes"],
    ["Core i7-13700K", "Intel", "16", "24", "3.4GHz", "5.4GHz", "125W", "LGA1700", "Raptor Lake", "Yes", "Yes"],
    ["Core i5-13400F", "Intel", "10", "16", "2.5GHz", "4.6GHz", "65W", "LGA1700", "Raptor Lake", "No", "No"],
    ["Ryzen 9 7950X", "AMD", "16", "32", "4.5GHz", "5.7GHz", "170W", "AM5", "Zen 4", "Yes", "Yes"],
    ["Ryzen 7 7800X3D", "AMD", "8", "16", "4.2GHz", "5.0GHz", "120W", "AM5", "Zen 4", "Yes", "Yes"],
    ["Ryzen 5 5600X", "AMD", "6", "12", "3.7GHz", "4.6GHz", "65W", "AM4", "Zen 3", "Yes", "No"],
];

const SAMPLE_COLUMNS: [&str; 11] = [
    "Model",
    "Manufacturer",
    "Cores",
    "Threads",
    "Base Clock",
    "Boost Clock",
    "TDP",
    "Socket",
    "Architecture",
    "Unlocked",
    "Integrated Graphics",
];

/// Built-in sample records. Both CPU categories search the same parts.
pub struct SampleCatalog {
    mode: MatchMode,
    records: HashMap<CategoryId, Vec<Record>>,
}

impl SampleCatalog {
    pub fn builtin(mode: MatchMode) -> Self {
        let cpus: Vec<Record> = SAMPLE_CPUS
            .iter()
            .map(|row| SAMPLE_COLUMNS.iter().copied().zip(row.iter().copied()).collect())
            .collect();

        let records = CategoryId::ALL.into_iter().map(|id| (id, cpus.clone())).collect();
        Self { mode, records }
    }

    pub fn with_records(mode: MatchMode, records: HashMap<CategoryId, Vec<Record>>) -> Self {
        Self { mode, records }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}

impl QueryExecutor for SampleCatalog {
    fn execute(&self, criteria: &SearchCriteria, category: CategoryId) -> Vec<Record> {
        self.records
            .get(&category)
            .map(|records| select_records(records, criteria, self.mode))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::FieldValue,
        query::ANY_OPTION,
    };

    fn amd_unlocked() -> SearchCriteria {
        vec![
            ("Model", FieldValue::Text(String::new())),
            ("Manufacturer", FieldValue::Selected("AMD".into())),
            ("Integrated Graphics", FieldValue::Toggle(true)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn return_all_yields_full_sample_set() {
        let catalog = SampleCatalog::builtin(MatchMode::ReturnAll);
        let records = catalog.execute(&amd_unlocked(), CategoryId::ByName);
        assert_eq!(records.len(), SAMPLE_CPUS.len());
    }

    #[test]
    fn filter_narrows_and_is_repeatable() {
        let catalog = SampleCatalog::builtin(MatchMode::Filter);

        let first = catalog.execute(&amd_unlocked(), CategoryId::ByName);
        let second = catalog.execute(&amd_unlocked(), CategoryId::ByName);
        assert_eq!(first, second);

        let models: Vec<&str> = first.iter().filter_map(|r| r.get("Model")).collect();
        assert_eq!(models, vec!["Ryzen 9 7950X", "Ryzen 7 7800X3D"]);
    }

    #[test]
    fn no_match_is_empty() {
        let catalog = SampleCatalog::builtin(MatchMode::Filter);
        let criteria: SearchCriteria = vec![
            ("Cores", FieldValue::Selected("24".into())),
            ("Socket", FieldValue::Selected("AM5".into())),
            ("Architecture", FieldValue::Text(String::new())),
            ("Unlocked", FieldValue::Toggle(false)),
        ]
        .into_iter()
        .collect();

        assert!(catalog.execute(&criteria, CategoryId::BySpecification).is_empty());

        let any: SearchCriteria =
            vec![("Cores", FieldValue::Selected(ANY_OPTION.into()))].into_iter().collect();
        assert_eq!(catalog.execute(&any, CategoryId::BySpecification).len(), SAMPLE_CPUS.len());
    }

    #[test]
    fn unknown_category_data_is_empty() {
        let catalog = SampleCatalog::with_records(MatchMode::ReturnAll, HashMap::new());
        assert!(catalog.execute(&SearchCriteria::new(), CategoryId::ByName).is_empty());
    }
}
