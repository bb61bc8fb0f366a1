use super::MatchMode;
use crate::core::{
    FieldValue,
    Record,
    SearchCriteria,
};

/// Choice option that matches every record.
pub const ANY_OPTION: &str = "Any";

const TRUTHY: [&str; 4] = ["yes", "true", "1", "y"];

/// Criteria naming an attribute the record does not have are skipped.
pub fn record_matches(record: &Record, criteria: &SearchCriteria) -> bool {
    criteria.iter().all(|(name, value)| match record.get(name) {
        None => true,
        Some(attribute) => value_matches(attribute, value),
    })
}

fn value_matches(attribute: &str, value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(query) => {
            let query = query.trim();
            query.is_empty() || attribute.to_lowercase().contains(&query.to_lowercase())
        }
        FieldValue::Selected(option) => {
            option == ANY_OPTION || attribute.trim().eq_ignore_ascii_case(option.trim())
        }
        FieldValue::Toggle(required) => {
            !required || TRUTHY.iter().any(|t| attribute.trim().eq_ignore_ascii_case(t))
        }
    }
}

pub fn select_records(
    records: &[Record],
    criteria: &SearchCriteria,
    mode: MatchMode,
) -> Vec<Record> {
    match mode {
        MatchMode::ReturnAll => records.to_vec(),
        MatchMode::Filter => {
            records.iter().filter(|record| record_matches(record, criteria)).cloned().collect()
        }
    }
}
