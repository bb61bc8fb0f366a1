use std::collections::HashMap;

use tracing::error;

use super::CategoryId;
use crate::{
    core::{
        FieldValue,
        SchemaError,
    },
    query::ANY_OPTION,
    schema::{
        FieldDescriptor,
        FieldSchema,
        HeaderSchema,
    },
};

/// The static form and pinned columns of one category.
#[derive(Debug, Clone)]
pub struct CategoryDefinition {
    pub id: CategoryId,
    pub field_schema: FieldSchema,
    pub header_schema: HeaderSchema,
}

impl CategoryDefinition {
    pub fn new(
        id: CategoryId,
        fields: Vec<FieldDescriptor>,
        headers: &[&str],
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            id,
            field_schema: FieldSchema::new(fields)?,
            header_schema: HeaderSchema::new(headers.iter().copied())?,
        })
    }
}

/// Every category the app knows about. A category whose schemas did not
/// validate is kept out of `definitions` and remembered in `refused`.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    definitions: HashMap<CategoryId, CategoryDefinition>,
    refused: Vec<(CategoryId, SchemaError)>,
}

impl CategoryRegistry {
    pub fn from_results(
        results: impl IntoIterator<Item = (CategoryId, Result<CategoryDefinition, SchemaError>)>,
    ) -> Self {
        let mut registry = CategoryRegistry::default();
        for (id, result) in results {
            match result {
                Ok(definition) => {
                    registry.definitions.insert(id, definition);
                }
                Err(e) => {
                    error!(category = id.key(), "Refusing category with invalid schema: {e}");
                    registry.refused.push((id, e));
                }
            }
        }
        registry
    }

    pub fn builtin() -> Self {
        Self::from_results(
            CategoryId::ALL.into_iter().map(|id| (id, builtin_definition(id))),
        )
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryDefinition> {
        self.definitions.get(&id)
    }

    pub fn refusal(&self, id: CategoryId) -> Option<&SchemaError> {
        self.refused.iter().find(|(refused, _)| *refused == id).map(|(_, e)| e)
    }

    pub fn refused(&self) -> &[(CategoryId, SchemaError)] {
        &self.refused
    }

    /// Startable categories in menu order.
    pub fn available(&self) -> Vec<CategoryId> {
        CategoryId::ALL.into_iter().filter(|id| self.definitions.contains_key(id)).collect()
    }
}

fn builtin_definition(id: CategoryId) -> Result<CategoryDefinition, SchemaError> {
    match id {
        CategoryId::ByName => CategoryDefinition::new(
            id,
            vec![
                FieldDescriptor::text("Model"),
                FieldDescriptor::choice("Manufacturer", [ANY_OPTION, "Intel", "AMD"]),
                FieldDescriptor::toggle("Integrated Graphics"),
            ],
            &["Model", "Manufacturer", "Cores"],
        ),
        CategoryId::BySpecification => CategoryDefinition::new(
            id,
            vec![
                FieldDescriptor::choice("Cores", [ANY_OPTION, "6", "8", "12", "16", "24"]),
                FieldDescriptor::exclusive_choice("Socket", [ANY_OPTION, "LGA1700", "AM5", "AM4"])
                    .with_default(FieldValue::Selected(ANY_OPTION.to_string())),
                FieldDescriptor::text("Architecture"),
                FieldDescriptor::toggle("Unlocked"),
            ],
            &["Model", "Cores", "Threads", "Base Clock", "Boost Clock", "TDP"],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    #[test]
    fn builtin_categories_all_start() {
        let registry = CategoryRegistry::builtin();
        assert!(registry.refused().is_empty());
        assert_eq!(registry.available(), CategoryId::ALL.to_vec());
    }

    #[test]
    fn broken_category_is_refused_alone() {
        let broken = CategoryDefinition::new(
            CategoryId::BySpecification,
            vec![FieldDescriptor::new("Socket", FieldKind::ExclusiveChoice)],
            &["Model"],
        );
        let registry = CategoryRegistry::from_results([
            (CategoryId::ByName, builtin_definition(CategoryId::ByName)),
            (CategoryId::BySpecification, broken),
        ]);

        assert_eq!(registry.available(), vec![CategoryId::ByName]);
        assert_eq!(
            registry.refusal(CategoryId::BySpecification),
            Some(&SchemaError::MissingOptions("Socket".into()))
        );
    }
}
