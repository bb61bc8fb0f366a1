use std::sync::Arc;

use tracing::{
    debug,
    info,
    warn,
};
use uuid::Uuid;

use super::{
    CategoryId,
    CategoryRegistry,
};
use crate::{
    comparison::ComparisonList,
    core::{
        CompareError,
        Record,
        SearchCriteria,
    },
    form::{
        FormHandle,
        FormRenderer,
    },
    query::QueryExecutor,
    schema::{
        FieldSchema,
        HeaderSchema,
    },
};

/// A search that has been read from the form but not run yet. It carries
/// everything the query needs so it can be moved to a worker.
pub struct PendingSearch {
    pub controller: Uuid,
    pub generation: u64,
    pub category: CategoryId,
    pub criteria: SearchCriteria,
    executor: Arc<dyn QueryExecutor>,
}

impl PendingSearch {
    pub fn run(self) -> SearchOutcome {
        let records = self.executor.execute(&self.criteria, self.category);
        SearchOutcome {
            controller: self.controller,
            generation: self.generation,
            category: self.category,
            records,
        }
    }
}

impl std::fmt::Debug for PendingSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSearch")
            .field("controller", &self.controller)
            .field("generation", &self.generation)
            .field("category", &self.category)
            .field("criteria", &self.criteria)
            .field("executor", &"Arc<dyn QueryExecutor>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub controller: Uuid,
    pub generation: u64,
    pub category: CategoryId,
    pub records: Vec<Record>,
}

struct ActiveCategory {
    id: CategoryId,
    field_schema: FieldSchema,
    form: FormHandle,
    comparison: ComparisonList,
}

/// Owns the active category's form, pinned columns and comparison list.
///
/// Every submission and every category switch bumps `generation`; an async
/// result is only committed when it carries this controller's `id` and the
/// latest generation.
pub struct CategoryController {
    id: Uuid,
    registry: CategoryRegistry,
    executor: Arc<dyn QueryExecutor>,
    active: ActiveCategory,
    generation: u64,
    pending: Option<u64>,
}

impl CategoryController {
    /// Starts on `preferred`, or on the first category that can start if
    /// `preferred` was refused.
    pub fn start(
        registry: CategoryRegistry,
        executor: Arc<dyn QueryExecutor>,
        preferred: CategoryId,
    ) -> Result<Self, CompareError> {
        let first = std::iter::once(preferred)
            .chain(registry.available())
            .find(|id| registry.get(*id).is_some())
            .ok_or_else(|| CompareError::Custom("no category could be started".to_string()))?;

        if first != preferred {
            warn!("Category '{}' is unavailable, starting with '{}'", preferred.key(), first.key());
        }

        let active = Self::activate(&registry, first)?;
        info!(category = first.key(), "Category controller started");

        Ok(Self { id: Uuid::new_v4(), registry, executor, active, generation: 0, pending: None })
    }

    fn activate(
        registry: &CategoryRegistry,
        id: CategoryId,
    ) -> Result<ActiveCategory, CompareError> {
        let Some(definition) = registry.get(id) else {
            return Err(match registry.refusal(id) {
                Some(e) => CompareError::Schema(e.clone()),
                None => CompareError::UnknownCategory(id.key().to_string()),
            });
        };

        Ok(ActiveCategory {
            id,
            field_schema: definition.field_schema.clone(),
            form: FormRenderer::render(&definition.field_schema),
            comparison: ComparisonList::new(definition.header_schema.clone()),
        })
    }

    /// Swaps in the category's form and pinned columns and empties the
    /// comparison list. Any search still in flight becomes stale.
    pub fn select_category(&mut self, id: CategoryId) -> Result<(), CompareError> {
        self.active = Self::activate(&self.registry, id)?;
        self.invalidate_pending();
        info!(category = id.key(), "Selected category");
        Ok(())
    }

    pub fn select_category_by_key(&mut self, key: &str) -> Result<(), CompareError> {
        self.select_category(key.parse()?)
    }

    /// Runs the query on the calling thread and replaces the comparison list
    /// with the result. Returns the number of records shown.
    pub fn submit_search(&mut self) -> usize {
        let outcome = self.begin_search().run();
        self.complete_search(outcome);
        self.active.comparison.len()
    }

    pub fn begin_search(&mut self) -> PendingSearch {
        self.generation += 1;
        self.pending = Some(self.generation);

        let criteria = self.active.form.current_values();
        debug!(
            generation = self.generation,
            category = self.active.id.key(),
            ?criteria,
            "Search submitted"
        );

        PendingSearch {
            controller: self.id,
            generation: self.generation,
            category: self.active.id,
            criteria,
            executor: Arc::clone(&self.executor),
        }
    }

    /// Commits `outcome` unless it was started by another controller, or a
    /// newer search or a category switch happened after it was started.
    /// Returns whether it was committed.
    pub fn complete_search(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.controller != self.id {
            warn!(
                generation = outcome.generation,
                "Dropping search result from a previous session ({} records)",
                outcome.records.len()
            );
            return false;
        }
        if outcome.generation != self.generation || outcome.category != self.active.id {
            warn!(
                generation = outcome.generation,
                latest = self.generation,
                "Dropping stale search result ({} records)",
                outcome.records.len()
            );
            return false;
        }

        self.pending = None;
        info!(
            category = outcome.category.key(),
            "Search returned {} records",
            outcome.records.len()
        );
        self.active.comparison.replace_all(outcome.records);
        true
    }

    pub fn is_search_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remove_record(&mut self, index: usize) {
        self.active.comparison.remove(index);
    }

    pub fn reset_form(&mut self) {
        self.active.form.reset_to_defaults();
    }

    /// Replaces the query backend. In-flight searches against the old one are
    /// dropped when they come back.
    pub fn set_executor(&mut self, executor: Arc<dyn QueryExecutor>) {
        self.executor = executor;
        self.invalidate_pending();
    }

    fn invalidate_pending(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn active_category(&self) -> CategoryId {
        self.active.id
    }

    pub fn field_schema(&self) -> &FieldSchema {
        &self.active.field_schema
    }

    pub fn header_schema(&self) -> &HeaderSchema {
        self.active.comparison.header()
    }

    pub fn form(&self) -> &FormHandle {
        &self.active.form
    }

    pub fn form_mut(&mut self) -> &mut FormHandle {
        &mut self.active.form
    }

    pub fn comparison(&self) -> &ComparisonList {
        &self.active.comparison
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        category::CategoryDefinition,
        core::FieldValue,
        schema::FieldDescriptor,
    };

    /// Returns canned records and remembers the criteria it was called with.
    #[derive(Default)]
    struct ScriptedExecutor {
        responses: Mutex<Vec<Vec<Record>>>,
        calls: Mutex<Vec<(SearchCriteria, CategoryId)>>,
    }

    impl ScriptedExecutor {
        fn with_responses(responses: Vec<Vec<Record>>) -> Arc<Self> {
            Arc::new(Self { responses: Mutex::new(responses), calls: Mutex::default() })
        }
    }

    impl QueryExecutor for ScriptedExecutor {
        fn execute(&self, criteria: &SearchCriteria, category: CategoryId) -> Vec<Record> {
            self.calls.lock().unwrap().push((criteria.clone(), category));
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Vec::new()
            } else {
                responses.remove(0)
            }
        }
    }

    fn i9() -> Record {
        Record::new()
            .with("Model", "i9-13900K")
            .with("Manufacturer", "Intel")
            .with("Cores", "24")
            .with("Clock", "5.8GHz")
    }

    fn ryzen(model: &str) -> Record {
        Record::new().with("Model", model).with("Manufacturer", "AMD").with("Cores", "8")
    }

    fn scenario_registry() -> CategoryRegistry {
        CategoryRegistry::from_results([
            (
                CategoryId::ByName,
                CategoryDefinition::new(
                    CategoryId::ByName,
                    vec![FieldDescriptor::text("Model")],
                    &["Model", "Manufacturer", "Cores"],
                ),
            ),
            (
                CategoryId::BySpecification,
                CategoryDefinition::new(
                    CategoryId::BySpecification,
                    vec![FieldDescriptor::choice("Cores", ["Any", "8", "24"])],
                    &["Model", "Cores", "TDP"],
                ),
            ),
        ])
    }

    #[test]
    fn submit_search_fills_comparison_list() {
        let executor = ScriptedExecutor::with_responses(vec![vec![i9()]]);
        let mut controller =
            CategoryController::start(scenario_registry(), executor.clone(), CategoryId::ByName)
                .unwrap();

        assert_eq!(controller.submit_search(), 1);

        let comparison = controller.comparison();
        let partition = comparison.attributes_for(&comparison.entries()[0]);
        let pinned: Vec<(&str, &str)> =
            partition.pinned.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pinned,
            vec![("Model", "i9-13900K"), ("Manufacturer", "Intel"), ("Cores", "24")]
        );
        assert_eq!(partition.extra, vec![("Clock".to_string(), "5.8GHz".to_string())]);

        let calls = executor.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, CategoryId::ByName);
        assert_eq!(calls[0].0.get("Model"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn second_search_replaces_first() {
        let executor = ScriptedExecutor::with_responses(vec![
            vec![ryzen("7700X"), ryzen("7800X3D"), ryzen("7950X")],
            vec![i9()],
        ]);
        let mut controller =
            CategoryController::start(scenario_registry(), executor, CategoryId::ByName).unwrap();

        controller.form_mut().set_text("Model", "Ryzen").unwrap();
        assert_eq!(controller.submit_search(), 3);

        controller.form_mut().set_text("Model", "i9").unwrap();
        assert_eq!(controller.submit_search(), 1);
        assert_eq!(controller.comparison().entries(), &[i9()]);
    }

    #[test]
    fn switching_category_resets_everything() {
        let executor = ScriptedExecutor::with_responses(vec![vec![i9(), ryzen("7700X")]]);
        let mut controller =
            CategoryController::start(scenario_registry(), executor, CategoryId::ByName).unwrap();
        controller.form_mut().set_text("Model", "i9").unwrap();
        controller.submit_search();
        assert_eq!(controller.comparison().len(), 2);

        controller.select_category(CategoryId::BySpecification).unwrap();

        assert_eq!(controller.active_category(), CategoryId::BySpecification);
        assert!(controller.comparison().is_empty());
        assert_eq!(controller.header_schema().names(), &["Model", "Cores", "TDP"]);
        let fields: Vec<&str> = controller.field_schema().names().collect();
        assert_eq!(fields, vec!["Cores"]);
        assert_eq!(
            controller.form().current_values().get("Cores"),
            Some(&FieldValue::Selected("Any".into()))
        );
    }

    #[test]
    fn unknown_category_key_is_an_error() {
        let executor = ScriptedExecutor::with_responses(Vec::new());
        let mut controller =
            CategoryController::start(scenario_registry(), executor, CategoryId::ByName).unwrap();

        let result = controller.select_category_by_key("gpu_by_name");
        assert!(matches!(result, Err(CompareError::UnknownCategory(_))));
        assert_eq!(controller.active_category(), CategoryId::ByName);
    }

    #[test]
    fn refused_category_cannot_be_selected() {
        let registry = CategoryRegistry::from_results([
            (
                CategoryId::ByName,
                CategoryDefinition::new(
                    CategoryId::ByName,
                    vec![FieldDescriptor::text("Model")],
                    &["Model"],
                ),
            ),
            (
                CategoryId::BySpecification,
                CategoryDefinition::new(CategoryId::BySpecification, vec![], &["Model", "Model"]),
            ),
        ]);
        let executor = ScriptedExecutor::with_responses(Vec::new());

        let mut controller =
            CategoryController::start(registry, executor, CategoryId::BySpecification).unwrap();
        assert_eq!(controller.active_category(), CategoryId::ByName);

        let result = controller.select_category(CategoryId::BySpecification);
        assert!(matches!(result, Err(CompareError::Schema(_))));
    }

    #[test]
    fn only_latest_async_search_is_committed() {
        let executor = ScriptedExecutor::with_responses(vec![
            vec![ryzen("7700X")],
            vec![i9(), ryzen("7950X")],
        ]);
        let mut controller =
            CategoryController::start(scenario_registry(), executor, CategoryId::ByName).unwrap();

        let slow = controller.begin_search();
        let fast = controller.begin_search();
        assert!(controller.is_search_pending());

        let slow_outcome = slow.run();
        let fast_outcome = fast.run();

        assert!(controller.complete_search(fast_outcome));
        assert!(!controller.complete_search(slow_outcome));
        assert_eq!(controller.comparison().len(), 2);
        assert!(!controller.is_search_pending());
    }

    #[test]
    fn category_switch_drops_in_flight_search() {
        let executor = ScriptedExecutor::with_responses(vec![vec![i9()]]);
        let mut controller =
            CategoryController::start(scenario_registry(), executor, CategoryId::ByName).unwrap();

        let pending = controller.begin_search();
        controller.select_category(CategoryId::BySpecification).unwrap();
        controller.select_category(CategoryId::ByName).unwrap();

        assert!(!controller.complete_search(pending.run()));
        assert!(controller.comparison().is_empty());
        assert!(!controller.is_search_pending());
    }

    #[test]
    fn search_from_previous_controller_is_dropped() {
        let old_executor = ScriptedExecutor::with_responses(vec![vec![
            ryzen("7700X"),
            ryzen("7800X3D"),
            ryzen("7950X"),
        ]]);
        let mut old =
            CategoryController::start(scenario_registry(), old_executor, CategoryId::ByName)
                .unwrap();
        let old_outcome = old.begin_search().run();
        drop(old);

        let executor = ScriptedExecutor::with_responses(vec![vec![i9()]]);
        let mut controller =
            CategoryController::start(scenario_registry(), executor, CategoryId::ByName).unwrap();
        let outcome = controller.begin_search().run();
        assert_eq!(outcome.generation, old_outcome.generation);
        assert_eq!(outcome.category, old_outcome.category);

        assert!(controller.complete_search(outcome));
        assert!(!controller.complete_search(old_outcome));
        assert_eq!(controller.comparison().entries(), &[i9()]);
    }

    #[test]
    fn search_from_previous_controller_does_not_clear_pending() {
        let mut old = CategoryController::start(
            scenario_registry(),
            ScriptedExecutor::with_responses(vec![vec![ryzen("7700X")]]),
            CategoryId::ByName,
        )
        .unwrap();
        let old_outcome = old.begin_search().run();

        let mut controller = CategoryController::start(
            scenario_registry(),
            ScriptedExecutor::with_responses(Vec::new()),
            CategoryId::ByName,
        )
        .unwrap();
        let _pending = controller.begin_search();

        assert!(!controller.complete_search(old_outcome));
        assert!(controller.is_search_pending());
        assert!(controller.comparison().is_empty());
    }

    #[test]
    fn remove_record_ignores_bad_index() {
        let executor = ScriptedExecutor::with_responses(vec![vec![i9(), ryzen("7700X")]]);
        let mut controller =
            CategoryController::start(scenario_registry(), executor, CategoryId::ByName).unwrap();
        controller.submit_search();

        controller.remove_record(5);
        assert_eq!(controller.comparison().len(), 2);

        controller.remove_record(0);
        assert_eq!(controller.comparison().entries(), &[ryzen("7700X")]);
    }
}
