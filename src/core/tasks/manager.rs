use std::{
    path::PathBuf,
    sync::{
        mpsc,
        Arc,
    },
};

use tokio::runtime::Runtime;
use tracing::debug;

use super::TaskResult;
use crate::{
    category::PendingSearch,
    core::CompareError,
    query::{
        JsonCatalog,
        MatchMode,
    },
};

/// Runs slow work off the UI thread. Results come back through a channel
/// that the UI drains once per frame with `poll_results`.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Result<Self, CompareError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            debug!(task = result.task_type(), "Task finished");
            results.push(result);
        }

        results
    }

    pub fn run_search(&self, search: PendingSearch) {
        let sender = self.sender.clone();

        self.runtime.spawn_blocking(move || {
            let outcome = search.run();
            let _ = sender.send(TaskResult::SearchCompleted(outcome));
        });
    }

    pub fn check_catalog(&self, path: PathBuf, mode: MatchMode) {
        let sender = self.sender.clone();

        self.runtime.spawn_blocking(move || {
            let result: Result<usize, String> = JsonCatalog::new(path.clone(), mode)
                .load()
                .map(|catalog| catalog.values().map(Vec::len).sum())
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::CatalogChecked { path, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{
        thread,
        time::{
            Duration,
            Instant,
        },
    };

    use tempfile::TempDir;

    use super::*;
    use crate::{
        category::{
            CategoryController,
            CategoryId,
            CategoryRegistry,
        },
        logging::init_test_logging,
        query::SampleCatalog,
    };

    fn wait_for_results(manager: &mut TaskManager, count: usize) -> Vec<TaskResult> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(manager.poll_results());
            thread::sleep(Duration::from_millis(5));
        }
        results
    }

    #[test]
    fn search_result_comes_back_through_the_channel() {
        init_test_logging();
        let mut manager = TaskManager::new().unwrap();
        let mut controller = CategoryController::start(
            CategoryRegistry::builtin(),
            Arc::new(SampleCatalog::builtin(MatchMode::ReturnAll)),
            CategoryId::ByName,
        )
        .unwrap();

        manager.run_search(controller.begin_search());

        let results = wait_for_results(&mut manager, 1);
        let [TaskResult::SearchCompleted(outcome)] = results.as_slice() else {
            panic!("Expected one search result, got {:?}", results);
        };
        assert!(controller.complete_search(outcome.clone()));
        assert_eq!(controller.comparison().len(), outcome.records.len());
        assert!(!controller.comparison().is_empty());
    }

    #[test]
    fn catalog_check_reports_counts_and_failures() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{"cpu_by_name": [{"Model": "A"}, {"Model": "B"}]}"#).unwrap();
        let bad = dir.path().join("bad.json");

        let mut manager = TaskManager::new().unwrap();
        manager.check_catalog(good.clone(), MatchMode::Filter);
        manager.check_catalog(bad.clone(), MatchMode::Filter);

        let results = wait_for_results(&mut manager, 2);
        assert_eq!(results.len(), 2);
        for result in results {
            match result {
                TaskResult::CatalogChecked { path, result } if path == good => {
                    assert_eq!(result, Ok(2))
                }
                TaskResult::CatalogChecked { path, result } if path == bad => {
                    assert!(result.is_err())
                }
                other => panic!("Unexpected task result {:?}", other),
            }
        }
    }
}
