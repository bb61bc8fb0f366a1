use std::{
    path::PathBuf,
    sync::Arc,
};

use crate::{
    category::CategoryId,
    logging::DEFAULT_LOG_LEVEL,
    query::{
        JsonCatalog,
        MatchMode,
        QueryExecutor,
        SampleCatalog,
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub last_user: Option<String>,
    pub last_category: String,
    pub match_mode: MatchMode,
    pub catalog_path: Option<PathBuf>,
    pub dark_mode: bool,
    pub zoom: f32,
    pub log_level: String,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            last_user: None,
            last_category: CategoryId::ByName.key().to_string(),
            match_mode: MatchMode::default(),
            catalog_path: None,
            dark_mode: true,
            zoom: 1.2,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl SettingsData {
    /// The catalog the user last picked, or the built-in sample data.
    pub fn executor(&self) -> Arc<dyn QueryExecutor> {
        match &self.catalog_path {
            Some(path) => Arc::new(JsonCatalog::new(path.clone(), self.match_mode)),
            None => Arc::new(SampleCatalog::builtin(self.match_mode)),
        }
    }

    pub fn catalog_label(&self) -> String {
        self.catalog_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Sample data".to_string())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::core::SearchCriteria;
    use crate::persistence::{
        load_json_from,
        save_json_to,
    };

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{"last_user": "ada", "match_mode": "ReturnAll"}"#).unwrap();

        assert_eq!(settings.last_user.as_deref(), Some("ada"));
        assert_eq!(settings.match_mode, MatchMode::ReturnAll);
        assert_eq!(settings.last_category, "cpu_by_name");
        assert!(settings.catalog_path.is_none());
    }

    #[test]
    fn settings_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = SettingsData {
            last_user: Some("grace".into()),
            last_category: CategoryId::BySpecification.key().to_string(),
            catalog_path: Some(dir.path().join("catalog.json")),
            dark_mode: false,
            ..Default::default()
        };

        save_json_to(&settings, &path).unwrap();
        assert_eq!(load_json_from::<SettingsData>(&path).unwrap(), settings);
    }

    #[test]
    fn executor_follows_the_catalog_setting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mine.json");
        std::fs::write(&path, r#"{"cpu_by_name": [{"Model": "Only One"}]}"#).unwrap();

        let sample = SettingsData { match_mode: MatchMode::ReturnAll, ..Default::default() };
        assert_eq!(sample.catalog_label(), "Sample data");
        let records = sample.executor().execute(&SearchCriteria::default(), CategoryId::ByName);
        assert!(records.len() > 1);

        let custom = SettingsData { catalog_path: Some(path), ..sample };
        assert_eq!(custom.catalog_label(), "mine.json");
        let records = custom.executor().execute(&SearchCriteria::default(), CategoryId::ByName);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Model"), Some("Only One"));
    }
}
