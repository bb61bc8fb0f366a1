use std::time::Duration;

use eframe::egui;
use tracing::{
    debug,
    error,
    info,
    warn,
};

use super::{
    comparison_view::comparison_view,
    error_modal::ErrorModal,
    form_panel::{
        FormAction,
        FormPanel,
    },
    login::LoginScreen,
    message_overlay::MessageOverlay,
    settings::SettingsData,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    category::{
        CategoryController,
        CategoryId,
        CategoryRegistry,
        SearchOutcome,
    },
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        Session,
    },
    persistence::{
        save_json,
        SETTINGS_FILE,
    },
    query::{
        JsonCatalog,
        MatchMode,
    },
};

/// What only exists while someone is logged in.
struct Workspace {
    session: Session,
    controller: CategoryController,
}

pub struct CompareApp {
    settings_data: SettingsData,
    theme: Theme,
    login: LoginScreen,
    workspace: Option<Workspace>,
    error_modal: ErrorModal,
    message_overlay: MessageOverlay,
    task_manager: Option<TaskManager>,
    checking_catalog: bool,
}

impl CompareApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings_data: SettingsData) -> Self {
        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, &theme);
        cc.egui_ctx.set_theme(match settings_data.dark_mode {
            true => egui::Theme::Dark,
            false => egui::Theme::Light,
        });
        cc.egui_ctx.set_zoom_factor(settings_data.zoom);

        let mut error_modal = ErrorModal::new();
        let task_manager = match TaskManager::new() {
            Ok(manager) => Some(manager),
            Err(e) => {
                error!("Failed to start the background runtime: {e}");
                error_modal.show_error(
                    "Background tasks unavailable",
                    "Searches will run on the UI thread.",
                    Some(e.to_string()),
                );
                None
            }
        };

        Self {
            login: LoginScreen::new(settings_data.last_user.as_deref()),
            settings_data,
            theme,
            workspace: None,
            error_modal,
            message_overlay: MessageOverlay::new(),
            task_manager,
            checking_catalog: false,
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            warn!("Failed to save settings: {e}");
        }
    }

    fn log_in(&mut self, user: &str) {
        let Some(session) = Session::start(user) else {
            return;
        };

        let registry = CategoryRegistry::builtin();
        for (id, reason) in registry.refused() {
            self.error_modal.show_error(
                format!("{} unavailable", id.label()),
                "This category's search form is invalid and has been disabled.",
                Some(reason.to_string()),
            );
        }

        let preferred = match self.settings_data.last_category.parse::<CategoryId>() {
            Ok(id) => id,
            Err(e) => {
                warn!("{e}, starting with '{}'", CategoryId::ByName.key());
                CategoryId::ByName
            }
        };

        match CategoryController::start(registry, self.settings_data.executor(), preferred) {
            Ok(controller) => {
                info!(user = %session.user, session = %session.id, "Logged in");
                self.settings_data.last_user = Some(session.user.clone());
                self.settings_data.last_category = controller.active_category().key().to_string();
                self.save_settings();
                self.workspace = Some(Workspace { session, controller });
            }
            Err(e) => {
                error!("Could not open a category: {e}");
                self.error_modal.show_error(
                    "No category available",
                    "None of the comparison categories could be opened.",
                    Some(e.to_string()),
                );
            }
        }
    }

    fn log_out(&mut self) {
        if let Some(workspace) = self.workspace.take() {
            info!(user = %workspace.session.user, session = %workspace.session.id, "Logged out");
        }
        self.login = LoginScreen::new(self.settings_data.last_user.as_deref());
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::SearchCompleted(outcome) => self.apply_search(outcome),
            TaskResult::CatalogChecked { path, result } => {
                self.checking_catalog = false;
                match result {
                    Ok(count) => {
                        info!(path = %path.display(), records = count, "Catalog opened");
                        self.settings_data.catalog_path = Some(path);
                        self.refresh_executor();
                    }
                    Err(e) => {
                        warn!(path = %path.display(), "Catalog rejected: {e}");
                        self.error_modal.show_error(
                            "Could not open catalog",
                            format!("{} is not a usable catalog.", path.display()),
                            Some(e),
                        );
                    }
                }
            }
        }
    }

    fn apply_search(&mut self, outcome: SearchOutcome) {
        let Some(workspace) = self.workspace.as_mut() else {
            debug!(generation = outcome.generation, "Search finished after logout, dropped");
            return;
        };
        workspace.controller.complete_search(outcome);
    }

    fn refresh_executor(&mut self) {
        if let Some(workspace) = self.workspace.as_mut() {
            workspace.controller.set_executor(self.settings_data.executor());
        }
        self.save_settings();
    }

    fn handle_top_bar_action(&mut self, action: TopBarAction) {
        match action {
            TopBarAction::SelectCategory(id) => {
                let Some(workspace) = self.workspace.as_mut() else {
                    return;
                };
                match workspace.controller.select_category(id) {
                    Ok(()) => {
                        self.settings_data.last_category = id.key().to_string();
                        self.save_settings();
                    }
                    Err(e) => {
                        self.error_modal.show_error(
                            "Category unavailable",
                            format!("Could not switch to {}.", id.label()),
                            Some(e.to_string()),
                        );
                    }
                }
            }
            TopBarAction::OpenCatalog => self.open_catalog(),
            TopBarAction::UseSampleCatalog => {
                self.settings_data.catalog_path = None;
                self.refresh_executor();
            }
            TopBarAction::SetMatchMode(mode) => {
                self.settings_data.match_mode = mode;
                self.refresh_executor();
            }
            TopBarAction::Logout => self.log_out(),
        }
    }

    fn open_catalog(&mut self) {
        let Some(path) =
            rfd::FileDialog::new().add_filter("JSON catalog", &["json"]).pick_file()
        else {
            return;
        };

        if let Some(manager) = &self.task_manager {
            self.checking_catalog = true;
            manager.check_catalog(path, self.settings_data.match_mode);
            return;
        }

        let result: Result<usize, String> =
            JsonCatalog::new(path.clone(), self.settings_data.match_mode)
                .load()
                .map(|catalog| catalog.values().map(Vec::len).sum())
                .map_err(|e| e.to_string());
        self.handle_task_result(TaskResult::CatalogChecked { path, result });
    }

    fn handle_form_action(&mut self, action: FormAction) {
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };

        match action {
            FormAction::Search => match &self.task_manager {
                Some(manager) => manager.run_search(workspace.controller.begin_search()),
                None => {
                    workspace.controller.submit_search();
                }
            },
            FormAction::Clear => workspace.controller.reset_form(),
        }
    }

    fn show_workspace(&mut self, ctx: &egui::Context) {
        let catalog_label = self.settings_data.catalog_label();
        let match_mode: MatchMode = self.settings_data.match_mode;
        let Some(workspace) = self.workspace.as_mut() else {
            return;
        };

        let top_bar_action = TopBar::show(
            ctx,
            &self.theme,
            &workspace.controller,
            &workspace.session,
            match_mode,
            &catalog_label,
        );

        let searching = workspace.controller.is_search_pending();
        let title = workspace.controller.active_category().label();
        let form_action =
            FormPanel::show(ctx, &self.theme, title, workspace.controller.form_mut(), searching);

        if let Some(index) = comparison_view(ctx, &self.theme, workspace.controller.comparison()) {
            workspace.controller.remove_record(index);
        }

        if let Some(action) = form_action {
            self.handle_form_action(action);
        }
        if let Some(action) = top_bar_action {
            self.handle_top_bar_action(action);
        }
    }

    fn is_busy(&self) -> bool {
        self.checking_catalog
            || self.workspace.as_ref().is_some_and(|w| w.controller.is_search_pending())
    }

    fn sync_view_settings(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        let zoom = ctx.zoom_factor();
        if dark_mode != self.settings_data.dark_mode || zoom != self.settings_data.zoom {
            self.settings_data.dark_mode = dark_mode;
            self.settings_data.zoom = zoom;
            self.save_settings();
        }
    }
}

impl eframe::App for CompareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let results = self.task_manager.as_mut().map(|m| m.poll_results()).unwrap_or_default();
        for result in results {
            self.handle_task_result(result);
        }

        if self.workspace.is_some() {
            self.show_workspace(ctx);
        } else if let Some(user) = self.login.show(ctx, &self.theme) {
            self.log_in(&user);
        }

        if self.checking_catalog {
            self.message_overlay.set_message("Checking catalog…");
        } else if self.is_busy() {
            self.message_overlay.set_message("Searching…");
        } else {
            self.message_overlay.clear_message();
        }
        self.message_overlay.show(ctx, &self.theme);
        self.error_modal.show(ctx, &self.theme);

        self.sync_view_settings(ctx);

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
