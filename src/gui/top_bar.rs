use eframe::egui::{
    self,
    containers,
};

use super::theme::Theme;
use crate::{
    category::{
        CategoryController,
        CategoryId,
    },
    core::Session,
    query::MatchMode,
};

pub enum TopBarAction {
    SelectCategory(CategoryId),
    OpenCatalog,
    UseSampleCatalog,
    SetMatchMode(MatchMode),
    Logout,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        theme: &Theme,
        controller: &CategoryController,
        session: &Session,
        match_mode: MatchMode,
        catalog_label: &str,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Open Catalog…").clicked() {
                        action = Some(TopBarAction::OpenCatalog);
                    }
                    if ui.button("Use Sample Data").clicked() {
                        action = Some(TopBarAction::UseSampleCatalog);
                    }
                    ui.separator();
                    if ui.button("Log Out").clicked() {
                        action = Some(TopBarAction::Logout);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Search", |ui| {
                    for mode in [MatchMode::Filter, MatchMode::ReturnAll] {
                        if ui.radio(match_mode == mode, mode.label()).clicked() {
                            action = Some(TopBarAction::SetMatchMode(mode));
                        }
                    }
                });

                ui.separator();

                let registry = controller.registry();
                for id in CategoryId::ALL {
                    let selected = controller.active_category() == id;
                    let button = ui
                        .add_enabled_ui(registry.get(id).is_some(), |ui| {
                            ui.selectable_label(selected, id.label())
                        })
                        .inner;
                    let button = match registry.refusal(id) {
                        Some(e) => button.on_disabled_hover_text(e.to_string()),
                        None => button,
                    };
                    if button.clicked() && !selected {
                        action = Some(TopBarAction::SelectCategory(id));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&session.user).color(theme.cyan(ctx)))
                        .on_hover_text(format!(
                            "Logged in since {}",
                            session.started_at.format("%Y-%m-%d %H:%M")
                        ));
                    ui.add_space(6.0);
                    ui.small(egui::RichText::new(catalog_label).color(theme.comment(ctx)));
                });
            });
        });

        action
    }
}
