use eframe::egui;

use super::theme::Theme;
use crate::{
    form::{
        Control,
        FormHandle,
    },
    schema::FieldKind,
};

const GRID_HORIZONTAL_SPACING: f32 = 10.0;
const GRID_VERTICAL_SPACING: f32 = 6.0;

pub enum FormAction {
    Search,
    Clear,
}

pub struct FormPanel;

impl FormPanel {
    pub fn show(
        ctx: &egui::Context,
        theme: &Theme,
        title: &str,
        form: &mut FormHandle,
        searching: bool,
    ) -> Option<FormAction> {
        let mut action = None;

        egui::SidePanel::left("form_panel").resizable(true).default_width(280.0).show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(theme.heading(ctx, title));
            ui.separator();

            egui::Grid::new("search_form_grid")
                .num_columns(2)
                .spacing([GRID_HORIZONTAL_SPACING, GRID_VERTICAL_SPACING])
                .show(ui, |ui| {
                    for control in form.controls_mut() {
                        ui.label(format!("{}:", control.name()));
                        Self::show_control(ui, control);
                        ui.end_row();
                    }
                });

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(!searching, egui::Button::new("Search")).clicked() {
                    action = Some(FormAction::Search);
                }
                if ui.button("Clear").clicked() {
                    action = Some(FormAction::Clear);
                }
            });
        });

        action
    }

    fn show_control(ui: &mut egui::Ui, control: &mut Control) {
        match control.kind() {
            FieldKind::Text => {
                if let Some(text) = control.text_mut() {
                    ui.text_edit_singleline(text);
                }
            }
            FieldKind::BooleanToggle => {
                if let Some(on) = control.toggle_mut() {
                    ui.checkbox(on, "");
                }
            }
            FieldKind::Choice => {
                let selected = control.selected_index();
                let options = control.options().to_vec();
                let current = selected.and_then(|i| options.get(i)).cloned().unwrap_or_default();

                egui::ComboBox::from_id_salt(("choice", control.name().to_string()))
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for (index, option) in options.iter().enumerate() {
                            if ui.selectable_label(selected == Some(index), option).clicked() {
                                control.select_index(index);
                            }
                        }
                    });
            }
            FieldKind::ExclusiveChoice => {
                let selected = control.selected_index();
                let options = control.options().to_vec();

                ui.horizontal_wrapped(|ui| {
                    for (index, option) in options.iter().enumerate() {
                        if ui.selectable_label(selected == Some(index), option).clicked() {
                            control.select_index(index);
                        }
                    }
                });
            }
        }
    }
}
