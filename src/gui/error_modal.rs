use std::collections::VecDeque;

use eframe::egui;

use super::theme::Theme;

#[derive(Default, Clone)]
pub struct ErrorData {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

/// Shows queued errors one at a time; "OK" moves on to the next one.
#[derive(Default)]
pub struct ErrorModal {
    queue: VecDeque<ErrorData>,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_error(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        details: Option<impl Into<String>>,
    ) {
        self.queue.push_back(ErrorData {
            title: title.into(),
            message: message.into(),
            details: details.map(|d| d.into()),
        });
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) {
        let Some(data) = self.queue.front() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
            ui.set_width(420.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚠").size(22.0).color(theme.red(ctx)));
                ui.label(egui::RichText::new(&data.title).size(18.0).strong());
            });

            ui.add_space(8.0);
            ui.label(&data.message);

            if let Some(details) = &data.details {
                ui.add_space(8.0);
                ui.collapsing("Details", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut details.as_str())
                            .desired_width(f32::INFINITY)
                            .desired_rows(3)
                            .code_editor(),
                    );
                });
            }

            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.queue.pop_front();
        }
    }
}
