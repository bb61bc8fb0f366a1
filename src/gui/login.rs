use eframe::egui;

use super::theme::Theme;

/// Stub login: any non-blank user name is accepted. The password field is
/// only there for the look of it and is cleared on every attempt.
#[derive(Default)]
pub struct LoginScreen {
    user: String,
    password: String,
    rejected: bool,
}

impl LoginScreen {
    pub fn new(last_user: Option<&str>) -> Self {
        Self { user: last_user.unwrap_or_default().to_string(), ..Default::default() }
    }

    /// Returns the user name once "Log in" is pressed with a non-blank name.
    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) -> Option<String> {
        let mut submitted = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.label(theme.heading(ctx, "CPU Compare").size(30.0));
                ui.add_space(24.0);

                egui::Grid::new("login_grid").num_columns(2).spacing([10.0, 6.0]).show(ui, |ui| {
                    ui.label("User:");
                    let user = ui.text_edit_singleline(&mut self.user);
                    ui.end_row();

                    ui.label("Password:");
                    let password =
                        ui.add(egui::TextEdit::singleline(&mut self.password).password(true));
                    ui.end_row();

                    let entered = (user.lost_focus() || password.lost_focus())
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if entered {
                        submitted = Some(self.user.clone());
                    }
                });

                ui.add_space(12.0);
                if ui.button("Log in").clicked() {
                    submitted = Some(self.user.clone());
                }

                if self.rejected {
                    ui.add_space(6.0);
                    ui.colored_label(theme.red(ctx), "Please enter a user name.");
                }
            });
        });

        let user = submitted?;
        self.password.clear();
        self.rejected = user.trim().is_empty();
        (!self.rejected).then_some(user)
    }
}
