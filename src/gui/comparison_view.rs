use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::theme::Theme;
use crate::{
    comparison::{
        AttributePartition,
        ComparisonList,
    },
    core::MISSING_VALUE,
};

const LABEL_WIDTH: f32 = 130.0;
const CARD_WIDTH: f32 = 190.0;
const ROW_HEIGHT: f32 = 24.0;
const BUTTON_HEIGHT: f32 = 30.0;

/// Cards side by side: the first column carries the pinned attribute names,
/// every further column is one record. Pinned values line up with the
/// labels; each record's extra attributes and its remove button sit in the
/// last row. Returns the index of a card whose "Remove" was clicked.
pub fn comparison_view(
    ctx: &egui::Context,
    theme: &Theme,
    comparison: &ComparisonList,
) -> Option<usize> {
    let mut removed = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        if comparison.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);
                ui.label(
                    egui::RichText::new("Nothing to compare").size(26.0).color(theme.cyan(ctx)),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Fill in the form and press Search.")
                        .color(theme.comment(ctx)),
                );
            });
            return;
        }

        ui.label(theme.heading(ctx, &format!("Comparing {} records", comparison.len())));
        ui.add_space(4.0);

        let cards: Vec<(usize, AttributePartition)> = comparison.cards().collect();
        let max_extras = cards.iter().map(|(_, card)| card.extra.len()).max().unwrap_or(0);
        let extras_height = max_extras as f32 * ROW_HEIGHT + BUTTON_HEIGHT + 12.0;

        egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            TableBuilder::new(ui)
                .id_salt("comparison_table")
                .striped(true)
                .vscroll(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::exact(LABEL_WIDTH))
                .columns(Column::initial(CARD_WIDTH).at_least(140.0).resizable(true), cards.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    header.col(|_ui| {});
                    for (index, _) in &cards {
                        header.col(|ui| {
                            ui.label(theme.heading(ctx, &format!("#{}", index + 1)));
                        });
                    }
                })
                .body(|mut body| {
                    for (row_index, name) in comparison.header().names().iter().enumerate() {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.strong(name);
                            });
                            for (_, card) in &cards {
                                row.col(|ui| {
                                    let value = card
                                        .pinned
                                        .get(row_index)
                                        .map(|(_, value)| value.as_str())
                                        .unwrap_or(MISSING_VALUE);
                                    ui.label(theme.value(ctx, value));
                                });
                            }
                        });
                    }

                    body.row(extras_height, |mut row| {
                        row.col(|ui| {
                            ui.label(egui::RichText::new("Other").color(theme.comment(ctx)));
                        });
                        for (index, card) in &cards {
                            row.col(|ui| {
                                if extras_card(ui, ctx, theme, card) {
                                    removed = Some(*index);
                                }
                            });
                        }
                    });
                });
        });
    });

    removed
}

fn extras_card(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    theme: &Theme,
    card: &AttributePartition,
) -> bool {
    ui.vertical(|ui| {
        ui.separator();
        egui::Frame::new().fill(theme.card_fill(ctx)).inner_margin(4.0).corner_radius(4.0).show(
            ui,
            |ui| {
                if card.extra.is_empty() {
                    ui.small(egui::RichText::new("No other attributes").color(theme.comment(ctx)));
                }
                for (name, value) in &card.extra {
                    ui.horizontal(|ui| {
                        ui.small(egui::RichText::new(format!("{name}:")).color(theme.comment(ctx)));
                        ui.small(value);
                    });
                }
            },
        );
        ui.add_space(4.0);
        ui.button(egui::RichText::new("Remove").color(theme.red(ctx))).clicked()
    })
    .inner
}
