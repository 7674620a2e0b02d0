//! Activities tab UI rendering

use eframe::egui::{self, CornerRadius, RichText};

use crate::providers::Activity;
use crate::state::ActivitiesState;
use crate::ui::components::{query_field, render_fetch_state};
use crate::ui::theme::Theme;
use crate::ui::TabContext;

/// Render the activities tab content
pub fn render_activities_tab(
    state: &mut ActivitiesState,
    tab: &mut TabContext<'_>,
    ui: &mut egui::Ui,
) {
    let theme = tab.theme;

    ui.label(
        RichText::new("Things To Do")
            .color(theme.text_primary)
            .size(20.0)
            .strong(),
    );
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("City:").color(theme.text_muted));
        let mut city = state.city.clone();
        if query_field(ui, &mut city, "Enter city name...").changed() {
            state.set_city(city, tab.destination);
        }
    });

    ui.add_space(12.0);

    render_fetch_state(
        ui,
        theme,
        state.activities(),
        "Enter a city to see activities.",
        |ui, activities| {
            egui::ScrollArea::vertical()
                .id_salt("activities_scroll")
                .show(ui, |ui| {
                    for activity in activities {
                        render_activity_card(ui, theme, activity);
                        ui.add_space(8.0);
                    }
                });
        },
    );
}

fn render_activity_card(ui: &mut egui::Ui, theme: &Theme, activity: &Activity) {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(14))
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(&activity.name)
                        .color(theme.text_primary)
                        .size(16.0)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("★ {:.1}", activity.rating)).color(theme.warning),
                    );
                });
            });

            ui.label(RichText::new(&activity.description).color(theme.text_secondary));
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new(&activity.location).color(theme.text_muted).size(12.0));
                ui.label(RichText::new("·").color(theme.text_muted));
                ui.label(RichText::new(&activity.duration).color(theme.text_muted).size(12.0));
                ui.label(RichText::new("·").color(theme.text_muted));
                ui.label(RichText::new(&activity.price).color(theme.success).size(12.0));
            });
        });
}
