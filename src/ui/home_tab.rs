//! Home tab UI rendering

use eframe::egui::{self, RichText};

use crate::state::HomeState;
use crate::ui::components::{query_field, render_section_frame};
use crate::ui::TabContext;

/// Render the home tab content
pub fn render_home_tab(state: &mut HomeState, tab: &mut TabContext<'_>, ui: &mut egui::Ui) {
    let theme = tab.theme;

    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Where to next?")
                .size(28.0)
                .strong()
                .color(theme.text_primary),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new("Pick a destination, then explore its weather, photos and things to do.")
                .color(theme.text_secondary),
        );
    });
    ui.add_space(24.0);

    render_section_frame(ui, theme, "Destination", |ui| {
        ui.horizontal(|ui| {
            let response = query_field(ui, &mut state.query, "Search for a city...");
            let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let can_search = !state.query.trim().is_empty();
            let clicked = ui
                .add_enabled(can_search, egui::Button::new("Search"))
                .clicked();

            if entered || clicked {
                if let Some(event) = state.submit(tab.destination) {
                    tab.events.push(event);
                }
            }
        });

        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("Current destination: {}", tab.destination.read()))
                .color(theme.text_muted)
                .size(12.0),
        );
    });
}
