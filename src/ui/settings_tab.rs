//! Settings tab UI rendering

use eframe::egui::{self, RichText, Vec2};

use crate::app::TravelApp;
use crate::config::{PER_PAGE_RANGE, REFRESH_MINUTES_RANGE};
use crate::providers::{Provider, TemperatureUnit};
use crate::ui::components::render_section_frame;
use crate::ui::theme::ThemePreset;

/// Render the settings tab
pub fn render_settings_tab(app: &mut TravelApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    egui::ScrollArea::vertical()
        .id_salt("settings_scroll")
        .show(ui, |ui| {
            ui.label(
                RichText::new("Settings")
                    .color(theme.text_primary)
                    .size(20.0)
                    .strong(),
            );
            ui.add_space(16.0);

            render_section_frame(ui, &theme, "Appearance", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Theme:").color(theme.text_muted));

                    let current_name = app.config.general.theme.name();
                    egui::ComboBox::from_id_salt("theme_select")
                        .selected_text(current_name)
                        .show_ui(ui, |ui| {
                            for preset in ThemePreset::all() {
                                if ui
                                    .selectable_label(
                                        app.config.general.theme == *preset,
                                        preset.name(),
                                    )
                                    .clicked()
                                {
                                    app.config.general.theme = *preset;
                                    app.ui.current_theme = preset.theme();
                                    app.ui.theme_dirty = true;
                                    app.save_config();
                                }
                            }
                        });
                });

                // Theme preview swatches
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Preview:").color(theme.text_muted));
                    ui.add_space(8.0);

                    let swatch_size = Vec2::new(24.0, 24.0);
                    let colors = [
                        ("Background", theme.bg_dark),
                        ("Accent", theme.accent),
                        ("Your messages", theme.user_bubble),
                        ("Warning", theme.warning),
                        ("Error", theme.error),
                    ];

                    for (label, color) in colors {
                        let (rect, response) =
                            ui.allocate_exact_size(swatch_size, egui::Sense::hover());
                        ui.painter().rect_filled(rect, 4.0, color);
                        response.on_hover_text(label);
                        ui.add_space(4.0);
                    }
                });
            });

            ui.add_space(12.0);

            render_section_frame(ui, &theme, "Travel", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Starting destination:").color(theme.text_muted));
                    let response =
                        ui.text_edit_singleline(&mut app.config.general.default_destination);
                    if response.lost_focus() {
                        app.save_config();
                    }
                });
                ui.label(
                    RichText::new("  Used the next time TravelX starts")
                        .color(theme.text_muted)
                        .size(11.0),
                );

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Temperature unit:").color(theme.text_muted));
                    let before = app.config.weather.units;
                    ui.selectable_value(
                        &mut app.config.weather.units,
                        TemperatureUnit::Celsius,
                        "Celsius",
                    );
                    ui.selectable_value(
                        &mut app.config.weather.units,
                        TemperatureUnit::Fahrenheit,
                        "Fahrenheit",
                    );
                    if app.config.weather.units != before {
                        app.save_config();
                    }
                });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Weather refresh (minutes):").color(theme.text_muted));
                    let response = ui.add(
                        egui::DragValue::new(&mut app.config.weather.refresh_minutes)
                            .range(REFRESH_MINUTES_RANGE)
                            .speed(1.0),
                    );
                    if released(&response) {
                        app.save_config();
                    }
                });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Photos per search:").color(theme.text_muted));
                    let response = ui.add(
                        egui::DragValue::new(&mut app.config.photos.per_page)
                            .range(PER_PAGE_RANGE)
                            .speed(1.0),
                    );
                    if released(&response) {
                        app.save_config();
                    }
                });
                ui.label(
                    RichText::new("  Changes apply when a tab is reopened")
                        .color(theme.text_muted)
                        .size(11.0),
                );
            });

            ui.add_space(12.0);

            render_section_frame(ui, &theme, "API Keys", |ui| {
                for provider in Provider::all() {
                    ui.horizontal(|ui| {
                        let configured = app.credentials.is_configured(*provider);
                        let (status, color) = if configured {
                            ("[OK]", theme.success)
                        } else {
                            ("[  ]", theme.warning)
                        };
                        ui.label(RichText::new(status).color(color).monospace());
                        ui.label(RichText::new(provider.name()).color(theme.text_primary));
                        ui.label(
                            RichText::new(provider.env_var())
                                .color(theme.text_muted)
                                .monospace()
                                .size(11.0),
                        );
                    });
                }
                ui.add_space(4.0);
                ui.label(
                    RichText::new("  Keys are read from the environment or a .env file at startup")
                        .color(theme.text_muted)
                        .size(11.0),
                );
            });

            ui.add_space(12.0);

            render_section_frame(ui, &theme, "Files", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Config file:").color(theme.text_muted));
                    match &app.config_path {
                        Some(path) => {
                            ui.label(
                                RichText::new(path.display().to_string())
                                    .color(theme.text_primary)
                                    .monospace(),
                            );
                        }
                        None => {
                            ui.label(
                                RichText::new("No config directory, settings are not saved")
                                    .color(theme.error),
                            );
                        }
                    }
                });
            });
        }); // ScrollArea
}

/// A number edit is finished once the drag ends or the text field loses focus
fn released(response: &egui::Response) -> bool {
    response.drag_stopped() || response.lost_focus()
}
