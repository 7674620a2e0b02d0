//! Weather tab UI rendering

use std::time::Instant;

use eframe::egui::{self, CornerRadius, RichText, Vec2};

use crate::providers::{TemperatureUnit, WeatherReport};
use crate::state::WeatherState;
use crate::ui::components::{query_field, render_fetch_state, render_section_frame};
use crate::ui::theme::Theme;
use crate::ui::TabContext;

/// Render the weather tab content
pub fn render_weather_tab(state: &mut WeatherState, tab: &mut TabContext<'_>, ui: &mut egui::Ui) {
    let theme = tab.theme;

    ui.label(
        RichText::new("Weather Information")
            .color(theme.text_primary)
            .size(20.0)
            .strong(),
    );
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("City:").color(theme.text_muted));
        let mut city = state.city.clone();
        if query_field(ui, &mut city, "Enter city name...").changed() {
            state.set_city(city, tab.destination, Instant::now());
        }

        ui.add_space(16.0);

        ui.selectable_value(&mut state.unit, TemperatureUnit::Celsius, "°C");
        ui.selectable_value(&mut state.unit, TemperatureUnit::Fahrenheit, "°F");
    });

    ui.add_space(12.0);

    let unit = state.unit;
    let city = state.city.clone();
    let textures = &mut *tab.textures;

    render_section_frame(ui, theme, "Current Conditions", |ui| {
        render_fetch_state(
            ui,
            theme,
            state.report(),
            "Enter a city to see its weather.",
            |ui, report| {
                render_report(ui, theme, &city, report, unit, |ui, url| {
                    if let Some(texture) = textures.get(url) {
                        ui.add(egui::Image::new(texture).fit_to_exact_size(Vec2::splat(64.0)));
                    } else if !textures.failed(url) {
                        ui.add_sized(Vec2::splat(64.0), egui::Spinner::new());
                    }
                });
            },
        );
    });
}

fn render_report(
    ui: &mut egui::Ui,
    theme: &Theme,
    city: &str,
    report: &WeatherReport,
    unit: TemperatureUnit,
    icon: impl FnOnce(&mut egui::Ui, &str),
) {
    ui.horizontal(|ui| {
        icon(ui, &report.icon_url);
        ui.add_space(8.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(city).color(theme.text_muted).size(12.0));
            ui.label(
                RichText::new(unit.format(report.temperature_c))
                    .color(theme.text_primary)
                    .size(32.0)
                    .strong(),
            );
            ui.label(RichText::new(capitalize(&report.condition)).color(theme.text_secondary));
        });
    });

    ui.add_space(12.0);

    egui::Frame::new()
        .fill(theme.bg_light.gamma_multiply(0.5))
        .corner_radius(CornerRadius::same(4))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                stat(ui, theme, "Humidity", format!("{}%", report.humidity));
                ui.add_space(40.0);
                stat(ui, theme, "Wind", format!("{} km/h", report.wind_kmh));
            });
        });
}

fn stat(ui: &mut egui::Ui, theme: &Theme, label: &str, value: String) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).color(theme.text_muted).size(11.0));
        ui.label(RichText::new(value).color(theme.text_primary).size(16.0).strong());
    });
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
