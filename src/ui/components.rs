//! Shared UI components for TravelX

use eframe::egui::{self, Color32, CornerRadius, RichText, Vec2};

use crate::app::TravelApp;
use crate::fetch::FetchState;
use crate::state::Tab;
use crate::ui::theme::Theme;

/// Render the navigation bar: destination badge, tab buttons and About
pub fn render_top_bar(app: &mut TravelApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("TravelX")
                .size(18.0)
                .strong()
                .color(theme.accent),
        );
        ui.add_space(12.0);

        // Read every frame so edits from any view show up immediately
        let destination = app.destination.read();
        let badge = if destination.trim().is_empty() {
            "No destination".to_string()
        } else {
            destination
        };
        egui::Frame::new()
            .fill(theme.bg_light)
            .corner_radius(CornerRadius::same(10))
            .inner_margin(egui::Margin::symmetric(10, 4))
            .show(ui, |ui| {
                ui.label(RichText::new(format!("📍 {}", badge)).color(theme.text_primary));
            });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("About").clicked() {
                app.ui.show_about_dialog = true;
            }
        });
    });

    ui.add_space(6.0);

    ui.horizontal(|ui| {
        for tab in Tab::all() {
            render_tab(app, ui, *tab);
        }
    });
}

/// Render a tab button
pub fn render_tab(app: &mut TravelApp, ui: &mut egui::Ui, tab: Tab) {
    let theme = &app.ui.current_theme;
    let is_active = app.active_tab() == tab;

    let (bg, text_color) = if is_active {
        (theme.bg_medium, theme.accent)
    } else {
        (Color32::TRANSPARENT, theme.text_secondary)
    };

    let button = egui::Button::new(RichText::new(tab.label()).color(text_color))
        .fill(bg)
        .corner_radius(CornerRadius {
            nw: 6,
            ne: 6,
            sw: 0,
            se: 0,
        })
        .min_size(Vec2::new(90.0, 32.0));

    if ui.add(button).clicked() && !is_active {
        app.switch_tab(tab);
    }
}

/// Render a titled, framed section
pub fn render_section_frame<R>(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    content: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.accent).size(13.0).strong());
            ui.add_space(12.0);
            content(ui)
        })
        .inner
}

/// Render a fetch lifecycle: muted hint when idle, spinner while loading,
/// the error text on failure and `content` once data arrives
pub fn render_fetch_state<T>(
    ui: &mut egui::Ui,
    theme: &Theme,
    state: &FetchState<T>,
    idle_hint: &str,
    content: impl FnOnce(&mut egui::Ui, &T),
) {
    match state {
        FetchState::Idle => {
            ui.label(RichText::new(idle_hint).color(theme.text_muted));
        }
        FetchState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading...").color(theme.text_secondary));
            });
        }
        FetchState::Error(msg) => {
            egui::Frame::new()
                .fill(theme.error.gamma_multiply(0.12))
                .corner_radius(CornerRadius::same(6))
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(msg).color(theme.error));
                });
        }
        FetchState::Success(data) => content(ui, data),
    }
}

/// Single-line text field that reports whether its text changed this frame
pub fn query_field(ui: &mut egui::Ui, value: &mut String, hint: &str) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(280.0),
    )
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut TravelApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();

    egui::Window::new("About TravelX")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 240.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);

                ui.label(
                    RichText::new("TravelX")
                        .size(24.0)
                        .strong()
                        .color(theme.accent),
                );

                ui.add_space(4.0);
                ui.label(
                    RichText::new("Travel planning companion")
                        .size(14.0)
                        .color(theme.text_secondary),
                );

                ui.add_space(12.0);

                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);

                ui.label(
                    RichText::new("Weather by OpenWeather, photos by Pexels")
                        .color(theme.text_secondary),
                );
                if ui.link("pexels.com").clicked() {
                    if let Err(e) = open::that("https://www.pexels.com") {
                        tracing::warn!("Failed to open browser: {}", e);
                    }
                }

                ui.add_space(12.0);

                ui.label(
                    RichText::new("Built with Rust + egui")
                        .size(11.0)
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);

                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }

                ui.add_space(8.0);
            });
        });
}
