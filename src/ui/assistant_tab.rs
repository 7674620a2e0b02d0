//! Assistant tab UI rendering

use eframe::egui::{self, CornerRadius, RichText};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::state::{AssistantState, ChatMessage, Sender};
use crate::ui::theme::Theme;
use crate::ui::TabContext;

/// Render the assistant tab content
pub fn render_assistant_tab(
    state: &mut AssistantState,
    markdown_cache: &mut CommonMarkCache,
    tab: &mut TabContext<'_>,
    ui: &mut egui::Ui,
) {
    let theme = tab.theme;

    ui.label(
        RichText::new("Travel Assistant")
            .color(theme.text_primary)
            .size(20.0)
            .strong(),
    );
    ui.label(
        RichText::new("Ask anything about your trip.")
            .color(theme.text_muted)
            .size(12.0),
    );
    ui.add_space(8.0);

    // Input row pinned to the bottom, conversation fills the rest
    egui::TopBottomPanel::bottom("assistant_input")
        .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(0, 8)))
        .show_inside(ui, |ui| {
            render_input(state, tab, ui);
        });

    egui::ScrollArea::vertical()
        .id_salt("assistant_scroll")
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if state.messages().is_empty() {
                ui.label(
                    RichText::new("No questions yet. Try \"What should I pack for Iceland in March?\"")
                        .color(theme.text_muted),
                );
            }

            for message in state.messages() {
                ui.push_id(message.id, |ui| {
                    render_message(ui, theme, markdown_cache, message);
                });
                ui.add_space(6.0);
            }

            if state.is_waiting() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Thinking...").color(theme.text_muted));
                });
            }
        });
}

fn render_input(state: &mut AssistantState, tab: &mut TabContext<'_>, ui: &mut egui::Ui) {
    let theme = tab.theme;

    if state.is_disabled() {
        ui.label(
            RichText::new("The assistant is unavailable until you reopen this tab.")
                .color(theme.warning),
        );
        ui.add_space(4.0);
    }

    let enabled = state.can_submit();
    ui.horizontal(|ui| {
        let response = ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(&mut state.draft)
                .hint_text("Ask a travel question...")
                .desired_width(ui.available_width() - 80.0),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let can_send = enabled && !state.draft.trim().is_empty();
        let clicked = ui.add_enabled(can_send, egui::Button::new("Send")).clicked();

        if (entered || clicked) && can_send {
            tab.events.extend(state.submit());
            response.request_focus();
        }
    });
}

fn render_message(
    ui: &mut egui::Ui,
    theme: &Theme,
    markdown_cache: &mut CommonMarkCache,
    message: &ChatMessage,
) {
    let (fill, align) = match message.sender {
        Sender::User => (theme.user_bubble, egui::Align::Max),
        Sender::Assistant => (theme.bg_medium, egui::Align::Min),
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        egui::Frame::new()
            .fill(fill)
            .corner_radius(CornerRadius::same(10))
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                match message.sender {
                    Sender::User => {
                        ui.label(RichText::new(&message.text).color(theme.text_primary));
                    }
                    Sender::Assistant => {
                        CommonMarkViewer::new().show(ui, markdown_cache, &message.text);
                    }
                }
                ui.label(
                    RichText::new(message.timestamp.format("%H:%M").to_string())
                        .color(theme.text_muted)
                        .size(10.0),
                );
            });
    });
}
