//! Images tab UI rendering

use eframe::egui::{self, CornerRadius, RichText, Vec2};

use crate::providers::Photo;
use crate::state::{PhotosState, StateEvent};
use crate::ui::components::{query_field, render_fetch_state};
use crate::ui::textures::TextureCache;
use crate::ui::TabContext;

const THUMBNAIL_SIZE: Vec2 = Vec2::new(220.0, 150.0);

/// Render the images tab content
pub fn render_images_tab(state: &mut PhotosState, tab: &mut TabContext<'_>, ui: &mut egui::Ui) {
    let theme = tab.theme;

    ui.label(
        RichText::new("Destination Images")
            .color(theme.text_primary)
            .size(20.0)
            .strong(),
    );
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Location:").color(theme.text_muted));
        let mut location = state.location.clone();
        if query_field(ui, &mut location, "Enter location...").changed() {
            state.set_location(location, tab.destination);
        }

        if let Some(photos) = state.photos().data() {
            ui.add_space(12.0);
            ui.label(
                RichText::new(format!("{} photos, click one to open it full size", photos.len()))
                    .color(theme.text_muted)
                    .size(12.0),
            );
        }
    });

    ui.add_space(12.0);

    let textures = &mut *tab.textures;
    let events = &mut *tab.events;

    render_fetch_state(
        ui,
        theme,
        state.photos(),
        "Enter a location to see photos.",
        |ui, photos| {
            if photos.is_empty() {
                ui.label(RichText::new("No photos found.").color(theme.text_muted));
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("images_scroll")
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = Vec2::splat(12.0);
                        for photo in photos {
                            if render_thumbnail(ui, textures, photo).clicked() {
                                open_photo(photo, events);
                            }
                        }
                    });
                });
        },
    );
}

fn render_thumbnail(
    ui: &mut egui::Ui,
    textures: &mut TextureCache,
    photo: &Photo,
) -> egui::Response {
    let response = if let Some(texture) = textures.get(&photo.thumbnail_url) {
        ui.add(
            egui::Image::new(texture)
                .fit_to_exact_size(THUMBNAIL_SIZE)
                .corner_radius(CornerRadius::same(6))
                .sense(egui::Sense::click()),
        )
    } else {
        let (rect, response) = ui.allocate_exact_size(THUMBNAIL_SIZE, egui::Sense::click());
        ui.painter()
            .rect_filled(rect, 6.0, ui.visuals().faint_bg_color);
        if !textures.failed(&photo.thumbnail_url) {
            ui.put(rect, egui::Spinner::new());
        }
        response
    };

    response
        .on_hover_text(photo.alt_text.as_str())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Open the large rendition in the system browser
fn open_photo(photo: &Photo, events: &mut Vec<StateEvent>) {
    match open::that(&photo.image_url) {
        Ok(()) => events.push(StateEvent::LogInfo(format!("Opened photo {}", photo.id))),
        Err(e) => events.push(StateEvent::LogError(format!(
            "Failed to open {}: {}",
            photo.image_url, e
        ))),
    }
}
