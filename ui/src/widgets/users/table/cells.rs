//! Cell renderers for the users table.

use egui::{CornerRadius, Image, RichText, Ui, Vec2};

use super::row::RowButton;

const PICTURE_SIZE: f32 = 40.0;

#[inline]
pub fn render_id_cell(ui: &mut Ui, id: &str) {
    ui.label(RichText::new(id).monospace().small());
}

#[inline]
pub fn render_name_cell(ui: &mut Ui, full_name: &str) {
    ui.label(full_name);
}

/// Round thumbnail, or a dash when the user has no picture.
#[inline]
pub fn render_picture_cell(ui: &mut Ui, url: Option<&str>) {
    match url {
        Some(url) => {
            ui.add(
                Image::new(url)
                    .fit_to_exact_size(Vec2::splat(PICTURE_SIZE))
                    .corner_radius(CornerRadius::same(20)),
            );
        }
        None => {
            ui.weak("-");
        }
    }
}

/// "Ver" / "Editar" / "Eliminar"; returns the one clicked.
#[inline]
pub fn render_action_buttons(ui: &mut Ui) -> Option<RowButton> {
    let mut clicked = None;

    ui.horizontal(|ui| {
        for button in [RowButton::View, RowButton::Edit, RowButton::Delete] {
            if ui.button(button.label()).clicked() {
                clicked = Some(button);
            }
        }
    });

    clicked
}
