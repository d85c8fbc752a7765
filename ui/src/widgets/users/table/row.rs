//! Row rendering for the users table.

use egui::{Stroke, Ui};
use egui_extras::TableRow;
use userreg_business::users::User;

use super::cells::{render_action_buttons, render_id_cell, render_name_cell, render_picture_cell};

/// Button clicked in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    View(User),
    Edit(User),
    Delete(User),
}

/// Kind of row button, before the user is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowButton {
    View,
    Edit,
    Delete,
}

impl RowButton {
    pub fn label(self) -> &'static str {
        match self {
            Self::View => "Ver",
            Self::Edit => "Editar",
            Self::Delete => "Eliminar",
        }
    }

    fn with_user(self, user: &User) -> RowAction {
        let user = user.clone();
        match self {
            Self::View => RowAction::View(user),
            Self::Edit => RowAction::Edit(user),
            Self::Delete => RowAction::Delete(user),
        }
    }
}

/// Renders one user and returns the button clicked, if any.
#[inline]
pub fn render_user_row(row: &mut TableRow<'_, '_>, user: &User) -> Option<RowAction> {
    let mut clicked = None;

    row.col(|ui| {
        render_id_cell(ui, &user.id);
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_name_cell(ui, &user.full_name());
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_picture_cell(ui, user.picture_url());
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        clicked = render_action_buttons(ui);
        draw_cell_bottom_border(ui);
    });

    clicked.map(|button| button.with_user(user))
}

#[inline]
fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.max_rect();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
