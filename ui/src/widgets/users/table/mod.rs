//! Users table, split into:
//! - `columns`: column widths
//! - `header`: header row
//! - `row`: one row per user, reporting the clicked action
//! - `cells`: the individual cell renderers

mod cells;
pub mod columns;
pub mod header;
pub mod row;

use egui::{Align, Layout, Ui};
use egui_extras::TableBuilder;
use userreg_business::users::User;

use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;
use row::{RowAction, render_user_row};

/// Renders `users` and returns the action clicked in this frame, if any.
pub fn users_table(ui: &mut Ui, users: &[User]) -> Option<RowAction> {
    let mut action = None;

    let mut builder = TableBuilder::new(ui)
        .id_salt("users_table")
        .striped(true)
        .resizable(false)
        .cell_layout(Layout::left_to_right(Align::Center));
    for column in table_columns() {
        builder = builder.column(column);
    }

    builder
        .header(HEADER_HEIGHT, |mut header| render_table_header(&mut header))
        .body(|body| {
            body.rows(ROW_HEIGHT, users.len(), |mut row| {
                let user = &users[row.index()];
                if let Some(clicked) = render_user_row(&mut row, user) {
                    action = Some(clicked);
                }
            });
        });

    action
}
