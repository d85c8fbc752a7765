//! Column definitions for the users table.

use egui_extras::Column;

pub const ID_WIDTH: f32 = 220.0;
pub const PICTURE_WIDTH: f32 = 64.0;
pub const ACTIONS_WIDTH: f32 = 200.0;
pub const ROW_HEIGHT: f32 = 52.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// ID, full name (fills the rest), picture, actions.
#[inline]
pub fn table_columns() -> Vec<Column> {
    vec![
        Column::exact(ID_WIDTH),
        Column::remainder().at_least(140.0),
        Column::exact(PICTURE_WIDTH),
        Column::exact(ACTIONS_WIDTH),
    ]
}
