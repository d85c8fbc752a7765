//! User management screen.
//!
//! - `panel`: heading, search box, create button, notice and table
//! - `table`: the users table (columns, header, row, cells)
//! - `modals`: create/edit/view dialogs and the delete confirmation
//!
//! Widgets hold no domain state: they read `userreg_business::users` states
//! and computes and dispatch its commands.

mod modals;
mod panel;
pub mod table;

pub use panel::{HEADING, users_panel};
