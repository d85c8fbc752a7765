//! Dialogs of the users panel: create/edit form, detail view, delete
//! confirmation.
//!
//! Each dialog reads [`ModalState`] and answers through commands; form edits
//! are written back with `ctx.update::<ModalState>()`.

use egui::{Color32, ComboBox, Context, Image, RichText, Ui, Vec2, Window};
use userreg_business::users::{
    CancelDeleteCommand, CloseModalCommand, ConfirmDeleteCommand, CreateUserCommand,
    CreateUserCompute, ModalKind, ModalState, SaveEditCommand, User, UserDraft,
};
use userreg_states::StateCtx;

const TITLES: [&str; 5] = ["mr", "ms", "mrs", "miss", "dr"];
const DIALOG_WIDTH: f32 = 360.0;

/// Shows whichever dialog `ModalState` says is open.
pub fn show_user_modal(state_ctx: &mut StateCtx, egui_ctx: &Context) {
    let modal = state_ctx.state::<ModalState>();
    let Some(kind) = modal.kind else {
        return;
    };

    match kind {
        ModalKind::Create | ModalKind::Edit => show_form_modal(state_ctx, egui_ctx, kind),
        ModalKind::View => {
            if let Some(user) = modal.selected.clone() {
                show_view_modal(state_ctx, egui_ctx, &user);
            }
        }
    }
}

fn show_form_modal(state_ctx: &mut StateCtx, egui_ctx: &Context, kind: ModalKind) {
    let modal = state_ctx.state::<ModalState>();
    let mut draft = modal.draft.clone();
    let error = modal.error.clone();
    let pending = kind == ModalKind::Create
        && state_ctx
            .cached::<CreateUserCompute>()
            .is_some_and(CreateUserCompute::is_pending);

    let (title, submit_label) = match kind {
        ModalKind::Create => ("Crear Usuario", "Crear"),
        _ => ("Editar Usuario", "Guardar"),
    };

    let mut submit = false;
    let mut close = false;

    Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(DIALOG_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(egui_ctx, |ui| {
            draft_form(ui, &mut draft);

            if let Some(error) = &error {
                ui.add_space(4.0);
                ui.colored_label(Color32::RED, error);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                submit = ui
                    .add_enabled(!pending, egui::Button::new(submit_label))
                    .clicked();
                if pending {
                    ui.spinner();
                }
                close = ui.button("Cerrar").clicked();
            });
        });

    if state_ctx.state::<ModalState>().draft != draft {
        state_ctx.update::<ModalState>(|modal| modal.draft = draft);
    }

    if submit {
        match kind {
            ModalKind::Create => state_ctx.dispatch::<CreateUserCommand>(),
            _ => state_ctx.dispatch::<SaveEditCommand>(),
        }
    } else if close {
        state_ctx.dispatch::<CloseModalCommand>();
    }
}

fn draft_form(ui: &mut Ui, draft: &mut UserDraft) {
    egui::Grid::new("user_draft_form")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Título");
            ComboBox::from_id_salt("draft_title")
                .selected_text(draft.title.as_str())
                .show_ui(ui, |ui| {
                    for title in TITLES {
                        ui.selectable_value(&mut draft.title, title.to_owned(), title);
                    }
                });
            ui.end_row();

            form_field(ui, "Nombre", &mut draft.first_name);
            form_field(ui, "Apellido", &mut draft.last_name);
            form_field(ui, "Email", &mut draft.email);
            form_field(ui, "URL de la foto", &mut draft.picture);
        });
}

fn form_field(ui: &mut Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).hint_text(label));
    ui.end_row();
}

fn show_view_modal(state_ctx: &mut StateCtx, egui_ctx: &Context, user: &User) {
    let mut close = false;

    Window::new("Detalles del Usuario")
        .collapsible(false)
        .resizable(false)
        .default_width(DIALOG_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(egui_ctx, |ui| {
            detail_line(ui, "Nombre:", &user.first_name);
            detail_line(ui, "Apellido:", &user.last_name);
            detail_line(ui, "Email:", user.email.as_deref().unwrap_or("N/A"));

            if let Some(url) = user.picture_url() {
                ui.add(Image::new(url).fit_to_exact_size(Vec2::splat(64.0)));
            }

            ui.add_space(8.0);
            close = ui.button("Cerrar").clicked();
        });

    if close {
        state_ctx.dispatch::<CloseModalCommand>();
    }
}

fn detail_line(ui: &mut Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).strong());
        ui.label(value);
    });
}

/// Confirmation window for a pending delete request.
pub fn show_delete_confirmation(state_ctx: &mut StateCtx, egui_ctx: &Context) {
    let Some(request) = state_ctx.state::<ModalState>().confirm_delete.clone() else {
        return;
    };

    let mut confirm = false;
    let mut cancel = false;

    Window::new("Confirmar eliminación")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(egui_ctx, |ui| {
            ui.label(request.prompt());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                confirm = ui.button("Sí, eliminar").clicked();
                cancel = ui.button("Cancelar").clicked();
            });
        });

    if confirm {
        state_ctx.dispatch::<ConfirmDeleteCommand>();
    } else if cancel {
        state_ctx.dispatch::<CancelDeleteCommand>();
    }
}
