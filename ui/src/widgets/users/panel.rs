//! Main panel of the user management screen.

use egui::{Color32, Response, RichText, Ui};
use userreg_business::users::{
    DismissNoticeCommand, FetchUsersCompute, FilteredUsersCompute, ModalKind, ModalState,
    OpenCreateModalCommand, OpenUserModalCommand, RequestDeleteCommand, SearchInput,
    UserActionInput,
};
use userreg_states::{StateCtx, Time};

use super::modals::{show_delete_confirmation, show_user_modal};
use super::table::row::RowAction;
use super::table::users_table;

pub const HEADING: &str = "MODULO DE CONSULTA Y REGISTRO DE USUARIO FINANZAUTO";
const HEADING_COLOR: Color32 = Color32::from_rgb(0x21, 0x6e, 0x6a);

/// Heading, toolbar, notice, table and dialogs.
pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let response = ui.vertical(|ui| {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(HEADING).strong().color(HEADING_COLOR));
        });
        ui.add_space(12.0);

        toolbar(state_ctx, ui);
        notice_line(state_ctx, ui);
        ui.add_space(8.0);

        let users = state_ctx
            .cached::<FilteredUsersCompute>()
            .map(|c| c.users.clone())
            .unwrap_or_default();

        if let Some(action) = users_table(ui, &users) {
            apply_row_action(state_ctx, action);
        }
    });

    show_user_modal(state_ctx, ui.ctx());
    show_delete_confirmation(state_ctx, ui.ctx());

    response.response
}

fn toolbar(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let mut query = state_ctx.state::<SearchInput>().query.clone();
    let loading = state_ctx
        .cached::<FetchUsersCompute>()
        .is_some_and(FetchUsersCompute::is_loading);

    let (search_changed, create_clicked) = ui
        .horizontal(|ui| {
            let search = ui.add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Buscar usuario...")
                    .desired_width(280.0),
            );
            let create = ui.button("Crear Usuario");

            if loading {
                ui.spinner();
                ui.label("Cargando usuarios...");
            }

            (search.changed(), create.clicked())
        })
        .inner;

    if search_changed {
        state_ctx.update::<SearchInput>(|input| input.query = query);
    }
    if create_clicked {
        state_ctx.dispatch::<OpenCreateModalCommand>();
    }
}

fn notice_line(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let now = state_ctx.state::<Time>().now();
    let Some(text) = state_ctx
        .state::<ModalState>()
        .visible_notice(now)
        .map(str::to_owned)
    else {
        return;
    };

    let dismissed = ui
        .horizontal(|ui| {
            ui.colored_label(Color32::from_rgb(34, 139, 34), text);
            ui.small_button("x").on_hover_text("Ocultar").clicked()
        })
        .inner;

    if dismissed {
        state_ctx.dispatch::<DismissNoticeCommand>();
    }
}

fn apply_row_action(state_ctx: &mut StateCtx, action: RowAction) {
    let (kind, user, delete) = match action {
        RowAction::View(user) => (ModalKind::View, user, false),
        RowAction::Edit(user) => (ModalKind::Edit, user, false),
        RowAction::Delete(user) => (ModalKind::View, user, true),
    };

    state_ctx.update::<UserActionInput>(|input| {
        input.kind = kind;
        input.target = Some(user);
    });

    if delete {
        state_ctx.dispatch::<RequestDeleteCommand>();
    } else {
        state_ctx.dispatch::<OpenUserModalCommand>();
    }
}
