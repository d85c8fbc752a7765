//! Search box narrowing the table by first name.

mod common;

use common::TestCtx;
use egui::accesskit::Role;
use kittest::Queryable;
use userreg_business::users::SearchInput;

async fn loaded_ctx<'a>() -> TestCtx<'a> {
    let mut ctx = TestCtx::new_app().await;
    ctx.step_until(|harness| harness.query_by_label_contains("Juana Perez").is_some())
        .await;
    ctx
}

#[tokio::test]
async fn test_typing_in_search_box_filters() {
    let mut ctx = loaded_ctx().await;

    ctx.harness_mut().get_by_role(Role::TextInput).type_text("ben");
    ctx.step_until(|harness| harness.query_by_label_contains("Ana Diaz").is_none())
        .await;

    assert_eq!(ctx.state_mut().ctx.state::<SearchInput>().query, "ben");
    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("Benito Ruiz").is_some());
    assert!(harness.query_by_label_contains("Juana Perez").is_none());
}

#[tokio::test]
async fn test_search_narrows_rows() {
    let mut ctx = loaded_ctx().await;

    ctx.state_mut()
        .ctx
        .update::<SearchInput>(|input| input.query = "ANA".to_owned());
    ctx.step_until(|harness| harness.query_by_label_contains("Benito Ruiz").is_none())
        .await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("Ana Diaz").is_some());
    assert!(harness.query_by_label_contains("Juana Perez").is_some());
    assert!(harness.query_by_label_contains("Benito Ruiz").is_none());
}

#[tokio::test]
async fn test_search_ignores_last_name() {
    let mut ctx = loaded_ctx().await;

    ctx.state_mut()
        .ctx
        .update::<SearchInput>(|input| input.query = "ruiz".to_owned());
    ctx.step_until(|harness| harness.query_by_label_contains("Ana Diaz").is_none())
        .await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("Benito Ruiz").is_none());
    assert!(harness.query_by_label("Ver").is_none());
}

#[tokio::test]
async fn test_clearing_search_restores_order() {
    let mut ctx = loaded_ctx().await;

    ctx.state_mut()
        .ctx
        .update::<SearchInput>(|input| input.query = "ben".to_owned());
    ctx.step_until(|harness| harness.query_by_label_contains("Ana Diaz").is_none())
        .await;

    ctx.state_mut()
        .ctx
        .update::<SearchInput>(|input| input.query.clear());
    ctx.step_until(|harness| harness.query_by_label_contains("Ana Diaz").is_some())
        .await;

    let harness = ctx.harness_mut();
    assert_eq!(harness.query_all_by_label("Ver").count(), 3);
}
