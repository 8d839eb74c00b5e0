use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Serialize;
use tracing::info;

use crate::context::AppContext;
use crate::domain::release::{Release, ReleaseDraft, Settings};
use crate::error::{AppError, AppResult};
use crate::workflow::generate::generate_release_notes;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Serialize)]
pub(super) struct MessageBody {
    message: &'static str,
}

#[derive(Serialize)]
pub(super) struct CreatedBody {
    message: &'static str,
    id: String,
}

#[derive(Serialize)]
pub(super) struct MarkdownBody {
    markdown: String,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

fn not_found() -> AppError {
    AppError::NotFound("Release not found".to_string())
}

pub(super) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// -- /api/settings --

pub(super) async fn get_settings(State(ctx): State<AppContext>) -> AppResult<Json<Settings>> {
    let settings = ctx.store.settings().await?;
    info!("fetched settings");
    Ok(Json(settings))
}

pub(super) async fn save_settings(
    State(ctx): State<AppContext>,
    payload: Result<Json<Settings>, JsonRejection>,
) -> AppResult<Json<MessageBody>> {
    ctx.store.save_settings(body(payload)?).await?;
    info!("settings saved");
    Ok(Json(MessageBody {
        message: "Settings saved successfully.",
    }))
}

// -- /api/releases --

pub(super) async fn list_releases(State(ctx): State<AppContext>) -> AppResult<Json<Vec<Release>>> {
    let releases = ctx.store.list_releases().await?;
    info!(count = releases.len(), "fetched releases");
    Ok(Json(releases))
}

pub(super) async fn create_release(
    State(ctx): State<AppContext>,
    payload: Result<Json<ReleaseDraft>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedBody>)> {
    let release = ctx.store.create_release(body(payload)?).await?;
    info!(id = %release.id, "release created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedBody {
            message: "Release created.",
            id: release.id,
        }),
    ))
}

// -- /api/releases/{id} --

pub(super) async fn get_release(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> AppResult<Json<Release>> {
    let release = ctx.store.release(&id).await?.ok_or_else(not_found)?;
    Ok(Json(release))
}

pub(super) async fn update_release(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    payload: Result<Json<ReleaseDraft>, JsonRejection>,
) -> AppResult<Json<MessageBody>> {
    ctx.store
        .update_release(&id, body(payload)?)
        .await?
        .ok_or_else(not_found)?;
    info!(id = %id, "release updated");
    Ok(Json(MessageBody {
        message: "Release updated successfully.",
    }))
}

pub(super) async fn delete_release(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageBody>> {
    if !ctx.store.delete_release(&id).await? {
        return Err(not_found());
    }
    info!(id = %id, "release deleted");
    Ok(Json(MessageBody {
        message: "Release deleted successfully.",
    }))
}

// -- /api/releases/{id}/generate --

pub(super) async fn generate(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> AppResult<Json<MarkdownBody>> {
    let markdown = generate_release_notes(&ctx, &id).await?;
    Ok(Json(MarkdownBody { markdown }))
}
