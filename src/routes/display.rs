use axum::{extract::State, Json};

use crate::{
    errors::ApiError,
    services::{content::ContentService, display, live::LiveService},
    AppState,
};

/// GET /display — the fully resolved payload for a display screen: the live
/// item when an admin override is active, otherwise the default rotation.
pub async fn get_display(
    State(state): State<AppState>,
) -> Result<Json<display::DisplayPayload>, ApiError> {
    let live = LiveService::get(&state.db).await?;
    let bundle = ContentService::bundle(&state.db).await?;
    Ok(Json(display::resolve(&live, &bundle)))
}
