use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::masonry::{
    get_masonry_layout, item_spans, layout_mode, ItemSpan, LayoutMode, MasonryLayoutConfig,
    MAX_COLUMNS,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LayoutQuery {
    /// Collection identifier; absent means "start at pattern 0".
    pub collection: Option<String>,
    pub count: usize,
    pub columns: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResponse {
    pub mode: LayoutMode,
    pub layout: MasonryLayoutConfig,
    pub items: Vec<ItemSpan>,
}

/// GET /api/v1/layout?collection=&count=&columns=
pub async fn handle_get_layout(
    State(state): State<AppState>,
    query: Result<Query<LayoutQuery>, QueryRejection>,
) -> Result<Json<LayoutResponse>, AppError> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let columns = params.columns.unwrap_or(state.config.default_columns);

    if !(1..=MAX_COLUMNS).contains(&columns) {
        return Err(AppError::Validation(format!(
            "columns must be between 1 and {MAX_COLUMNS}, got {columns}"
        )));
    }
    if params.count > state.config.max_photo_count {
        return Err(AppError::Validation(format!(
            "count must be at most {}, got {}",
            state.config.max_photo_count, params.count
        )));
    }

    // Worst case is ten full simulations; keep it off the async executor.
    let count = params.count;
    let collection = params.collection;
    let response = tokio::task::spawn_blocking(move || {
        let layout = get_masonry_layout(collection.as_deref(), count, columns);
        let items = item_spans(&layout, count, columns);
        LayoutResponse {
            mode: layout_mode(count),
            layout,
            items,
        }
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))?;

    debug!(
        count,
        columns,
        pattern_index = response.layout.pattern_index,
        "layout served"
    );
    Ok(Json(response))
}
