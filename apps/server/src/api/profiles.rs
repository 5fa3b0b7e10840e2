use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{ListQuery, ProfileDto, ProfileListResponse},
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use profiledeck_profiles::{CachedValue, PageRequest, ProfileId, ProfilePage, QueryKey};

async fn list_profiles(
    Query(q): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ProfileListResponse>> {
    let request = PageRequest::new(
        q.page.unwrap_or(0),
        q.limit.unwrap_or(state.default_page_size),
    )?;
    let page = load_page_cached(&state, request).await?;
    Ok(Json(page.into()))
}

/// Serve a fresh cached page, otherwise load it and cache the result.
async fn load_page_cached(state: &AppState, request: PageRequest) -> ApiResult<ProfilePage> {
    let key = QueryKey::page(&request);
    if let Some(CachedValue::Page(page)) = state.cache.get_fresh(&key) {
        tracing::debug!("Serving page {} from cache", request.page_number());
        return Ok(page);
    }

    let page = state.feed.load_page(request).await?;
    state.cache.put(key, CachedValue::Page(page.clone()));
    Ok(page)
}

async fn get_profile(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ProfileDto>> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::BadRequest("Profile id must not be empty".to_string()));
    }
    let profile = state.lookup.get(&ProfileId::new(id)).await?;
    Ok(Json(profile.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles", get(list_profiles))
        .route("/profiles/{id}", get(get_profile))
}
