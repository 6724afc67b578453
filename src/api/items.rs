//! Item (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::item::{Category, LibraryItem},
    services::catalog::ItemFilter,
};

/// Create item request: a category tag plus the ordered field values that
/// category expects (book: title, author, isbn, pages; dvd: title,
/// director, duration_minutes, genre; magazine: title, issue_number,
/// publisher).
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    /// Category tag, case-insensitive: "book", "dvd" or "magazine"
    pub category: String,
    /// Ordered category-specific field values
    pub args: Vec<serde_json::Value>,
}

/// Item list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ItemQuery {
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by availability
    pub available: Option<bool>,
    /// Filter books by author (full scan path)
    pub author: Option<String>,
}

/// Author search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AuthorQuery {
    /// Author name, matched exactly
    pub author: String,
}

/// Item list response
#[derive(Serialize, ToSchema)]
pub struct ItemListResponse {
    pub items: Vec<LibraryItem>,
    pub total: i64,
}

/// List catalog items with optional filters
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "List of items", body = ItemListResponse)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<ItemListResponse>> {
    let filter = ItemFilter {
        category: query.category,
        available: query.available,
        author: query.author,
    };
    let (items, total) = state.services.catalog.list_items(&filter).await?;
    Ok(Json(ItemListResponse {
        items,
        total: total as i64,
    }))
}

/// Get item details by id
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = String, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item details", body = LibraryItem),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LibraryItem>> {
    let item = state.services.catalog.get_item(&id).await?;
    Ok(Json(item))
}

/// Create a new catalog item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = LibraryItem),
        (status = 400, description = "Unknown category or malformed arguments")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<LibraryItem>)> {
    let item = state
        .services
        .catalog
        .create_item(&request.category, &request.args)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Find books by author through the secondary index
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(AuthorQuery),
    responses(
        (status = 200, description = "Books by the given author", body = Vec<LibraryItem>)
    )
)]
pub async fn search_by_author(
    State(state): State<crate::AppState>,
    Query(query): Query<AuthorQuery>,
) -> AppResult<Json<Vec<LibraryItem>>> {
    let items = state
        .services
        .catalog
        .search_books_by_author(&query.author)
        .await;
    Ok(Json(items))
}
