//! Statistics endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppResult;

/// Statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Catalog statistics
    pub catalog: CatalogStats,
    /// Circulation statistics
    pub circulation: CirculationStats,
}

#[derive(Serialize, ToSchema)]
pub struct CatalogStats {
    /// Total number of items
    pub total_items: i64,
    /// Items by category
    pub items_by_category: Vec<StatEntry>,
    /// Average page count across books (0.0 when there are none)
    pub average_book_pages: f64,
    /// Genre with the most DVD items; ties resolve lexicographically
    pub most_popular_dvd_genre: Option<String>,
    /// Share of items currently available, in percent
    pub percentage_available: f64,
}

#[derive(Serialize, ToSchema)]
pub struct CirculationStats {
    /// Registered members
    pub total_members: i64,
    /// Outstanding loans
    pub active_loans: i64,
    /// Outstanding loans past their due date
    pub overdue_loans: i64,
    /// Ledger length
    pub recorded_transactions: i64,
}

#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    /// Label
    pub label: String,
    /// Value
    pub value: i64,
}

/// Query parameters for the search comparison endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchComparisonQuery {
    /// Author name to search for on both paths
    pub author: String,
}

/// Timing comparison of the linear and indexed author-search paths
#[derive(Serialize, ToSchema)]
pub struct SearchComparison {
    pub author: String,
    /// Number of matching books
    pub matches: i64,
    /// Elapsed time of the full-scan path, in microseconds
    pub linear_micros: u64,
    /// Elapsed time of the indexed path, in microseconds
    pub indexed_micros: u64,
    /// Whether both paths returned the same result set
    pub results_match: bool,
}

/// Get library statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Library statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}

/// Compare linear and indexed author search for one author
#[utoipa::path(
    get,
    path = "/stats/search-performance",
    tag = "stats",
    params(SearchComparisonQuery),
    responses(
        (status = 200, description = "Search path comparison", body = SearchComparison)
    )
)]
pub async fn search_performance(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchComparisonQuery>,
) -> AppResult<Json<SearchComparison>> {
    let comparison = state
        .services
        .stats
        .compare_author_search(&query.author)
        .await?;
    Ok(Json(comparison))
}
