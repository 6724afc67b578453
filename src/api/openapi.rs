//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, items, loans, members, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblion API",
        version = "0.3.0",
        description = "Library catalog and circulation REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::search_by_author,
        // Members
        members::create_member,
        members::get_member,
        // Loans
        loans::borrow_item,
        loans::return_item,
        loans::renew_loan,
        loans::list_overdue,
        loans::get_member_loans,
        // Stats
        stats::get_stats,
        stats::search_performance,
    ),
    components(
        schemas(
            // Items
            crate::models::item::LibraryItem,
            crate::models::item::ItemDetails,
            crate::models::item::Category,
            items::CreateItemRequest,
            items::ItemListResponse,
            // Members
            crate::models::member::Member,
            crate::models::member::CreateMember,
            // Loans
            crate::models::loan::BorrowRecord,
            crate::models::loan::LoanDetails,
            crate::models::loan::OverdueLoan,
            crate::models::transaction::Transaction,
            crate::models::transaction::TransactionKind,
            loans::LoanRequest,
            loans::BorrowResponse,
            loans::ReturnResponse,
            loans::RenewResponse,
            // Stats
            stats::StatsResponse,
            stats::CatalogStats,
            stats::CirculationStats,
            stats::StatEntry,
            stats::SearchComparison,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Catalog item management"),
        (name = "members", description = "Member management"),
        (name = "loans", description = "Circulation: borrow, return, renew"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
