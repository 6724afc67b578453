//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{LoanDetails, OverdueLoan},
};

/// Borrow / return / renew request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoanRequest {
    /// Member id
    pub member_id: String,
    /// Item id
    pub item_id: String,
}

/// Borrow response with the computed due date
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub item_id: String,
    pub member_id: String,
    /// Due date (ISO 8601 format)
    pub due_date: DateTime<Utc>,
    /// Status message
    pub message: String,
}

/// Return response with the computed late fee
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub item_id: String,
    pub member_id: String,
    /// Whole days past the due date
    pub days_late: i64,
    /// Late fee owed
    #[schema(value_type = String)]
    pub fee: Decimal,
    /// Status message
    pub message: String,
}

/// Renew response with the new due date
#[derive(Serialize, ToSchema)]
pub struct RenewResponse {
    pub item_id: String,
    pub member_id: String,
    /// New due date (ISO 8601 format)
    pub due_date: DateTime<Utc>,
    /// Renewals granted so far
    pub renewals: u32,
    /// Status message
    pub message: String,
}

/// Borrow an item
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Item borrowed", body = BorrowResponse),
        (status = 404, description = "Member or item not found"),
        (status = 409, description = "Item is not available"),
        (status = 422, description = "Borrow limit reached")
    )
)]
pub async fn borrow_item(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let outcome = state
        .services
        .circulation
        .borrow(&request.member_id, &request.item_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            item_id: outcome.item_id,
            member_id: outcome.member_id,
            due_date: outcome.due_date,
            message: "Item borrowed successfully".to_string(),
        }),
    ))
}

/// Return a borrowed item
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Item returned", body = ReturnResponse),
        (status = 404, description = "Member not found"),
        (status = 422, description = "Item is not borrowed by this member")
    )
)]
pub async fn return_item(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<ReturnResponse>> {
    let outcome = state
        .services
        .circulation
        .return_item(&request.member_id, &request.item_id)
        .await?;

    Ok(Json(ReturnResponse {
        item_id: outcome.item_id,
        member_id: outcome.member_id,
        days_late: outcome.days_late,
        fee: outcome.fee,
        message: "Item returned successfully".to_string(),
    }))
}

/// Renew a loan
#[utoipa::path(
    post,
    path = "/loans/renew",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Loan renewed", body = RenewResponse),
        (status = 422, description = "Not borrowed by this member or renewal cap reached")
    )
)]
pub async fn renew_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<RenewResponse>> {
    let outcome = state
        .services
        .circulation
        .renew(&request.member_id, &request.item_id)
        .await?;

    Ok(Json(RenewResponse {
        item_id: outcome.item_id,
        member_id: outcome.member_id,
        due_date: outcome.due_date,
        renewals: outcome.renewals,
        message: format!("Loan renewed ({} renewal(s))", outcome.renewals),
    }))
}

/// List all overdue loans
#[utoipa::path(
    get,
    path = "/loans/overdue",
    tag = "loans",
    responses(
        (status = 200, description = "Overdue loans", body = Vec<OverdueLoan>)
    )
)]
pub async fn list_overdue(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<OverdueLoan>>> {
    let overdue = state.services.circulation.overdue_loans().await;
    Ok(Json(overdue))
}

/// Get active loans for a member
#[utoipa::path(
    get,
    path = "/members/{id}/loans",
    tag = "loans",
    params(
        ("id" = String, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Member's active loans", body = Vec<LoanDetails>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member_loans(
    State(state): State<crate::AppState>,
    Path(member_id): Path<String>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.circulation.member_loans(&member_id).await?;
    Ok(Json(loans))
}
