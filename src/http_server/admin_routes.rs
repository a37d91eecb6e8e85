//! Admin panel routes.
//!
//! Everything in here sits behind the admin gate: the middleware runs
//! before any handler, so a denied request performs no store access and
//! no mutation. Handlers can assume a valid admin session.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, patch, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::responses::ApiError;
use super::state::AppState;
use crate::auth::gate::require_admin;
use crate::store::{
    Inquiry, InquiryStatus, MenuItem, MenuItemInput, NewTestimonial, Testimonial,
};

/// Admin routes, all behind the authorization gate
pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/menu", get(list_menu_handler).post(create_menu_item_handler))
        .route(
            "/menu/:id",
            put(update_menu_item_handler).delete(delete_menu_item_handler),
        )
        .route("/inquiries", get(list_inquiries_handler))
        .route("/inquiries/:id/status", patch(set_inquiry_status_handler))
        .route("/inquiries/:id", delete(delete_inquiry_handler))
        .route(
            "/testimonials",
            get(list_testimonials_handler).post(create_testimonial_handler),
        )
        .route(
            "/testimonials/:id/approval",
            patch(set_testimonial_approval_handler),
        )
        .route("/testimonials/:id", delete(delete_testimonial_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .with_state(state)
}

// ==================
// Dashboard
// ==================

/// Counts shown on the admin landing page
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub menu_items: i64,
    pub new_inquiries: i64,
    pub pending_testimonials: i64,
}

async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSummary>, ApiError> {
    Ok(Json(DashboardSummary {
        menu_items: state.menu.count().await?,
        new_inquiries: state.inquiries.count_new().await?,
        pending_testimonials: state.testimonials.count_pending().await?,
    }))
}

// ==================
// Menu
// ==================

async fn list_menu_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(state.menu.list_all().await?))
}

async fn create_menu_item_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MenuItemInput>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }

    let item = state.menu.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_menu_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<MenuItemInput>,
) -> Result<Json<MenuItem>, ApiError> {
    Ok(Json(state.menu.update(id, input).await?))
}

async fn delete_menu_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.menu.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Inquiries
// ==================

#[derive(Debug, Deserialize)]
struct InquiryListQuery {
    status: Option<InquiryStatus>,
}

async fn list_inquiries_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InquiryListQuery>,
) -> Result<Json<Vec<Inquiry>>, ApiError> {
    Ok(Json(state.inquiries.list(query.status).await?))
}

#[derive(Debug, Deserialize)]
struct SetStatusBody {
    status: InquiryStatus,
}

async fn set_inquiry_status_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<Inquiry>, ApiError> {
    Ok(Json(state.inquiries.set_status(id, body.status).await?))
}

async fn delete_inquiry_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.inquiries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Testimonials
// ==================

async fn list_testimonials_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(state.testimonials.list_all().await?))
}

async fn create_testimonial_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>), ApiError> {
    if input.author.trim().is_empty() || input.quote.trim().is_empty() {
        return Err(ApiError::Validation(
            "author and quote are required".to_string(),
        ));
    }

    let testimonial = state.testimonials.create(input).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

#[derive(Debug, Deserialize)]
struct SetApprovalBody {
    approved: bool,
}

async fn set_testimonial_approval_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetApprovalBody>,
) -> Result<Json<Testimonial>, ApiError> {
    Ok(Json(
        state.testimonials.set_approved(id, body.approved).await?,
    ))
}

async fn delete_testimonial_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.testimonials.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
